//! Checkout forms.
//!
//! A [`PaymentForm`] is the `{data, signature}` pair the checkout page expects.
//! It can be posted by any means or rendered into an auto-submitting HTML form
//! with [`PaymentForm::to_html`].

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{signature::Signature, types::SerializedPayload};

const FORM_ID: &str = "liqpay-checkout";

/// The signed `{data, signature}` pair for one checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    pub data: SerializedPayload,
    pub signature: Signature,
}

impl PaymentForm {
    /// Render a minimal HTML form that posts to `action` and submits itself on load.
    ///
    /// `language` selects the localized button image.
    pub fn to_html(&self, action: &Url, language: &str) -> String {
        format!(
            concat!(
                r#"<form id="{id}" method="POST" action="{action}" accept-charset="utf-8">"#,
                "\n",
                r#"  <input type="hidden" name="data" value="{data}" />"#,
                "\n",
                r#"  <input type="hidden" name="signature" value="{signature}" />"#,
                "\n",
                r#"  <input type="image" src="//static.liqpay.ua/buttons/p1{language}.radius.png" name="btn_text" />"#,
                "\n",
                "</form>\n",
                r#"<script>document.getElementById("{id}").submit();</script>"#,
                "\n",
            ),
            id = FORM_ID,
            action = escape_attr(action.as_str()),
            data = escape_attr(self.data.as_str()),
            signature = escape_attr(self.signature.as_str()),
            language = escape_attr(language),
        )
    }
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
