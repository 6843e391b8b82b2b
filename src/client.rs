//! The [`Liqpay`] client: parameter normalization, signing and checkout forms.

use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::{
    config::LiqpayConfig,
    errors::{Error, Result},
    form::PaymentForm,
    signature::{self, Signature},
    types::{Language, ParamValue, PaymentParameters, SerializedPayload},
};

/// Merchant key pair. Immutable for the lifetime of a client.
#[derive(Clone)]
pub struct Credentials {
    public_key: String,
    private_key: String,
}

impl Credentials {
    /// Fails with [`Error::InvalidArgument`] if either key is empty.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Result<Self> {
        let public_key = public_key.into();
        let private_key = private_key.into();
        if public_key.is_empty() {
            return Err(Error::invalid_argument("public_key is empty"));
        }
        if private_key.is_empty() {
            return Err(Error::invalid_argument("private_key is empty"));
        }
        Ok(Credentials {
            public_key,
            private_key,
        })
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub(crate) fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// A LiqPay client bound to one merchant key pair.
///
/// Cloning is cheap and clones share the same credentials.
///
/// ```
/// use liqpay::{Liqpay, types::PaymentParameters};
///
/// let liqpay = Liqpay::new("pub", "sandbox_key").unwrap();
/// let form = liqpay
///     .payment_form(
///         &PaymentParameters::new()
///             .with("action", "pay")
///             .with("amount", 1)
///             .with("currency", "USD")
///             .with("description", "x")
///             .with("order_id", "1"),
///     )
///     .unwrap();
///
/// assert_eq!(form.signature.as_str(), "pIxN15QtpH8oQcYUl3l8VvlCXAM=");
/// ```
#[derive(Debug, Clone)]
pub struct Liqpay {
    pub(crate) credentials: Arc<Credentials>,
    pub(crate) api_url: Url,
    pub(crate) checkout_url: Url,
    pub(crate) version: u32,
    #[cfg(feature = "api-client")]
    pub(crate) http: crate::api::HttpClient,
}

impl Liqpay {
    /// Create a client with the default gateway URLs.
    ///
    /// Fails with [`Error::InvalidArgument`] if either key is empty.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Result<Self> {
        Self::from_config(
            LiqpayConfig::builder()
                .public_key(public_key)
                .private_key(private_key)
                .build(),
        )
    }

    pub fn from_config(config: LiqpayConfig) -> Result<Self> {
        let credentials = Credentials::new(config.public_key, config.private_key)?;

        Ok(Liqpay {
            credentials: Arc::new(credentials),
            api_url: config.api_url,
            checkout_url: config.checkout_url,
            version: config.version,
            #[cfg(feature = "api-client")]
            http: crate::api::HttpClient::default(),
        })
    }

    pub fn public_key(&self) -> &str {
        self.credentials.public_key()
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn checkout_url(&self) -> &Url {
        &self.checkout_url
    }

    /// Validate and default a parameter mapping.
    ///
    /// `version` and `public_key` are injected, in that order and ahead of the
    /// caller's keys, only when absent. The caller's mapping is not modified.
    pub fn normalize(&self, params: &PaymentParameters) -> Result<PaymentParameters> {
        if params.is_empty() {
            return Err(Error::invalid_argument("Parameters must not be empty"));
        }

        let mut normalized = PaymentParameters::new();
        if !params.contains_key("version") {
            normalized.insert("version", self.version);
        }
        if !params.contains_key("public_key") {
            normalized.insert("public_key", self.credentials.public_key());
        }
        for (key, value) in params.as_json() {
            normalized.insert(key.as_str(), ParamValue::try_from(value.clone())?);
        }

        Ok(normalized)
    }

    /// [`normalize`](Self::normalize) for arbitrary JSON input.
    ///
    /// Fails if the input is null, not an object, or holds non-scalar values.
    pub fn normalize_json(&self, params: Value) -> Result<PaymentParameters> {
        let params = PaymentParameters::try_from(params)?;
        self.normalize(&params)
    }

    /// Sign a serialized payload with this client's private key.
    pub fn sign(&self, data: &SerializedPayload) -> Result<Signature> {
        signature::sign(self.credentials.private_key(), data)
    }

    /// Normalize, serialize and sign the parameters.
    pub fn payment_form(&self, params: &PaymentParameters) -> Result<PaymentForm> {
        let data = self.normalize(params)?.serialize()?;
        let signature = self.sign(&data)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Built payment form: order_id={:?}, data_len={}",
            params.get_str("order_id"),
            data.as_str().len()
        );

        Ok(PaymentForm { data, signature })
    }

    /// Signature of the normalized parameters.
    pub fn form_signature(&self, params: &PaymentParameters) -> Result<Signature> {
        self.payment_form(params).map(|form| form.signature)
    }

    /// Render an auto-submitting HTML checkout form.
    ///
    /// The button image follows the `language` parameter, `uk` by default.
    pub fn html_form(&self, params: &PaymentParameters) -> Result<String> {
        let form = self.payment_form(params)?;
        let language = params
            .get_str("language")
            .unwrap_or(Language::default().as_str());

        Ok(form.to_html(&self.checkout_url, language))
    }

    /// Verify a `{data, signature}` pair posted back by the gateway and decode it.
    pub fn verify_callback(&self, data: &str, signature: &str) -> Result<Value> {
        let expected = self.sign(&SerializedPayload(data.to_owned()))?;
        if !expected.matches(signature) {
            #[cfg(feature = "tracing")]
            tracing::warn!("Rejected callback with mismatching signature");

            return Err(Error::invalid_argument("Callback signature does not match"));
        }

        serde_json::from_str(data)
            .map_err(|err| Error::invalid_argument_with("Callback data is not valid JSON", err))
    }
}
