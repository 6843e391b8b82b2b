//! A typed builder for the documented request fields.
//!
//! Every optional group (sender, letter of credit, regular payment, one-click,
//! product info, ...) is just a set of flat optional fields; the result is
//! flattened into a [`PaymentParameters`] mapping.

use base64::{Engine, prelude::BASE64_STANDARD};
use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    types::{
        Action, Amount, Currency, Language, PayType, PaymentParameters, SubscribePeriodicity,
    },
};

/// Airline ticket details, sent base64-encoded in the `dae` field.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailAddenda {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_line: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passenger_name: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_city: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_city: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
}

impl DetailAddenda {
    /// Encode as base64 of the compact JSON text.
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(BASE64_STANDARD.encode(json))
    }

    /// Decode a `dae` field value.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = BASE64_STANDARD
            .decode(encoded)
            .map_err(|err| Error::invalid_argument_with("Failed to decode dae field", err))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| Error::invalid_argument_with("Failed to parse dae field", err))
    }
}

fn serialize_dae<S>(
    dae: &Option<DetailAddenda>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match dae {
        Some(dae) => {
            let encoded = dae.encode().map_err(serde::ser::Error::custom)?;
            serializer.serialize_str(&encoded)
        }
        None => serializer.serialize_none(),
    }
}

/// A payment request with typed fields.
///
/// Unset optional fields are omitted. Fields are emitted in declaration order,
/// followed by any [`extra`](PaymentRequest::extra) parameters.
///
/// ```
/// use liqpay::types::{Action, Currency, PaymentParameters, PaymentRequest};
///
/// let request = PaymentRequest::builder()
///     .action(Action::Pay)
///     .amount(1)
///     .currency(Currency::Usd)
///     .description("x")
///     .order_id("1")
///     .build();
///
/// let params = PaymentParameters::try_from(request).unwrap();
/// assert_eq!(
///     params.serialize().unwrap().as_str(),
///     r#"{"action":"pay","amount":1,"currency":"USD","description":"x","order_id":"1"}"#
/// );
/// ```
#[derive(Builder, Debug, Clone, Serialize)]
pub struct PaymentRequest {
    /// API version; the client default is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub action: Action,
    #[builder(into)]
    pub amount: Amount,
    pub currency: Currency,
    #[builder(into)]
    pub description: String,
    #[builder(into)]
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paytypes: Option<PayType>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    // Splitting
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_rules: Option<String>,

    // Sender
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_address: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_city: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_country_code: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_first_name: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_last_name: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_postal_code: Option<String>,

    // Letter of credit
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_of_credit: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_of_credit_date: Option<String>,

    // Regular payment
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe_date_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe_periodicity: Option<SubscribePeriodicity>,

    // One-click payment
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurringbytoken: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_user_id: Option<String>,

    // Other
    #[serde(
        serialize_with = "serialize_dae",
        skip_serializing_if = "Option::is_none"
    )]
    pub dae: Option<DetailAddenda>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,

    /// Additional parameters appended after the typed fields.
    #[builder(default)]
    #[serde(skip)]
    pub extra: PaymentParameters,
}

impl TryFrom<PaymentRequest> for PaymentParameters {
    type Error = Error;

    fn try_from(request: PaymentRequest) -> Result<Self> {
        let mut map = match serde_json::to_value(&request)? {
            serde_json::Value::Object(map) => map,
            _ => {
                return Err(Error::invalid_argument(
                    "Payment request did not serialize to an object",
                ));
            }
        };
        for (key, value) in request.extra.into_json() {
            map.entry(key).or_insert(value);
        }
        Ok(PaymentParameters::from_json_unchecked(map))
    }
}
