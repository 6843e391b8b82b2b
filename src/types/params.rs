//! The flat parameter mapping describing one payment request, and its
//! canonical serialized form.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{
    errors::{Error, Result},
    types::{Action, Amount, Currency, Language, PayType, SubscribePeriodicity},
};

/// A single parameter value: a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValue(Value);

impl ParamValue {
    /// Create a numeric value from a float. Fails if the value is not finite.
    pub fn from_f64(value: f64) -> Result<Self> {
        Amount::from_f64(value).map(ParamValue::from)
    }

    /// Returns the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Returns the value as a JSON number, if it is numeric.
    pub fn as_number(&self) -> Option<&Number> {
        match &self.0 {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_json(self) -> Value {
        self.0
    }
}

impl TryFrom<Value> for ParamValue {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(_) => Ok(ParamValue(value)),
            Value::Number(number) => Amount::from_number(number).map(ParamValue::from),
            other => Err(Error::invalid_argument(format!(
                "Parameter values must be strings or numbers, got {other}"
            ))),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue(Value::String(value.to_owned()))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue(Value::String(value))
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue(Value::String(value.clone()))
    }
}

impl From<Amount> for ParamValue {
    fn from(value: Amount) -> Self {
        ParamValue(Value::Number(value.0))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue(Value::Number(Number::from(value)))
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64, i32, i64);

macro_rules! impl_from_closed_set {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue(Value::String(value.as_str().to_owned()))
                }
            }
        )*
    };
}

impl_from_closed_set!(Action, Currency, Language, PayType, SubscribePeriodicity);

impl Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// An ordered, flat mapping of payment request parameters.
///
/// Keys keep their insertion order, which is also the order in which they are
/// serialized. Re-inserting an existing key replaces its value in place.
///
/// ```
/// use liqpay::types::PaymentParameters;
///
/// let params = PaymentParameters::new()
///     .with("action", "pay")
///     .with("amount", 1)
///     .with("currency", "USD");
///
/// assert_eq!(
///     params.serialize().unwrap().as_str(),
///     r#"{"action":"pay","amount":1,"currency":"USD"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParameters(Map<String, Value>);

impl PaymentParameters {
    pub fn new() -> Self {
        PaymentParameters(Map::new())
    }

    /// Insert a parameter, returning the previous value for the key if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0
            .insert(key.into(), value.into().into_json())
            .map(ParamValue)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<ParamValue> {
        self.0.get(key).cloned().map(ParamValue)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.shift_remove(key).map(ParamValue)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the parameters in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Serialize to compact JSON text, keeping insertion order.
    pub fn serialize(&self) -> Result<SerializedPayload> {
        let json = serde_json::to_string(&self.0)?;
        Ok(SerializedPayload(json))
    }

    pub fn as_json(&self) -> &Map<String, Value> {
        &self.0
    }

    pub(crate) fn into_json(self) -> Map<String, Value> {
        self.0
    }

    pub(crate) fn from_json_unchecked(map: Map<String, Value>) -> Self {
        PaymentParameters(map)
    }
}

impl TryFrom<Map<String, Value>> for PaymentParameters {
    type Error = Error;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        let mut params = PaymentParameters::new();
        for (key, value) in map {
            let value = ParamValue::try_from(value).map_err(|err| {
                Error::invalid_argument_with(format!("Invalid value for parameter '{key}'"), err)
            })?;
            params.insert(key, value);
        }
        Ok(params)
    }
}

impl TryFrom<Value> for PaymentParameters {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => PaymentParameters::try_from(map),
            Value::Null => Err(Error::invalid_argument("Parameters must not be null")),
            other => Err(Error::invalid_argument(format!(
                "Parameters must be a JSON object, got {other}"
            ))),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for PaymentParameters
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = PaymentParameters::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for PaymentParameters
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for PaymentParameters {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PaymentParameters {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        PaymentParameters::try_from(map).map_err(serde::de::Error::custom)
    }
}

/// The canonical JSON text of a [`PaymentParameters`] mapping.
///
/// This is the exact text that is signed and sent in the `data` form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializedPayload(pub String);

impl SerializedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for SerializedPayload {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SerializedPayload {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SerializedPayload(s))
    }
}

impl Display for SerializedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serialization_keeps_insertion_order() {
        let params = PaymentParameters::from([
            ("order_id", ParamValue::from("1")),
            ("amount", ParamValue::from(10)),
            ("action", ParamValue::from(Action::Pay)),
        ]);

        assert_eq!(
            params.serialize().unwrap().as_str(),
            r#"{"order_id":"1","amount":10,"action":"pay"}"#
        );
    }

    #[test]
    fn reinserting_keeps_position() {
        let mut params = PaymentParameters::new()
            .with("a", "1")
            .with("b", "2")
            .with("c", "3");

        let previous = params.insert("a", "updated");

        assert_eq!(previous, Some(ParamValue::from("1")));
        assert_eq!(params.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn removing_keeps_remaining_order() {
        let mut params = PaymentParameters::new()
            .with("a", "1")
            .with("b", "2")
            .with("c", "3");

        params.remove("a");

        assert_eq!(params.keys().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn serialization_escapes_json_text() {
        let params = PaymentParameters::new().with("description", "Say \"hi\"\n\\ <ok>");

        assert_eq!(
            params.serialize().unwrap().as_str(),
            r#"{"description":"Say \"hi\"\n\\ <ok>"}"#
        );
    }

    #[test]
    fn serialization_is_deterministic() {
        let build = || {
            PaymentParameters::new()
                .with("action", "pay")
                .with("amount", ParamValue::from_f64(12.5).unwrap())
                .with("description", "тест")
        };

        assert_eq!(build().serialize().unwrap(), build().serialize().unwrap());
    }

    #[test]
    fn non_scalar_values_are_rejected() {
        let err = PaymentParameters::try_from(json!({ "nested": { "a": 1 } })).unwrap_err();
        assert!(err.to_string().contains("nested"));

        assert!(PaymentParameters::try_from(json!({ "flag": true })).is_err());
        assert!(PaymentParameters::try_from(json!(null)).is_err());
        assert!(PaymentParameters::try_from(json!(["a"])).is_err());
    }

    #[test]
    fn json_integral_floats_serialize_as_integers() {
        let params: PaymentParameters =
            serde_json::from_str(r#"{"amount":100.0,"fee":2.5}"#).unwrap();
        assert_eq!(
            params.serialize().unwrap().as_str(),
            r#"{"amount":100,"fee":2.5}"#
        );

        let params = PaymentParameters::try_from(json!({ "amount": 1.0 })).unwrap();
        assert_eq!(params.serialize().unwrap().as_str(), r#"{"amount":1}"#);
        assert_eq!(params, PaymentParameters::new().with("amount", 1));
    }

    #[test]
    fn deserializes_from_json_object() {
        let params: PaymentParameters =
            serde_json::from_str(r#"{"version":3,"action":"status","order_id":"42"}"#).unwrap();

        assert_eq!(params.get_str("action"), Some("status"));
        assert_eq!(
            params.get("version").and_then(|v| v.as_number().cloned()),
            Some(Number::from(3))
        );
    }
}
