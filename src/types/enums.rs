//! Closed value sets documented by the gateway.
//!
//! These are used by [`PaymentRequest`](crate::types::PaymentRequest). The flat
//! [`PaymentParameters`](crate::types::PaymentParameters) mapping accepts any
//! string for the same keys.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The operation requested from the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Pay,
    Hold,
    Subscribe,
    Paydonate,
    Auth,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Pay => "pay",
            Action::Hold => "hold",
            Action::Subscribe => "subscribe",
            Action::Paydonate => "paydonate",
            Action::Auth => "auth",
        }
    }
}

/// Payment currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Rub,
    Uah,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Rub => "RUB",
            Currency::Uah => "UAH",
        }
    }
}

/// Checkout page language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    #[default]
    Uk,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Uk => "uk",
            Language::En => "en",
        }
    }
}

/// Payment method offered on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    Card,
    Liqpay,
    Privat24,
    Masterpass,
    MomentPart,
    Cash,
    Invoice,
    Qr,
}

impl PayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayType::Card => "card",
            PayType::Liqpay => "liqpay",
            PayType::Privat24 => "privat24",
            PayType::Masterpass => "masterpass",
            PayType::MomentPart => "moment_part",
            PayType::Cash => "cash",
            PayType::Invoice => "invoice",
            PayType::Qr => "qr",
        }
    }
}

/// Billing period of a regular payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscribePeriodicity {
    Month,
    Year,
}

impl SubscribePeriodicity {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscribePeriodicity::Month => "month",
            SubscribePeriodicity::Year => "year",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(Action, Currency, Language, PayType, SubscribePeriodicity);
