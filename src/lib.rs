//! # LiqPay
//!
//! A client SDK for the LiqPay payment gateway.
//!
//! It builds signed payment parameters, renders auto-submitting checkout forms
//! and calls the gateway API. The gateway authenticates every request with
//! `base64(sha1(private_key + data + private_key))`, where `data` is the compact
//! JSON of the request parameters.
//!
//! ## Core Components Overview
//!
//! - **[`client`]**: The [`Liqpay`] client: normalization, signing and forms.
//! - **[`types`]**: The flat [`PaymentParameters`](types::PaymentParameters) mapping,
//!   a typed [`PaymentRequest`](types::PaymentRequest) builder and the gateway's value sets.
//! - **[`signature`]**: The SHA-1/base64 signature primitives.
//! - **[`form`]**: The `{data, signature}` pair and its HTML rendering.
//! - **[`config`]**: Client configuration.
//! - **[`api`]**: HTTP calls to the gateway API (feature `api-client`).
//!
//! ## Quick Start
//!
//! ```
//! use liqpay::{
//!     Liqpay,
//!     types::{Action, Currency, PaymentParameters, PaymentRequest},
//! };
//!
//! let liqpay = Liqpay::new("sandbox_i000000", "sandbox_secret").unwrap();
//!
//! let request = PaymentRequest::builder()
//!     .action(Action::Pay)
//!     .amount(100)
//!     .currency(Currency::Uah)
//!     .description("Coffee beans")
//!     .order_id("order-42")
//!     .build();
//!
//! let html = liqpay
//!     .html_form(&PaymentParameters::try_from(request).unwrap())
//!     .unwrap();
//! assert!(html.contains(r#"name="signature""#));
//! ```
//!
//! ## Calling the API
//!
//! ```no_run
//! # async fn run() -> Result<(), liqpay::api::ApiError> {
//! use liqpay::{Liqpay, types::PaymentParameters};
//!
//! let liqpay = Liqpay::new("sandbox_i000000", "sandbox_secret")?;
//! let status = liqpay
//!     .api(
//!         "request",
//!         &PaymentParameters::new()
//!             .with("action", "status")
//!             .with("order_id", "order-42"),
//!     )
//!     .await?;
//!
//! if status.is_gateway_error() {
//!     // business-level failure reported by the gateway
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod form;
pub mod signature;
pub mod types;

#[cfg(feature = "api-client")]
pub mod api;

pub use client::{Credentials, Liqpay};
