//! Request and payload types used across the LiqPay client.

mod amount;
mod enums;
mod params;
mod request;

pub use amount::*;
pub use enums::*;
pub use params::*;
pub use request::*;
