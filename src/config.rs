use std::sync::LazyLock;

use bon::Builder;
use url::Url;

use crate::errors::{Error, Result};

/// Default API version injected into every request.
pub const DEFAULT_VERSION: u32 = 3;

/// Base URL that API paths such as `request` are joined onto.
pub const DEFAULT_API_URL: &str = "https://www.liqpay.ua/api/";

/// Checkout page that HTML forms post to.
pub const DEFAULT_CHECKOUT_URL: &str = "https://www.liqpay.ua/api/3/checkout";

/// Client configuration.
///
/// ```
/// use liqpay::config::LiqpayConfig;
///
/// let config = LiqpayConfig::builder()
///     .public_key("sandbox_i000000")
///     .private_key("sandbox_secret")
///     .build();
///
/// assert_eq!(config.version, 3);
/// assert_eq!(config.api_url.as_str(), "https://www.liqpay.ua/api/");
/// ```
#[derive(Builder, Clone)]
pub struct LiqpayConfig {
    /// Merchant public key.
    #[builder(into)]
    pub public_key: String,
    /// Merchant private key, used only for signing.
    #[builder(into)]
    pub private_key: String,
    /// API base URL. Must end with `/` for paths to be joined under it.
    #[builder(default = default_api_url())]
    pub api_url: Url,
    /// Checkout page URL.
    #[builder(default = default_checkout_url())]
    pub checkout_url: Url,
    /// API version used when a request does not set one.
    #[builder(default = DEFAULT_VERSION)]
    pub version: u32,
}

impl std::fmt::Debug for LiqpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiqpayConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("checkout_url", &self.checkout_url.as_str())
            .field("version", &self.version)
            .finish()
    }
}

impl LiqpayConfig {
    /// Read configuration from the environment.
    ///
    /// `LIQPAY_PUBLIC_KEY` and `LIQPAY_PRIVATE_KEY` are required;
    /// `LIQPAY_API_URL` and `LIQPAY_CHECKOUT_URL` override the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| Error::invalid_argument(format!("{name} is not set")))
        };
        let url = |name: &str, default: fn() -> Url| match lookup(name) {
            Some(raw) => Url::parse(&raw)
                .map_err(|err| Error::invalid_argument_with(format!("{name} is not a URL"), err)),
            None => Ok(default()),
        };

        Ok(LiqpayConfig {
            public_key: required("LIQPAY_PUBLIC_KEY")?,
            private_key: required("LIQPAY_PRIVATE_KEY")?,
            api_url: url("LIQPAY_API_URL", default_api_url)?,
            checkout_url: url("LIQPAY_CHECKOUT_URL", default_checkout_url)?,
            version: DEFAULT_VERSION,
        })
    }
}

static DEFAULT_API: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL"));

static DEFAULT_CHECKOUT: LazyLock<Url> = LazyLock::new(|| {
    Url::parse(DEFAULT_CHECKOUT_URL).expect("DEFAULT_CHECKOUT_URL is a valid URL")
});

fn default_api_url() -> Url {
    DEFAULT_API.clone()
}

fn default_checkout_url() -> Url {
    DEFAULT_CHECKOUT.clone()
}
