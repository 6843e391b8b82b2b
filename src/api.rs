//! Calls to the gateway API over HTTP.
//!
//! Every call posts the signed `data` and `signature` fields, form-encoded, to
//! the API base URL joined with a path such as `request`. Each call completes
//! exactly once: [`Liqpay::api`] through its returned `Result`, and
//! [`Liqpay::api_with_callbacks`] by invoking exactly one of its callbacks.

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde_json::Value;
use url::Url;

use crate::{client::Liqpay, errors::Error, types::PaymentParameters};

/// The HTTP collaborator used for API calls.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    pub client: reqwest::Client,
    pub headers: HeaderMap,
}

/// A successfully received API response body.
///
/// Gateway business errors (e.g. `"status": "error"`) are also delivered here,
/// since the HTTP exchange itself succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The body parsed as JSON.
    Json(Value),
    /// The body could not be parsed as JSON and is passed through as-is.
    Raw(String),
}

impl ApiResponse {
    fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(json) => ApiResponse::Json(json),
            Err(_) => ApiResponse::Raw(body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(json) => Some(json),
            ApiResponse::Raw(_) => None,
        }
    }

    /// The gateway's `status` field, if present.
    pub fn status(&self) -> Option<&str> {
        self.as_json()?.get("status")?.as_str()
    }

    /// Whether the gateway reported a business-level error in the body.
    pub fn is_gateway_error(&self) -> bool {
        let Some(json) = self.as_json() else {
            return false;
        };
        ["status", "result"]
            .iter()
            .any(|key| json.get(key).and_then(Value::as_str) == Some("error"))
    }
}

/// A response received with a non-success HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedResponse {
    pub status: StatusCode,
    pub body: String,
}

/// A transport-level failure of an API call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(StatusCode),
}

/// Errors returned by [`Liqpay::api`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The parameters could not be normalized, serialized or signed.
    #[error(transparent)]
    InvalidArgument(#[from] Error),
    /// The request failed in transit. `response` is set when the gateway answered.
    #[error("{error}")]
    Transport {
        #[source]
        error: TransportError,
        response: Option<FailedResponse>,
    },
}

impl ApiError {
    fn transport(error: impl Into<TransportError>) -> Self {
        ApiError::Transport {
            error: error.into(),
            response: None,
        }
    }
}

impl Liqpay {
    /// Use a preconfigured HTTP client, e.g. one with a timeout or a proxy.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http.client = client;
        self
    }

    /// Attach a header to every API request.
    pub fn header(mut self, key: &HeaderName, value: &HeaderValue) -> Self {
        self.http.headers.insert(key, value.to_owned());
        self
    }

    /// Resolve `path` against the API base URL.
    ///
    /// The result must stay under the base URL, so absolute URLs, rooted paths
    /// and `..` segments that climb out of it are rejected.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.api_url.join("./").map_err(ApiError::transport)?;
        let url = base.join(path).map_err(ApiError::transport)?;
        if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
            return Err(Error::invalid_argument(format!(
                "API path '{path}' resolves outside of {base}"
            ))
            .into());
        }
        Ok(url)
    }

    /// Sign `params` and post them to `path` under the API base URL.
    ///
    /// Parameter errors are reported as [`ApiError::InvalidArgument`] before any
    /// I/O happens.
    pub async fn api(
        &self,
        path: &str,
        params: &PaymentParameters,
    ) -> Result<ApiResponse, ApiError> {
        let form = self.payment_form(params)?;
        let url = self.endpoint(path)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Calling LiqPay API: url={}", url);

        let response = self
            .http
            .client
            .post(url)
            .headers(self.http.headers.clone())
            .form(&[
                ("data", form.data.as_str()),
                ("signature", form.signature.as_str()),
            ])
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::transport)?;

        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!("LiqPay API returned status {}", status);

            return Err(ApiError::Transport {
                error: TransportError::UnexpectedStatus(status),
                response: Some(FailedResponse { status, body }),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("LiqPay API responded: status={}", status);

        Ok(ApiResponse::from_body(body))
    }

    /// Callback flavor of [`api`](Self::api).
    ///
    /// Parameter errors are returned directly and no callback runs. Otherwise
    /// exactly one of `on_success` or `on_error` is invoked; `on_error` receives
    /// the failed response when the gateway answered with a non-success status.
    pub async fn api_with_callbacks<S, E>(
        &self,
        path: &str,
        params: &PaymentParameters,
        on_success: S,
        on_error: E,
    ) -> Result<(), Error>
    where
        S: FnOnce(ApiResponse),
        E: FnOnce(TransportError, Option<FailedResponse>),
    {
        match self.api(path, params).await {
            Ok(response) => on_success(response),
            Err(ApiError::InvalidArgument(err)) => return Err(err),
            Err(ApiError::Transport { error, response }) => on_error(error, response),
        }
        Ok(())
    }
}
