#![cfg(feature = "api-client")]

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use http::{HeaderName, HeaderValue, StatusCode};
use liqpay::{
    Liqpay,
    api::{ApiError, ApiResponse, TransportError},
    config::LiqpayConfig,
    signature::sign,
    types::{PaymentParameters, SerializedPayload},
};
use serde_json::json;
use url::Url;
use wiremock::{
    Match, Mock, MockServer, Request, ResponseTemplate,
    matchers::{header, method, path},
};

const PRIVATE_KEY: &str = "sandbox_key";

/// Matches form-encoded bodies whose `signature` is valid for their `data`.
struct SignedForm;

impl Match for SignedForm {
    fn matches(&self, request: &Request) -> bool {
        let fields: HashMap<String, String> = url::form_urlencoded::parse(&request.body)
            .into_owned()
            .collect();
        let (Some(data), Some(signature)) = (fields.get("data"), fields.get("signature")) else {
            return false;
        };
        let Ok(expected) = sign(PRIVATE_KEY, &SerializedPayload(data.clone())) else {
            return false;
        };
        let Ok(payload) = serde_json::from_str::<serde_json::Value>(data) else {
            return false;
        };

        expected.as_str() == signature && payload["public_key"] == json!("pub")
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn client_for(api_url: &str) -> Liqpay {
    Liqpay::from_config(
        LiqpayConfig::builder()
            .public_key("pub")
            .private_key(PRIVATE_KEY)
            .api_url(Url::parse(api_url).unwrap())
            .build(),
    )
    .unwrap()
}

fn status_params() -> PaymentParameters {
    PaymentParameters::new()
        .with("action", "status")
        .with("order_id", "order-42")
}

#[tokio::test]
async fn test_api_posts_signed_form_and_parses_json() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(SignedForm)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let liqpay = client_for(&format!("{}/api/", mock_server.uri()));
    let response = liqpay.api("request", &status_params()).await.unwrap();

    assert_eq!(response, ApiResponse::Json(json!({ "status": "success" })));
    assert!(!response.is_gateway_error());
}

#[tokio::test]
async fn test_callbacks_success_invoked_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .mount(&mock_server)
        .await;

    let liqpay = client_for(&format!("{}/api/", mock_server.uri()));
    let successes = AtomicUsize::new(0);
    let errors = AtomicUsize::new(0);

    liqpay
        .api_with_callbacks(
            "request",
            &status_params(),
            |body| {
                assert_eq!(body.as_json(), Some(&json!({ "status": "success" })));
                successes.fetch_add(1, Ordering::SeqCst);
            },
            |_, _| {
                errors.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await
        .unwrap();

    assert_eq!(successes.load(Ordering::SeqCst), 1);
    assert_eq!(errors.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_callbacks_error_invoked_once_on_transport_failure() {
    // Nothing listens on port 1.
    let liqpay = client_for("http://127.0.0.1:1/api/");
    let successes = AtomicUsize::new(0);
    let errors = AtomicUsize::new(0);

    liqpay
        .api_with_callbacks(
            "request",
            &status_params(),
            |_| {
                successes.fetch_add(1, Ordering::SeqCst);
            },
            |err, response| {
                assert!(matches!(err, TransportError::HttpRequestError(_)));
                assert!(response.is_none());
                errors.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await
        .unwrap();

    assert_eq!(successes.load(Ordering::SeqCst), 0);
    assert_eq!(errors.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_non_success_status_reports_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let liqpay = client_for(&format!("{}/api/", mock_server.uri()));
    let err = liqpay.api("request", &status_params()).await.unwrap_err();

    match err {
        ApiError::Transport {
            error: TransportError::UnexpectedStatus(status),
            response: Some(response),
        } => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(response.status, StatusCode::BAD_GATEWAY);
            assert_eq!(response.body, "bad gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_raw_body_is_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let liqpay = client_for(&format!("{}/api/", mock_server.uri()));
    let response = liqpay.api("request", &status_params()).await.unwrap();

    assert_eq!(response, ApiResponse::Raw("OK".to_string()));
}

#[tokio::test]
async fn test_gateway_error_is_a_success_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "error",
            "status": "error",
            "err_code": "payment_not_found"
        })))
        .mount(&mock_server)
        .await;

    let liqpay = client_for(&format!("{}/api/", mock_server.uri()));
    let response = liqpay.api("request", &status_params()).await.unwrap();

    assert!(response.is_gateway_error());
    assert_eq!(response.status(), Some("error"));
}

#[tokio::test]
async fn test_custom_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request"))
        .and(header("x-merchant-tag", "shop-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let liqpay = client_for(&format!("{}/api/", mock_server.uri())).header(
        &HeaderName::from_static("x-merchant-tag"),
        &HeaderValue::from_static("shop-1"),
    );

    liqpay.api("request", &status_params()).await.unwrap();
}

#[tokio::test]
async fn test_invalid_parameters_fail_before_io() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let liqpay = client_for(&format!("{}/api/", mock_server.uri()));

    let err = liqpay
        .api("request", &PaymentParameters::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));

    let called = AtomicUsize::new(0);
    let result = liqpay
        .api_with_callbacks(
            "request",
            &PaymentParameters::new(),
            |_| {
                called.fetch_add(1, Ordering::SeqCst);
            },
            |_, _| {
                called.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await;

    assert!(result.is_err());
    assert_eq!(called.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_foreign_api_paths_fail_before_io() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&other_server)
        .await;

    let liqpay = client_for(&format!("{}/api/", mock_server.uri()));

    let foreign = format!("{}/collect", other_server.uri());
    for target in [foreign.as_str(), "/api-v2/request", "../request"] {
        let err = liqpay.api(target, &status_params()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)), "{target}");
    }
}
