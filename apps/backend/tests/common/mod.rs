#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;


// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    kubix_test_support::test_logging::init();
}

/// Read a successful response body as JSON, asserting the status first.
pub async fn json_body(resp: ServiceResponse<BoxBody>, expected_status: u16) -> Value {
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).expect("body should be UTF-8");
    assert_eq!(status, expected_status, "unexpected status; body: {text}");
    serde_json::from_str(text).unwrap_or_else(|_| panic!("body is not JSON: {text}"))
}
