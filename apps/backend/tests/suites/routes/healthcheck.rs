use std::sync::Arc;

use actix_web::test;
use kubix_backend::StateBuilder;

use crate::common::json_body;
use crate::support::app_builder::create_test_app;
use crate::support::race_rules::RaceRules;

#[actix_web::test]
async fn health_reports_backend_and_rules() {
    let state = StateBuilder::new()
        .with_rules(Arc::new(RaceRules::default()))
        .build()
        .await
        .expect("state builds");
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().contains_key("x-trace-id"));

    let body = json_body(resp, 200).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["rules"], "race");
    assert!(body["app_version"].is_string());
    assert!(body["started_at"].is_string());
}

#[actix_web::test]
async fn health_over_file_storage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = StateBuilder::new()
        .with_data_dir(dir.path())
        .build()
        .await
        .expect("state builds");
    assert!(state.holds_data_lock());
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["storage"], "file");
    assert_eq!(body["rules"], "freeform");
}
