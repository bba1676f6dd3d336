use actix_web::http::StatusCode;
use actix_web::test;
use kubix_test_support::problem_details::assert_problem_details_from_service_response;

use super::helpers::{act, get, post, register};
use crate::support::app_builder::create_test_app;
use crate::support::state_helpers::race_state;

async fn expect_bad_request(req: actix_http::Request, code: &str, detail: Option<&str>) {
    let app = create_test_app(race_state().await).await;
    test::call_service(&app, register("alice")).await;

    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, code, StatusCode::BAD_REQUEST, detail)
        .await;
}

#[actix_web::test]
async fn missing_client_id() {
    expect_bad_request(
        post(&[("client_pw", "pw"), ("new_game", "1")]),
        "BAD_REQUEST",
        Some("client_id"),
    )
    .await;
}

#[actix_web::test]
async fn no_command() {
    expect_bad_request(
        post(&[("client_id", "alice"), ("client_pw", "pw")]),
        "BAD_REQUEST",
        Some("no command"),
    )
    .await;
}

#[actix_web::test]
async fn two_commands() {
    expect_bad_request(
        act("alice", &[("new_game", "1"), ("join", "1"), ("game_id", "g1")]),
        "BAD_REQUEST",
        Some("exactly one command"),
    )
    .await;
}

#[actix_web::test]
async fn disabled_flag_does_not_count_as_a_command() {
    expect_bad_request(
        act("alice", &[("new_game", "0")]),
        "BAD_REQUEST",
        Some("no command"),
    )
    .await;
}

#[actix_web::test]
async fn unreadable_flag() {
    expect_bad_request(
        act("alice", &[("undo", "maybe"), ("game_id", "g1")]),
        "BAD_REQUEST",
        Some("undo"),
    )
    .await;
}

#[actix_web::test]
async fn reads_are_not_accepted_as_posts() {
    expect_bad_request(
        act("alice", &[("update", "1"), ("game_id", "g1")]),
        "BAD_REQUEST",
        Some("update"),
    )
    .await;
}

#[actix_web::test]
async fn writes_are_not_accepted_as_gets() {
    expect_bad_request(
        get(&[
            ("client_id", "alice"),
            ("client_pw", "pw"),
            ("move", "1"),
            ("game_id", "g1"),
        ]),
        "BAD_REQUEST",
        Some("move"),
    )
    .await;
}

#[actix_web::test]
async fn move_needs_a_game_id() {
    expect_bad_request(
        act("alice", &[("move", "1")]),
        "BAD_REQUEST",
        Some("game_id"),
    )
    .await;
}

#[actix_web::test]
async fn path_like_game_id() {
    expect_bad_request(
        act("alice", &[("join", "1"), ("game_id", "../etc")]),
        "INVALID_GAME_ID",
        None,
    )
    .await;
}

#[actix_web::test]
async fn empty_move_payload() {
    let app = create_test_app(race_state().await).await;
    test::call_service(&app, register("alice")).await;
    test::call_service(&app, act("alice", &[("new_game", "1"), ("game_id", "g1")])).await;

    let resp = test::call_service(&app, act("alice", &[("move", ""), ("game_id", "g1")])).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_MOVE_PAYLOAD",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn non_form_body() {
    let app = create_test_app(race_state().await).await;

    let req = test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"client_id":"alice"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid form body"),
    )
    .await;
}

#[actix_web::test]
async fn unknown_game_is_not_found() {
    let app = create_test_app(race_state().await).await;
    test::call_service(&app, register("alice")).await;

    let resp = test::call_service(&app, act("alice", &[("join", "1"), ("game_id", "nowhere")])).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("nowhere"),
    )
    .await;
}
