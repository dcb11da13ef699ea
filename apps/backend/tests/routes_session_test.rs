//! HTTP surface tests for the session routes, run against a
//! database-less state (the engine is in-memory; only the user store
//! needs Postgres).

mod common;

use std::time::Duration;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{test, web, App};
use backend::config::session::SessionConfig;
use backend::routes;
use backend::state::app_state::AppState;
use serde_json::json;

async fn spawn_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

fn open_engine_state() -> AppState {
    let engine = common::test_engine(SessionConfig::new(
        Duration::from_secs(600),
        Duration::from_secs(10),
    ));
    engine.open_round();
    common::db_less_state(engine)
}

#[actix_web::test]
async fn session_summary_is_public() {
    let app = spawn_app(open_engine_state()).await;

    let req = test::TestRequest::get().uri("/session").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["isActive"], json!(true));
    assert_eq!(body["playersCount"], json!(0));
    assert!(body["timeLeft"].as_u64().unwrap() <= 600);
}

#[actix_web::test]
async fn protected_routes_reject_missing_or_garbage_tokens() {
    let app = spawn_app(open_engine_state()).await;

    let req = test::TestRequest::post().uri("/session/join").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("UNAUTHORIZED_MISSING_BEARER"));

    let req = test::TestRequest::post()
        .uri("/session/join")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("UNAUTHORIZED_INVALID_JWT"));
}

#[actix_web::test]
async fn join_pick_status_leave_flow() {
    let app = spawn_app(open_engine_state()).await;
    let alice = common::bearer("alice");

    // join
    let req = test::TestRequest::post()
        .uri("/session/join")
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // duplicate join
    let req = test::TestRequest::post()
        .uri("/session/join")
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("ALREADY_JOINED"));

    // out-of-range pick
    let req = test::TestRequest::post()
        .uri("/session/pick")
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .set_json(json!({ "pick": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("INVALID_PICK"));

    // pick before join (different identity)
    let req = test::TestRequest::post()
        .uri("/session/pick")
        .insert_header((header::AUTHORIZATION, common::bearer("bob")))
        .set_json(json!({ "pick": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("NOT_JOINED"));

    // valid pick
    let req = test::TestRequest::post()
        .uri("/session/pick")
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .set_json(json!({ "pick": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // picks are immutable
    let req = test::TestRequest::post()
        .uri("/session/pick")
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .set_json(json!({ "pick": 6 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("ALREADY_PICKED"));

    // status reflects the join and the original pick
    let req = test::TestRequest::get()
        .uri("/session/status")
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["isActive"], json!(true));
    assert_eq!(body["hasJoined"], json!(true));
    assert_eq!(body["hasPicked"], json!(true));
    assert_eq!(body["pick"], json!(5));
    assert!(body["players"].is_number());
    assert_eq!(body["players"], json!(1));
    assert_eq!(body["nextSessionStart"], serde_json::Value::Null);

    // live results: winning number still hidden
    let req = test::TestRequest::get()
        .uri("/session/results")
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["winningNumber"], serde_json::Value::Null);
    assert_eq!(body["winners"], json!([]));

    // nothing has ever resolved
    let req = test::TestRequest::get()
        .uri("/session/completed-results")
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("NO_RESOLVED_ROUND"));

    // leave, twice: both succeed
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/session/leave")
            .insert_header((header::AUTHORIZATION, alice.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
    }

    let req = test::TestRequest::get()
        .uri("/session/status")
        .insert_header((header::AUTHORIZATION, alice))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["hasJoined"], json!(false));
    assert_eq!(body["players"], json!(0));
    assert_eq!(body["pick"], serde_json::Value::Null);
}

#[actix_web::test]
async fn operations_reject_when_no_round_is_open() {
    // Pending engine: driver never started, no round opened.
    let engine = common::test_engine(SessionConfig::default());
    let app = spawn_app(common::db_less_state(engine)).await;

    let req = test::TestRequest::get().uri("/session").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["isActive"], json!(false));
    assert_eq!(body["timeLeft"], json!(0));

    for uri in ["/session/join", "/session/leave"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header((header::AUTHORIZATION, common::bearer("alice")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400, "{uri}");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], json!("NO_ACTIVE_ROUND"), "{uri}");
    }

    let req = test::TestRequest::get()
        .uri("/session/results")
        .insert_header((header::AUTHORIZATION, common::bearer("alice")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("NO_ACTIVE_ROUND"));
}

#[actix_web::test]
async fn register_and_login_validate_username_before_the_store() {
    let app = spawn_app(open_engine_state()).await;

    for uri in ["/register", "/login"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400, "{uri}");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], json!("MISSING_USERNAME"), "{uri}");

        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(json!({ "username": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400, "{uri}");
    }
}
