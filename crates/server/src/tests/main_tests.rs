use super::*;
use axum::{
    body::{self, Body},
    http::Request,
    response::Response,
};
use chrono::NaiveDate;
use shared::{domain::Display, error::ErrorCode};
use tower::ServiceExt;

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).expect("date")
}

fn test_app() -> Router {
    build_router(Arc::new(AppState {
        controller: SessionViewController::default(),
        assets_dir: PathBuf::from("./assets-missing-in-tests"),
        body_limit_bytes: 1024,
        today: fixed_today,
    }))
}

async fn post_event(app: Router, payload: serde_json::Value) -> Response {
    let payload = payload.to_string();
    let request = Request::post("/events")
        .header("content-type", "application/json")
        .header("content-length", payload.len())
        .body(Body::from(payload))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

async fn view_from(response: Response) -> ViewResponse {
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let request = Request::get("/healthz").body(Body::empty()).expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn index_renders_login_view() {
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains(
        "id=\"login-screen\" class=\"container center-align\" style=\"margin-top:100px;display:block\""
    ));
    assert!(html.contains("id=\"dashboard-content\" class=\"container\" style=\"display:none\""));
    assert!(html.contains("id=\"user-menu\""));
    assert!(html.contains("id=\"login-output\" class=\"red-text center-align mt-2\"></div>"));
    assert!(html.contains("2025-02-28"));
}

#[tokio::test]
async fn admin_login_shows_dashboard() {
    let response = post_event(
        test_app(),
        serde_json::json!({
            "trigger": "login-button",
            "login_clicks": 1,
            "logout_clicks": 0,
            "username": "admin",
            "password": "password",
        }),
    )
    .await;
    let view = view_from(response).await;
    assert_eq!(view.dashboard_content, Display::Block);
    assert_eq!(view.login_screen, Display::Hidden);
    assert_eq!(view.user_menu, Display::Block);
    assert_eq!(view.login_output, None);
}

#[tokio::test]
async fn wrong_password_keeps_login_screen_and_reports_message() {
    let response = post_event(
        test_app(),
        serde_json::json!({
            "trigger": "login-button",
            "login_clicks": 2,
            "username": "admin",
            "password": "wrong",
        }),
    )
    .await;
    let view = view_from(response).await;
    assert_eq!(view.dashboard_content, Display::Hidden);
    assert_eq!(view.login_screen, Display::Block);
    assert_eq!(view.user_menu, Display::Hidden);
    assert_eq!(view.login_output.as_deref(), Some("Invalid username or password"));
}

#[tokio::test]
async fn logout_returns_to_login_screen() {
    let response = post_event(
        test_app(),
        serde_json::json!({
            "trigger": "user-menu",
            "login_clicks": 1,
            "logout_clicks": 1,
            "username": "admin",
            "password": "password",
        }),
    )
    .await;
    let view = view_from(response).await;
    assert_eq!(view.login_screen, Display::Block);
    assert_eq!(view.dashboard_content, Display::Hidden);
    assert_eq!(view.login_output, None);
}

#[tokio::test]
async fn event_without_trigger_yields_initial_view() {
    let view = view_from(post_event(test_app(), serde_json::json!({})).await).await;
    assert_eq!(view, ViewResponse::new(shared::domain::ViewState::initial(), None));
}

#[tokio::test]
async fn unknown_trigger_is_a_validation_error() {
    let response = post_event(
        test_app(),
        serde_json::json!({ "trigger": "delete-everything", "login_clicks": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let error: ApiError = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(error.code, ErrorCode::Validation);
    assert!(error.message.contains("delete-everything"));
}

#[tokio::test]
async fn oversized_event_body_is_rejected() {
    let response = post_event(
        test_app(),
        serde_json::json!({ "trigger": "login-button", "username": "a".repeat(4096) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn dashboard_api_returns_sample_data() {
    let request = Request::get("/api/dashboard")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let data: DashboardData = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(data.cards.len(), 3);
    assert_eq!(data.charts.len(), 2);
    assert_eq!(data.charts[1].bars.len(), 30);
    assert_eq!(data.transactions.len(), 3);
}

#[tokio::test]
async fn configured_verifier_is_used_by_router() {
    let app = build_router(Arc::new(AppState {
        controller: SessionViewController::new(StaticCredentialVerifier::new("ops", "s3cret")),
        assets_dir: PathBuf::from("./assets-missing-in-tests"),
        body_limit_bytes: 1024,
        today: fixed_today,
    }));
    let payload = |username: &str, password: &str| {
        serde_json::json!({
            "trigger": "login-button",
            "login_clicks": 1,
            "username": username,
            "password": password,
        })
    };

    let view = view_from(post_event(app.clone(), payload("ops", "s3cret")).await).await;
    assert_eq!(view.dashboard_content, Display::Block);

    let view = view_from(post_event(app, payload("admin", "password")).await).await;
    assert_eq!(view.dashboard_content, Display::Hidden);
}

#[tokio::test]
async fn missing_asset_is_not_found() {
    let request = Request::get("/assets/logo.svg")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_event_body_is_a_validation_error() {
    let request = Request::post("/events")
        .header("content-type", "application/json")
        .body(Body::from("{\"trigger\": \"login-button\", \"login_clicks\": "))
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let error: ApiError = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(error.code, ErrorCode::Validation);
}

#[tokio::test]
async fn wrongly_typed_counter_is_a_validation_error() {
    let response = post_event(
        test_app(),
        serde_json::json!({ "trigger": "login-button", "login_clicks": "one" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let error: ApiError = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(error.code, ErrorCode::Validation);
}
