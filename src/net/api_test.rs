use super::*;
use crate::net::http::Method;
use crate::test_helpers::{ScriptedHttp, json_response, transport_error};
use serde_json::json;

fn api(http: &Arc<ScriptedHttp>) -> AuthApi {
    AuthApi::new(http.clone())
}

// =============================================================================
// register
// =============================================================================

#[tokio::test]
async fn register_posts_profile_body() {
    let http = ScriptedHttp::new(vec![json_response(201, json!({ "userId": 1, "message": "ok" }))]);
    let profile = RegistrationProfile {
        email: "jane@x.com".into(),
        password: "secret1".into(),
        first_name: "Jane".into(),
        last_name: "Doe".into(),
    };
    api(&http).register(&profile).await.unwrap();

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, REGISTER_PATH);
    assert_eq!(
        requests[0].body,
        Some(json!({ "email": "jane@x.com", "password": "secret1", "firstName": "Jane", "lastName": "Doe" }))
    );
}

#[tokio::test]
async fn register_accepts_any_success_body() {
    let http = ScriptedHttp::new(vec![Ok(HttpResponse::new(201, "created"))]);
    assert!(api(&http).register(&RegistrationProfile::default()).await.is_ok());
}

#[tokio::test]
async fn register_rejection_carries_server_message() {
    let http = ScriptedHttp::new(vec![json_response(400, json!({ "message": "Email already exists" }))]);
    let err = api(&http).register(&RegistrationProfile::default()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.server_message(), Some("Email already exists"));
    assert_eq!(err.display_message("fallback"), "Email already exists");
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_posts_credentials_and_parses_token() {
    let http = ScriptedHttp::new(vec![json_response(200, json!({ "token": "abc" }))]);
    let resp = api(&http).login(&Credentials::new("a@b.com", "pw")).await.unwrap();
    assert_eq!(resp.session_token(), Some(SessionToken::new("abc")));

    let requests = http.requests();
    assert_eq!(requests[0].path, LOGIN_PATH);
    assert_eq!(requests[0].body, Some(json!({ "email": "a@b.com", "password": "pw" })));
}

#[tokio::test]
async fn login_rejection_without_message_uses_fallback() {
    let http = ScriptedHttp::new(vec![Ok(HttpResponse::new(401, ""))]);
    let err = api(&http).login(&Credentials::default()).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.display_message("Login failed."), "Login failed.");
}

#[tokio::test]
async fn login_success_with_invalid_json_is_schema_error() {
    let http = ScriptedHttp::new(vec![Ok(HttpResponse::new(200, "<html>"))]);
    let err = api(&http).login(&Credentials::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Schema(_)));
}

#[tokio::test]
async fn login_transport_failure_is_http_error() {
    let http = ScriptedHttp::new(vec![transport_error()]);
    let err = api(&http).login(&Credentials::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Http(HttpError::Transport(_))));
    assert_eq!(err.display_message("fallback"), "fallback");
}

// =============================================================================
// current_user
// =============================================================================

#[tokio::test]
async fn current_user_sends_bearer_and_accept_headers() {
    let http = ScriptedHttp::new(vec![json_response(
        200,
        json!({ "id": 1, "email": "a@b.com", "firstName": "A", "lastName": "B" }),
    )]);
    let user = api(&http).current_user(&SessionToken::new("tok")).await.unwrap();
    assert_eq!(user.first_name, "A");

    let requests = http.requests();
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].path, CURRENT_USER_PATH);
    assert_eq!(requests[0].header_value("Authorization"), Some("Bearer tok"));
    assert_eq!(requests[0].header_value("Accept"), Some("application/json"));
    assert_eq!(requests[0].body, None);
}

#[tokio::test]
async fn current_user_401_and_403_are_session_rejections() {
    for status in [401, 403] {
        let http = ScriptedHttp::new(vec![Ok(HttpResponse::new(status, ""))]);
        let err = api(&http).current_user(&SessionToken::new("tok")).await.unwrap_err();
        assert!(err.is_session_rejected(), "status {status}");
    }
}

#[tokio::test]
async fn current_user_500_is_not_session_rejection() {
    let http = ScriptedHttp::new(vec![Ok(HttpResponse::new(500, ""))]);
    let err = api(&http).current_user(&SessionToken::new("tok")).await.unwrap_err();
    assert!(!err.is_session_rejected());
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn current_user_with_incomplete_profile_is_schema_error() {
    let http = ScriptedHttp::new(vec![json_response(200, json!({ "id": 1 }))]);
    let err = api(&http).current_user(&SessionToken::new("tok")).await.unwrap_err();
    assert!(matches!(err, ApiError::Schema(_)));
}
