use super::*;

#[test]
fn join_url_handles_trailing_and_leading_slashes() {
    assert_eq!(join_url("http://localhost:8000", "/api/auth/me"), "http://localhost:8000/api/auth/me");
    assert_eq!(join_url("http://localhost:8000/", "/api/auth/me"), "http://localhost:8000/api/auth/me");
    assert_eq!(join_url("http://localhost:8000/", "api/auth/me"), "http://localhost:8000/api/auth/me");
}

#[test]
fn is_success_covers_2xx_only() {
    assert!(HttpResponse::new(200, "").is_success());
    assert!(HttpResponse::new(201, "").is_success());
    assert!(HttpResponse::new(204, "").is_success());
    assert!(!HttpResponse::new(199, "").is_success());
    assert!(!HttpResponse::new(301, "").is_success());
    assert!(!HttpResponse::new(401, "").is_success());
    assert!(!HttpResponse::new(500, "").is_success());
}

#[test]
fn header_value_lookup_is_case_insensitive() {
    let request = HttpRequest::get("/api/auth/me").header("Authorization", "Bearer abc");
    assert_eq!(request.header_value("authorization"), Some("Bearer abc"));
    assert_eq!(request.header_value("Accept"), None);
}

#[test]
fn post_carries_json_body() {
    let request = HttpRequest::post("/api/auth/login", serde_json::json!({ "email": "a@b.com" }));
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.body, Some(serde_json::json!({ "email": "a@b.com" })));
}

#[test]
fn json_parses_body() {
    let response = HttpResponse::new(200, r#"{"token":"abc"}"#);
    let value: serde_json::Value = response.json().unwrap();
    assert_eq!(value["token"], "abc");
}

#[test]
fn json_rejects_non_json_body() {
    let response = HttpResponse::new(200, "<html>");
    assert!(response.json::<serde_json::Value>().is_err());
}

#[test]
fn reqwest_client_keeps_configured_base_url() {
    let config = ClientConfig::new(
        "http://localhost:9999/",
        Some(std::path::PathBuf::from("session.json")),
        crate::config::Timeouts::default(),
    ).unwrap();
    let client = ReqwestHttpClient::new(&config).unwrap();
    assert_eq!(client.base_url(), "http://localhost:9999");
}
