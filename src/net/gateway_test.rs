use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::state::role::Role;
use crate::test_support::{RecordingNavigator, ScriptedTransport, empty_session, signed_in};

fn gateway(session: SessionStore, outcomes: Vec<Result<ApiResponse, TransportError>>) -> Gateway<ScriptedTransport, RecordingNavigator> {
    Gateway::new(
        &ShellConfig::default(),
        ScriptedTransport::replying(outcomes),
        RecordingNavigator::default(),
        session,
    )
}

fn ok(body: serde_json::Value) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::new(200, body))
}

fn status(code: u16, body: serde_json::Value) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::new(code, body))
}

fn login_ok() -> serde_json::Value {
    json!({
        "code": 200,
        "message": "ok",
        "data": {"token": "fresh", "userId": "u-7", "name": "Dana", "role": "4"}
    })
}

// =============================================================
// send
// =============================================================

#[test]
fn send_injects_token_and_device_type() {
    let gw = gateway(signed_in("2"), vec![ok(json!({}))]);
    block_on(gw.send(ApiRequest::get("/projects"))).unwrap();

    let sent = gw.transport.sent();
    assert_eq!(sent[0].header("Authorization"), Some("Bearer tok-1"));
    assert_eq!(sent[0].header("deviceType"), Some("web"));
}

#[test]
fn send_without_session_has_no_auth_header() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![ok(json!({}))]);
    block_on(gw.send(ApiRequest::get("/projects"))).unwrap();
    assert_eq!(gw.transport.sent()[0].header("Authorization"), None);
}

#[test]
fn send_surfaces_backend_message_on_error_status() {
    let gw = gateway(signed_in("2"), vec![status(400, json!({"message": "title required"}))]);
    let err = block_on(gw.send(ApiRequest::post("/projects"))).unwrap_err();
    assert_eq!(err, ApiError::Status { status: 400, message: "title required".into() });
    assert!(gw.navigator().paths().is_empty());
}

#[test]
fn send_uses_generic_fallback_without_message() {
    let gw = gateway(signed_in("2"), vec![status(500, serde_json::Value::Null)]);
    let err = block_on(gw.send(ApiRequest::get("/projects"))).unwrap_err();
    assert_eq!(err.message(), "request failed");
}

#[test]
fn send_maps_transport_failure() {
    let gw = gateway(signed_in("2"), vec![Err(TransportError::Timeout(5000))]);
    let err = block_on(gw.send(ApiRequest::get("/projects"))).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(gw.session().is_authenticated());
}

// =============================================================
// Global 401 / 403 handling
// =============================================================

#[test]
fn unauthorized_clears_session_and_redirects_to_login() {
    for path in ["/projects", "/me", "/admin/stats"] {
        let gw = gateway(signed_in("5"), vec![status(401, json!({"message": "expired"}))]);
        let err = block_on(gw.send(ApiRequest::get(path))).unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(!gw.session().is_authenticated(), "{path}");
        assert_eq!(gw.navigator().paths(), vec!["/login".to_owned()]);
    }
}

#[test]
fn forbidden_redirects_but_keeps_session() {
    let gw = gateway(signed_in("2"), vec![status(403, serde_json::Value::Null)]);
    let err = block_on(gw.send(ApiRequest::get("/admin/stats"))).unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(gw.session().is_authenticated());
    assert_eq!(gw.navigator().paths(), vec!["/error/forbidden".to_owned()]);
}

#[test]
fn next_request_after_401_goes_out_without_token() {
    let gw = gateway(signed_in("2"), vec![status(401, serde_json::Value::Null), ok(json!({}))]);
    let _ = block_on(gw.send(ApiRequest::get("/a")));
    block_on(gw.send(ApiRequest::get("/b"))).unwrap();
    assert_eq!(gw.transport.sent()[1].header("Authorization"), None);
}

// =============================================================
// login
// =============================================================

#[test]
fn login_persists_session_before_returning() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![ok(login_ok())]);

    let info = block_on(gw.login("dana@example.com", "pw")).unwrap();

    assert_eq!(info.token, "fresh");
    assert_eq!(info.user_id, "u-7");
    let stored = gw.session().load().unwrap();
    assert_eq!(stored.token, "fresh");
    assert_eq!(stored.profile.unwrap().name, "Dana");
    assert!(gw.session().has_role(Role::Admin));
}

#[test]
fn login_posts_credentials_with_device_type() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![ok(login_ok())]);
    block_on(gw.login("dana@example.com", "pw")).unwrap();

    let sent = gw.transport.sent();
    assert_eq!(sent[0].path, "/login");
    assert_eq!(sent[0].method, crate::net::types::Method::Post);
    assert_eq!(
        sent[0].body,
        Some(json!({"email": "dana@example.com", "password": "pw", "deviceType": "web"}))
    );
}

#[test]
fn login_rejected_envelope_uses_backend_message() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![ok(json!({"code": 1001, "message": "wrong password"}))]);
    let err = block_on(gw.login("a@b.c", "nope")).unwrap_err();

    assert_eq!(err, ApiError::Rejected { code: 1001, message: "wrong password".into() });
    assert!(!gw.session().is_authenticated());
}

#[test]
fn login_rejected_without_message_uses_fallback() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![ok(json!({"code": 500}))]);
    let err = block_on(gw.login("a@b.c", "pw")).unwrap_err();
    assert_eq!(err.message(), "login failed");
}

#[test]
fn login_success_code_without_data_is_rejected() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![ok(json!({"code": 200, "message": "ok"}))]);
    assert!(matches!(block_on(gw.login("a@b.c", "pw")), Err(ApiError::Rejected { code: 200, .. })));
}

#[test]
fn login_http_error_uses_login_fallback() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![status(502, serde_json::Value::Null)]);
    let err = block_on(gw.login("a@b.c", "pw")).unwrap_err();
    assert_eq!(err.message(), "login failed");
}

#[test]
fn login_malformed_body_is_decode_error() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![ok(json!({"unexpected": true}))]);
    assert!(matches!(block_on(gw.login("a@b.c", "pw")), Err(ApiError::Decode(_))));
}

// =============================================================
// register
// =============================================================

#[test]
fn register_returns_data_payload() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![ok(json!({"code": 200, "data": {"userId": "u-9"}}))]);
    let data = block_on(gw.register("Eve", "eve@example.com", "pw")).unwrap();

    assert_eq!(data, json!({"userId": "u-9"}));
    assert_eq!(
        gw.transport.sent()[0].body,
        Some(json!({"name": "Eve", "email": "eve@example.com", "password": "pw"}))
    );
    assert!(!gw.session().is_authenticated());
}

#[test]
fn register_rejected_uses_fallback() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![ok(json!({"code": 409, "message": ""}))]);
    let err = block_on(gw.register("Eve", "eve@example.com", "pw")).unwrap_err();
    assert_eq!(err, ApiError::Rejected { code: 409, message: "registration failed".into() });
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_notifies_backend_then_clears() {
    let gw = gateway(signed_in("2"), vec![ok(json!({}))]);
    block_on(gw.logout());

    let sent = gw.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "/logout");
    assert_eq!(sent[0].header("Authorization"), Some("Bearer tok-1"));
    assert!(!gw.session().is_authenticated());
    assert_eq!(gw.navigator().paths(), vec!["/login".to_owned()]);
}

#[test]
fn logout_clears_even_when_backend_fails() {
    let gw = gateway(signed_in("2"), vec![Err(TransportError::Network("offline".into()))]);
    block_on(gw.logout());
    assert!(!gw.session().is_authenticated());
    assert_eq!(gw.navigator().paths(), vec!["/login".to_owned()]);
}

#[test]
fn logout_after_401_navigates_once() {
    let gw = gateway(signed_in("2"), vec![status(401, json!({"message": "expired"}))]);
    block_on(gw.logout());
    assert!(!gw.session().is_authenticated());
    assert_eq!(gw.navigator().paths(), vec!["/login".to_owned()]);
}

#[test]
fn logout_skips_backend_when_signed_out() {
    let (_, session) = empty_session();
    let gw = gateway(session, vec![]);
    block_on(gw.logout());
    assert!(gw.transport.sent().is_empty());
    assert_eq!(gw.navigator().paths(), vec!["/login".to_owned()]);
}
