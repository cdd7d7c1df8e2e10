use super::*;

use axum::http::header::SET_COOKIE;

fn reply(status: u16, set_cookies: Vec<&str>) -> UpstreamReply {
    UpstreamReply {
        status,
        set_cookies: set_cookies.into_iter().map(str::to_owned).collect(),
        body: serde_json::json!({"message": "ok"}),
    }
}

#[test]
fn relay_forwards_status() {
    let response = relay_response(reply(201, vec![]));
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[test]
fn relay_forwards_session_cookies() {
    let response = relay_response(reply(200, vec!["_gf_=abc; Path=/; HttpOnly"]));
    let cookies: Vec<_> = response.headers().get_all(SET_COOKIE).iter().collect();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0], "_gf_=abc; Path=/; HttpOnly");
}

#[test]
fn relay_forwards_multiple_cookies() {
    let response = relay_response(reply(200, vec!["_gf_=abc; Path=/", "theme=dark; Path=/"]));
    assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 2);
}

#[test]
fn relay_maps_unrepresentable_status_to_bad_gateway() {
    let response = relay_response(reply(99, vec![]));
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn relay_drops_malformed_cookie_headers() {
    let response = relay_response(reply(200, vec!["_gf_=ok; Path=/", "bad\r\nheader"]));
    assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 1);
}

// =============================================================================
// Request shapes
// =============================================================================

#[test]
fn credentials_deserialize_from_form_payload() {
    let body: Credentials = serde_json::from_str(r#"{"email": "a@b.com", "password": "hunter22"}"#).unwrap();
    assert_eq!(body.email, "a@b.com");
    assert_eq!(body.password, "hunter22");
}

#[test]
fn otp_check_round_trips() {
    let body: OtpCheck = serde_json::from_str(r#"{"email": "a@b.com", "otp": "493817"}"#).unwrap();
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["otp"], "493817");
}

#[test]
fn password_reset_uses_camel_case_key() {
    let body = PasswordReset { email: "a@b.com".into(), otp: "111111".into(), new_password: "pw".into() };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["newPassword"], "pw");
    assert!(json.get("new_password").is_none());
}
