//! Contract tests for request routing.
//!
//! Covers the HTTP-shaped behavior callers observe:
//! - GET with and without the query parameter
//! - POST with valid and malformed JSON
//! - Unmapped methods

mod common;

use fibonacci_lambda::config::{GetMode, UnsupportedMethodPolicy};
use fibonacci_lambda::{Request, RequestRouter};
use http::Method;

#[test]
fn test_get_number_returns_fibonacci() {
    let router = RequestRouter::new(GetMode::Fibonacci);
    let response = router.handle(&common::get_number("10"));

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains("55"), "body was {:?}", response.body);
}

#[test]
fn test_get_largest_number() {
    let router = RequestRouter::new(GetMode::Fibonacci);
    let response = router.handle(&common::get_number("93"));

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "Hey 12200160415121876738 welcome! ");
}

#[test]
fn test_get_without_number_is_missing_parameter() {
    let router = RequestRouter::new(GetMode::Fibonacci);
    let response = router.handle(&Request::new(Method::GET));

    assert_eq!(response.status_code, 500);
    assert_eq!(response.body, "Error: Query Parameter name missing");
}

#[test]
fn test_get_with_unrelated_parameter_is_missing_parameter() {
    let router = RequestRouter::new(GetMode::Fibonacci);
    let response = router.handle(&Request::new(Method::GET).with_query("name", "Ada"));

    assert_eq!(response.status_code, 500);
    assert_eq!(response.body, "Error: Query Parameter name missing");
}

#[test]
fn test_post_valid_json_is_echoed() {
    let router = RequestRouter::new(GetMode::Fibonacci);
    let response = router.handle(&common::post_body(r#"{"ok":true}"#));

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, r#"{"ok":true}"#);
}

#[test]
fn test_post_invalid_json_reports_diagnostic_and_body() {
    let router = RequestRouter::new(GetMode::Fibonacci);
    let response = router.handle(&common::post_body("not-json"));

    assert_eq!(response.status_code, 500);
    assert!(response.body.contains("Error: Invalid JSON payload"));
    assert!(response.body.contains("not-json"));
}

#[test]
fn test_post_behaves_the_same_in_echo_mode() {
    let router = RequestRouter::new(GetMode::Echo);
    let response = router.handle(&common::post_body(r#"[1,2,3]"#));

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "[1,2,3]");
}

#[test]
fn test_unmapped_method_passthrough() {
    let router = RequestRouter::new(GetMode::Fibonacci);
    for method in [Method::PUT, Method::DELETE, Method::PATCH, Method::OPTIONS] {
        let response = router.handle(&Request::new(method));
        assert_eq!(response.status_code, 0);
        assert!(response.body.is_empty());
    }
}

#[test]
fn test_unmapped_method_reject() {
    let router = RequestRouter::new(GetMode::Fibonacci)
        .with_unsupported_method(UnsupportedMethodPolicy::Reject);
    let response = router.handle(&Request::new(Method::PATCH));

    assert_eq!(response.status_code, 405);
}
