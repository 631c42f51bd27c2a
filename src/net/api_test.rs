use super::*;
use crate::net::test_helpers::{ScriptedTransport, client, payload};
use futures::executor::block_on;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn recording_handler() -> (Rc<RefCell<Vec<Value>>>, SuccessHandler) {
    let calls: Rc<RefCell<Vec<Value>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let handler: SuccessHandler = Box::new(move |value| sink.borrow_mut().push(value));
    (calls, handler)
}

// =========================================================================
// endpoint
// =========================================================================

#[test]
fn endpoint_prepends_default_prefix() {
    let api = client(ScriptedTransport::default());
    assert_eq!(api.endpoint("/login"), "/api/login");
}

#[test]
fn endpoint_inserts_separator_for_bare_path() {
    let api = client(ScriptedTransport::default());
    assert_eq!(api.endpoint("deliveries/get"), "/api/deliveries/get");
}

#[test]
fn endpoint_ignores_trailing_prefix_slash() {
    let api = ApiClient::new(ApiConfig { prefix: "/panel/api/".into() }, ScriptedTransport::default());
    assert_eq!(api.endpoint("/login"), "/panel/api/login");
}

#[test]
fn api_config_new_trims_trailing_slash() {
    assert_eq!(ApiConfig::new("/api/").prefix, "/api");
}

// =========================================================================
// post
// =========================================================================

#[test]
fn post_sends_one_form_request_to_prefixed_path() {
    let api = client(ScriptedTransport::replying(200, r#"{"ok":true}"#));
    let value = block_on(api.post("/login", &payload(json!({ "user": "a", "pass": "b" })))).unwrap();

    assert_eq!(value, json!({ "ok": true }));
    let sent = api.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "/api/login");
    assert_eq!(sent[0].body, "pass=b&user=a");
}

#[test]
fn post_with_empty_payload_sends_empty_body() {
    let api = client(ScriptedTransport::replying(200, "[]"));
    block_on(api.post("/get_courier_steam_profile", &Payload::new())).unwrap();

    let sent = api.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, "");
}

#[test]
fn post_maps_error_status() {
    let api = client(ScriptedTransport::replying(500, "boom"));
    let err = block_on(api.post("/login", &Payload::new())).unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn post_maps_malformed_body_to_decode_error() {
    let api = client(ScriptedTransport::replying(200, "<html>"));
    let err = block_on(api.post("/login", &Payload::new())).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn post_passes_transport_error_through() {
    let api = client(ScriptedTransport::failing("offline"));
    let err = block_on(api.post("/login", &Payload::new())).unwrap_err();
    assert_eq!(err.to_string(), "request failed: offline");
}

#[test]
fn post_treats_no_content_as_null() {
    let api = client(ScriptedTransport::replying(204, ""));
    assert_eq!(block_on(api.post("/x", &Payload::new())).unwrap(), Value::Null);
}

#[test]
fn post_treats_not_modified_as_success() {
    let api = client(ScriptedTransport::replying(304, r#"{"cached":1}"#));
    assert_eq!(block_on(api.post("/x", &Payload::new())).unwrap(), json!({ "cached": 1 }));
}

#[test]
fn post_as_deserializes_typed_response() {
    #[derive(Deserialize)]
    struct Ack {
        ok: bool,
    }
    let api = client(ScriptedTransport::replying(200, r#"{"ok":true}"#));
    let ack: Ack = block_on(api.post_as("/deliveries/pause", &Payload::new())).unwrap();
    assert!(ack.ok);
}

#[test]
fn post_as_reports_shape_mismatch() {
    #[derive(Debug, Deserialize)]
    struct Ack {
        #[allow(dead_code)]
        ok: bool,
    }
    let api = client(ScriptedTransport::replying(200, r#"{"time":"1h"}"#));
    let err = block_on(api.post_as::<Ack>("/x", &Payload::new())).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =========================================================================
// post_ignoring_errors
// =========================================================================

#[test]
fn ignoring_errors_invokes_handler_once_on_success() {
    let api = client(ScriptedTransport::replying(200, r#"{"ok":true}"#));
    let (calls, handler) = recording_handler();
    let resolved = block_on(api.post_ignoring_errors("/login", &payload(json!({ "user": "a" })), Some(handler)));

    assert_eq!(*calls.borrow(), vec![json!({ "ok": true })]);
    assert_eq!(resolved, Some(json!({ "ok": true })));
    assert_eq!(api.transport().sent().len(), 1);
}

#[test]
fn ignoring_errors_skips_handler_on_status_error() {
    let api = client(ScriptedTransport::replying(404, "missing"));
    let (calls, handler) = recording_handler();
    let resolved = block_on(api.post_ignoring_errors("/login", &Payload::new(), Some(handler)));
    assert!(calls.borrow().is_empty());
    assert_eq!(resolved, None);
}

#[test]
fn ignoring_errors_skips_handler_on_malformed_body() {
    let api = client(ScriptedTransport::replying(200, "{not json"));
    let (calls, handler) = recording_handler();
    block_on(api.post_ignoring_errors("/login", &Payload::new(), Some(handler)));
    assert!(calls.borrow().is_empty());
}

#[test]
fn ignoring_errors_skips_handler_on_transport_error() {
    let api = client(ScriptedTransport::failing("offline"));
    let (calls, handler) = recording_handler();
    block_on(api.post_ignoring_errors("/login", &Payload::new(), Some(handler)));
    assert!(calls.borrow().is_empty());
}

#[test]
fn ignoring_errors_without_handler_is_quiet_either_way() {
    let ok = client(ScriptedTransport::replying(200, "{}"));
    block_on(ok.post_ignoring_errors("/a", &Payload::new(), None));
    let failed = client(ScriptedTransport::replying(502, ""));
    block_on(failed.post_ignoring_errors("/a", &Payload::new(), None));
    assert_eq!(ok.transport().sent().len(), 1);
    assert_eq!(failed.transport().sent().len(), 1);
}

#[test]
fn ignoring_errors_resolves_with_response_for_chaining() {
    let api = client(ScriptedTransport::replying(200, r#"{"time":"5 min"}"#));
    let resolved = block_on(api.post_ignoring_errors("/deliveries/get_time_until_delivery", &Payload::new(), None));
    assert_eq!(resolved, Some(json!({ "time": "5 min" })));

    let failed = client(ScriptedTransport::failing("offline"));
    assert_eq!(block_on(failed.post_ignoring_errors("/x", &Payload::new(), None)), None);
}
