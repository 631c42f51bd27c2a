use super::*;
use crate::net::test_helpers::{ScriptedTransport, client};
use futures::executor::block_on;
use serde_json::json;

#[test]
fn get_posts_code_and_parses_snapshot() {
    let api = client(ScriptedTransport::replying(
        200,
        r#"{"delivery":{"status":0},"purchase":{"options":[]}}"#,
    ));
    let snapshot = block_on(api.deliveries().get("ABC123")).unwrap();

    assert_eq!(snapshot.delivery, json!({ "status": 0 }));
    assert_eq!(snapshot.purchase, json!({ "options": [] }));
    let sent = api.transport().sent();
    assert_eq!(sent[0].url, "/api/deliveries/get");
    assert_eq!(sent[0].body, "code=ABC123");
}

#[test]
fn time_until_delivery_returns_time_text() {
    let api = client(ScriptedTransport::replying(200, r#"{"time":"2 h 5 min"}"#));
    assert_eq!(block_on(api.deliveries().time_until_delivery("c")).unwrap(), "2 h 5 min");
    assert_eq!(api.transport().sent()[0].url, "/api/deliveries/get_time_until_delivery");
}

#[test]
fn pause_and_unpause_accept_ok_ack() {
    let transport = ScriptedTransport::replying(200, r#"{"ok":true}"#);
    transport.push(200, r#"{"ok":true}"#);
    let api = client(transport);
    block_on(api.deliveries().pause("c")).unwrap();
    block_on(api.deliveries().unpause("c")).unwrap();

    let urls: Vec<String> = api.transport().sent().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec!["/api/deliveries/pause", "/api/deliveries/unpause"]);
}

#[test]
fn force_start_rejects_negative_ack() {
    let api = client(ScriptedTransport::replying(200, r#"{"ok":false}"#));
    let err = block_on(api.deliveries().force_start("c")).unwrap_err();
    assert_eq!(err.to_string(), "request rejected: /deliveries/force_start was not acknowledged");
}

#[test]
fn set_steam_profile_url_succeeds_on_empty_error() {
    let api = client(ScriptedTransport::replying(200, r#"{"error":""}"#));
    block_on(api.deliveries().set_steam_profile_url("c", "https://steamcommunity.com/id/x")).unwrap();
    assert_eq!(
        api.transport().sent()[0].body,
        "code=c&steam_profile_url=https%3A%2F%2Fsteamcommunity.com%2Fid%2Fx"
    );
}

#[test]
fn set_steam_profile_url_surfaces_server_message() {
    let api = client(ScriptedTransport::replying(200, r#"{"error":"profile is private"}"#));
    let err = block_on(api.deliveries().set_steam_profile_url("c", "u")).unwrap_err();
    assert!(matches!(err, ApiError::Rejected(msg) if msg == "profile is private"));
}

#[test]
fn check_for_new_status_sends_current_status() {
    let api = client(ScriptedTransport::replying(200, r#"{"new_status":-1}"#));
    let check = block_on(api.deliveries().check_for_new_status("c", 2)).unwrap();
    assert_eq!(check, StatusCheck::Unchanged);
    assert_eq!(api.transport().sent()[0].body, "code=c&delivery_status=2");
}

#[test]
fn check_for_new_status_reports_change() {
    let api = client(ScriptedTransport::replying(200, r#"{"new_status":3}"#));
    assert_eq!(block_on(api.deliveries().check_for_new_status("c", 2)).unwrap(), StatusCheck::Changed(3));
}

#[test]
fn check_for_new_status_reports_failure_message() {
    let api = client(ScriptedTransport::replying(200, r#"{"new_status":-1,"error":"inventory locked"}"#));
    assert_eq!(
        block_on(api.deliveries().check_for_new_status("c", 1)).unwrap(),
        StatusCheck::Failed("inventory locked".into())
    );
}

#[test]
fn courier_profile_unwraps_profile_field() {
    let api = client(ScriptedTransport::replying(200, r#"{"profile":{"name":"courier"}}"#));
    assert_eq!(block_on(api.deliveries().courier_steam_profile()).unwrap(), json!({ "name": "courier" }));
    assert_eq!(api.transport().sent()[0].body, "");
}

#[test]
fn steam_profile_info_passes_json_through() {
    let api = client(ScriptedTransport::replying(200, r#"{"public":true}"#));
    let info = block_on(api.deliveries().steam_profile_info("u")).unwrap();
    assert_eq!(info, json!({ "public": true }));
    assert_eq!(api.transport().sent()[0].url, "/api/get_steam_profile_info");
}
