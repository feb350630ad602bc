// Verify wire format matches what AG-UI clients expect.
// These tests ensure client compatibility is never broken.

use agui_protocol::event::{AguiEvent, AguiMetadata, EventKind};
use agui_protocol::frames::{EventFrame, InboundFrame, ResFrame};
use agui_protocol::handshake::{AuthPayload, ConnectParams};

#[test]
fn req_frame_round_trip() {
    let json =
        r#"{"type":"req","id":"abc-123","method":"event.generate","params":{"template_id":"chat-welcome"}}"#;
    let frame: InboundFrame = serde_json::from_str(json).unwrap();
    assert_eq!(frame.frame_type, "req");

    let req = frame.as_req().unwrap();
    assert_eq!(req.method, "event.generate");
    assert_eq!(req.id, "abc-123");
}

#[test]
fn res_ok_serialization() {
    let res = ResFrame::ok("req-1", serde_json::json!({"pong": true}));
    let json = serde_json::to_string(&res).unwrap();

    assert!(json.contains(r#""type":"res""#));
    assert!(json.contains(r#""ok":true"#));
    assert!(json.contains(r#""pong":true"#));
    // error field must be absent on success
    assert!(!json.contains(r#""error""#));
}

#[test]
fn res_err_serialization() {
    let res = ResFrame::err("req-2", "TEMPLATE_NOT_FOUND", "no such template");
    let json = serde_json::to_string(&res).unwrap();

    assert!(json.contains(r#""ok":false"#));
    assert!(json.contains(r#""TEMPLATE_NOT_FOUND""#));
    // payload must be absent on error
    assert!(!json.contains(r#""payload""#));
}

#[test]
fn event_frame_with_seq() {
    let ev = EventFrame::new("tick", serde_json::json!({"ts": 1234567890})).with_seq(42);
    let json = serde_json::to_string(&ev).unwrap();

    assert!(json.contains(r#""type":"event""#));
    assert!(json.contains(r#""event":"tick""#));
    assert!(json.contains(r#""seq":42"#));
}

#[test]
fn connect_params_token_auth() {
    let json = r#"{"auth":{"mode":"token","token":"secret-123"}}"#;
    let params: ConnectParams = serde_json::from_str(json).unwrap();

    match params.auth {
        AuthPayload::Token { ref token } => assert_eq!(token, "secret-123"),
        _ => panic!("expected token auth"),
    }
}

#[test]
fn agui_event_flattens_template_fields() {
    let mut fields = serde_json::Map::new();
    fields.insert("text".into(), serde_json::json!("Hi Ann"));

    let event = AguiEvent {
        kind: EventKind::Chat,
        fields,
        agui_metadata: AguiMetadata {
            generated_by: "ui-agent".into(),
            template_id: "chat-welcome".into(),
            generated_at: "2026-01-01T00:00:00+00:00".into(),
            client_id: Some("conn-1".into()),
        },
    };

    let json = serde_json::to_string(&event).unwrap();
    // template fields and type tag live at the top level, not nested
    assert!(json.contains(r#""type":"chat""#));
    assert!(json.contains(r#""text":"Hi Ann""#));
    assert!(json.contains(r#""template_id":"chat-welcome""#));
}

#[test]
fn agui_metadata_client_id_serializes_as_null() {
    let meta = AguiMetadata {
        generated_by: "ui-agent".into(),
        template_id: "status-update".into(),
        generated_at: "2026-01-01T00:00:00+00:00".into(),
        client_id: None,
    };
    let json = serde_json::to_string(&meta).unwrap();
    // clients rely on the field always being present
    assert!(json.contains(r#""client_id":null"#));
}

#[test]
fn event_kind_tags_are_lowercase() {
    for (kind, tag) in [
        (EventKind::Chat, r#""chat""#),
        (EventKind::Display, r#""display""#),
        (EventKind::Input, r#""input""#),
        (EventKind::Status, r#""status""#),
    ] {
        assert_eq!(serde_json::to_string(&kind).unwrap(), tag);
    }
}

#[test]
fn agui_event_round_trip() {
    let json = r#"{"type":"display","template":"metrics_panel","data":{"cpu":0.5},
        "agui_metadata":{"generated_by":"ui-agent","template_id":"display-metrics",
        "generated_at":"2026-01-01T00:00:00+00:00","client_id":null}}"#;
    let event: AguiEvent = serde_json::from_str(json).unwrap();
    assert_eq!(event.kind, EventKind::Display);
    assert_eq!(event.fields["template"], "metrics_panel");
    assert!(event.agui_metadata.client_id.is_none());
}
