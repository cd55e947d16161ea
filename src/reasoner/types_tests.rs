//! Tests for reasoner payload parsing.

use super::*;

#[test]
fn test_message_constructors() {
    let msg = Message::system("be fair");
    assert!(matches!(msg.role, MessageRole::System));
    assert_eq!(msg.content, "be fair");

    let msg = Message::user("hello");
    assert!(matches!(msg.role, MessageRole::User));

    let msg = Message::assistant("hi");
    assert!(matches!(msg.role, MessageRole::Assistant));
}

#[test]
fn test_pipe_request_serialization() {
    let request = PipeRequest::new("debate-analyze-v1", vec![Message::user("x")])
        .with_thread_id("debate-1");
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["name"], "debate-analyze-v1");
    assert_eq!(json["stream"], false);
    assert_eq!(json["threadId"], "debate-1");
}

#[test]
fn test_analyze_payload_from_raw_json() {
    let completion = r#"{
        "nodes": [
            {"id": "c1", "speaker": "side_a", "kind": "claim", "content": "tabs are better"}
        ],
        "edges": [],
        "title": "Tabs vs spaces",
        "description": "",
        "baseline": {"leaning": -0.3, "leaning_reason": "stronger opening"}
    }"#;

    let payload = AnalyzePayload::from_completion(completion).unwrap();
    assert_eq!(payload.map.nodes.len(), 1);
    assert_eq!(payload.map.title, "Tabs vs spaces");
    let baseline = payload.baseline.unwrap();
    assert_eq!(baseline.leaning, -0.3);
    assert_eq!(baseline.leaning_reason.as_deref(), Some("stronger opening"));
}

#[test]
fn test_analyze_payload_from_fenced_json() {
    let completion = "Here is the updated map:\n```json\n{\"nodes\": [], \"edges\": [], \"title\": \"t\", \"description\": \"\"}\n```";
    let payload = AnalyzePayload::from_completion(completion).unwrap();
    assert!(payload.map.nodes.is_empty());
    assert!(payload.baseline.is_none());
}

#[test]
fn test_analyze_payload_rejects_plain_text() {
    let result = AnalyzePayload::from_completion("I could not produce a map.");
    assert!(matches!(
        result,
        Err(crate::error::ReasonerError::InvalidResponse { .. })
    ));
}

#[test]
fn test_analyze_payload_rejects_malformed_json() {
    let result = AnalyzePayload::from_completion(r#"{"nodes": [{}]}"#);
    assert!(result.is_err());
}

#[test]
fn test_chat_payload_with_map_patch() {
    let completion = r#"{"reply": "removed the duplicate claim", "map": {"nodes": [], "edges": [], "title": "", "description": ""}}"#;
    let payload = ChatPayload::from_completion(completion).unwrap();
    assert_eq!(payload.reply, "removed the duplicate claim");
    assert!(payload.map.is_some());
}

#[test]
fn test_chat_payload_plain_text_fallback() {
    let payload = ChatPayload::from_completion("The debate looks balanced so far.").unwrap();
    assert_eq!(payload.reply, "The debate looks balanced so far.");
    assert!(payload.map.is_none());
}

#[test]
fn test_chat_payload_rejects_malformed_map_patch() {
    // JSON that parses but carries a map without node/edge collections.
    let completion = r#"{"reply": "done", "map": {"title": "t"}}"#;
    let result = ChatPayload::from_completion(completion);
    assert!(matches!(
        result,
        Err(crate::error::ReasonerError::InvalidResponse { .. })
    ));
}
