use sage_types::{AnswerMode, ChatSession, Message, Sender, DEFAULT_SESSION_TITLE};
use serde_json::json;

#[test]
fn test_message_serializes_camel_case() {
    let msg = Message::assistant("Hello", Some(json!({"response": {"answer": "Hello"}})));
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["sender"], "assistant");
    assert_eq!(json["isError"], false);
    assert!(json.get("rawResponse").is_some());
    assert!(json.get("timestamp").is_some());
}

#[test]
fn test_message_raw_response_omitted_when_absent() {
    let msg = Message::user("Hi");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["sender"], "user");
    assert!(json.get("rawResponse").is_none());
}

#[test]
fn test_message_deserializes_stored_record() {
    let json = r#"{
        "id": "1700000000000",
        "content": "What is gravity?",
        "sender": "user",
        "timestamp": "2024-01-15T10:30:00Z"
    }"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg.sender, Sender::User);
    assert!(!msg.is_error);
    assert!(msg.raw_response.is_none());
}

#[test]
fn test_error_message_flags() {
    let msg = Message::error("Failed to load the query.");
    assert_eq!(msg.sender, Sender::Assistant);
    assert!(msg.is_error);
}

#[test]
fn test_new_session_defaults() {
    let session = ChatSession::new();
    assert_eq!(session.title, DEFAULT_SESSION_TITLE);
    assert!(session.messages.is_empty());
    assert!(session.last_message.is_empty());
    assert!(session.has_default_title());
}

#[test]
fn test_session_timestamp_round_trips() {
    let session = ChatSession::new();
    let encoded = serde_json::to_string(&session).unwrap();
    let decoded: ChatSession = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.id, session.id);
    assert_eq!(decoded.timestamp, session.timestamp);
}

#[test]
fn test_answer_mode_levels() {
    assert_eq!(AnswerMode::Easy.student_level(), 0.4);
    assert_eq!(AnswerMode::Intermediate.student_level(), 0.6);
    assert_eq!(AnswerMode::Advanced.student_level(), 1.0);
    assert_eq!(AnswerMode::default(), AnswerMode::Intermediate);
}

#[test]
fn test_answer_mode_serde_tags() {
    assert_eq!(serde_json::to_string(&AnswerMode::Easy).unwrap(), "\"easy\"");
    let mode: AnswerMode = serde_json::from_str("\"advanced\"").unwrap();
    assert_eq!(mode, AnswerMode::Advanced);
}
