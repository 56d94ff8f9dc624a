use async_trait::async_trait;
use sage_chat::{ChatController, FAILURE_NOTICE};
use sage_client::{AskClient, AskRequest, AskTransport, ClientConfig, RawReply, TransportError};
use sage_store::{MemoryStorage, SessionStore};
use sage_types::Sender;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<RawReply, TransportError>>>,
}

impl ScriptedTransport {
    fn new(replies: Vec<Result<RawReply, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }
}

#[async_trait]
impl AskTransport for ScriptedTransport {
    async fn send(&self, _request: &AskRequest) -> Result<RawReply, TransportError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more times than scripted")
    }
}

fn controller_with(replies: Vec<Result<RawReply, TransportError>>) -> ChatController {
    let store = SessionStore::load(Box::new(MemoryStorage::new())).unwrap();
    let client = AskClient::with_transport(
        ScriptedTransport::new(replies),
        ClientConfig::default(),
    );
    ChatController::new(store, client)
}

fn ok_reply(body: &str) -> Result<RawReply, TransportError> {
    Ok(RawReply {
        status: 200,
        ok: true,
        body: body.to_string(),
    })
}

#[tokio::test]
async fn test_successful_exchange_end_to_end() {
    let mut controller = controller_with(vec![ok_reply(
        r#"{"response":{"answer":"**Gravity** pulls things down."}}"#,
    )]);

    controller.send_message("What is gravity?").await.unwrap();

    let messages = controller.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].content, "What is gravity?");
    assert_eq!(messages[1].sender, Sender::Assistant);
    assert_eq!(messages[1].content, "Gravity pulls things down.");
    assert!(!messages[1].is_error);
    assert!(messages[1].raw_response.is_some());
    assert!(!controller.is_loading());

    // The exchange was written through to the session store.
    let session = controller.store().get_current_session().unwrap();
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.title, "What is gravity?");
    assert_eq!(session.last_message, "Gravity pulls things down.");
}

#[tokio::test]
async fn test_blank_question_is_a_no_op() {
    let mut controller = controller_with(vec![]);

    controller.send_message("   \n  ").await.unwrap();

    assert!(controller.messages().is_empty());
    assert!(controller.store().current_session_id().is_none());
}

#[tokio::test]
async fn test_failure_appends_detail_and_generic_notice() {
    let mut controller = controller_with(vec![ok_reply(
        r#"{"success":false,"error":"question too vague"}"#,
    )]);

    controller.send_message("Why?").await.unwrap();

    let messages = controller.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[1].content, "question too vague");
    assert!(messages[1].is_error);
    assert_eq!(messages[2].content, FAILURE_NOTICE);
    assert!(messages[2].is_error);
    assert!(!controller.is_loading());

    // Error entries persist like any other message.
    let session = controller.store().get_current_session().unwrap();
    assert_eq!(session.messages.len(), 3);
    assert_eq!(session.last_message, FAILURE_NOTICE);
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_service_surfaces_unavailable_detail() {
    let mut controller = controller_with(vec![
        Err(TransportError::Network("connection refused".into())),
        Err(TransportError::Network("connection refused".into())),
        Err(TransportError::Network("connection refused".into())),
    ]);

    controller.send_message("What is gravity?").await.unwrap();

    let messages = controller.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages[1].content,
        "Service unavailable (connection refused). Please try again shortly."
    );
    assert_eq!(messages[2].content, FAILURE_NOTICE);
}

#[tokio::test]
async fn test_send_creates_session_when_none_current() {
    let mut controller = controller_with(vec![ok_reply(
        r#"{"response":{"answer":"Yes."}}"#,
    )]);
    assert!(controller.store().current_session_id().is_none());

    controller.send_message("Is water wet?").await.unwrap();

    let session = controller.store().get_current_session().expect("session created");
    assert_eq!(session.title, "Is water wet?");
}

#[tokio::test]
async fn test_session_switching_swaps_working_messages() {
    let mut controller = controller_with(vec![
        ok_reply(r#"{"response":{"answer":"Answer one."}}"#),
        ok_reply(r#"{"response":{"answer":"Answer two."}}"#),
    ]);

    controller.send_message("First question").await.unwrap();
    let first = controller.store().current_session_id().unwrap().to_string();

    controller.new_session().unwrap();
    assert!(controller.messages().is_empty());
    controller.send_message("Second question").await.unwrap();
    assert_eq!(controller.messages().len(), 2);

    controller.select_session(&first).unwrap();
    assert_eq!(controller.messages()[0].content, "First question");
    assert_eq!(controller.messages()[1].content, "Answer one.");
}

#[tokio::test]
async fn test_delete_active_session_resyncs_messages() {
    let mut controller = controller_with(vec![ok_reply(
        r#"{"response":{"answer":"Answer."}}"#,
    )]);

    controller.send_message("Question").await.unwrap();
    let id = controller.store().current_session_id().unwrap().to_string();

    controller.delete_session(&id).unwrap();

    assert!(controller.messages().is_empty());
    assert!(controller.store().current_session_id().is_none());
}

#[tokio::test]
async fn test_reset_clears_conversation_but_keeps_session() {
    let mut controller = controller_with(vec![ok_reply(
        r#"{"response":{"answer":"Answer."}}"#,
    )]);

    controller.send_message("Question").await.unwrap();
    controller.reset().unwrap();

    assert!(controller.messages().is_empty());
    let session = controller.store().get_current_session().unwrap();
    assert!(session.messages.is_empty());
    assert_eq!(session.last_message, "");
}
