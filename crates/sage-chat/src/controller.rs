use sage_client::{AskClient, FeedbackRequest, FeedbackSender};
use sage_store::{SessionStore, StoreError};
use sage_types::{AnswerMode, Message};
use serde_json::Value;
use thiserror::Error;

/// Generic notice appended alongside the detailed error message when an ask
/// fails. Kept as a second, separate chat entry on purpose.
pub const FAILURE_NOTICE: &str = "Failed to load the query.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives one conversation: owns the working message list for the active
/// session, calls the ask client, and writes every change through the
/// session store.
///
/// One send at a time; presentation gates the input on `is_loading`.
pub struct ChatController {
    store: SessionStore,
    client: AskClient,
    feedback: Option<FeedbackSender>,
    messages: Vec<Message>,
    mode: AnswerMode,
    loading: bool,
}

impl ChatController {
    pub fn new(store: SessionStore, client: AskClient) -> Self {
        let messages = store
            .get_current_session()
            .map(|session| session.messages.clone())
            .unwrap_or_default();
        Self {
            store,
            client,
            feedback: None,
            messages,
            mode: AnswerMode::default(),
            loading: false,
        }
    }

    pub fn with_feedback(mut self, feedback: FeedbackSender) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Sends one question through the full pipeline. A blank question is a
    /// no-op; a missing session is created on the fly. Failures surface as
    /// two error entries in the conversation, never as a return error --
    /// only store persistence can fail here.
    pub async fn send_message(&mut self, question: &str) -> Result<(), ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(());
        }

        let session_id = match self.store.current_session_id() {
            Some(id) => id.to_string(),
            None => self.store.create_session()?,
        };

        self.messages.push(Message::user(question));
        self.store
            .update_session_messages(&session_id, self.messages.clone())?;
        self.loading = true;

        match self.client.ask(question, self.mode).await {
            Ok(answer) => {
                self.messages
                    .push(Message::assistant(answer.cleaned, Some(answer.raw)));
            }
            Err(err) => {
                tracing::warn!(%err, "ask failed, recording error entries");
                self.messages.push(Message::error(err.to_string()));
                self.messages.push(Message::error(FAILURE_NOTICE));
            }
        }
        self.loading = false;

        self.store
            .update_session_messages(&session_id, self.messages.clone())?;
        Ok(())
    }

    /// Starts a fresh session and clears the working message list.
    pub fn new_session(&mut self) -> Result<String, ChatError> {
        let id = self.store.create_session()?;
        self.messages.clear();
        Ok(id)
    }

    /// Switches the active session and loads its messages.
    pub fn select_session(&mut self, id: &str) -> Result<(), ChatError> {
        self.store.set_current_session(Some(id.to_string()))?;
        self.sync_from_current();
        Ok(())
    }

    pub fn delete_session(&mut self, id: &str) -> Result<(), ChatError> {
        self.store.delete_session(id)?;
        self.sync_from_current();
        Ok(())
    }

    pub fn rename_session(&mut self, id: &str, new_title: &str) -> Result<(), ChatError> {
        self.store.rename_session(id, new_title)?;
        Ok(())
    }

    /// Clears the active conversation (the session itself stays).
    pub fn reset(&mut self) -> Result<(), ChatError> {
        self.messages.clear();
        if let Some(id) = self.store.current_session_id().map(str::to_string) {
            self.store.update_session_messages(&id, Vec::new())?;
        }
        Ok(())
    }

    pub fn toggle_sidebar(&mut self) -> Result<bool, ChatError> {
        Ok(self.store.toggle_sidebar()?)
    }

    /// Best-effort rating/comment submission for one assistant message.
    /// Does nothing when no feedback endpoint is configured or the message
    /// carries no upstream payload.
    pub async fn send_feedback(&self, message: &Message, rating: Option<u8>, comment: Option<String>) {
        let Some(sender) = &self.feedback else {
            return;
        };
        let Some(raw) = &message.raw_response else {
            tracing::debug!("message has no upstream payload, skipping feedback");
            return;
        };

        let question = raw
            .pointer("/response/question")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let response = raw.get("response").cloned().unwrap_or_else(|| raw.clone());

        sender
            .send(FeedbackRequest {
                question,
                response,
                rating,
                comment,
            })
            .await;
    }

    pub fn set_mode(&mut self, mode: AnswerMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> AnswerMode {
        self.mode
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    fn sync_from_current(&mut self) {
        self.messages = self
            .store
            .get_current_session()
            .map(|session| session.messages.clone())
            .unwrap_or_default();
    }
}
