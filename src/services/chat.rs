use std::sync::Arc;

use uuid::Uuid;

use crate::api::client::ChatApi;
use crate::api::error::ApiError;
use crate::api::types::SendRequest;
use crate::models::{Message, Role};
use crate::services::auth::AuthSession;
use crate::services::conversations::ConversationSync;

/// Shown in place of a reply when the exchange fails.
pub const SEND_FAILURE_TEXT: &str = "Failed to send message. Please try again.";

/// The message log of whichever conversation is selected.
///
/// Sends are optimistic: the user's message is committed to the log before
/// the network call goes out, so the reply (or the error entry) can only ever
/// land after it. `loading` is true only while history is being fetched,
/// never during a send.
pub struct MessageFlow {
    api: Arc<dyn ChatApi>,
    session: Arc<AuthSession>,
    messages: Vec<Message>,
    loading: bool,
}

impl MessageFlow {
    pub fn new(api: Arc<dyn ChatApi>, session: Arc<AuthSession>) -> Self {
        Self {
            api,
            session,
            messages: Vec::new(),
            loading: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Load the selected conversation's history, replacing the log wholesale.
    ///
    /// `None` is the new-conversation state: the log clears without a network
    /// call. On failure the log is left empty rather than partially filled.
    pub async fn load_history(&mut self, conversation_id: Option<&str>) {
        let Some(id) = conversation_id else {
            self.messages.clear();
            return;
        };

        self.loading = true;
        match self.api.conversation_history(id).await {
            Ok(history) => {
                self.messages = history
                    .into_iter()
                    .map(|msg| Message {
                        id: msg
                            .id
                            .unwrap_or_else(|| Uuid::new_v4().to_string()),
                        text: msg.content,
                        is_user: matches!(Role::from_str(&msg.role), Some(Role::User)),
                        model_name: msg.model_name,
                        model_type: msg.model_type,
                        is_error: false,
                    })
                    .collect();
            }
            Err(e) => {
                if matches!(e, ApiError::AuthInvalid) {
                    self.session.invalidate().await;
                }
                tracing::error!(conversation = id, "failed to load history: {e}");
                self.messages.clear();
            }
        }
        self.loading = false;
    }

    /// Send a prompt against the current selection.
    ///
    /// Every outcome lands in the log: the optimistic user message first,
    /// then either the reply (tagged with the model that was requested, not
    /// whatever the server reports) or a single error entry. When the backend
    /// creates a conversation for a previously unsaved chat, its id becomes
    /// the selection before the reply is appended, so the next send already
    /// targets it.
    pub async fn send(
        &mut self,
        prompt: &str,
        model_type: &str,
        model_name: &str,
        conversations: &mut ConversationSync,
    ) {
        if prompt.trim().is_empty() {
            return;
        }

        self.messages.push(Message::user(prompt));

        let request = SendRequest {
            prompt: prompt.to_string(),
            model_type: model_type.to_string(),
            model_name: model_name.to_string(),
            conversation_id: conversations.current_id().map(str::to_string),
        };

        match self.api.send_message(&request).await {
            Ok(response) => {
                if conversations.current_id().is_none() {
                    if let Some(id) = response.conversation_id {
                        conversations.select(Some(id));
                    }
                }
                self.messages
                    .push(Message::assistant(response.response, model_name, model_type));
                if let Err(e) = conversations.refresh().await {
                    tracing::error!("conversation list refresh after send failed: {e}");
                }
            }
            Err(e) => {
                if matches!(e, ApiError::AuthInvalid) {
                    self.session.invalidate().await;
                }
                tracing::error!("failed to send message: {e}");
                self.messages.push(Message::error(SEND_FAILURE_TEXT));
            }
        }
    }
}
