use std::sync::Arc;

use crate::api::client::ChatApi;
use crate::api::error::ApiError;
use crate::models::Conversation;
use crate::services::auth::AuthSession;

/// Cached conversation list plus the current selection.
///
/// The cache is never patched in place: every mutation refetches the full
/// list so derived summary fields (last message, last model) stay
/// authoritative. `current = None` means a new, unsaved conversation.
pub struct ConversationSync {
    api: Arc<dyn ChatApi>,
    session: Arc<AuthSession>,
    conversations: Vec<Conversation>,
    current: Option<String>,
}

impl ConversationSync {
    pub fn new(api: Arc<dyn ChatApi>, session: Arc<AuthSession>) -> Self {
        Self {
            api,
            session,
            conversations: Vec::new(),
            current: None,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn selected(&self) -> Option<&Conversation> {
        let id = self.current.as_deref()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn select(&mut self, id: Option<String>) {
        self.current = id;
    }

    /// Replace the cached list with a fresh fetch.
    ///
    /// A 401 here degrades to an empty list instead of ending the session:
    /// during startup this fetch races the token verification, and forcing a
    /// logout from the loser of that race loops the user back to the login
    /// screen forever. Every other endpoint treats a 401 as a dead session.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.api.list_conversations().await {
            Ok(list) => {
                self.conversations = list.into_iter().map(Conversation::from).collect();
            }
            Err(ApiError::AuthInvalid) => {
                tracing::warn!("conversation list fetch unauthorized, showing empty list");
                self.conversations.clear();
            }
            Err(e) => return Err(e),
        }
        self.reconcile_selection();
        Ok(())
    }

    /// First load after login: fetch the list and select the most recent
    /// conversation if there is one.
    pub async fn load_initial(&mut self) -> Result<(), ApiError> {
        self.refresh().await?;
        if self.current.is_none() {
            self.current = self.conversations.first().map(|c| c.id.clone());
        }
        Ok(())
    }

    /// Create a conversation, refetch the list, and select the new entry.
    /// A whitespace-only title is dropped before any network activity.
    pub async fn create(&mut self, title: &str) -> Result<(), ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(());
        }

        let created = match self.api.create_conversation(title).await {
            Ok(created) => created,
            Err(e) => return Err(self.escalate(e).await),
        };

        let refreshed = self.refresh().await;
        self.current = Some(created.id);
        refreshed
    }

    /// Rename a conversation. No optimistic title change: the cached title
    /// only moves once the server has accepted the new one and the refetch
    /// has confirmed it. A whitespace-only title is dropped silently.
    pub async fn rename(&mut self, id: &str, title: &str) -> Result<(), ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.api.rename_conversation(id, title).await {
            return Err(self.escalate(e).await);
        }
        self.refresh().await
    }

    /// Delete a conversation. If it was selected, the selection clears even
    /// when the follow-up refetch fails.
    pub async fn remove(&mut self, id: &str) -> Result<(), ApiError> {
        if let Err(e) = self.api.delete_conversation(id).await {
            return Err(self.escalate(e).await);
        }
        if self.current.as_deref() == Some(id) {
            self.current = None;
        }
        self.refresh().await
    }

    fn reconcile_selection(&mut self) {
        if let Some(id) = self.current.as_deref() {
            if !self.conversations.iter().any(|c| c.id == id) {
                tracing::debug!(conversation = id, "selected conversation vanished");
                self.current = None;
            }
        }
    }

    async fn escalate(&self, err: ApiError) -> ApiError {
        if matches!(err, ApiError::AuthInvalid) {
            self.session.invalidate().await;
        }
        err
    }
}
