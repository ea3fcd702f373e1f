use async_trait::async_trait;

use super::error::ApiError;
use super::types::{
    ConversationSummary, CreatedConversation, HistoryMessage, LoginResponse, SendRequest,
    SendResponse,
};

/// The backend proxy contract, one method per endpoint.
///
/// Services depend on this trait rather than on the transport, so tests can
/// script a backend the same way the HTTP implementation talks to a real one.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Exchange an identity-provider credential for a session token.
    async fn exchange_credential(
        &self,
        provider: &str,
        credential: &str,
    ) -> Result<LoginResponse, ApiError>;

    /// Exchange an OAuth authorization code for a session token.
    async fn exchange_oauth_code(
        &self,
        provider: &str,
        code: &str,
    ) -> Result<LoginResponse, ApiError>;

    /// Check whether a persisted token is still accepted.
    async fn verify_token(&self, token: &str) -> Result<bool, ApiError>;

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError>;

    async fn create_conversation(&self, title: &str) -> Result<CreatedConversation, ApiError>;

    async fn rename_conversation(&self, conversation_id: &str, title: &str)
        -> Result<(), ApiError>;

    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), ApiError>;

    /// Ordered message history of one conversation.
    async fn conversation_history(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<HistoryMessage>, ApiError>;

    /// Send a prompt; the response carries a conversation id only when the
    /// backend created one for a previously unsaved chat.
    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse, ApiError>;
}
