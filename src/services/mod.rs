pub mod auth;
pub mod chat;
pub mod conversations;
pub mod store;

pub use auth::{AuthSession, AuthStatus, Session};
pub use chat::MessageFlow;
pub use conversations::ConversationSync;
pub use store::CredentialStore;
