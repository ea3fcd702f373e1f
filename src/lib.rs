//! Client core for Stir, a multi-provider AI chat application.
//!
//! The crate owns the state that has to be right: the authentication
//! lifecycle ([`AuthSession`]), the conversation list and its selection
//! ([`ConversationSync`]), the per-conversation message log ([`MessageFlow`]),
//! and the persisted token/user pair ([`CredentialStore`]). A UI layer drives
//! these services and renders their state; it contributes no logic of its own.
//!
//! Typical wiring:
//!
//! ```no_run
//! use std::sync::Arc;
//! use stir::{AuthSession, ClientConfig, ConversationSync, CredentialStore, HttpApi, MessageFlow};
//!
//! # async fn wire() -> anyhow::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let store = CredentialStore::open().await?;
//! let api = Arc::new(HttpApi::new(&config, store.clone()));
//! let session = Arc::new(AuthSession::new(api.clone(), store, &config).await);
//!
//! session.bootstrap().await;
//!
//! let mut conversations = ConversationSync::new(api.clone(), session.clone());
//! let mut chat = MessageFlow::new(api, session.clone());
//! if session.is_authenticated() {
//!     conversations.load_initial().await?;
//!     chat.load_history(conversations.current_id()).await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod models;
pub mod providers;
pub mod services;

pub use api::{ApiError, ChatApi, HttpApi};
pub use config::ClientConfig;
pub use models::{Conversation, Message, Role, User};
pub use providers::{classify, format_model_name, ProviderKind};
pub use services::{AuthSession, AuthStatus, ConversationSync, CredentialStore, MessageFlow, Session};
