use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::client::ChatApi;
use super::error::ApiError;
use super::types::{
    ConversationSummary, CreatedConversation, HistoryMessage, LoginResponse, SendRequest,
    SendResponse,
};
use crate::models::User;

/// How a scripted endpoint responds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    Succeed,
    Unauthorized,
    Rejected,
    NetworkDown,
}

impl MockOutcome {
    fn check(self) -> Result<(), ApiError> {
        match self {
            MockOutcome::Succeed => Ok(()),
            MockOutcome::Unauthorized => Err(ApiError::AuthInvalid),
            MockOutcome::Rejected => Err(ApiError::Rejected {
                status: 500,
                message: "scripted rejection".to_string(),
            }),
            MockOutcome::NetworkDown => Err(ApiError::Network("connection refused".to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockLogin {
    Succeed,
    Rejected,
    Hang,
}

/// In-memory stand-in for the backend used by the service tests.
///
/// Successful mutations update a tiny conversation table so list round-trips
/// behave like the real server, and every network-shaped call is recorded so
/// tests can assert that validation short-circuits before any I/O.
pub struct MockApi {
    pub calls: Mutex<Vec<String>>,
    pub conversations: Mutex<Vec<ConversationSummary>>,
    pub history: Mutex<Vec<HistoryMessage>>,
    pub reply: Mutex<String>,
    pub verify_valid: Mutex<Option<bool>>,
    pub login: Mutex<MockLogin>,
    pub list_outcome: Mutex<MockOutcome>,
    pub create_outcome: Mutex<MockOutcome>,
    pub rename_outcome: Mutex<MockOutcome>,
    pub delete_outcome: Mutex<MockOutcome>,
    pub history_outcome: Mutex<MockOutcome>,
    pub send_outcome: Mutex<MockOutcome>,
    next_id: AtomicU32,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            conversations: Mutex::new(Vec::new()),
            history: Mutex::new(Vec::new()),
            reply: Mutex::new("Hi".to_string()),
            verify_valid: Mutex::new(Some(true)),
            login: Mutex::new(MockLogin::Succeed),
            list_outcome: Mutex::new(MockOutcome::Succeed),
            create_outcome: Mutex::new(MockOutcome::Succeed),
            rename_outcome: Mutex::new(MockOutcome::Succeed),
            delete_outcome: Mutex::new(MockOutcome::Succeed),
            history_outcome: Mutex::new(MockOutcome::Succeed),
            send_outcome: Mutex::new(MockOutcome::Succeed),
            next_id: AtomicU32::new(1),
        }
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test_user() -> User {
        User {
            id: "u1".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
        }
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn seed_conversation(&self, id: &str, title: &str) {
        self.conversations
            .lock()
            .unwrap()
            .push(ConversationSummary {
                id: id.to_string(),
                title: title.to_string(),
                last_message: None,
                last_model_name: None,
            });
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn fresh_id(&self) -> String {
        format!("c{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn login_response(&self) -> Result<LoginResponse, ApiError> {
        Ok(LoginResponse {
            token: "tok-1".to_string(),
            user: Self::test_user(),
        })
    }

    async fn run_login(&self, call: String) -> Result<LoginResponse, ApiError> {
        self.record(call);
        let script = *self.login.lock().unwrap();
        match script {
            MockLogin::Succeed => self.login_response(),
            MockLogin::Rejected => Err(ApiError::Rejected {
                status: 400,
                message: "credential rejected".to_string(),
            }),
            MockLogin::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(ApiError::Network("hung exchange finished".to_string()))
            }
        }
    }
}

#[async_trait]
impl ChatApi for MockApi {
    async fn exchange_credential(
        &self,
        provider: &str,
        _credential: &str,
    ) -> Result<LoginResponse, ApiError> {
        self.run_login(format!("login {provider}")).await
    }

    async fn exchange_oauth_code(
        &self,
        provider: &str,
        _code: &str,
    ) -> Result<LoginResponse, ApiError> {
        self.run_login(format!("callback {provider}")).await
    }

    async fn verify_token(&self, _token: &str) -> Result<bool, ApiError> {
        self.record("verify".to_string());
        match *self.verify_valid.lock().unwrap() {
            Some(valid) => Ok(valid),
            None => Err(ApiError::Network("connection refused".to_string())),
        }
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        self.record("list".to_string());
        self.list_outcome.lock().unwrap().check()?;
        Ok(self.conversations.lock().unwrap().clone())
    }

    async fn create_conversation(&self, title: &str) -> Result<CreatedConversation, ApiError> {
        self.record(format!("create {title}"));
        self.create_outcome.lock().unwrap().check()?;
        let id = self.fresh_id();
        self.seed_conversation(&id, title);
        Ok(CreatedConversation { id })
    }

    async fn rename_conversation(
        &self,
        conversation_id: &str,
        title: &str,
    ) -> Result<(), ApiError> {
        self.record(format!("rename {conversation_id} {title}"));
        self.rename_outcome.lock().unwrap().check()?;
        let mut conversations = self.conversations.lock().unwrap();
        if let Some(conv) = conversations.iter_mut().find(|c| c.id == conversation_id) {
            conv.title = title.to_string();
        }
        Ok(())
    }

    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), ApiError> {
        self.record(format!("delete {conversation_id}"));
        self.delete_outcome.lock().unwrap().check()?;
        self.conversations
            .lock()
            .unwrap()
            .retain(|c| c.id != conversation_id);
        Ok(())
    }

    async fn conversation_history(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<HistoryMessage>, ApiError> {
        self.record(format!("history {conversation_id}"));
        self.history_outcome.lock().unwrap().check()?;
        Ok(self.history.lock().unwrap().clone())
    }

    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse, ApiError> {
        self.record(format!("send {}", request.prompt));
        self.send_outcome.lock().unwrap().check()?;

        let created_id = match &request.conversation_id {
            Some(_) => None,
            None => {
                let id = self.fresh_id();
                self.seed_conversation(&id, &request.prompt);
                Some(id)
            }
        };

        let target = request
            .conversation_id
            .clone()
            .or_else(|| created_id.clone());
        if let Some(target) = target {
            let mut conversations = self.conversations.lock().unwrap();
            if let Some(conv) = conversations.iter_mut().find(|c| c.id == target) {
                conv.last_message = Some(request.prompt.clone());
                conv.last_model_name = Some(request.model_name.clone());
            }
        }

        Ok(SendResponse {
            response: self.reply.lock().unwrap().clone(),
            conversation_id: created_id,
        })
    }
}
