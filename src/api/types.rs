use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Conversation, User};

// Backend ids arrive as strings or numbers depending on the storage column
// behind them; the client treats both as opaque strings.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}

// --- Auth ---

#[derive(Debug, Serialize)]
pub struct CredentialRequest {
    pub credential: String,
}

#[derive(Debug, Serialize)]
pub struct CallbackRequest {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

// --- Conversations ---

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationSummary {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_model_name: Option<String>,
}

impl From<ConversationSummary> for Conversation {
    fn from(summary: ConversationSummary) -> Self {
        Conversation {
            id: summary.id,
            title: summary.title,
            last_message: summary.last_message,
            last_model_name: summary.last_model_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TitleRequest {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedConversation {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

// --- Messages ---

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryMessage {
    #[serde(default, deserialize_with = "optional_id_string")]
    pub id: Option<String>,
    pub content: String,
    pub role: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub prompt: String,
    pub model_type: String,
    pub model_name: String,
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub response: String,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub conversation_id: Option<String>,
}
