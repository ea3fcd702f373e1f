use serde::{Deserialize, Serialize};

/// A named conversation as listed by the backend. The list order is
/// server-defined and never rearranged locally; the summary fields are
/// refetched wholesale after every mutation instead of being patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub last_message: Option<String>,
    pub last_model_name: Option<String>,
}
