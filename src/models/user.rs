use serde::{Deserialize, Serialize};

/// The authenticated account as reported by the backend after a credential
/// exchange. Persisted verbatim alongside the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// Avatar initials: first character of each whitespace-separated name
    /// part, `"U"` when the name is empty.
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}
