use serde::{Deserialize, Serialize};

/// Upstream language-model vendors the backend can route to.
///
/// `Unknown` absorbs anything unrecognized so the UI can fall back to a
/// generic badge instead of failing on a model name it has never seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    OpenAi,
    Claude,
    DeepSeek,
    Grok,
    Unknown,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Claude => "claude",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Grok => "grok",
            ProviderKind::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Claude => "Anthropic",
            ProviderKind::DeepSeek => "DeepSeek",
            ProviderKind::Grok => "xAI",
            ProviderKind::Unknown => "Unknown",
        }
    }

    /// Parses the wire `modelType` values. `"unknown"` deliberately does not
    /// parse: an unrecognized type falls through to name matching.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "openai" => Some(ProviderKind::OpenAi),
            "claude" => Some(ProviderKind::Claude),
            "deepseek" => Some(ProviderKind::DeepSeek),
            "grok" => Some(ProviderKind::Grok),
            _ => None,
        }
    }
}

/// Classify a message's provider from its model type and name.
///
/// An explicitly recognized `model_type` wins; otherwise the model name is
/// matched case-insensitively by substring. Total and order-independent:
/// the same inputs always yield the same kind, and nothing here panics.
pub fn classify(model_name: Option<&str>, model_type: Option<&str>) -> ProviderKind {
    if let Some(kind) = model_type.and_then(ProviderKind::from_str) {
        return kind;
    }

    let Some(name) = model_name else {
        return ProviderKind::Unknown;
    };

    let lower = name.to_lowercase();
    if lower.contains("gpt") {
        ProviderKind::OpenAi
    } else if lower.contains("claude") {
        ProviderKind::Claude
    } else if lower.contains("deepseek") {
        ProviderKind::DeepSeek
    } else if lower.contains("grok") {
        ProviderKind::Grok
    } else {
        ProviderKind::Unknown
    }
}

// Words left untouched when prettifying a model name.
const PLAIN_WORDS: &[&str] = &[
    "gpt", "3", "4", "5", "7", "opus", "sonnet", "latest", "turbo",
];

/// Human-readable form of a kebab-case model name:
/// `claude-3-5-sonnet-latest` becomes `Claude 3.5 sonnet latest`.
pub fn format_model_name(model_name: Option<&str>) -> String {
    let Some(name) = model_name.filter(|n| !n.is_empty()) else {
        return "Unknown Model".to_string();
    };

    let joined = name
        .split('-')
        .map(|word| {
            if PLAIN_WORDS.contains(&word) {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    join_split_versions(&joined)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Version numbers split across kebab segments come out as "3 5"; rejoin each
// first adjacent digit pair as "3.5". Scanning resumes after a merged pair,
// so "3 5 7" yields "3.5 7".
fn join_split_versions(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let first_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let ws_start = i;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }

        if i > ws_start && i < chars.len() && chars[i].is_ascii_digit() {
            let second_start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            out.extend(&chars[first_start..ws_start]);
            out.push('.');
            out.extend(&chars[second_start..i]);
        } else {
            out.extend(&chars[first_start..i]);
        }
    }

    out
}
