use super::kind::ProviderKind;

/// A selectable model: wire name plus the provider it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelChoice {
    pub name: &'static str,
    pub kind: ProviderKind,
}

/// A provider's section in the model picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelGroup {
    pub label: &'static str,
    pub models: &'static [ModelChoice],
}

/// Preselected model for a fresh session.
pub const DEFAULT_MODEL: ModelChoice = ModelChoice {
    name: "gpt-3.5-turbo",
    kind: ProviderKind::OpenAi,
};

pub const MODEL_CATALOG: &[ModelGroup] = &[
    ModelGroup {
        label: "OpenAI",
        models: &[
            ModelChoice {
                name: "gpt-3.5-turbo",
                kind: ProviderKind::OpenAi,
            },
            ModelChoice {
                name: "gpt-4",
                kind: ProviderKind::OpenAi,
            },
            ModelChoice {
                name: "gpt-4-turbo",
                kind: ProviderKind::OpenAi,
            },
        ],
    },
    ModelGroup {
        label: "Claude",
        models: &[
            ModelChoice {
                name: "claude-3-opus-latest",
                kind: ProviderKind::Claude,
            },
            ModelChoice {
                name: "claude-3-5-sonnet-latest",
                kind: ProviderKind::Claude,
            },
            ModelChoice {
                name: "claude-3-7-sonnet-latest",
                kind: ProviderKind::Claude,
            },
        ],
    },
    ModelGroup {
        label: "DeepSeek",
        models: &[ModelChoice {
            name: "deepseek-chat",
            kind: ProviderKind::DeepSeek,
        }],
    },
    ModelGroup {
        label: "xAI",
        models: &[ModelChoice {
            name: "grok-2-1212",
            kind: ProviderKind::Grok,
        }],
    },
];
