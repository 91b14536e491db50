use serde::{Deserialize, Serialize};

/// The four form fields a Kontext edit prompt is assembled from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptParts {
    /// Element to be edited.
    pub target: String,
    /// Transformation applied to `target`.
    pub change: String,
    /// Elements that must stay unchanged.
    pub preserve: String,
    /// Quality and style descriptors.
    pub style: String,
}

impl PromptParts {
    pub fn new(
        target: impl Into<String>,
        change: impl Into<String>,
        preserve: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            change: change.into(),
            preserve: preserve.into(),
            style: style.into(),
        }
    }

    pub fn set(&mut self, field: PromptField, value: impl Into<String>) {
        let slot = match field {
            PromptField::Target => &mut self.target,
            PromptField::Change => &mut self.change,
            PromptField::Preserve => &mut self.preserve,
            PromptField::Style => &mut self.style,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptField {
    Target,
    Change,
    Preserve,
    Style,
}

impl PromptField {
    /// Sentence assembly order.
    pub const ALL: [PromptField; 4] = [
        PromptField::Target,
        PromptField::Change,
        PromptField::Preserve,
        PromptField::Style,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PromptField::Target => "target",
            PromptField::Change => "change",
            PromptField::Preserve => "preserve",
            PromptField::Style => "style",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistStatus {
    #[default]
    Idle,
    InFlight,
}
