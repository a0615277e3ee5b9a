use crate::contact::FieldName;

/// Lifecycle of a single contact form instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Sending,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: ButtonLabel,
}

impl SubmitButton {
    pub const IDLE: Self = Self {
        enabled: true,
        label: ButtonLabel::Default,
    };

    pub const LOADING: Self = Self {
        enabled: false,
        label: ButtonLabel::Loading,
    };
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self::IDLE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    Default,
    Loading,
}

/// User interactions a mounted form reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input { field: FieldName, value: String },
    Blur(FieldName),
    Submit,
}
