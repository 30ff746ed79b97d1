use serde::{Deserialize, Serialize};

pub const SAVE_SUCCESS_MESSAGE: &str = "Case updated successfully!";
pub const SAVE_FAILURE_MESSAGE: &str = "Failed to update the case. Please try again.";

/// An acknowledgement the user has to see: validation problems, save
/// results. Stays up until dismissed or replaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Info)
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Success)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Warning)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Error)
    }

    /// Failure acknowledgement for a save, naming the server's reason when
    /// it gave one.
    #[must_use]
    pub fn save_failed(server_message: Option<&str>) -> Self {
        match server_message {
            Some(reason) => Self::error(format!("Failed to update the case: {reason}")),
            None => Self::error(SAVE_FAILURE_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    /// How long a shell should keep a non-modal rendering on screen.
    #[must_use]
    pub const fn default_duration_ms(self) -> u64 {
        match self {
            Self::Info => 3000,
            Self::Success => 2000,
            Self::Warning => 4000,
            Self::Error => 5000,
        }
    }
}
