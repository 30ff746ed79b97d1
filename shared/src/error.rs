use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Timeout,
    Validation,
    NotFound,
    Conflict,
    RateLimited,
    Server,
    Serialization,
    Deserialization,
    InvalidConfig,
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::RateLimited => "RATE_LIMITED",
            Self::Server => "SERVER_ERROR",
            Self::Serialization => "SERIALIZATION_ERROR",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(
            self,
            Self::Network | Self::Timeout | Self::RateLimited | Self::Server | Self::Conflict
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    /// Root cause reported by the backend, if it sent one.
    pub server_message: Option<String>,
    pub context: BTreeMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            server_message: None,
            context: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Unable to connect. Please check your internet connection and try again.".into()
            }
            ErrorKind::Timeout => "The request timed out. Please try again.".into(),
            ErrorKind::Validation => self.message.clone(),
            ErrorKind::NotFound => "The requested case could not be found.".into(),
            ErrorKind::Conflict => {
                "This case was changed elsewhere. Please refresh and try again.".into()
            }
            ErrorKind::RateLimited => "Too many requests. Please wait a moment and try again.".into(),
            ErrorKind::Serialization | ErrorKind::Deserialization => {
                "The server sent data we could not read.".into()
            }
            ErrorKind::InvalidConfig => format!("Invalid configuration: {}", self.message),
            ErrorKind::Server | ErrorKind::Unknown => {
                "An unexpected error occurred. Please try again.".into()
            }
        }
    }

    /// Builds an error for a non-2xx response. A JSON body with a `message`
    /// field becomes the server message.
    #[must_use]
    pub fn from_http_status(status: u16, body: Option<&[u8]>) -> Self {
        let kind = match status {
            400 | 422 => ErrorKind::Validation,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::Timeout,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Unknown,
        };

        let server_message = body
            .and_then(|b| serde_json::from_slice::<ApiErrorResponse>(b).ok())
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty());

        let message = server_message
            .clone()
            .unwrap_or_else(|| format!("HTTP error: {status}"));

        let mut error = Self::new(kind, message).with_context("http_status", status.to_string());
        error.server_message = server_message;
        error
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

impl From<crux_http::Error> for AppError {
    fn from(e: crux_http::Error) -> Self {
        use crux_http::Error as HttpError;

        match &e {
            HttpError::Http(http) => {
                AppError::from_http_status(u16::from(http.code), None)
            }
            HttpError::Json(_) => AppError::new(ErrorKind::Deserialization, e.to_string()),
            HttpError::Url(_) => AppError::new(ErrorKind::InvalidConfig, e.to_string()),
            _ => AppError::new(ErrorKind::Network, e.to_string()),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        let ConfigError::InvalidUrl { url, .. } = &e;
        AppError::new(ErrorKind::InvalidConfig, e.to_string()).with_context("url", url.clone())
    }
}

/// Why a save was refused before anything was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SaveRejected {
    #[error("Please fill in all required fields.")]
    MissingRequiredFields,
    #[error("No changes to update.")]
    NoChanges,
    #[error("Case is not in edit mode.")]
    NotEditing,
    #[error("A save is already in progress.")]
    SaveInFlight,
}

impl From<SaveRejected> for AppError {
    fn from(e: SaveRejected) -> Self {
        AppError::new(ErrorKind::Validation, e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
