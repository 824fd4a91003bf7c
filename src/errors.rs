//! Error types for the DaoKit crate
//!
//! Application errors carry an [`ErrorCode`] and a message; failures from the
//! builder, the driver, the memory store or configuration are wrapped as-is
//! and report [`ErrorCode::Internal`] unless noted otherwise.

use config::ConfigError;
use memory_store::MemoryError;
use query_builder::BuilderError;
use std::fmt;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "internal error";

/// Application error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Internal,
    ServiceUnavailable,
    Network,
    ClientSide,
    Unauthorized,
    NotFound,
    Unprocessable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Internal => "internal",
            ErrorCode::ServiceUnavailable => "service_unavailable",
            ErrorCode::Network => "network",
            ErrorCode::ClientSide => "client_side",
            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::NotFound => "not_found",
            ErrorCode::Unprocessable => "unprocessable_entity",
        }
    }

    /// HTTP status for the code; network failures have none
    pub fn status(&self) -> Option<u16> {
        match self {
            ErrorCode::Internal => Some(500),
            ErrorCode::ServiceUnavailable => Some(503),
            ErrorCode::Network => None,
            ErrorCode::ClientSide => Some(400),
            ErrorCode::Unauthorized => Some(401),
            ErrorCode::NotFound => Some(404),
            ErrorCode::Unprocessable => Some(422),
        }
    }

    /// Code for a failed HTTP response; unlisted statuses are internal
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCode::ClientSide,
            401 => ErrorCode::Unauthorized,
            404 => ErrorCode::NotFound,
            422 => ErrorCode::Unprocessable,
            503 => ErrorCode::ServiceUnavailable,
            _ => ErrorCode::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("error: code={code} message={message}")]
    App { code: ErrorCode, message: String },

    #[error("Statement build error: {0}")]
    Builder(#[from] BuilderError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Memory store error: {0}")]
    Memory(#[from] MemoryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Statement expects {placeholders} bound values, got {arguments} [{types}]")]
    BindingMismatch {
        placeholders: usize,
        arguments: usize,
        types: String,
    },
}

impl DaoError {
    /// Application error with a code and message
    pub fn errorf(code: ErrorCode, message: impl Into<String>) -> Self {
        DaoError::App {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DaoError::App { code, .. } => *code,
            DaoError::Memory(MemoryError::KeyNotFound(_)) => ErrorCode::NotFound,
            _ => ErrorCode::Internal,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DaoError::App { message, .. } => message.clone(),
            DaoError::Memory(err @ MemoryError::KeyNotFound(_)) => err.to_string(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.code().status()
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code() == code
    }
}
