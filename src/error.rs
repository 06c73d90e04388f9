//! Error types for rust-ydk-providers

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::ProviderKind;

/// Category of an error reported by the engine or recorded in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    /// Generic client-side failure
    Client,
    /// Failure inside the service provider (transport, session setup)
    ServiceProvider,
    /// Data did not conform to the YANG model
    Model,
    /// Operation invoked in a state that does not allow it
    IllegalState,
    /// Bad argument or configuration
    InvalidArgument,
    /// Engine internal failure
    Core,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Client => f.write_str("client error"),
            ErrorCode::ServiceProvider => f.write_str("service provider error"),
            ErrorCode::Model => f.write_str("model error"),
            ErrorCode::IllegalState => f.write_str("illegal state error"),
            ErrorCode::InvalidArgument => f.write_str("invalid argument error"),
            ErrorCode::Core => f.write_str("core error"),
        }
    }
}

/// Last error recorded in a session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorDescriptor {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Main error type for provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failure reported by the engine
    #[error("engine error: {0}")]
    Engine(ErrorDescriptor),

    /// Connect called on a session that is already connected
    #[error("{0} provider is already connected")]
    AlreadyConnected(ProviderKind),

    /// Operation requires an established session
    #[error("{0} provider is not connected")]
    NotConnected(ProviderKind),

    /// Configuration rejected before reaching the engine
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error (configuration files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML payload could not be read
    #[error("XML error: {0}")]
    Xml(String),

    /// Payload is well-formed but not usable
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
