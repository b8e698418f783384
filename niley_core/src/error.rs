//! Error types for the assistant core
//!
//! Only construction and configuration can fail from a caller's point of
//! view. Service and arithmetic errors stay internal and are rendered as
//! display text before they reach the dispatcher.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Intent;

/// Top-level error for building an assistant.
#[derive(Debug, Error)]
pub enum NileyError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("intent '{0}' is defined more than once")]
    DuplicateIntent(Intent),

    #[error("invalid pattern for intent '{intent}': {source}")]
    InvalidPattern {
        intent: Intent,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown response table '{0}'")]
    UnknownResponseTable(String),

    #[error("response table '{0}' must contain at least one response")]
    EmptyResponseTable(String),
}

/// Failure of an outbound lookup inside [`crate::services::WebServices`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request timed out")]
    Timeout,

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

impl From<ureq::Error> for ServiceError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => ServiceError::Status(code),
            ureq::Error::Transport(transport) => {
                let timed_out = std::error::Error::source(&transport)
                    .and_then(|src| src.downcast_ref::<std::io::Error>())
                    .map(|io| {
                        matches!(
                            io.kind(),
                            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
                        )
                    })
                    .unwrap_or(false);
                if timed_out {
                    ServiceError::Timeout
                } else {
                    ServiceError::Transport(transport.to_string())
                }
            }
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => ServiceError::Timeout,
            _ => ServiceError::Malformed(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,

    #[error("expression longer than {0} characters")]
    TooLong(usize),

    #[error("division by zero")]
    DivisionByZero,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("result is not a finite number")]
    NotFinite,
}

pub type Result<T> = std::result::Result<T, NileyError>;
