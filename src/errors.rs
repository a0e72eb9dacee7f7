//! # Error Handling
//!
//! This module provides error handling for the proxyctl console.
//! It defines custom error types using `thiserror`.

use std::fmt;

/// Custom result type for proxyctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the proxyctl console
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend API failure, scoped to one operation. Transport errors and
    /// non-success statuses (4xx and 5xx alike) collapse into the same
    /// generic per-operation message.
    #[error("could not {operation} {entity}")]
    Api { operation: Operation, entity: Entity, status: Option<u16> },

    /// Client-side form validation failure
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The user action that a backend failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Add,
    Update,
    Delete,
    Toggle,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Fetch => write!(f, "fetch"),
            Operation::Add => write!(f, "add"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::Toggle => write!(f, "toggle"),
        }
    }
}

/// The entity a backend failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Proxy,
    ProxyList,
    Route,
    RouteList,
    RouteStatus,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Proxy => write!(f, "proxy"),
            Entity::ProxyList => write!(f, "proxy list"),
            Entity::Route => write!(f, "route"),
            Entity::RouteList => write!(f, "route list"),
            Entity::RouteStatus => write!(f, "route status"),
        }
    }
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new API error for a failed operation
    pub fn api(operation: Operation, entity: Entity, status: Option<u16>) -> Self {
        Self::Api { operation, entity, status }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error scoped to a form field
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// The HTTP status behind an API error, when the backend responded at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }
}
