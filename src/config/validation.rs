//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (backlog, buffer, timeout)
//! - Check the interface matches the address family
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: ServerConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::net::Transport;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.backlog must be at least 1, got {0}")]
    Backlog(i32),

    #[error("listener.transport must be stream")]
    Transport,

    #[error("listener.interface {interface} does not belong to family {family}")]
    FamilyMismatch { interface: String, family: String },

    #[error("connection.buffer_capacity must be at least 1")]
    BufferCapacity,

    #[error("connection.receive_timeout_secs must be at least 1")]
    ReceiveTimeout,

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Check every semantic rule, collecting all failures.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let listener = &config.listener;

    if listener.backlog < 1 {
        errors.push(ValidationError::Backlog(listener.backlog));
    }
    if listener.transport != Transport::Stream {
        errors.push(ValidationError::Transport);
    }
    if !listener.family.matches(&listener.interface) {
        errors.push(ValidationError::FamilyMismatch {
            interface: listener.interface.to_string(),
            family: format!("{:?}", listener.family).to_lowercase(),
        });
    }
    if config.connection.buffer_capacity == 0 {
        errors.push(ValidationError::BufferCapacity);
    }
    if config.connection.receive_timeout_secs == 0 {
        errors.push(ValidationError::ReceiveTimeout);
    }
    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
