//! Error types for cd-core

use thiserror::Error;

use crate::contact::{ContactId, Rejected};

/// Main error type for cd-core
#[derive(Error, Debug)]
pub enum Error {
    /// The submission failed one or more field rules
    #[error("Validation failed: {}", .0.errors)]
    Validation(Box<Rejected>),

    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    /// Identifier collision in the store; the allocator is broken
    #[error("Duplicate contact id: {0}")]
    DuplicateId(ContactId),

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cd-core
pub type Result<T> = std::result::Result<T, Error>;
