//! School domain model.
//!
//! # Responsibility
//! - Define the records persisted by the school store.
//! - Hold the pure grade logic (weighted average, appreciation table).
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - Relationships are carried as ids (plus the loaded activity for
//!   evaluations), never as shared mutable references.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod activity;
pub mod evaluation;
pub mod person;
pub mod student;
pub mod teacher;

/// Validation error for school records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Identity must never be the nil UUID.
    NilId,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "record id must not be nil"),
        }
    }
}

impl Error for ModelError {}

pub(crate) fn ensure_not_nil(id: uuid::Uuid) -> Result<(), ModelError> {
    if id.is_nil() {
        return Err(ModelError::NilId);
    }
    Ok(())
}
