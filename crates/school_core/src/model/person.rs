//! Identity and name fields shared by students and teachers.

use super::{ensure_not_nil, ModelError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a person record (student or teacher).
pub type PersonId = Uuid;

/// Common field set embedded by value in `Student` and `Teacher`.
///
/// The id has no setter: it is fixed at construction and stays stable for
/// the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    /// Creates a person with a freshly generated id.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Creates a person with a caller-provided id, as read back from storage.
    pub fn with_id(
        id: PersonId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, ModelError> {
        ensure_not_nil(id)?;
        Ok(Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        })
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    /// `"<first> <last>"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        ensure_not_nil(self.id)
    }
}
