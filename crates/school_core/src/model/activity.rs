//! Activity (course offering) model.
//!
//! # Invariants
//! - An activity must be linked to a teacher before it is persisted; the
//!   link is set by `ActivityRepository::assign_teacher`.

use super::{ensure_not_nil, ModelError};
use crate::model::teacher::TeacherId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an activity.
pub type ActivityId = Uuid;

/// A course offering worth `ects` credits, taught by one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    id: ActivityId,
    pub name: String,
    /// Credit weight in the student average.
    pub ects: u32,
    /// `None` until the activity is assigned to a teacher.
    pub teacher_id: Option<TeacherId>,
}

impl Activity {
    /// Creates an unassigned activity with a generated id.
    pub fn new(name: impl Into<String>, ects: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ects,
            teacher_id: None,
        }
    }

    /// Rebuilds an activity from stored fields.
    pub fn with_id(
        id: ActivityId,
        name: impl Into<String>,
        ects: u32,
        teacher_id: Option<TeacherId>,
    ) -> Result<Self, ModelError> {
        ensure_not_nil(id)?;
        Ok(Self {
            id,
            name: name.into(),
            ects,
            teacher_id,
        })
    }

    pub fn id(&self) -> ActivityId {
        self.id
    }

    /// Whether the in-memory copy carries its teacher link.
    pub fn is_assigned(&self) -> bool {
        self.teacher_id.is_some()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        ensure_not_nil(self.id)
    }
}
