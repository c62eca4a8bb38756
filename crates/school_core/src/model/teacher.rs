//! Teacher model.
//!
//! # Invariants
//! - `salary` is a non-negative integer; textual input that is not a valid
//!   non-negative integer is coerced to 0 by [`parse_salary`].
//! - `activities` is empty until explicitly loaded by the repository.

use crate::model::activity::Activity;
use crate::model::person::{Person, PersonId};
use crate::model::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type TeacherId = PersonId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(flatten)]
    pub person: Person,
    pub salary: u32,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Teacher {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, salary: u32) -> Self {
        Self::from_person(Person::new(first_name, last_name), salary)
    }

    pub fn from_person(person: Person, salary: u32) -> Self {
        Self {
            person,
            salary,
            activities: Vec::new(),
        }
    }

    pub fn with_id(
        id: TeacherId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        salary: u32,
    ) -> Result<Self, ModelError> {
        Ok(Self::from_person(
            Person::with_id(id, first_name, last_name)?,
            salary,
        ))
    }

    pub fn id(&self) -> TeacherId {
        self.person.id()
    }

    pub fn first_name(&self) -> &str {
        &self.person.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.person.last_name
    }
}

impl Display for Teacher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} {})",
            self.person.first_name, self.person.last_name, self.salary
        )
    }
}

/// Parses salary text; anything but a non-negative integer becomes 0.
pub fn parse_salary(value: &str) -> u32 {
    value.trim().parse::<u32>().unwrap_or(0)
}
