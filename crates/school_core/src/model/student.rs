//! Student model with grade aggregation.
//!
//! # Responsibility
//! - Hold the evaluations loaded for one student.
//! - Compute the credit-weighted average and render the bulletin.
//!
//! # Invariants
//! - `evaluations` is empty until explicitly loaded by the repository.
//! - A total credit weight of zero yields an average of `0.0`.

use crate::model::evaluation::Evaluation;
use crate::model::person::{Person, PersonId};
use crate::model::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type StudentId = PersonId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(flatten)]
    pub person: Person,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

impl Student {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::from_person(Person::new(first_name, last_name))
    }

    pub fn from_person(person: Person) -> Self {
        Self {
            person,
            evaluations: Vec::new(),
        }
    }

    pub fn with_id(
        id: StudentId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Ok(Self::from_person(Person::with_id(id, first_name, last_name)?))
    }

    pub fn id(&self) -> StudentId {
        self.person.id()
    }

    pub fn first_name(&self) -> &str {
        &self.person.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.person.last_name
    }

    /// Credit-weighted mean of the loaded evaluation scores.
    pub fn average(&self) -> f64 {
        weighted_average(
            self.evaluations
                .iter()
                .map(|evaluation| (evaluation.score(), evaluation.ects())),
        )
    }

    /// Renders the report card: header, one line per evaluation in load
    /// order, then the average. Lines are joined with `\n`.
    pub fn bulletin(&self) -> String {
        let mut lines = Vec::with_capacity(self.evaluations.len() + 2);
        lines.push(format!("Bulletin de {self}"));
        lines.extend(self.evaluations.iter().map(ToString::to_string));
        lines.push(format!("Moyenne: {}", self.average()));
        lines.join("\n")
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.person.full_name())
    }
}

/// Computes `sum(score * ects) / sum(ects)` over `(score, ects)` pairs.
///
/// Returns `0.0` when the total weight is zero. Sums are kept in `i128`, so
/// any `i32` score paired with any `u32` weight accumulates without overflow.
pub fn weighted_average(items: impl IntoIterator<Item = (i32, u32)>) -> f64 {
    let (total, weight) = items
        .into_iter()
        .fold((0_i128, 0_i128), |(total, weight), (score, ects)| {
            let ects = i128::from(ects);
            (total + i128::from(score) * ects, weight + ects)
        });

    if weight == 0 {
        0.0
    } else {
        total as f64 / weight as f64
    }
}
