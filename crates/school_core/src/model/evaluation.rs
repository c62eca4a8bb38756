//! Evaluation (grade) model and the qualitative appreciation table.
//!
//! # Responsibility
//! - Link one student to one activity with a score.
//! - Translate appreciation labels (`X`, `TB`, `B`, `C`, `N`) into scores.
//!
//! # Invariants
//! - Scores are nominally on a 0..=20 scale but are not range-checked.
//! - Unknown appreciation labels map to 0, never to an error.

use super::{ensure_not_nil, ModelError};
use crate::model::activity::Activity;
use crate::model::student::StudentId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of an evaluation.
pub type EvaluationId = Uuid;

/// Upper bound of the nominal grading scale, used in report lines.
pub const SCORE_SCALE: i32 = 20;

/// Qualitative grade label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Appreciation {
    /// Excellent.
    #[serde(rename = "X")]
    Excellent,
    /// Très bien.
    #[serde(rename = "TB")]
    VeryGood,
    /// Bien.
    #[serde(rename = "B")]
    Good,
    /// Correct.
    #[serde(rename = "C")]
    Fair,
    /// Insuffisant.
    #[serde(rename = "N")]
    Insufficient,
}

impl Appreciation {
    /// Parses an exact, case-sensitive label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "X" => Some(Self::Excellent),
            "TB" => Some(Self::VeryGood),
            "B" => Some(Self::Good),
            "C" => Some(Self::Fair),
            "N" => Some(Self::Insufficient),
            _ => None,
        }
    }

    pub fn score(self) -> i32 {
        match self {
            Self::Excellent => 20,
            Self::VeryGood => 16,
            Self::Good => 12,
            Self::Fair => 8,
            Self::Insufficient => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "X",
            Self::VeryGood => "TB",
            Self::Good => "B",
            Self::Fair => "C",
            Self::Insufficient => "N",
        }
    }
}

/// Maps any label to a score; unknown labels yield 0.
pub fn appreciation_score(label: &str) -> i32 {
    Appreciation::parse(label).map_or(0, Appreciation::score)
}

/// A score given to one student for one activity.
///
/// `student_id` and `activity` stay `None` until
/// `EvaluationRepository::assign_infos` links and persists the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    id: EvaluationId,
    score: i32,
    pub student_id: Option<StudentId>,
    /// Loaded together with the evaluation so the credit weight is known.
    pub activity: Option<Activity>,
}

impl Evaluation {
    /// Creates an unassigned evaluation with a generated id.
    pub fn new(score: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            score,
            student_id: None,
            activity: None,
        }
    }

    /// Creates an unassigned evaluation scored from an appreciation label.
    pub fn from_appreciation(label: &str) -> Self {
        Self::new(appreciation_score(label))
    }

    /// Rebuilds an evaluation from stored fields.
    pub fn with_id(
        id: EvaluationId,
        score: i32,
        student_id: Option<StudentId>,
        activity: Option<Activity>,
    ) -> Result<Self, ModelError> {
        ensure_not_nil(id)?;
        Ok(Self {
            id,
            score,
            student_id,
            activity,
        })
    }

    pub fn id(&self) -> EvaluationId {
        self.id
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Sets a raw score. Out-of-range values are kept as-is.
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    /// Sets the score from a qualitative label (see [`appreciation_score`]).
    pub fn set_appreciation(&mut self, label: &str) {
        self.score = appreciation_score(label);
    }

    /// Credit weight of the linked activity, 0 when not loaded.
    pub fn ects(&self) -> u32 {
        self.activity.as_ref().map_or(0, |activity| activity.ects)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        ensure_not_nil(self.id)
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let activity = self
            .activity
            .as_ref()
            .map_or("?", |activity| activity.name.as_str());
        write!(f, "{}: {}/{}", activity, self.score, SCORE_SCALE)
    }
}
