//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep outer layers decoupled from storage details.

use crate::model::student::StudentId;
use crate::model::teacher::TeacherId;
use crate::repo::patch::PatchError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod report_service;
pub mod roster_service;

/// Service error for school use-cases.
#[derive(Debug)]
pub enum ServiceError {
    StudentNotFound(StudentId),
    TeacherNotFound(TeacherId),
    /// Field map could not be converted into a patch.
    Patch(PatchError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::TeacherNotFound(id) => write!(f, "teacher not found: {id}"),
            Self::Patch(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Patch(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatchError> for ServiceError {
    fn from(value: PatchError) -> Self {
        Self::Patch(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
