//! Student report use-case service.
//!
//! # Responsibility
//! - Load a student and its evaluations in one call.
//! - Produce the weighted average and the rendered bulletin.
//!
//! # Invariants
//! - The returned student carries the freshly loaded evaluations.

use crate::model::student::{Student, StudentId};
use crate::repo::student_repo::StudentRepository;
use crate::service::ServiceError;
use log::info;

/// Report card for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport {
    pub student: Student,
    pub average: f64,
    pub bulletin: String,
}

/// Report service over a student repository.
pub struct ReportService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> ReportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Builds the report card of the student with `id`.
    pub fn student_report(&self, id: StudentId) -> Result<StudentReport, ServiceError> {
        let mut student = self
            .repo
            .get_student(id)?
            .ok_or(ServiceError::StudentNotFound(id))?;
        self.repo.load_evaluations(&mut student)?;

        info!(
            "event=student_report module=service status=ok student_id={} evaluations={}",
            id,
            student.evaluations.len()
        );
        Ok(StudentReport {
            average: student.average(),
            bulletin: student.bulletin(),
            student,
        })
    }
}
