//! Core records and grade logic for the school store.
//! This crate is the single source of truth for school record invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::SchoolConfig;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::activity::{Activity, ActivityId};
pub use model::evaluation::{appreciation_score, Appreciation, Evaluation, EvaluationId};
pub use model::person::{Person, PersonId};
pub use model::student::{weighted_average, Student, StudentId};
pub use model::teacher::{parse_salary, Teacher, TeacherId};
pub use model::ModelError;
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::evaluation_repo::{EvaluationRepository, SqliteEvaluationRepository};
pub use repo::patch::{PatchError, StudentPatch, TeacherPatch};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::teacher_repo::{SqliteTeacherRepository, TeacherRepository};
pub use repo::{RepoError, RepoResult};
pub use service::report_service::{ReportService, StudentReport};
pub use service::roster_service::RosterService;
pub use service::ServiceError;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
