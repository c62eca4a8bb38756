//! Evaluation repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist evaluations through student + activity assignment.
//! - Read evaluations back with their activity joined in, so the credit
//!   weight is available to grade aggregation.
//!
//! # Invariants
//! - An evaluation row is only inserted inside one transaction that first
//!   stores the student and the activity when absent.
//! - The activity must be linked to a teacher, either in memory or through
//!   its stored row.
//! - Assigning an evaluation whose id is already stored fails with
//!   `AlreadyExists` and writes nothing.

use crate::model::activity::{Activity, ActivityId};
use crate::model::evaluation::{Evaluation, EvaluationId};
use crate::model::student::Student;
use crate::repo::activity_repo::{find_activity, insert_activity_if_absent};
use crate::repo::student_repo::insert_student_if_absent;
use crate::repo::{
    delete_row, ensure_connection_ready, parse_non_negative, parse_optional_uuid, parse_uuid,
    row_exists, RepoError, RepoResult,
};
use log::info;
use rusqlite::{params, Connection, Row, TransactionBehavior};

pub(crate) const EVALUATION_SELECT_SQL: &str = "SELECT
    e.id AS id,
    e.score AS score,
    e.student_id AS student_id,
    a.id AS activity_id,
    a.name AS activity_name,
    a.ects AS activity_ects,
    a.teacher_id AS activity_teacher_id
FROM evaluations e
INNER JOIN activities a ON a.id = e.activity_id";

/// Repository interface for evaluation records.
pub trait EvaluationRepository {
    /// Links `evaluation` to `activity` and `student` and inserts it.
    ///
    /// Student and activity rows are inserted first when not stored yet.
    /// An activity without an in-memory teacher link is accepted when its
    /// stored row carries one; otherwise `Unassigned`.
    /// On success `evaluation.student_id` and `evaluation.activity` are set,
    /// the latter to the linked activity.
    fn assign_infos(
        &mut self,
        evaluation: &mut Evaluation,
        activity: &Activity,
        student: &Student,
    ) -> RepoResult<EvaluationId>;
    fn list_evaluations(&self) -> RepoResult<Vec<Evaluation>>;
    fn get_evaluation(&self, id: EvaluationId) -> RepoResult<Option<Evaluation>>;
    fn list_evaluations_for_activity(&self, activity_id: ActivityId)
        -> RepoResult<Vec<Evaluation>>;
    fn update_score(&self, id: EvaluationId, score: i32) -> RepoResult<()>;
    fn delete_evaluation(&self, id: EvaluationId) -> RepoResult<()>;
}

/// SQLite-backed evaluation repository.
pub struct SqliteEvaluationRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteEvaluationRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "evaluations")?;
        Ok(Self { conn })
    }

    fn query_evaluations(
        &self,
        filter_sql: &str,
        bind: Option<String>,
    ) -> RepoResult<Vec<Evaluation>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVALUATION_SELECT_SQL} {filter_sql} ORDER BY e.rowid ASC;"
        ))?;
        let mut rows = match bind {
            Some(value) => stmt.query([value])?,
            None => stmt.query([])?,
        };
        let mut evaluations = Vec::new();
        while let Some(row) = rows.next()? {
            evaluations.push(parse_evaluation_row(row)?);
        }
        Ok(evaluations)
    }
}

impl EvaluationRepository for SqliteEvaluationRepository<'_> {
    fn assign_infos(
        &mut self,
        evaluation: &mut Evaluation,
        activity: &Activity,
        student: &Student,
    ) -> RepoResult<EvaluationId> {
        evaluation.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if row_exists(&tx, "evaluations", evaluation.id())? {
            return Err(RepoError::AlreadyExists(evaluation.id()));
        }

        // A copy taken before `assign_teacher` has no link in memory; the
        // stored row then supplies it.
        let (linked_activity, activity_inserted) = match activity.teacher_id {
            Some(teacher_id) => {
                let inserted = insert_activity_if_absent(&tx, activity, teacher_id)?;
                (activity.clone(), inserted)
            }
            None => match find_activity(&tx, activity.id())? {
                Some(stored) if stored.is_assigned() => (stored, false),
                _ => {
                    return Err(RepoError::Unassigned {
                        id: activity.id(),
                        relation: "teacher",
                    })
                }
            },
        };
        let student_inserted = insert_student_if_absent(&tx, student)?;
        tx.execute(
            "INSERT INTO evaluations (id, score, student_id, activity_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                evaluation.id().to_string(),
                evaluation.score(),
                student.id().to_string(),
                activity.id().to_string(),
            ],
        )?;
        tx.commit()?;

        evaluation.student_id = Some(student.id());
        evaluation.activity = Some(linked_activity);
        info!(
            "event=evaluation_assign module=repo status=ok evaluation_id={} student_id={} activity_id={} student_inserted={} activity_inserted={}",
            evaluation.id(),
            student.id(),
            activity.id(),
            student_inserted,
            activity_inserted
        );
        Ok(evaluation.id())
    }

    fn list_evaluations(&self) -> RepoResult<Vec<Evaluation>> {
        self.query_evaluations("", None)
    }

    fn get_evaluation(&self, id: EvaluationId) -> RepoResult<Option<Evaluation>> {
        let mut evaluations = self.query_evaluations("WHERE e.id = ?1", Some(id.to_string()))?;
        Ok(evaluations.pop())
    }

    fn list_evaluations_for_activity(
        &self,
        activity_id: ActivityId,
    ) -> RepoResult<Vec<Evaluation>> {
        self.query_evaluations("WHERE e.activity_id = ?1", Some(activity_id.to_string()))
    }

    fn update_score(&self, id: EvaluationId, score: i32) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE evaluations SET score = ?1 WHERE id = ?2;",
            params![score, id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_evaluation(&self, id: EvaluationId) -> RepoResult<()> {
        delete_row(self.conn, "evaluations", id)
    }
}

pub(crate) fn parse_evaluation_row(row: &Row<'_>) -> RepoResult<Evaluation> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "evaluations.id")?;
    let student_id = parse_optional_uuid(row.get("student_id")?, "evaluations.student_id")?;

    let activity_id_text: String = row.get("activity_id")?;
    let activity_id = parse_uuid(&activity_id_text, "activities.id")?;
    let ects = parse_non_negative(row.get("activity_ects")?, "activities.ects")?;
    let teacher_id = parse_optional_uuid(row.get("activity_teacher_id")?, "activities.teacher_id")?;
    let activity_name: String = row.get("activity_name")?;
    let activity = Activity::with_id(activity_id, activity_name, ects, teacher_id)?;

    Ok(Evaluation::with_id(
        id,
        row.get("score")?,
        student_id,
        Some(activity),
    )?)
}
