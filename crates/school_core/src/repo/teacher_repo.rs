//! Teacher repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/get/patch/delete over the `teachers` table.
//! - Load the activities taught by one teacher.
//!
//! # Invariants
//! - Lists are returned in insertion order.
//! - A teacher still owning activities cannot be deleted (`InUse`).

use crate::model::teacher::{Teacher, TeacherId};
use crate::repo::activity_repo::{parse_activity_row, ACTIVITY_SELECT_SQL};
use crate::repo::patch::TeacherPatch;
use crate::repo::{
    delete_row, ensure_connection_ready, parse_non_negative, parse_uuid, row_exists, RepoError,
    RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TEACHER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    salary
FROM teachers";

/// Repository interface for teacher records.
pub trait TeacherRepository {
    fn create_teacher(&self, teacher: &Teacher) -> RepoResult<TeacherId>;
    fn list_teachers(&self) -> RepoResult<Vec<Teacher>>;
    fn get_teacher(&self, id: TeacherId) -> RepoResult<Option<Teacher>>;
    fn update_teacher(&self, id: TeacherId, patch: &TeacherPatch) -> RepoResult<()>;
    fn delete_teacher(&self, id: TeacherId) -> RepoResult<()>;
    /// Replaces `teacher.activities` with the stored ones.
    fn load_activities(&self, teacher: &mut Teacher) -> RepoResult<()>;
}

/// SQLite-backed teacher repository.
pub struct SqliteTeacherRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeacherRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "teachers")?;
        Ok(Self { conn })
    }
}

impl TeacherRepository for SqliteTeacherRepository<'_> {
    fn create_teacher(&self, teacher: &Teacher) -> RepoResult<TeacherId> {
        if !insert_teacher_if_absent(self.conn, teacher)? {
            return Err(RepoError::AlreadyExists(teacher.id()));
        }
        Ok(teacher.id())
    }

    fn list_teachers(&self) -> RepoResult<Vec<Teacher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEACHER_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut teachers = Vec::new();
        while let Some(row) = rows.next()? {
            teachers.push(parse_teacher_row(row)?);
        }
        Ok(teachers)
    }

    fn get_teacher(&self, id: TeacherId) -> RepoResult<Option<Teacher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEACHER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_teacher_row(row)?));
        }
        Ok(None)
    }

    fn update_teacher(&self, id: TeacherId, patch: &TeacherPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return if row_exists(self.conn, "teachers", id)? {
                Ok(())
            } else {
                Err(RepoError::NotFound(id))
            };
        }

        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(first_name) = patch.first_name.as_ref() {
            assignments.push("first_name = ?");
            bind_values.push(Value::Text(first_name.clone()));
        }
        if let Some(last_name) = patch.last_name.as_ref() {
            assignments.push("last_name = ?");
            bind_values.push(Value::Text(last_name.clone()));
        }
        if let Some(salary) = patch.salary {
            assignments.push("salary = ?");
            bind_values.push(Value::Integer(i64::from(salary)));
        }
        bind_values.push(Value::Text(id.to_string()));

        let sql = format!(
            "UPDATE teachers SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_teacher(&self, id: TeacherId) -> RepoResult<()> {
        delete_row(self.conn, "teachers", id)
    }

    fn load_activities(&self, teacher: &mut Teacher) -> RepoResult<()> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTIVITY_SELECT_SQL}
             WHERE teacher_id = ?1
             ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([teacher.id().to_string()])?;
        let mut activities = Vec::new();
        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }
        teacher.activities = activities;
        Ok(())
    }
}

/// Inserts the teacher unless a row with its id is already stored.
///
/// Returns whether a row was inserted. Existing rows are left untouched.
pub(crate) fn insert_teacher_if_absent(conn: &Connection, teacher: &Teacher) -> RepoResult<bool> {
    teacher.person.validate()?;
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO teachers (id, first_name, last_name, salary)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            teacher.id().to_string(),
            teacher.first_name(),
            teacher.last_name(),
            i64::from(teacher.salary),
        ],
    )?;
    Ok(inserted == 1)
}

fn parse_teacher_row(row: &Row<'_>) -> RepoResult<Teacher> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "teachers.id")?;
    let salary = parse_non_negative(row.get("salary")?, "teachers.salary")?;
    let first_name: String = row.get("first_name")?;
    let last_name: String = row.get("last_name")?;
    Ok(Teacher::with_id(id, first_name, last_name, salary)?)
}
