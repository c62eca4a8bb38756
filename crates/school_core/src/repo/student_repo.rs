//! Student repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/get/patch/delete over the `students` table.
//! - Load a student's evaluations together with their activities.
//!
//! # Invariants
//! - Lists are returned in insertion order.
//! - `load_evaluations` replaces the in-memory list wholesale.

use crate::model::student::{Student, StudentId};
use crate::repo::evaluation_repo::{parse_evaluation_row, EVALUATION_SELECT_SQL};
use crate::repo::patch::StudentPatch;
use crate::repo::{
    delete_row, ensure_connection_ready, parse_uuid, row_exists, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name
FROM students";

/// Repository interface for student records.
pub trait StudentRepository {
    fn create_student(&self, student: &Student) -> RepoResult<StudentId>;
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn update_student(&self, id: StudentId, patch: &StudentPatch) -> RepoResult<()>;
    fn delete_student(&self, id: StudentId) -> RepoResult<()>;
    /// Replaces `student.evaluations` with the stored ones, activities included.
    fn load_evaluations(&self, student: &mut Student) -> RepoResult<()>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "students")?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, student: &Student) -> RepoResult<StudentId> {
        if !insert_student_if_absent(self.conn, student)? {
            return Err(RepoError::AlreadyExists(student.id()));
        }
        Ok(student.id())
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }
        Ok(students)
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }
        Ok(None)
    }

    fn update_student(&self, id: StudentId, patch: &StudentPatch) -> RepoResult<()> {
        if patch.is_empty() {
            return if row_exists(self.conn, "students", id)? {
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
        bind_values.push(Value::Text(id.to_string()));

        let sql = format!(
            "UPDATE students SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        delete_row(self.conn, "students", id)
    }

    fn load_evaluations(&self, student: &mut Student) -> RepoResult<()> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVALUATION_SELECT_SQL}
             WHERE e.student_id = ?1
             ORDER BY e.rowid ASC;"
        ))?;
        let mut rows = stmt.query([student.id().to_string()])?;
        let mut evaluations = Vec::new();
        while let Some(row) = rows.next()? {
            evaluations.push(parse_evaluation_row(row)?);
        }
        student.evaluations = evaluations;
        Ok(())
    }
}

/// Inserts the student unless a row with its id is already stored.
///
/// Returns whether a row was inserted. Existing rows are left untouched.
pub(crate) fn insert_student_if_absent(conn: &Connection, student: &Student) -> RepoResult<bool> {
    student.person.validate()?;
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO students (id, first_name, last_name)
         VALUES (?1, ?2, ?3);",
        params![
            student.id().to_string(),
            student.first_name(),
            student.last_name(),
        ],
    )?;
    Ok(inserted == 1)
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "students.id")?;
    let first_name: String = row.get("first_name")?;
    let last_name: String = row.get("last_name")?;
    Ok(Student::with_id(id, first_name, last_name)?)
}
