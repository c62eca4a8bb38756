//! Activity repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist activities through teacher assignment.
//! - Provide list/get/update/delete over the `activities` table.
//!
//! # Invariants
//! - An activity row is only ever inserted together with its teacher link,
//!   inside one transaction that first stores the teacher when absent.
//! - Assigning an activity whose id is already stored fails with
//!   `AlreadyExists` and writes nothing.

use crate::model::activity::{Activity, ActivityId};
use crate::model::teacher::{Teacher, TeacherId};
use crate::repo::teacher_repo::insert_teacher_if_absent;
use crate::repo::{
    delete_row, ensure_connection_ready, parse_non_negative, parse_optional_uuid, parse_uuid,
    row_exists, RepoError, RepoResult,
};
use log::info;
use rusqlite::{params, Connection, Row, TransactionBehavior};

pub(crate) const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    name,
    ects,
    teacher_id
FROM activities";

/// Repository interface for activity records.
pub trait ActivityRepository {
    /// Links `activity` to `teacher` and inserts it.
    ///
    /// The teacher row is inserted first when not stored yet; a stored
    /// teacher is left as-is. `activity.teacher_id` is set after commit.
    fn assign_teacher(&mut self, activity: &mut Activity, teacher: &Teacher)
        -> RepoResult<ActivityId>;
    fn list_activities(&self) -> RepoResult<Vec<Activity>>;
    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<Activity>>;
    /// Persists `name` and `ects`; the teacher link is not changed.
    fn update_activity(&self, activity: &Activity) -> RepoResult<()>;
    fn delete_activity(&self, id: ActivityId) -> RepoResult<()>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "activities")?;
        Ok(Self { conn })
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn assign_teacher(
        &mut self,
        activity: &mut Activity,
        teacher: &Teacher,
    ) -> RepoResult<ActivityId> {
        activity.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if row_exists(&tx, "activities", activity.id())? {
            return Err(RepoError::AlreadyExists(activity.id()));
        }

        let teacher_inserted = insert_teacher_if_absent(&tx, teacher)?;
        insert_activity_if_absent(&tx, activity, teacher.id())?;
        tx.commit()?;

        activity.teacher_id = Some(teacher.id());
        info!(
            "event=activity_assign module=repo status=ok activity_id={} teacher_id={} teacher_inserted={}",
            activity.id(),
            teacher.id(),
            teacher_inserted
        );
        Ok(activity.id())
    }

    fn list_activities(&self) -> RepoResult<Vec<Activity>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTIVITY_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut activities = Vec::new();
        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }
        Ok(activities)
    }

    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<Activity>> {
        find_activity(self.conn, id)
    }

    fn update_activity(&self, activity: &Activity) -> RepoResult<()> {
        activity.validate()?;
        let changed = self.conn.execute(
            "UPDATE activities
             SET
                name = ?1,
                ects = ?2
             WHERE id = ?3;",
            params![
                activity.name.as_str(),
                i64::from(activity.ects),
                activity.id().to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(activity.id()));
        }
        Ok(())
    }

    fn delete_activity(&self, id: ActivityId) -> RepoResult<()> {
        delete_row(self.conn, "activities", id)
    }
}

/// Inserts an already-linked activity unless its id is stored.
///
/// The owning teacher must be stored; otherwise `NotFound(teacher_id)`.
pub(crate) fn insert_activity_if_absent(
    conn: &Connection,
    activity: &Activity,
    teacher_id: TeacherId,
) -> RepoResult<bool> {
    activity.validate()?;
    if row_exists(conn, "activities", activity.id())? {
        return Ok(false);
    }
    if !row_exists(conn, "teachers", teacher_id)? {
        return Err(RepoError::NotFound(teacher_id));
    }

    conn.execute(
        "INSERT INTO activities (id, name, ects, teacher_id)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            activity.id().to_string(),
            activity.name.as_str(),
            i64::from(activity.ects),
            teacher_id.to_string(),
        ],
    )?;
    Ok(true)
}

pub(crate) fn find_activity(conn: &Connection, id: ActivityId) -> RepoResult<Option<Activity>> {
    let mut stmt = conn.prepare(&format!("{ACTIVITY_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_activity_row(row)?));
    }
    Ok(None)
}

pub(crate) fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "activities.id")?;
    let ects = parse_non_negative(row.get("ects")?, "activities.ects")?;
    let teacher_id = parse_optional_uuid(row.get("teacher_id")?, "activities.teacher_id")?;
    let name: String = row.get("name")?;
    Ok(Activity::with_id(id, name, ects, teacher_id)?)
}
