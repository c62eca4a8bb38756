//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories only accept connections migrated to the latest schema.
//! - Missing ids surface as `RepoError::NotFound`, never as a panic.
//! - Deletes never cascade; rows still referenced surface as `InUse`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::ModelError;
use rusqlite::{Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod activity_repo;
pub mod evaluation_repo;
pub mod patch;
pub mod student_repo;
pub mod teacher_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every school entity store.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed model validation before a write.
    Model(ModelError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No row with this id.
    NotFound(Uuid),
    /// A row with this id is already stored.
    AlreadyExists(Uuid),
    /// Row cannot be deleted while other rows still reference it.
    InUse(Uuid),
    /// Record is missing a relationship required before persistence.
    Unassigned {
        id: Uuid,
        relation: &'static str,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::AlreadyExists(id) => write!(f, "record already exists: {id}"),
            Self::InUse(id) => write!(f, "record is still referenced: {id}"),
            Self::Unassigned { id, relation } => {
                write!(f, "record {id} must be assigned a {relation} first")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for RepoError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn ensure_connection_ready(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}

/// `table` is always a compile-time constant from this crate.
pub(crate) fn row_exists(conn: &Connection, table: &'static str, id: Uuid) -> RepoResult<bool> {
    let found = conn
        .query_row(
            &format!("SELECT 1 FROM {table} WHERE id = ?1;"),
            [id.to_string()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Deletes one row by id, mapping zero affected rows to `NotFound` and
/// foreign-key refusals to `InUse`.
pub(crate) fn delete_row(conn: &Connection, table: &'static str, id: Uuid) -> RepoResult<()> {
    let result = conn.execute(
        &format!("DELETE FROM {table} WHERE id = ?1;"),
        [id.to_string()],
    );

    match result {
        Ok(0) => Err(RepoError::NotFound(id)),
        Ok(_) => Ok(()),
        Err(err) => {
            let err = DbError::from(err);
            if err.is_constraint_violation() {
                Err(RepoError::InUse(id))
            } else {
                Err(RepoError::Db(err))
            }
        }
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn parse_optional_uuid(value: Option<String>, column: &str) -> RepoResult<Option<Uuid>> {
    value.map(|text| parse_uuid(&text, column)).transpose()
}

pub(crate) fn parse_non_negative(value: i64, column: &str) -> RepoResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid value `{value}` in {column}")))
}
