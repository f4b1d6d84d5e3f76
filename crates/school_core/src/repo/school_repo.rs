//! School store contract and its SQLite implementation.
//!
//! # Responsibility
//! - Provide create and list-all over the `schools` table.
//! - Surface semantic errors (validation, schema readiness, corrupt rows)
//!   separately from transport errors.
//!
//! # Invariants
//! - Identity is generated here, never taken from the caller.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::school::{NewSchool, School, SchoolValidationError};
use log::error;
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SCHOOLS_TABLE: &str = "schools";
const REQUIRED_COLUMNS: &[&str] = &[
    "seq",
    "uuid",
    "name",
    "address",
    "latitude",
    "longitude",
    "created_at",
];

const SCHOOL_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    address,
    latitude,
    longitude
FROM schools";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for school persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(SchoolValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    LockPoisoned,
}

impl RepoError {
    /// Whether the caller sent bad input, as opposed to the store failing.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted school data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::LockPoisoned => write!(f, "school store lock poisoned by a panicked writer"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchoolValidationError> for RepoError {
    fn from(value: SchoolValidationError) -> Self {
        Self::Validation(value)
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

/// Store contract consumed by the service layer.
///
/// Implementations are shared across request tasks, hence `Send + Sync`.
pub trait SchoolRepository: Send + Sync {
    /// Validates and persists a draft, returning the stored record.
    fn create_school(&self, draft: &NewSchool) -> RepoResult<School>;
    /// Returns every stored record in insertion order.
    fn list_schools(&self) -> RepoResult<Vec<School>>;
}

impl<R: SchoolRepository + ?Sized> SchoolRepository for Arc<R> {
    fn create_school(&self, draft: &NewSchool) -> RepoResult<School> {
        (**self).create_school(draft)
    }

    fn list_schools(&self) -> RepoResult<Vec<School>> {
        (**self).list_schools()
    }
}

/// SQLite-backed school store.
///
/// Owns its connection behind a mutex so one handle can serve every request.
pub struct SqliteSchoolRepository {
    conn: Mutex<Connection>,
}

impl SqliteSchoolRepository {
    /// Wraps a connection after checking that its schema is ready.
    ///
    /// Pass connections from [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_schema_ready(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            error!("event=store_lock module=repo status=error error_code=lock_poisoned");
            RepoError::LockPoisoned
        })
    }
}

impl SchoolRepository for SqliteSchoolRepository {
    fn create_school(&self, draft: &NewSchool) -> RepoResult<School> {
        draft.validate()?;
        let school = School::from_draft(Uuid::new_v4(), draft);

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO schools (uuid, name, address, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                school.id.to_string(),
                school.name.as_str(),
                school.address.as_str(),
                school.latitude,
                school.longitude,
            ],
        )?;

        Ok(school)
    }

    fn list_schools(&self) -> RepoResult<Vec<School>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{SCHOOL_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut schools = Vec::new();

        while let Some(row) = rows.next()? {
            schools.push(parse_school_row(row)?);
        }

        Ok(schools)
    }
}

fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version > expected_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: actual_version,
            latest_supported: expected_version,
        }
        .into());
    }
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [SCHOOLS_TABLE],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(SCHOOLS_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([SCHOOLS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !columns.contains(**column))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: SCHOOLS_TABLE,
            column: *column,
        });
    }

    Ok(())
}

fn parse_school_row(row: &Row<'_>) -> RepoResult<School> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in schools.uuid"))
    })?;

    let school = School {
        id,
        name: row.get("name")?,
        address: row.get("address")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    };
    school
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("school {id}: {err}")))?;

    Ok(school)
}
