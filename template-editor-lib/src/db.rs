//src/db.rs
use rusqlite::{params, Connection, Row};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{CatalogError, Exercise, ExerciseCatalog, StaticCatalog};

// Matches the exercise table used by the workout tracker, so an existing
// workouts database can serve as the catalog. Only needed when inserting;
// the catalog reads id and name alone.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExerciseType {
    Resistance,
    Cardio,
    BodyWeight,
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::Resistance => write!(f, "resistance"),
            ExerciseType::Cardio => write!(f, "cardio"),
            ExerciseType::BodyWeight => write!(f, "body-weight"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection failed")]
    Connection(#[from] rusqlite::Error),
    #[error("Failed to get application data directory")]
    DataDir,
    #[error("I/O error accessing database file")]
    Io(#[from] std::io::Error),
    #[error("Database query failed: {0}")]
    QueryFailed(rusqlite::Error),
    #[error("Database insert failed: {0}")]
    InsertFailed(rusqlite::Error),
    #[error("Exercise name must be unique (case-insensitive): '{0}' already exists.")]
    ExerciseNameNotUnique(String),
}

const DB_FILE_NAME: &str = "catalog.sqlite";
const APP_DATA_DIR: &str = "template-editor";

/// Gets the path to the SQLite catalog within the app's data directory.
pub fn get_db_path() -> Result<PathBuf, DbError> {
    let data_dir = dirs::data_dir().ok_or(DbError::DataDir)?;
    let app_dir = data_dir.join(APP_DATA_DIR);
    if !app_dir.exists() {
        std::fs::create_dir_all(&app_dir)?;
    }
    Ok(app_dir.join(DB_FILE_NAME))
}

pub fn open_db<P: AsRef<Path>>(path: P) -> Result<Connection, DbError> {
    let conn = Connection::open(path).map_err(DbError::Connection)?;
    Ok(conn)
}

/// Creates the exercises table if it doesn't exist.
pub fn init_db(conn: &Connection) -> Result<(), DbError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS exercises (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            type TEXT NOT NULL CHECK(type IN ('resistance', 'cardio', 'body-weight')),
            muscles TEXT
        )",
        [],
    )
    .map_err(DbError::Connection)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub id: i64,
    pub name: String,
}

impl From<ExerciseDefinition> for Exercise {
    fn from(def: ExerciseDefinition) -> Self {
        Exercise::new(def.id.to_string(), def.name)
    }
}

pub fn create_exercise(
    conn: &Connection,
    name: &str,
    type_: ExerciseType,
    muscles: Option<&str>,
) -> Result<i64, DbError> {
    let name = name.trim();
    match conn.execute(
        "INSERT INTO exercises (name, type, muscles) VALUES (?1, ?2, ?3)",
        params![name, type_.to_string(), muscles],
    ) {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(DbError::ExerciseNameNotUnique(name.to_string()))
        }
        Err(e) => Err(DbError::InsertFailed(e)),
    }
}

fn map_row_to_exercise_definition(row: &Row) -> Result<ExerciseDefinition, rusqlite::Error> {
    Ok(ExerciseDefinition {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Lists every exercise in insertion order.
pub fn list_exercises(conn: &Connection) -> Result<Vec<ExerciseDefinition>, DbError> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM exercises ORDER BY id ASC")
        .map_err(DbError::QueryFailed)?;
    let exercise_iter = stmt
        .query_map([], map_row_to_exercise_definition)
        .map_err(DbError::QueryFailed)?;

    exercise_iter
        .collect::<Result<Vec<_>, _>>()
        .map_err(DbError::QueryFailed)
}

pub fn count_exercises(conn: &Connection) -> Result<i64, DbError> {
    conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))
        .map_err(DbError::QueryFailed)
}

/// Catalog backed by the `exercises` table. Matching happens in Rust with the
/// same rule as the in-memory catalog; SQLite's `lower()` only folds ASCII.
pub struct SqliteCatalog {
    conn: Connection,
}

impl SqliteCatalog {
    /// Opens (and initializes) the catalog database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let conn = open_db(path)?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(DbError::Connection)?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, DbError> {
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// Fills an empty table with the entries of `source`. Returns how many
    /// rows were inserted (zero when the table already has data).
    pub fn seed_if_empty(&self, source: &StaticCatalog) -> Result<usize, DbError> {
        if count_exercises(&self.conn)? > 0 {
            return Ok(0);
        }
        let entries = source.entries();
        for exercise in entries {
            create_exercise(&self.conn, &exercise.label, ExerciseType::Resistance, None)?;
        }
        tracing::info!(count = entries.len(), "Seeded exercise catalog");
        Ok(entries.len())
    }
}

impl ExerciseCatalog for SqliteCatalog {
    fn all(&self) -> Result<Vec<Exercise>, CatalogError> {
        Ok(list_exercises(&self.conn)?
            .into_iter()
            .map(Exercise::from)
            .collect())
    }
}
