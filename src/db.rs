//! Connection setup, schema creation and sample data.
use crate::error::Result;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

/// Path to the SQLite database file when none is configured
pub const DEFAULT_DB_PATH: &str = "quizzes.sqlite";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    age  INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS quizzes (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    question  TEXT NOT NULL,
    answer    TEXT NOT NULL,
    author_id INTEGER NOT NULL REFERENCES users(id)
);
CREATE TABLE IF NOT EXISTS scores (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    wins       INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);
";

const SAMPLE_USERS: [(&str, i64); 4] = [("pepe", 22), ("ana", 23), ("paco", 24), ("tom", 25)];

/// (question, answer, author name)
const SAMPLE_QUIZZES: [(&str, &str, &str); 4] = [
    ("Capital of Italy", "Rome", "pepe"),
    ("Capital of France", "Paris", "ana"),
    ("Capital of Spain", "Madrid", "paco"),
    ("Capital of Portugal", "Lisbon", "tom"),
];

/// Opens the database at `path`, creating it and its tables if needed.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    debug!(path = %path.as_ref().display(), "opening database");
    let conn = Connection::open(path)?;
    configure(&conn)?;
    migrate(&conn)?;
    Ok(conn)
}

/// Opens a ready-to-use in-memory database.
#[cfg(test)]
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    migrate(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(())
}

/// Creates the tables. Safe to run against an existing database.
pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Loads sample users and quizzes, but only into a database with no users.
///
/// Returns whether anything was inserted.
pub fn seed(conn: &mut Connection) -> Result<bool> {
    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if users > 0 {
        debug!(users, "database already has users, skipping seed");
        return Ok(false);
    }

    let tx = conn.transaction()?;
    for (name, age) in SAMPLE_USERS {
        tx.execute(
            "INSERT INTO users (name, age) VALUES (?1, ?2)",
            params![name, age],
        )?;
    }
    for (question, answer, author) in SAMPLE_QUIZZES {
        tx.execute(
            "INSERT INTO quizzes (question, answer, author_id)
             SELECT ?1, ?2, id FROM users WHERE name = ?3",
            params![question, answer, author],
        )?;
    }
    tx.commit()?;

    info!(
        users = SAMPLE_USERS.len(),
        quizzes = SAMPLE_QUIZZES.len(),
        "seeded sample data"
    );
    Ok(true)
}
