//! Shared fixtures for driver and session tests

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use querydesk_core::{Connection, Result, Value};
use querydesk_driver_sqlite::SqliteConnection;
use querydesk_query::DisplaySurface;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Idempotent tracing setup shared by every test
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// In-memory sample database.
///
/// `students` carries three rows, `teachers` two, and `attendance` exists
/// but is empty so its fields stay undiscoverable.
pub fn sample_db() -> Result<Arc<SqliteConnection>> {
    init_tracing();

    let conn = SqliteConnection::open(":memory:")?;
    populate(&conn)?;
    Ok(Arc::new(conn))
}

/// Create and populate a database file at `path`, then open it through the
/// driver. The file itself is seeded with plain rusqlite because the driver
/// refuses to create databases.
pub fn sample_db_file(path: &Path) -> Result<Arc<SqliteConnection>> {
    init_tracing();

    rusqlite::Connection::open(path)
        .map_err(|e| querydesk_core::QuerydeskError::Connection(e.to_string()))?;

    let conn = SqliteConnection::open(path.to_str().expect("utf-8 temp path"))?;
    populate(&conn)?;
    Ok(Arc::new(conn))
}

fn populate(conn: &SqliteConnection) -> Result<()> {
    conn.execute(
        "CREATE TABLE students (id INTEGER PRIMARY KEY, name TEXT, grade INTEGER)",
        &[],
    )?;
    conn.execute(
        "CREATE TABLE teachers (id INTEGER PRIMARY KEY, name TEXT)",
        &[],
    )?;
    conn.execute(
        "CREATE TABLE attendance (student_id INTEGER, present INTEGER)",
        &[],
    )?;

    for (id, name, grade) in [(1, "Amy", 7), (2, "Ben", 4), (3, "Cara", 9)] {
        conn.execute(
            "INSERT INTO students (id, name, grade) VALUES (?, ?, ?)",
            &[
                Value::Integer(id),
                Value::Text(name.into()),
                Value::Integer(grade),
            ],
        )?;
    }

    for (id, name) in [(1, "Mr Hall"), (2, "Ms Birch")] {
        conn.execute(
            "INSERT INTO teachers (id, name) VALUES (?, ?)",
            &[Value::Integer(id), Value::Text(name.into())],
        )?;
    }

    tracing::debug!("sample database populated");
    Ok(())
}

/// Display surface that models a widget grid: `cells` holds only what is
/// currently visible, `clears` counts reset instructions.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub clears: usize,
    pub cells: Vec<(usize, usize, String)>,
}

impl DisplaySurface for RecordingSurface {
    fn clear_results(&mut self) {
        self.clears += 1;
        self.cells.clear();
    }

    fn set_cell(&mut self, row: usize, slot: usize, text: &str) {
        self.cells.push((row, slot, text.to_string()));
    }
}
