//! SQLite connection implementation

use parking_lot::Mutex;
use querydesk_core::{
    ColumnMeta, Connection, QueryResult, QuerydeskError, Result, Row, SchemaIntrospection, Value,
};
use rusqlite::{Connection as RusqliteConnection, OpenFlags, params_from_iter};

/// SQLite connection wrapper.
///
/// The inner handle is opened once and serialized behind a mutex; every read
/// and write of the session goes through it.
pub struct SqliteConnection {
    conn: Mutex<RusqliteConnection>,
}

impl std::fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteConnection").finish_non_exhaustive()
    }
}

impl SqliteConnection {
    /// Open an existing SQLite database file.
    ///
    /// The file must already exist; a path that cannot be opened or does not
    /// contain a SQLite database fails with `InvalidDatabase`, which is fatal
    /// for the session. `:memory:` is accepted for tests and fixtures.
    pub fn open(path: &str) -> Result<Self> {
        tracing::info!(path = %path, "opening SQLite database");

        let conn = if path == ":memory:" {
            RusqliteConnection::open_in_memory().map_err(|e| {
                QuerydeskError::Connection(format!("failed to open in-memory database: {}", e))
            })?
        } else {
            let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX;

            RusqliteConnection::open_with_flags(path, flags).map_err(|e| {
                QuerydeskError::InvalidDatabase(format!("cannot open '{}': {}", path, e))
            })?
        };

        // PRAGMA statements return results, so use pragma_update
        conn.pragma_update(None, "foreign_keys", "ON").map_err(|e| {
            QuerydeskError::InvalidDatabase(format!("'{}' is not a SQLite database: {}", path, e))
        })?;

        // SQLite reads the file header lazily; probing the catalog surfaces
        // a corrupt or non-database file here instead of at first query.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| {
            QuerydeskError::InvalidDatabase(format!("'{}' is not a SQLite database: {}", path, e))
        })?;

        tracing::info!(path = %path, "SQLite database connection established");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl Connection for SqliteConnection {
    fn driver_name(&self) -> &str {
        "sqlite"
    }

    #[tracing::instrument(skip(self, sql, params), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let start_time = std::time::Instant::now();

        let conn = self.conn.lock();
        let sqlite_params = values_to_rusqlite(params);

        let mut stmt = conn.prepare(sql).map_err(|e| query_error(sql, e))?;

        // Capture column names and declared types before executing
        let column_count = stmt.column_count();
        let mut column_names: Vec<String> = Vec::with_capacity(column_count);
        let mut columns: Vec<ColumnMeta> = Vec::with_capacity(column_count);

        for (idx, col) in stmt.columns().iter().enumerate() {
            let name = col.name().to_string();
            let data_type = col.decl_type().unwrap_or("DYNAMIC").to_string();

            column_names.push(name.clone());
            columns.push(ColumnMeta {
                name,
                data_type,
                ordinal: idx,
            });
        }

        let mut rows = Vec::new();
        let mut query_rows = stmt
            .query(params_from_iter(sqlite_params.iter()))
            .map_err(|e| query_error(sql, e))?;

        while let Some(row) = query_rows.next().map_err(|e| query_error(sql, e))? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(rusqlite_to_value(row, i).map_err(|e| query_error(sql, e))?);
            }
            rows.push(Row::new(column_names.clone(), values));
        }

        let execution_time_ms = start_time.elapsed().as_millis() as u64;

        tracing::debug!(
            row_count = rows.len(),
            execution_time_ms = execution_time_ms,
            "query executed"
        );

        Ok(QueryResult {
            columns,
            rows,
            execution_time_ms,
        })
    }

    #[tracing::instrument(skip(self, sql, params), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    fn execute(&self, sql: &str, params: &[Value]) -> Result<u64> {
        let conn = self.conn.lock();
        let sqlite_params = values_to_rusqlite(params);

        let affected_rows = conn
            .execute(sql, params_from_iter(sqlite_params.iter()))
            .map_err(|e| query_error(sql, e))?;

        tracing::debug!(affected_rows = affected_rows, "statement executed");
        Ok(affected_rows as u64)
    }
}

impl SchemaIntrospection for SqliteConnection {
    #[tracing::instrument(skip(self))]
    fn list_tables(&self) -> Result<Vec<String>> {
        tracing::debug!("listing tables from sqlite_master");
        // Storage order, unfiltered: the first listed table seeds every slot
        let result = self.query("SELECT name FROM sqlite_master WHERE type = 'table'", &[])?;

        let tables: Vec<String> = result
            .rows
            .iter()
            .filter_map(|row| row.get(0).and_then(|v| v.as_str()).map(str::to_string))
            .collect();

        tracing::debug!(table_count = tables.len(), "tables listed");
        Ok(tables)
    }

    #[tracing::instrument(skip(self))]
    fn list_fields(&self, table: &str) -> Result<Vec<String>> {
        // Field names come from one sampled row; a table with zero rows
        // exposes no fields.
        let result = self.query(&format!("SELECT * FROM \"{}\" LIMIT 1", table), &[])?;

        let fields = result
            .rows
            .first()
            .map(|row| row.columns().to_vec())
            .unwrap_or_default();

        tracing::debug!(table = %table, field_count = fields.len(), "fields sampled");
        Ok(fields)
    }
}

fn query_error(sql: &str, err: impl std::fmt::Display) -> QuerydeskError {
    QuerydeskError::Execution {
        message: err.to_string(),
        sql: sql.to_string(),
    }
}

fn values_to_rusqlite(values: &[Value]) -> Vec<rusqlite::types::Value> {
    values.iter().map(value_to_rusqlite).collect()
}

fn value_to_rusqlite(value: &Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Integer(i) => rusqlite::types::Value::Integer(*i),
        Value::Real(f) => rusqlite::types::Value::Real(*f),
        Value::Text(s) => rusqlite::types::Value::Text(s.clone()),
        Value::Blob(b) => rusqlite::types::Value::Blob(b.clone()),
    }
}

/// Convert a rusqlite row value to our Value type
fn rusqlite_to_value(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Value> {
    use rusqlite::types::ValueRef;

    let value = match row.get_ref(idx)? {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).to_string()),
        // Text stored through untyped columns can arrive as a blob
        ValueRef::Blob(b) => match std::str::from_utf8(b) {
            Ok(s) => Value::Text(s.to_string()),
            Err(_) => Value::Blob(b.to_vec()),
        },
    };

    Ok(value)
}
