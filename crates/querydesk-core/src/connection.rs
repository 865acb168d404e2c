//! Connection trait and the driver-facing seam

use crate::{QueryResult, Result, SchemaIntrospection, Value};

/// A database connection.
///
/// All calls block on the caller's thread; the tool performs every piece of
/// work synchronously in response to a user action.
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "sqlite")
    fn driver_name(&self) -> &str;

    /// Execute a query that returns rows (SELECT)
    fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Execute a statement that modifies data (INSERT/UPDATE/DELETE).
    /// Returns the number of affected rows. No form action writes, but the
    /// data-access layer is capable of it; fixtures and tooling use this.
    fn execute(&self, sql: &str, params: &[Value]) -> Result<u64>;
}

/// Everything a query session needs from an open database handle.
///
/// The handle is opened once at startup, shared by reference for the process
/// lifetime, and released implicitly at drop.
pub trait Database: Connection + SchemaIntrospection {}

impl<T: Connection + SchemaIntrospection> Database for T {}
