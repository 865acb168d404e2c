//! Query session orchestration
//!
//! A session owns one open database handle and the fixed sequence of column
//! slots seeded from its schema. The form shell mutates slots on every
//! keystroke or selection and calls [`QuerySession::execute`] on the explicit
//! execute action.

use std::sync::Arc;

use querydesk_core::{Database, FieldRef, Result};

use crate::compile::{self, CompileError, CompiledQuery};
use crate::error::ExecuteResult;
use crate::grid::{DisplaySurface, paint};
use crate::spec::{ColumnSpec, seed_slots};
use crate::view_models::QueryExecution;

/// A live query form over one open database
pub struct QuerySession {
    db: Arc<dyn Database>,
    tables: Vec<String>,
    fields: Vec<FieldRef>,
    slots: Vec<ColumnSpec>,
}

impl QuerySession {
    /// Start a session: list tables, discover fields, seed the slots.
    ///
    /// Slot count equals the number of discovered (table, field) pairs and
    /// never changes afterwards. Fails only on introspection errors, which
    /// are fatal for the session.
    pub fn open(db: Arc<dyn Database>) -> Result<Self> {
        let tables = db.list_tables()?;
        tracing::info!(table_count = tables.len(), "tables discovered");

        let fields = db.discover_fields()?;
        tracing::info!(field_count = fields.len(), "fields discovered");

        let default_table = tables.first().cloned().unwrap_or_default();
        let slots = seed_slots(&fields, &default_table);

        Ok(Self {
            db,
            tables,
            fields,
            slots,
        })
    }

    /// Table names, in discovery order
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Discovered (table, field) pairs, in discovery order
    pub fn fields(&self) -> &[FieldRef] {
        &self.fields
    }

    /// Current slot states, in form order
    pub fn slots(&self) -> &[ColumnSpec] {
        &self.slots
    }

    /// Shell-side edits land here on every keystroke or selection
    pub fn slots_mut(&mut self) -> &mut [ColumnSpec] {
        &mut self.slots
    }

    /// Compile the current slots without executing
    pub fn compile(&self) -> std::result::Result<CompiledQuery, CompileError> {
        compile::compile(&self.slots)
    }

    /// Run one execute action: compile, run, repaint.
    ///
    /// A compile error returns before any display mutation. Once a query is
    /// attempted the surface is reset whether it succeeds or not; an engine
    /// rejection leaves the surface cleared and carries the offending SQL
    /// verbatim.
    #[tracing::instrument(skip(self, surface))]
    pub fn execute(&self, surface: &mut dyn DisplaySurface) -> ExecuteResult<QueryExecution> {
        let compiled = self.compile().map_err(|e| {
            tracing::debug!(error = %e, "compilation rejected");
            e
        })?;
        let sql = compiled.to_sql();
        tracing::info!(sql = %sql, "executing query");

        match self.db.query(&sql, &[]) {
            Ok(result) => {
                paint(surface, &self.slots, &result.rows);
                tracing::info!(
                    row_count = result.row_count(),
                    execution_time_ms = result.execution_time_ms,
                    "query executed"
                );
                Ok(QueryExecution {
                    sql,
                    duration_ms: result.execution_time_ms,
                    row_count: result.row_count(),
                })
            }
            Err(e) => {
                surface.clear_results();
                tracing::error!(error = %e, "query execution failed");
                Err(e.into())
            }
        }
    }
}
