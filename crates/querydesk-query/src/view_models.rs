//! View models for execute cycles
//!
//! DTOs designed for shell consumption.

use serde::{Deserialize, Serialize};

/// One completed execute cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryExecution {
    /// The compiled SQL, for the shell's query-text line
    pub sql: String,
    pub duration_ms: u64,
    pub row_count: usize,
}
