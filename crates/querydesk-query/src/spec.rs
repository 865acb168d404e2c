//! Per-column form state

use querydesk_core::FieldRef;
use serde::{Deserialize, Serialize};

/// Sort directive for a column slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sort {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl Sort {
    /// SQL keyword for this directive, if any
    pub fn as_sql(&self) -> Option<&'static str> {
        match self {
            Sort::Unsorted => None,
            Sort::Ascending => Some("ASC"),
            Sort::Descending => Some("DESC"),
        }
    }
}

/// One column slot of the query form.
///
/// `criterion` and `or_criterion` are raw comparison fragments exactly as
/// typed (`= 5`, `> 10`, `LIKE 'a%'`), concatenated after the quoted field
/// name at compile time. An `or_criterion` is honored only when `criterion`
/// is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Selected column name; empty means unset
    pub field: String,
    /// Selected table name
    pub table: String,
    pub sort: Sort,
    /// Whether this slot contributes to the SELECT list
    pub show: bool,
    pub criterion: String,
    pub or_criterion: String,
}

impl ColumnSpec {
    /// A fresh slot with a preselected table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }
}

/// Seed one slot per discovered (table, field) pair.
///
/// The slot count is fixed for the session; every slot starts unset with the
/// default table preselected.
pub fn seed_slots(fields: &[FieldRef], default_table: &str) -> Vec<ColumnSpec> {
    fields.iter().map(|_| ColumnSpec::new(default_table)).collect()
}
