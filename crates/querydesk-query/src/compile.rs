//! Criteria-to-query compiler
//!
//! Compiles a snapshot of the column slots into one SELECT statement.
//! Criterion text is spliced into the query unescaped: the fragments are
//! whatever the user typed into a local, single-user tool operating on a
//! file they already own. That trust boundary is part of the accepted
//! syntax (`> 5`, `LIKE '%a%'`) and must not be narrowed by escaping.

use crate::spec::ColumnSpec;
use thiserror::Error;

/// Identifier quote character used in generated SQL
const IDENT_QUOTE: char = '"';

/// Reasons a slot snapshot cannot be compiled
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompileError {
    /// No slot has its show flag set; criteria alone cannot form a projection
    #[error("no fields selected: pick a field, its table, and turn on 'show'")]
    NoFieldsSelected,

    /// Shown slots span more than one table
    #[error("multi-table queries are not available")]
    MultipleTablesSelected,
}

/// A compiled query, ready to render as text.
///
/// Derived from one slot snapshot and never stored; every execute action
/// recompiles from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// Quoted field names, in slot order
    pub fields: Vec<String>,
    /// The single table every shown field resolved to
    pub table: String,
    /// Per-slot predicate fragments, in slot order
    pub predicates: Vec<String>,
    /// `"<field> ASC|DESC"` fragments, in slot order
    pub order_by: Vec<String>,
}

impl CompiledQuery {
    /// Render the query text
    pub fn to_sql(&self) -> String {
        let mut sql = format!("SELECT {} FROM {}", self.fields.join(","), self.table);
        if !self.predicates.is_empty() {
            sql.push_str(&format!(" WHERE ({})", self.predicates.join(") AND (")));
        }
        if !self.order_by.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", self.order_by.join(",")));
        }
        sql
    }
}

fn quote(field: &str) -> String {
    format!("{q}{field}{q}", q = IDENT_QUOTE)
}

/// Compile a slot snapshot into a query.
///
/// Single deterministic pass in slot order. Shown slots contribute their
/// quoted field to the projection, their table to the working table set, and
/// their sort directive to ORDER BY. Slots with a criterion contribute a
/// predicate whether or not they are shown; an `or_criterion` without a
/// `criterion` is ignored.
pub fn compile(slots: &[ColumnSpec]) -> Result<CompiledQuery, CompileError> {
    let mut fields = Vec::new();
    let mut tables: Vec<String> = Vec::new();
    let mut predicates = Vec::new();
    let mut order_by = Vec::new();

    for slot in slots {
        let quoted = quote(&slot.field);

        if slot.show {
            fields.push(quoted.clone());
            if !tables.contains(&slot.table) {
                tables.push(slot.table.clone());
            }
            if let Some(direction) = slot.sort.as_sql() {
                order_by.push(format!("{} {}", quoted, direction));
            }
        }

        if !slot.criterion.is_empty() {
            let mut predicate = format!("{}{}", quoted, slot.criterion);
            if !slot.or_criterion.is_empty() {
                predicate.push_str(&format!(" OR {}{}", quoted, slot.or_criterion));
            }
            predicates.push(predicate);
        }
    }

    if fields.is_empty() {
        return Err(CompileError::NoFieldsSelected);
    }
    if tables.len() > 1 {
        return Err(CompileError::MultipleTablesSelected);
    }

    Ok(CompiledQuery {
        fields,
        table: tables.remove(0),
        predicates,
        order_by,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Sort;
    use pretty_assertions::assert_eq;

    fn shown(table: &str, field: &str) -> ColumnSpec {
        ColumnSpec {
            field: field.into(),
            table: table.into(),
            show: true,
            ..ColumnSpec::default()
        }
    }

    #[test]
    fn shown_fields_project_in_slot_order() {
        let slots = vec![
            shown("students", "name"),
            shown("students", "id"),
            shown("students", "grade"),
        ];

        let compiled = compile(&slots).unwrap();
        assert_eq!(
            compiled.to_sql(),
            r#"SELECT "name","id","grade" FROM students"#
        );
    }

    #[test]
    fn no_shown_slots_fails_even_with_criteria() {
        let mut slot = ColumnSpec::new("students");
        slot.field = "grade".into();
        slot.criterion = "> 5".into();

        assert_eq!(compile(&[slot]), Err(CompileError::NoFieldsSelected));
        assert_eq!(compile(&[]), Err(CompileError::NoFieldsSelected));
    }

    #[test]
    fn shown_slots_spanning_tables_fail() {
        let slots = vec![shown("students", "name"), shown("teachers", "name")];
        assert_eq!(compile(&slots), Err(CompileError::MultipleTablesSelected));
    }

    #[test]
    fn hidden_slot_table_does_not_count_toward_table_set() {
        let mut hidden = ColumnSpec::new("teachers");
        hidden.field = "room".into();
        hidden.criterion = "= 4".into();

        let slots = vec![shown("students", "name"), hidden];
        let compiled = compile(&slots).unwrap();
        assert_eq!(compiled.table, "students");
        assert_eq!(compiled.predicates, vec![r#""room"= 4"#.to_string()]);
    }

    #[test]
    fn criterion_without_or_renders_single_fragment() {
        let mut slot = shown("students", "grade");
        slot.criterion = "= 5".into();

        let compiled = compile(&[slot]).unwrap();
        assert_eq!(compiled.predicates, vec![r#""grade"= 5"#.to_string()]);
    }

    #[test]
    fn criterion_with_or_renders_both_fragments() {
        let mut slot = shown("students", "grade");
        slot.criterion = "= 5".into();
        slot.or_criterion = "= 10".into();

        let compiled = compile(&[slot]).unwrap();
        assert_eq!(
            compiled.predicates,
            vec![r#""grade"= 5 OR "grade"= 10"#.to_string()]
        );
    }

    #[test]
    fn or_without_criterion_is_ignored() {
        let mut slot = shown("students", "grade");
        slot.or_criterion = "= 10".into();

        let compiled = compile(&[slot]).unwrap();
        assert!(compiled.predicates.is_empty());
    }

    #[test]
    fn sort_applies_only_to_shown_slots() {
        let mut sorted_hidden = ColumnSpec::new("students");
        sorted_hidden.field = "id".into();
        sorted_hidden.sort = Sort::Descending;

        let mut sorted_shown = shown("students", "name");
        sorted_shown.sort = Sort::Ascending;

        let slots = vec![sorted_hidden, sorted_shown];
        let compiled = compile(&slots).unwrap();
        assert_eq!(compiled.order_by, vec![r#""name" ASC"#.to_string()]);
    }

    #[test]
    fn multiple_sorts_join_in_slot_order() {
        let mut grade = shown("students", "grade");
        grade.sort = Sort::Descending;
        let mut name = shown("students", "name");
        name.sort = Sort::Ascending;

        let compiled = compile(&[grade, name]).unwrap();
        assert_eq!(
            compiled.to_sql(),
            r#"SELECT "grade","name" FROM students ORDER BY "grade" DESC,"name" ASC"#
        );
    }

    #[test]
    fn students_scenario_renders_expected_text() {
        let mut name = shown("students", "name");
        name.sort = Sort::Ascending;

        let mut grade = shown("students", "grade");
        grade.criterion = ">= 5".into();

        let compiled = compile(&[name, grade]).unwrap();
        assert_eq!(
            compiled.to_sql(),
            r#"SELECT "name","grade" FROM students WHERE ("grade">= 5) ORDER BY "name" ASC"#
        );
    }

    #[test]
    fn predicates_join_with_and() {
        let mut grade = shown("students", "grade");
        grade.criterion = ">= 5".into();
        let mut name = shown("students", "name");
        name.criterion = "LIKE 'A%'".into();

        let compiled = compile(&[grade, name]).unwrap();
        assert_eq!(
            compiled.to_sql(),
            r#"SELECT "grade","name" FROM students WHERE ("grade">= 5) AND ("name"LIKE 'A%')"#
        );
    }
}
