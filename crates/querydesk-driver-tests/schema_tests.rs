//! Schema introspection tests

use anyhow::Result;
use indoc::indoc;
use pretty_assertions::assert_eq;
use querydesk_core::{Connection, FieldRef, SchemaIntrospection};
use querydesk_driver_sqlite::SqliteConnection;

use crate::fixtures::{sample_db, sample_db_file};

#[test]
fn tables_list_in_creation_order() -> Result<()> {
    let db = sample_db()?;
    assert_eq!(db.list_tables()?, vec!["students", "teachers", "attendance"]);
    Ok(())
}

#[test]
fn fields_follow_column_order() -> Result<()> {
    let db = sample_db()?;
    assert_eq!(db.list_fields("students")?, vec!["id", "name", "grade"]);
    Ok(())
}

#[test]
fn empty_table_exposes_no_fields() -> Result<()> {
    let db = sample_db()?;
    assert!(db.list_fields("attendance")?.is_empty());
    Ok(())
}

#[test]
fn discovery_walks_tables_in_order() -> Result<()> {
    let db = sample_db()?;
    let fields = db.discover_fields()?;

    let expected: Vec<FieldRef> = [
        ("students", "id"),
        ("students", "name"),
        ("students", "grade"),
        ("teachers", "id"),
        ("teachers", "name"),
    ]
    .into_iter()
    .map(|(table, field)| FieldRef {
        table: table.into(),
        field: field.into(),
    })
    .collect();

    assert_eq!(fields, expected);
    Ok(())
}

#[test]
fn discovery_skips_fields_of_empty_tables() -> Result<()> {
    let db = sample_db()?;
    let fields = db.discover_fields()?;
    assert!(fields.iter().all(|f| f.table != "attendance"));
    Ok(())
}

#[test]
fn on_disk_database_introspects_like_memory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db = sample_db_file(&dir.path().join("school.db"))?;

    assert_eq!(db.list_tables()?, vec!["students", "teachers", "attendance"]);
    assert_eq!(db.list_fields("teachers")?, vec!["id", "name"]);
    Ok(())
}

#[test]
fn quoted_table_names_sample_cleanly() -> Result<()> {
    let db = sample_db()?;
    db.execute(
        indoc! {r#"
            CREATE TABLE "exam results" (
                student_id INTEGER,
                score REAL
            )
        "#},
        &[],
    )?;
    db.execute(
        r#"INSERT INTO "exam results" (student_id, score) VALUES (1, 82.5)"#,
        &[],
    )?;

    assert_eq!(db.list_fields("exam results")?, vec!["student_id", "score"]);
    Ok(())
}

#[test]
fn empty_database_discovers_nothing() -> Result<()> {
    crate::fixtures::init_tracing();
    let conn = SqliteConnection::open(":memory:")?;
    assert!(conn.list_tables()?.is_empty());
    assert!(conn.discover_fields()?.is_empty());
    Ok(())
}
