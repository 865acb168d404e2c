//! SQLite driver for Querydesk
//!
//! Wraps a single `rusqlite` connection behind the core `Connection` and
//! `SchemaIntrospection` traits. One handle is opened per session, held for
//! the process lifetime, and serialized behind a mutex.

mod connection;

pub use connection::SqliteConnection;
