//! Querydesk Core - shared abstractions for the query tool
//!
//! This crate provides the fundamental traits and types the other
//! querydesk crates depend on:
//!
//! - `Connection` - Trait for database connections
//! - `SchemaIntrospection` - Trait for table and field discovery
//! - `Database` - Umbrella trait a driver satisfies to back a session
//! - Common types like `Value`, `Row`, `QueryResult`
//! - The error taxonomy and the logging bootstrap

mod connection;
mod error;
mod schema;
mod types;

pub mod logging;

pub use connection::*;
pub use error::*;
pub use schema::*;
pub use types::*;
