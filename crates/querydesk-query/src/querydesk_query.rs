//! Query-by-example core for Querydesk
//!
//! Column slots mirror the positions of the query form: each slot carries a
//! field, a table, a sort directive, a show flag, and up to two raw filter
//! fragments. An execute action compiles a snapshot of the slots into a
//! single SELECT, runs it, and paints the rows back onto the slot layout
//! through the [`DisplaySurface`] a form shell implements.

mod compile;
mod error;
mod grid;
mod session;
mod spec;
mod view_models;

pub use compile::*;
pub use error::*;
pub use grid::*;
pub use session::*;
pub use spec::*;
pub use view_models::*;
