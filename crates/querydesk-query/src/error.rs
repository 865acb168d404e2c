//! Errors surfaced by a single execute action

use crate::compile::CompileError;
use querydesk_core::QuerydeskError;
use thiserror::Error;

/// Everything that can go wrong between pressing execute and seeing a grid.
///
/// Both variants are recoverable: the shell reports them and the session and
/// database handle stay valid for the next action.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Database(#[from] QuerydeskError),
}

/// Result type alias for execute actions
pub type ExecuteResult<T> = std::result::Result<T, ExecuteError>;
