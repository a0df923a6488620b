//! Error types for the editor

use crate::host::EditorHandle;
use crate::transaction::TransactionError;
use drafter_schema::SchemaError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Unknown editor handle: {0}")]
    UnknownHandle(EditorHandle),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Selection ends at {pos}, past document size {size}")]
    SelectionOutOfRange { pos: usize, size: usize },
}
