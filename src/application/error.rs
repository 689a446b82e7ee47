use thiserror::Error;

use crate::domain::{EntryId, InsufficientDataError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
