//! FILENAME: core/xlsx-template/src/error.rs

use persistence::PersistenceError;
use template_engine::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Invalid template options: {0}")]
    Options(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
