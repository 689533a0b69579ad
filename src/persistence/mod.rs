//! Persistence backends for the movie catalog.
//!
//! The store keeps the whole catalog in memory and hands it to a
//! `MoviePersistence` after every mutation. Backends never decide what the
//! in-memory state is, they only mirror it.

mod document;
mod json_file;
mod null_persistence;

pub use document::CatalogSnapshot;
pub use json_file::JsonFilePersistence;
pub use null_persistence::NullPersistence;

use crate::catalog::{MovieId, MovieRecord};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not replace catalog document: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Which backend the store mirrors its state into.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum PersistenceBackend {
    #[default]
    File,
    None,
}

impl std::fmt::Display for PersistenceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub trait MoviePersistence: Send + Sync {
    /// Reads the persisted catalog.
    ///
    /// Returns `Ok(None)` when there is nothing persisted yet, which is not
    /// the same as a document that exists but can't be read.
    fn load(&self) -> Result<Option<CatalogSnapshot>, PersistenceError>;

    /// Replaces the whole persisted catalog.
    fn save(&self, movies: &[MovieRecord], next_id: MovieId) -> Result<(), PersistenceError>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}
