//! Movie Catalog Server Library
//!
//! A small JSON API over an in-memory movie catalog, optionally mirrored
//! into a JSON document on disk.

pub mod catalog;
pub mod config;
pub mod persistence;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{MovieRecord, MovieStore, SeedData};
pub use persistence::{JsonFilePersistence, MoviePersistence, NullPersistence, PersistenceBackend};
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};
