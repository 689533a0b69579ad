mod error;
mod models;
mod seed;
mod store;

pub use error::CatalogError;
pub use models::{MovieId, MoviePatch, MovieRecord, NewMovie};
pub use seed::{sample_movies, SeedData};
pub use store::MovieStore;
