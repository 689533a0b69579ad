use super::{CatalogSnapshot, MoviePersistence, PersistenceError};
use crate::catalog::{MovieId, MovieRecord};

/// Keeps nothing, the catalog lives only as long as the process.
pub struct NullPersistence;

impl MoviePersistence for NullPersistence {
    fn load(&self) -> Result<Option<CatalogSnapshot>, PersistenceError> {
        Ok(None)
    }

    fn save(&self, _movies: &[MovieRecord], _next_id: MovieId) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "memory only".to_owned()
    }
}
