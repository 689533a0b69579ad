use super::document::{StoredCatalog, StoredCatalogRef};
use super::{CatalogSnapshot, MoviePersistence, PersistenceError};
use crate::catalog::{MovieId, MovieRecord};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Mirrors the catalog into a single JSON document, rewritten in full on
/// every save.
pub struct JsonFilePersistence {
    file_path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(file_path: impl Into<PathBuf>) -> JsonFilePersistence {
        JsonFilePersistence {
            file_path: file_path.into(),
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl MoviePersistence for JsonFilePersistence {
    fn load(&self) -> Result<Option<CatalogSnapshot>, PersistenceError> {
        let content = match std::fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let stored: StoredCatalog = serde_json::from_str(&content)?;
        let snapshot = stored.into_snapshot();
        info!(
            "Loaded {} movies from {:?}",
            snapshot.movies.len(),
            self.file_path
        );
        Ok(Some(snapshot))
    }

    fn save(&self, movies: &[MovieRecord], next_id: MovieId) -> Result<(), PersistenceError> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir)?;

        // Written next to the target and renamed over it, readers never see
        // a half written document.
        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, &StoredCatalogRef::new(movies, next_id))?;
        file.write_all(b"\n")?;
        file.persist(&self.file_path)?;

        info!("Saved {} movies to {:?}", movies.len(), self.file_path);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{:?}", self.file_path)
    }
}
