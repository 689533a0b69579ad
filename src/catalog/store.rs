use super::{CatalogError, MovieId, MoviePatch, MovieRecord, NewMovie, SeedData};
use crate::persistence::{CatalogSnapshot, MoviePersistence, NullPersistence};
use chrono::Local;
use tracing::{error, warn};

const REQUIRED_FIELDS_MESSAGE: &str = "Title and language are required";
const EMPTY_FIELDS_MESSAGE: &str = "Title and language cannot be empty";

/// The in-memory movie catalog.
///
/// Records are kept in insertion order and ids come from a counter that only
/// moves forward, so a deleted id is never handed out again. Every mutation
/// is mirrored into the configured persistence before returning; a failed
/// save is logged and the in-memory state stays authoritative.
pub struct MovieStore {
    movies: Vec<MovieRecord>,
    next_id: MovieId,
    persistence: Box<dyn MoviePersistence>,
}

impl MovieStore {
    /// Loads the catalog from `persistence`. When nothing was persisted yet
    /// the store starts from `seed`; an unreadable document leaves it empty.
    pub fn open(persistence: Box<dyn MoviePersistence>, seed: SeedData) -> MovieStore {
        let snapshot = match persistence.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                warn!(
                    "No persisted catalog found at {}, starting with {} seed data",
                    persistence.describe(),
                    seed
                );
                CatalogSnapshot::new(seed.movies(), None)
            }
            Err(err) => {
                error!(
                    "Error loading catalog from {}: {}",
                    persistence.describe(),
                    err
                );
                CatalogSnapshot::new(Vec::new(), None)
            }
        };

        MovieStore {
            movies: snapshot.movies,
            next_id: snapshot.next_id,
            persistence,
        }
    }

    pub fn in_memory(seed: SeedData) -> MovieStore {
        Self::open(Box::new(NullPersistence), seed)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn next_id(&self) -> MovieId {
        self.next_id
    }

    /// All movies in insertion order, or only the ones whose language
    /// matches `language` ignoring case. An empty filter matches everything.
    pub fn list(&self, language: Option<&str>) -> Vec<MovieRecord> {
        match language.filter(|l| !l.is_empty()) {
            Some(language) => self
                .movies
                .iter()
                .filter(|movie| movie.has_language(language))
                .cloned()
                .collect(),
            None => self.movies.clone(),
        }
    }

    pub fn get(&self, id: MovieId) -> Result<MovieRecord, CatalogError> {
        self.movies
            .iter()
            .find(|movie| movie.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn create(&mut self, new_movie: NewMovie) -> Result<MovieRecord, CatalogError> {
        let (title, language) = match (
            non_empty(new_movie.title),
            non_empty(new_movie.language),
        ) {
            (Some(title), Some(language)) => (title, language),
            _ => return Err(CatalogError::Validation(REQUIRED_FIELDS_MESSAGE.to_owned())),
        };

        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(CatalogError::IdsExhausted(self.next_id))?;

        let movie = MovieRecord {
            id: self.next_id,
            title,
            language,
            url: new_movie.url.unwrap_or_default(),
            image_url: new_movie.image_url.unwrap_or_default(),
            release_date: new_movie.release_date.unwrap_or_else(today),
        };

        self.movies.push(movie.clone());
        self.next_id = next_id;
        self.persist();

        Ok(movie)
    }

    pub fn update(&mut self, id: MovieId, patch: MoviePatch) -> Result<MovieRecord, CatalogError> {
        let index = self.position(id)?;

        if is_blank(&patch.title) || is_blank(&patch.language) {
            return Err(CatalogError::Validation(EMPTY_FIELDS_MESSAGE.to_owned()));
        }

        let movie = &mut self.movies[index];
        movie.apply(patch);
        let updated = movie.clone();
        self.persist();

        Ok(updated)
    }

    pub fn delete(&mut self, id: MovieId) -> Result<(), CatalogError> {
        let index = self.position(id)?;
        self.movies.remove(index);
        self.persist();
        Ok(())
    }

    fn position(&self, id: MovieId) -> Result<usize, CatalogError> {
        self.movies
            .iter()
            .position(|movie| movie.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    fn persist(&self) {
        if let Err(err) = self.persistence.save(&self.movies, self.next_id) {
            error!(
                "Error saving catalog to {}: {}",
                self.persistence.describe(),
                err
            );
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_blank(value: &Option<String>) -> bool {
    matches!(value, Some(v) if v.trim().is_empty())
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
