use axum::extract::FromRef;

use crate::catalog::MovieStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use super::ServerConfig;

pub type GuardedMovieStore = Arc<Mutex<MovieStore>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub movie_store: GuardedMovieStore,
}

impl ServerState {
    pub fn new(config: ServerConfig, movie_store: GuardedMovieStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            movie_store,
        }
    }
}

/// Locks the store for one whole operation, including the save that follows
/// a mutation. A panic in another handler must not take the catalog down
/// with it, so a poisoned lock is recovered.
pub fn lock_store(store: &GuardedMovieStore) -> MutexGuard<'_, MovieStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FromRef<ServerState> for GuardedMovieStore {
    fn from_ref(input: &ServerState) -> Self {
        input.movie_store.clone()
    }
}
