use super::MovieId;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("Movie {0} not found")]
    NotFound(MovieId),

    #[error("No movie ids left after {0}")]
    IdsExhausted(MovieId),
}
