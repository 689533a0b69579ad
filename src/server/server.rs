use anyhow::{Context, Result};
use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use tracing::{debug, error, info};

use crate::catalog::{MovieId, MoviePatch, MovieRecord, MovieStore, NewMovie};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::{log_requests, state::*, ApiError, ServerConfig};

const INVALID_BODY_MESSAGE: &str = "Invalid JSON body";

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub movies_count: usize,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// Only integer ids ever match a movie, anything else is reported as a
/// missing movie rather than a malformed request.
fn parse_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    raw.parse::<MovieId>().map_err(|_| ApiError::MovieNotFound)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        movies_count: lock_store(&state.movie_store).len(),
    };
    Json(stats)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Repeated `language` parameters don't fail the request, the first one wins.
fn language_filter(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "language")
        .map(|(_, value)| value.as_str())
}

async fn list_movies(
    State(movie_store): State<GuardedMovieStore>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Vec<MovieRecord>> {
    Json(lock_store(&movie_store).list(language_filter(&params)))
}

async fn get_movie(
    State(movie_store): State<GuardedMovieStore>,
    Path(id): Path<String>,
) -> Result<Json<MovieRecord>, ApiError> {
    let id = parse_movie_id(&id)?;
    Ok(Json(lock_store(&movie_store).get(id)?))
}

async fn create_movie(
    State(movie_store): State<GuardedMovieStore>,
    body: Result<Json<NewMovie>, JsonRejection>,
) -> Result<(StatusCode, Json<MovieRecord>), ApiError> {
    // An unreadable body is treated like one without title and language.
    let new_movie = match body {
        Ok(Json(new_movie)) => new_movie,
        Err(rejection) => {
            debug!("Rejected movie body: {}", rejection);
            NewMovie::default()
        }
    };

    let movie = lock_store(&movie_store).create(new_movie)?;
    debug!("Created movie {} ({})", movie.id, movie.title);
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie(
    State(movie_store): State<GuardedMovieStore>,
    Path(id): Path<String>,
    body: Result<Json<MoviePatch>, JsonRejection>,
) -> Result<Json<MovieRecord>, ApiError> {
    let id = parse_movie_id(&id)?;
    let mut movie_store = lock_store(&movie_store);

    // Unknown ids are reported before looking at the body.
    movie_store.get(id)?;
    let Json(patch) = body.map_err(|rejection| {
        debug!("Rejected patch for movie {}: {}", id, rejection);
        ApiError::BadRequest(INVALID_BODY_MESSAGE.to_owned())
    })?;

    Ok(Json(movie_store.update(id, patch)?))
}

async fn delete_movie(
    State(movie_store): State<GuardedMovieStore>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_movie_id(&id)?;
    lock_store(&movie_store).delete(id)?;
    debug!("Deleted movie {}", id);
    Ok(Json(MessageResponse {
        message: "Movie deleted successfully",
    }))
}

async fn api_not_found() -> ApiError {
    ApiError::RouteNotFound
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
}

pub fn make_app(config: ServerConfig, movie_store: GuardedMovieStore) -> Router {
    let state = ServerState::new(config.clone(), movie_store);

    let api_routes: Router = Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route("/health", get(health))
        .fallback(api_not_found)
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let index_html = PathBuf::from(&frontend_path).join("index.html");
            let static_files_service = ServeDir::new(frontend_path)
                .append_index_html_on_directories(true)
                .fallback(ServeFile::new(index_html));
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
        .layer(cors_layer())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}

pub async fn run_server(config: ServerConfig, movie_store: MovieStore) -> Result<()> {
    let address = SocketAddr::new(config.bind_address, config.port);
    let app = make_app(config, Arc::new(Mutex::new(movie_store)));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("Ready to serve at {}!", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
