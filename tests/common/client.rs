//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per movie catalog endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::fmt::Display;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// GET /api/health
    pub async fn health(&self) -> Response {
        self.client
            .get(self.url("/health"))
            .send()
            .await
            .expect("Health request failed")
    }

    /// GET /api/movies, optionally with ?language=
    pub async fn list_movies(&self, language: Option<&str>) -> Response {
        let mut request = self.client.get(self.url("/movies"));
        if let Some(language) = language {
            request = request.query(&[("language", language)]);
        }
        request.send().await.expect("List movies request failed")
    }

    /// GET /api/movies/{id}
    pub async fn get_movie(&self, id: impl Display) -> Response {
        self.client
            .get(self.url(&format!("/movies/{}", id)))
            .send()
            .await
            .expect("Get movie request failed")
    }

    /// POST /api/movies
    pub async fn create_movie(&self, body: &Value) -> Response {
        self.client
            .post(self.url("/movies"))
            .json(body)
            .send()
            .await
            .expect("Create movie request failed")
    }

    /// POST /api/movies with just title and language, returning the created record
    ///
    /// # Panics
    ///
    /// Panics if the server doesn't answer 201.
    pub async fn create_simple_movie(&self, title: &str, language: &str) -> Value {
        let response = self
            .create_movie(&json!({"title": title, "language": language}))
            .await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "Creating {} failed",
            title
        );
        response.json().await.expect("Created movie is not JSON")
    }

    /// PUT /api/movies/{id}
    pub async fn update_movie(&self, id: impl Display, body: &Value) -> Response {
        self.client
            .put(self.url(&format!("/movies/{}", id)))
            .json(body)
            .send()
            .await
            .expect("Update movie request failed")
    }

    /// DELETE /api/movies/{id}
    pub async fn delete_movie(&self, id: impl Display) -> Response {
        self.client
            .delete(self.url(&format!("/movies/{}", id)))
            .send()
            .await
            .expect("Delete movie request failed")
    }
}
