use serde::{Deserialize, Deserializer, Serialize};

pub type MovieId = u64;

/// A single catalog entry, serialized as-is both over HTTP and on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub language: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_date: String,
}

/// Stored documents may carry `null` for the optional fields.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl MovieRecord {
    pub fn has_language(&self, language: &str) -> bool {
        self.language.to_lowercase() == language.to_lowercase()
    }

    /// Applies every field present in `patch`, leaving the others untouched.
    pub(super) fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(release_date) = patch.release_date {
            self.release_date = release_date;
        }
    }
}

/// Input of a create operation. Only `title` and `language` are required,
/// that is checked by the store rather than by deserialization so that a
/// missing field and an empty one are reported the same way.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewMovie {
    pub title: Option<String>,
    pub language: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub release_date: Option<String>,
}

impl NewMovie {
    pub fn new(title: &str, language: &str) -> Self {
        NewMovie {
            title: Some(title.to_owned()),
            language: Some(language.to_owned()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub language: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub release_date: Option<String>,
}
