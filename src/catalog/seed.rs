use super::{MovieId, MovieRecord};

/// What the store starts with when there is no persisted catalog to load.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum SeedData {
    #[default]
    Empty,
    Sample,
}

impl std::fmt::Display for SeedData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl SeedData {
    pub fn movies(&self) -> Vec<MovieRecord> {
        match self {
            SeedData::Empty => Vec::new(),
            SeedData::Sample => sample_movies(),
        }
    }
}

fn sample(id: MovieId, title: &str, language: &str, release_date: &str) -> MovieRecord {
    MovieRecord {
        id,
        title: title.to_owned(),
        language: language.to_owned(),
        url: String::new(),
        image_url: String::new(),
        release_date: release_date.to_owned(),
    }
}

pub fn sample_movies() -> Vec<MovieRecord> {
    vec![
        sample(1, "Natrang", "marathi", "2010-01-01"),
        sample(2, "Sairat", "marathi", "2016-04-29"),
        sample(3, "Dangal", "hindi", "2016-12-23"),
        sample(4, "Lagaan", "hindi", "2001-06-15"),
        sample(5, "Carry On Jatta", "punjabi", "2012-07-27"),
    ]
}
