use serde::{Deserialize, Serialize};

/// A movie the question factory can build questions from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub rating: f32,
    #[serde(default)]
    pub poster: Option<String>,
}

/// Container for all movie data available to a question factory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MovieCatalog {
    pub movies: Vec<Movie>,
}

impl MovieCatalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self { movies: Vec::new() }
    }

    /// Load a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid movie data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create a catalog from pre-parsed movies
    #[must_use]
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// Built-in ten-title deck so the factory works without external assets
    #[must_use]
    pub fn default_catalog() -> Self {
        let titles: [(&str, f32); 10] = [
            ("The Godfather", 9.2),
            ("The Dark Knight", 9.0),
            ("Kill Bill", 8.1),
            ("The Avengers", 8.0),
            ("Deadpool", 8.0),
            ("The Green Knight", 6.6),
            ("Old", 5.8),
            ("The Ice Age Adventures of Buck Wild", 4.3),
            ("Tesla", 5.1),
            ("Vivarium", 5.8),
        ];
        Self {
            movies: titles
                .into_iter()
                .map(|(title, rating)| Movie {
                    title: title.to_string(),
                    rating,
                    poster: Some(title.to_string()),
                })
                .collect(),
        }
    }

    /// Number of movies in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the catalog holds no movies
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
