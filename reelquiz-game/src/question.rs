//! Question generation and the shipped question sources.
//!
//! The factory turns a movie catalog into rating-threshold questions with
//! a seeded RNG, so the same seed and catalog always produce the same
//! rounds. Platform layers with their own data feeds implement
//! [`QuestionSource`](crate::QuestionSource) instead.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::QuestionSource;
use crate::constants::{RATING_THRESHOLD_MAX, RATING_THRESHOLD_MIN};
use crate::data::{Movie, MovieCatalog};

/// Opaque poster reference attached to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Poster {
    /// Named image asset resolved by the presentation layer.
    Asset(String),
    /// Raw image bytes already fetched by the source.
    Bytes(Vec<u8>),
}

/// One yes/no quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub poster: Poster,
    pub text: String,
    pub correct_answer: bool,
}

/// Failure modes a question source can report.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The movie data backing the source is empty, unreachable, or malformed.
    #[error("movie data unavailable: {0}")]
    DataLoad(String),
    /// A question's poster could not be produced.
    #[error("poster missing for '{title}'")]
    PosterLoad { title: String },
    /// A fixed source holds fewer questions than a round needs.
    #[error("source holds {available} questions, round needs {wanted}")]
    Insufficient { wanted: usize, available: usize },
}

/// Generates rating-threshold questions from a movie catalog.
#[derive(Debug, Clone)]
pub struct QuestionFactory {
    catalog: MovieCatalog,
    rng: ChaCha20Rng,
}

impl QuestionFactory {
    /// Build a factory over `catalog`, seeded for reproducible rounds.
    #[must_use]
    pub fn new(catalog: MovieCatalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Factory over the built-in ten-title deck.
    #[must_use]
    pub fn with_default_catalog(seed: u64) -> Self {
        Self::new(MovieCatalog::default_catalog(), seed)
    }

    /// Catalog the factory draws from.
    #[must_use]
    pub const fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }

    /// Pick the movies for one round. Every pass deals the whole catalog
    /// in shuffled order, so a movie repeats only when the round is larger
    /// than the catalog.
    fn deal_movies(&mut self, wanted: usize) -> Vec<usize> {
        let mut order = Vec::with_capacity(wanted);
        while order.len() < wanted {
            let mut pass: Vec<usize> = (0..self.catalog.len()).collect();
            pass.shuffle(&mut self.rng);
            pass.truncate(wanted - order.len());
            order.extend(pass);
        }
        order
    }

    fn question_for(movie: &Movie, threshold: u8) -> Question {
        let poster = movie
            .poster
            .clone()
            .map_or_else(|| Poster::Asset(movie.title.clone()), Poster::Asset);
        Question {
            poster,
            text: format!("Is the rating of this movie higher than {threshold}?"),
            correct_answer: movie.rating > f32::from(threshold),
        }
    }
}

impl QuestionSource for QuestionFactory {
    type Error = SourceError;

    fn next_round(&mut self, count: u32) -> Result<Vec<Question>, Self::Error> {
        if self.catalog.is_empty() {
            return Err(SourceError::DataLoad("movie catalog is empty".to_string()));
        }
        let wanted = count as usize;
        let order = self.deal_movies(wanted);
        let mut questions = Vec::with_capacity(wanted);
        for movie_index in order {
            let threshold = self
                .rng
                .gen_range(RATING_THRESHOLD_MIN..=RATING_THRESHOLD_MAX);
            questions.push(Self::question_for(&self.catalog.movies[movie_index], threshold));
        }
        Ok(questions)
    }
}

/// Serves a fixed question list, for scripted rounds and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionSource {
    questions: Vec<Question>,
}

impl StaticQuestionSource {
    /// Source that deals the same `questions` prefix on every round.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl QuestionSource for StaticQuestionSource {
    type Error = SourceError;

    fn next_round(&mut self, count: u32) -> Result<Vec<Question>, Self::Error> {
        let wanted = count as usize;
        if self.questions.len() < wanted {
            return Err(SourceError::Insufficient {
                wanted,
                available: self.questions.len(),
            });
        }
        Ok(self.questions.iter().take(wanted).cloned().collect())
    }
}
