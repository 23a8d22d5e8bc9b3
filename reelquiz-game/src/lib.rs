//! ReelQuiz Game Engine
//!
//! Platform-agnostic core logic for the ReelQuiz movie quiz: question
//! sequencing, scoring, result comparison, and durable cross-session
//! statistics. This crate provides the whole game flow without UI or
//! platform-specific dependencies; presentation layers consume the
//! display records it emits.

pub mod constants;
pub mod data;
pub mod question;
pub mod result;
pub mod round;
pub mod session;
pub mod stats;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use data::{Movie, MovieCatalog};
pub use question::{Poster, Question, QuestionFactory, SourceError, StaticQuestionSource};
pub use result::GameResult;
pub use round::{AnswerFeedback, QuizRound, RoundPhase};
pub use session::GameSession;
pub use stats::{CumulativeStats, StatisticsService};
pub use storage::{FileStatsStorage, FileStorageError, MemoryStatsStorage};
pub use view::{QuizAlert, QuizStep};

/// Trait for supplying each round's questions
/// Platform-specific implementations should provide this
pub trait QuestionSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce the ordered questions for one round
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying movie data or poster assets
    /// cannot be loaded.
    fn next_round(&mut self, count: u32) -> Result<Vec<Question>, Self::Error>;
}

/// Trait for persisting cumulative statistics
/// Platform-specific implementations should provide this
pub trait StatsStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the persisted statistics record
    ///
    /// # Errors
    ///
    /// Returns an error if a record exists but cannot be read.
    fn load(&self) -> Result<Option<CumulativeStats>, Self::Error>;

    /// Persist the statistics record durably
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, stats: &CumulativeStats) -> Result<(), Self::Error>;
}

/// Main engine binding a question source to durable statistics
pub struct QuizEngine<Q, S>
where
    Q: QuestionSource,
    S: StatsStorage,
{
    source: Q,
    stats: StatisticsService<S>,
}

impl<Q, S> QuizEngine<Q, S>
where
    Q: QuestionSource,
    S: StatsStorage,
{
    /// Create an engine, loading previously persisted statistics
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted statistics cannot be read.
    pub fn new(source: Q, storage: S) -> Result<Self, S::Error> {
        Ok(Self {
            source,
            stats: StatisticsService::open(storage)?,
        })
    }

    /// Pull a fresh standard-size round from the question source
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot produce a full round.
    pub fn begin_round(&mut self) -> Result<QuizRound, Q::Error> {
        let questions = self.source.next_round(constants::QUESTIONS_PER_ROUND)?;
        Ok(QuizRound::new(questions))
    }

    /// Record a finished round and build the results alert
    ///
    /// # Errors
    ///
    /// Returns an error if the updated statistics cannot be persisted.
    pub fn finish_round(&mut self, result: &GameResult) -> Result<QuizAlert, S::Error> {
        self.stats.store(result)?;
        Ok(QuizAlert::round_results(result, &self.stats.summary()))
    }

    /// Statistics service backing this engine
    #[must_use]
    pub const fn statistics(&self) -> &StatisticsService<S> {
        &self.stats
    }

    /// Play one full round, choosing every answer through `answers`,
    /// then record the result
    ///
    /// # Errors
    ///
    /// Returns an error if the round cannot be started or the result
    /// cannot be persisted.
    pub fn run_round(
        &mut self,
        mut answers: impl FnMut(&Question, &QuizStep) -> bool,
    ) -> Result<QuizAlert, anyhow::Error>
    where
        Q::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        let mut round = self.begin_round().map_err(Into::into)?;
        let result = loop {
            if let Some(question) = round.current_question().cloned() {
                if let Some(step) = round.current_step() {
                    let choice = answers(&question, &step);
                    round.answer(choice);
                }
            }
            match round.proceed() {
                RoundPhase::Question(_) => {}
                RoundPhase::Finished(result) => break result,
            }
        };
        self.finish_round(&result).map_err(Into::into)
    }
}
