//! Headless round runner binding the game engine to a scripted policy.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reelquiz_game::{
    CumulativeStats, FileStatsStorage, FileStorageError, GameResult, MemoryStatsStorage,
    MovieCatalog, QuestionFactory, QuizAlert, QuizEngine, RoundPhase, StatsStorage,
};

use crate::logic::policy::{AnswerPolicy, AnswerStrategy};

/// Questions the engine deals into every automated round.
pub const STANDARD_ROUND_SIZE: u32 = 10;

/// Storage backend selection for a scenario plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Shared in-memory record; fastest.
    Memory,
    /// JSON file in the system temp directory; exercises the durable path.
    TempFile,
}

/// Storage handle that drives either backend through one engine type.
#[derive(Debug, Clone)]
pub enum RunStorage {
    Memory(MemoryStatsStorage),
    File(FileStatsStorage),
}

impl StatsStorage for RunStorage {
    type Error = FileStorageError;

    fn load(&self) -> Result<Option<CumulativeStats>, Self::Error> {
        match self {
            Self::Memory(storage) => match storage.load() {
                Ok(record) => Ok(record),
                Err(never) => match never {},
            },
            Self::File(storage) => storage.load(),
        }
    }

    fn save(&self, stats: &CumulativeStats) -> Result<(), Self::Error> {
        match self {
            Self::Memory(storage) => match storage.save(stats) {
                Ok(()) => Ok(()),
                Err(never) => match never {},
            },
            Self::File(storage) => storage.save(stats),
        }
    }
}

/// Assertion hook run against every completed round.
type RoundExpectationFn = Arc<dyn Fn(&RoundSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct RoundExpectation(RoundExpectationFn);

impl fmt::Debug for RoundExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundExpectation").finish()
    }
}

impl RoundExpectation {
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&RoundSummary) -> Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the hook against a round summary.
    ///
    /// # Errors
    ///
    /// Returns the hook's error when the summary violates it.
    pub fn evaluate(&self, summary: &RoundSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for RoundExpectation
where
    F: Fn(&RoundSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Declarative plan for driving automated rounds.
#[derive(Debug, Clone)]
pub struct ScenarioPlan {
    pub strategy: AnswerStrategy,
    pub rounds: Option<usize>,
    pub storage: StorageKind,
    pub expectations: Vec<RoundExpectation>,
}

impl ScenarioPlan {
    #[must_use]
    pub fn new(strategy: AnswerStrategy) -> Self {
        Self {
            strategy,
            rounds: None,
            storage: StorageKind::Memory,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = Some(rounds);
        self
    }

    #[must_use]
    pub const fn with_storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<RoundExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// One answered question: what the policy chose and whether it landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub answer: bool,
    pub was_correct: bool,
}

/// Complete record of one automated round, snapshotted for expectations.
#[derive(Debug, Clone)]
pub struct RoundSummary {
    pub seed: u64,
    pub strategy: AnswerStrategy,
    /// Zero-based position of this round within its run.
    pub round_index: usize,
    pub progress_labels: Vec<String>,
    pub answers: Vec<AnswerRecord>,
    pub result: GameResult,
    /// Counters the engine holds after storing the result.
    pub stats: CumulativeStats,
    /// Counters re-read from the storage backend after the store.
    pub reloaded: CumulativeStats,
    pub accuracy: f64,
    pub summary_block: String,
    pub alert: QuizAlert,
    /// Every result this run has recorded, oldest first.
    pub history: Vec<GameResult>,
}

/// Deterministic runner for the core game flow.
#[derive(Debug, Clone)]
pub struct QuizRunner {
    catalog: MovieCatalog,
}

impl QuizRunner {
    #[must_use]
    pub fn new(catalog: MovieCatalog) -> Self {
        Self { catalog }
    }

    /// Runner over the core's built-in ten-title deck.
    #[must_use]
    pub fn with_default_catalog() -> Self {
        Self::new(MovieCatalog::default_catalog())
    }

    /// Build a run for `plan`, seeding the question factory and the
    /// policy from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if previously persisted statistics cannot be read.
    pub fn start_run(&self, plan: &ScenarioPlan, seed: u64) -> Result<QuizRun> {
        let (storage, temp_path) = match plan.storage {
            StorageKind::Memory => (RunStorage::Memory(MemoryStatsStorage::default()), None),
            StorageKind::TempFile => {
                let path = temp_stats_path(seed);
                (RunStorage::File(FileStatsStorage::new(&path)), Some(path))
            }
        };
        log::debug!(
            "starting run: strategy {} seed {seed} storage {:?}",
            plan.strategy,
            plan.storage
        );
        let source = QuestionFactory::new(self.catalog.clone(), seed);
        let engine = QuizEngine::new(source, storage.clone())
            .context("failed to load persisted statistics")?;
        Ok(QuizRun {
            engine,
            storage,
            policy: plan.strategy.create_policy(seed),
            strategy: plan.strategy,
            seed,
            history: Vec::new(),
            rounds_played: 0,
            temp_path,
        })
    }
}

fn temp_stats_path(seed: u64) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("reelquiz-tester-{seed}-{nanos}.json"))
}

/// One engine bound to one policy, playing consecutive rounds.
pub struct QuizRun {
    engine: QuizEngine<QuestionFactory, RunStorage>,
    storage: RunStorage,
    policy: Box<dyn AnswerPolicy + Send>,
    strategy: AnswerStrategy,
    seed: u64,
    history: Vec<GameResult>,
    rounds_played: usize,
    temp_path: Option<PathBuf>,
}

impl QuizRun {
    /// Play one full round through the policy and snapshot everything
    /// the expectations inspect.
    ///
    /// # Errors
    ///
    /// Returns an error if the round cannot be dealt, or the updated
    /// statistics cannot be persisted or re-read.
    pub fn play_round(&mut self) -> Result<RoundSummary> {
        let round_index = self.rounds_played;
        let mut progress_labels = Vec::new();
        let mut answers = Vec::new();

        let mut round = self
            .engine
            .begin_round()
            .context("failed to deal a round")?;
        let result = loop {
            if let Some(question) = round.current_question().cloned() {
                if let Some(step) = round.current_step() {
                    let choice = self.policy.answer(&question, &step);
                    progress_labels.push(step.progress);
                    if let Some(feedback) = round.answer(choice) {
                        answers.push(AnswerRecord {
                            answer: choice,
                            was_correct: feedback.correct,
                        });
                    }
                }
            }
            match round.proceed() {
                RoundPhase::Question(_) => {}
                RoundPhase::Finished(result) => break result,
            }
        };

        let alert = self
            .engine
            .finish_round(&result)
            .context("failed to persist the round result")?;
        self.history.push(result.clone());
        self.rounds_played += 1;

        let reloaded = self
            .storage
            .load()
            .context("failed to re-read persisted statistics")?
            .unwrap_or_default();

        Ok(RoundSummary {
            seed: self.seed,
            strategy: self.strategy,
            round_index,
            progress_labels,
            answers,
            result,
            stats: self.engine.statistics().stats().clone(),
            reloaded,
            accuracy: self.engine.statistics().total_accuracy(),
            summary_block: self.engine.statistics().summary(),
            alert,
            history: self.history.clone(),
        })
    }

    /// Strategy driving this run.
    #[must_use]
    pub const fn strategy(&self) -> AnswerStrategy {
        self.strategy
    }

    /// Path of the temp stats file, when the plan asked for one.
    #[must_use]
    pub fn stats_path(&self) -> Option<&Path> {
        self.temp_path.as_deref()
    }

    /// Remove the temp stats file, if this run created one.
    pub fn finish(self) {
        if let Some(path) = self.temp_path {
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::ensure;

    fn oracle_plan() -> ScenarioPlan {
        ScenarioPlan::new(AnswerStrategy::Oracle)
    }

    #[test]
    fn plan_defaults_to_memory_storage_and_open_round_count() {
        let plan = oracle_plan();
        assert_eq!(plan.storage, StorageKind::Memory);
        assert!(plan.rounds.is_none());
        assert!(plan.expectations.is_empty());

        let plan = plan.with_rounds(3).with_storage(StorageKind::TempFile);
        assert_eq!(plan.rounds, Some(3));
        assert_eq!(plan.storage, StorageKind::TempFile);
    }

    #[test]
    fn oracle_round_walks_ten_steps_and_scores_full() {
        let runner = QuizRunner::with_default_catalog();
        let mut run = runner.start_run(&oracle_plan(), 42).unwrap();
        let summary = run.play_round().unwrap();

        assert_eq!(summary.round_index, 0);
        assert_eq!(summary.progress_labels.len(), 10);
        assert_eq!(summary.progress_labels[0], "1/10");
        assert_eq!(summary.progress_labels[9], "10/10");
        assert_eq!(summary.result.correct(), 10);
        assert_eq!(summary.result.total(), STANDARD_ROUND_SIZE);
        assert!(summary.answers.iter().all(|record| record.was_correct));
        assert_eq!(summary.stats.games_count, 1);
        assert_eq!(summary.alert.title, "Round complete!");
        assert!((summary.accuracy - 100.0).abs() < 1e-9);
    }

    #[test]
    fn consecutive_rounds_accumulate_statistics() {
        let runner = QuizRunner::with_default_catalog();
        let mut run = runner
            .start_run(&ScenarioPlan::new(AnswerStrategy::Coin), 7)
            .unwrap();

        let mut total_correct = 0;
        for expected_index in 0..3 {
            let summary = run.play_round().unwrap();
            total_correct += summary.result.correct();
            assert_eq!(summary.round_index, expected_index);
            assert_eq!(summary.history.len(), expected_index + 1);
            assert_eq!(summary.stats.total_correct_answers, total_correct);
        }
    }

    #[test]
    fn runs_with_the_same_seed_replay_identically() {
        let runner = QuizRunner::with_default_catalog();
        let play = |seed: u64| {
            let mut run = runner
                .start_run(&ScenarioPlan::new(AnswerStrategy::Coin), seed)
                .unwrap();
            let summary = run.play_round().unwrap();
            (summary.result.correct(), summary.answers)
        };
        assert_eq!(play(1337), play(1337));
    }

    #[test]
    fn temp_file_run_persists_and_cleans_up() {
        let runner = QuizRunner::with_default_catalog();
        let plan = oracle_plan().with_storage(StorageKind::TempFile);
        let mut run = runner.start_run(&plan, 9).unwrap();

        let summary = run.play_round().unwrap();
        assert_eq!(summary.reloaded, summary.stats);

        let path = run.stats_path().unwrap().to_path_buf();
        assert!(path.exists());
        run.finish();
        assert!(!path.exists());
    }

    #[test]
    fn expectations_convert_from_plain_functions() {
        fn never_zero(summary: &RoundSummary) -> Result<()> {
            ensure!(summary.result.total() > 0, "round should ask questions");
            Ok(())
        }

        let plan = oracle_plan().with_expectation(never_zero);
        assert_eq!(plan.expectations.len(), 1);

        let runner = QuizRunner::with_default_catalog();
        let mut run = runner.start_run(&plan, 3).unwrap();
        let summary = run.play_round().unwrap();
        plan.expectations[0].evaluate(&summary).unwrap();

        let failing = RoundExpectation::new(|_summary: &RoundSummary| anyhow::bail!("always fails"));
        assert!(failing.evaluate(&summary).is_err());
        assert_eq!(format!("{failing:?}"), "RoundExpectation");
    }
}
