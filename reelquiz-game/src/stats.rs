//! Cross-session statistics aggregation.
use serde::{Deserialize, Serialize};

use crate::constants::QUESTIONS_PER_ROUND;
use crate::{GameResult, StatsStorage};

/// Aggregate counters persisted across app launches.
///
/// Stored as one serialized record, never as loose per-field keys, so a
/// crash can only ever observe the previous complete record or the new
/// complete record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CumulativeStats {
    #[serde(default)]
    pub games_count: u32,
    #[serde(default)]
    pub total_correct_answers: u32,
    #[serde(default)]
    pub best_game: Option<GameResult>,
}

/// Durable statistics service over a storage backend.
#[derive(Debug, Clone)]
pub struct StatisticsService<S: StatsStorage> {
    storage: S,
    stats: CumulativeStats,
}

impl<S: StatsStorage> StatisticsService<S> {
    /// Open the service, loading previously persisted statistics.
    /// A missing record starts the counters from zero.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if a persisted record exists but
    /// cannot be read.
    pub fn open(storage: S) -> Result<Self, S::Error> {
        let stats = storage.load()?.unwrap_or_default();
        Ok(Self { storage, stats })
    }

    /// Current aggregate counters.
    #[must_use]
    pub const fn stats(&self) -> &CumulativeStats {
        &self.stats
    }

    /// Best recorded game, if any round has been stored.
    #[must_use]
    pub fn best_game(&self) -> Option<&GameResult> {
        self.stats.best_game.as_ref()
    }

    /// Record a completed round: bump the game counter, add the round's
    /// correct answers, and keep the best game. The updated record is
    /// persisted before the call returns; on a failed write the in-memory
    /// counters are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the updated record cannot be written.
    pub fn store(&mut self, result: &GameResult) -> Result<(), S::Error> {
        let mut updated = self.stats.clone();
        updated.games_count += 1;
        updated.total_correct_answers += result.correct();
        if updated
            .best_game
            .as_ref()
            .is_none_or(|best| result.is_better_than(best))
        {
            updated.best_game = Some(result.clone());
        }
        self.storage.save(&updated)?;
        self.stats = updated;
        Ok(())
    }

    /// Average share of correct answers across all recorded rounds, in
    /// percent over the fixed round size. Zero before the first round.
    #[must_use]
    pub fn total_accuracy(&self) -> f64 {
        if self.stats.games_count == 0 {
            return 0.0;
        }
        let answered = f64::from(self.stats.games_count) * f64::from(QUESTIONS_PER_ROUND);
        f64::from(self.stats.total_correct_answers) / answered * 100.0
    }

    /// Three-line statistics block for the round-results alert: games
    /// played, the record score with its date, and average accuracy.
    #[must_use]
    pub fn summary(&self) -> String {
        let record = self.best_game().map_or_else(
            || "none yet".to_string(),
            |best| format!("{} ({})", best.score_line(), best.date_label()),
        );
        format!(
            "Games played: {}\nRecord: {record}\nAverage accuracy: {:.2}%",
            self.stats.games_count,
            self.total_accuracy()
        )
    }
}
