//! Completed-round results and best-game comparison
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::BEST_GAME_DATE_FORMAT;

/// Outcome of one completed quiz round.
///
/// Immutable once constructed; the constructor clamps `correct` into
/// `0..=total` so every value ever built satisfies the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    correct: u32,
    total: u32,
    date: DateTime<Utc>,
}

impl GameResult {
    /// Build a result for a round of `total` questions completed at `date`.
    #[must_use]
    pub fn new(correct: u32, total: u32, date: DateTime<Utc>) -> Self {
        Self {
            correct: correct.min(total),
            total,
            date,
        }
    }

    /// Correct answers scored in the round.
    #[must_use]
    pub const fn correct(&self) -> u32 {
        self.correct
    }

    /// Questions asked in the round.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Completion timestamp.
    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Whether this result beats `other`.
    ///
    /// Strictly more correct answers wins; a tie keeps the older result.
    #[must_use]
    pub const fn is_better_than(&self, other: &Self) -> bool {
        self.correct > other.correct
    }

    /// Score rendered as `correct/total`.
    #[must_use]
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.correct, self.total)
    }

    /// Completion date rendered for the statistics summary (dd.mm.yy HH:MM).
    #[must_use]
    pub fn date_label(&self) -> String {
        self.date.format(BEST_GAME_DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 25, hour, 0, 0).unwrap()
    }

    #[test]
    fn strictly_more_correct_answers_is_better() {
        let nine = GameResult::new(9, 10, at(10));
        let seven = GameResult::new(7, 10, at(11));
        assert!(nine.is_better_than(&seven));
        assert!(!seven.is_better_than(&nine));
    }

    #[test]
    fn tie_is_not_better() {
        let first = GameResult::new(7, 10, at(10));
        let second = GameResult::new(7, 10, at(12));
        assert!(!second.is_better_than(&first));
        assert!(!first.is_better_than(&second));
    }

    #[test]
    fn constructor_clamps_correct_to_total() {
        let clamped = GameResult::new(15, 10, at(9));
        assert_eq!(clamped.correct(), 10);
        assert_eq!(clamped.total(), 10);
        assert_eq!(clamped.score_line(), "10/10");
    }

    #[test]
    fn date_label_uses_short_day_month_year_format() {
        let result = GameResult::new(8, 10, at(14));
        assert_eq!(result.date_label(), "25.08.26 14:00");
    }

    #[test]
    fn results_round_trip_through_json() {
        let result = GameResult::new(6, 10, at(8));
        let json = serde_json::to_string(&result).unwrap();
        let back: GameResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
