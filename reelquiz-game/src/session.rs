use chrono::{DateTime, Utc};

use crate::GameResult;

/// Tracks position and score within a single quiz round.
///
/// The session holds no questions; it only sequences indices and tallies
/// correct answers. Round orchestration owns the pairing of sessions with
/// question lists and guards the advance-past-the-end case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    round_size: u32,
    index: u32,
    correct: u32,
}

impl GameSession {
    /// Start a session for a round of `round_size` questions.
    #[must_use]
    pub const fn new(round_size: u32) -> Self {
        Self {
            round_size,
            index: 0,
            correct: 0,
        }
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Correct answers recorded so far.
    #[must_use]
    pub const fn correct(&self) -> u32 {
        self.correct
    }

    /// Number of questions in a full round.
    #[must_use]
    pub const fn round_size(&self) -> u32 {
        self.round_size
    }

    /// Whether the current question is the round's last.
    #[must_use]
    pub const fn is_last_question(&self) -> bool {
        self.index + 1 == self.round_size
    }

    /// Move to the next question. Callers check `is_last_question` first;
    /// advancing past the end is their bug to guard.
    pub const fn advance(&mut self) {
        self.index += 1;
    }

    /// Reset position and tally for a fresh round.
    pub const fn reset(&mut self) {
        self.index = 0;
        self.correct = 0;
    }

    /// Record the player's answer against the question's truth, returning
    /// whether they matched. The tally moves only on a match.
    pub const fn record_answer(&mut self, answer: bool, correct_answer: bool) -> bool {
        let matched = answer == correct_answer;
        if matched {
            self.correct += 1;
        }
        matched
    }

    /// Progress label for the current question, counted from one.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.round_size)
    }

    /// Snapshot the tally as an immutable result stamped with `date`.
    #[must_use]
    pub fn result_at(&self, date: DateTime<Utc>) -> GameResult {
        GameResult::new(self.correct, self.round_size, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn last_question_is_reached_after_nine_advances() {
        let mut session = GameSession::new(10);
        assert!(!session.is_last_question());
        for _ in 0..9 {
            session.advance();
        }
        assert_eq!(session.index(), 9);
        assert!(session.is_last_question());
    }

    #[test]
    fn matching_answer_increments_and_reports_true() {
        let mut session = GameSession::new(10);
        assert!(session.record_answer(true, true));
        assert_eq!(session.correct(), 1);
        assert!(session.record_answer(false, false));
        assert_eq!(session.correct(), 2);
    }

    #[test]
    fn mismatched_answer_reports_false_without_increment() {
        let mut session = GameSession::new(10);
        assert!(!session.record_answer(false, true));
        assert!(!session.record_answer(true, false));
        assert_eq!(session.correct(), 0);
    }

    #[test]
    fn reset_clears_position_and_tally() {
        let mut session = GameSession::new(10);
        session.record_answer(true, true);
        session.advance();
        session.advance();
        session.reset();
        assert_eq!(session.index(), 0);
        assert_eq!(session.correct(), 0);
        assert!(!session.is_last_question());
    }

    #[test]
    fn progress_label_counts_from_one() {
        let mut session = GameSession::new(10);
        assert_eq!(session.progress_label(), "1/10");
        session.advance();
        assert_eq!(session.progress_label(), "2/10");
    }

    #[test]
    fn result_snapshot_carries_tally_and_round_size() {
        let mut session = GameSession::new(10);
        session.record_answer(true, true);
        session.record_answer(true, true);
        let date = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let result = session.result_at(date);
        assert_eq!(result.correct(), 2);
        assert_eq!(result.total(), 10);
        assert_eq!(result.date(), date);
    }
}
