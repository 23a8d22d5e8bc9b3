//! Display records handed to the presentation layer.
//!
//! The core never renders; it emits these records and the presentation
//! layer decides what a poster, a label, or a modal looks like.

use serde::{Deserialize, Serialize};

use crate::GameResult;
use crate::question::{Poster, Question};

/// Everything the presentation layer needs to show one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizStep {
    pub poster: Poster,
    pub question: String,
    pub progress: String,
}

impl QuizStep {
    pub(crate) fn for_question(question: &Question, progress: String) -> Self {
        Self {
            poster: question.poster.clone(),
            question: question.text.clone(),
            progress,
        }
    }
}

/// Modal alert record: a title, a body, and a single action label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAlert {
    pub title: String,
    pub message: String,
    pub action_label: String,
}

impl QuizAlert {
    /// Round-results alert combining the player's score with the
    /// cumulative statistics block.
    #[must_use]
    pub fn round_results(result: &GameResult, stats_summary: &str) -> Self {
        Self {
            title: "Round complete!".to_string(),
            message: format!("Your score: {}\n{stats_summary}", result.score_line()),
            action_label: "Play again".to_string(),
        }
    }

    /// Alert shown when questions or posters cannot be loaded. The core
    /// never retries; the action re-requests the round.
    #[must_use]
    pub fn load_failed(message: impl Into<String>) -> Self {
        Self {
            title: "Something went wrong".to_string(),
            message: message.into(),
            action_label: "Try again".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn round_results_alert_composes_score_and_summary() {
        let result = GameResult::new(
            8,
            10,
            Utc.with_ymd_and_hms(2026, 8, 25, 20, 5, 0).unwrap(),
        );
        let alert = QuizAlert::round_results(&result, "Games played: 4");
        assert_eq!(alert.title, "Round complete!");
        assert_eq!(alert.message, "Your score: 8/10\nGames played: 4");
        assert_eq!(alert.action_label, "Play again");
    }

    #[test]
    fn load_failed_alert_offers_a_retry() {
        let alert = QuizAlert::load_failed("movie data unavailable: catalog offline");
        assert_eq!(alert.title, "Something went wrong");
        assert!(alert.message.contains("catalog offline"));
        assert_eq!(alert.action_label, "Try again");
    }

    #[test]
    fn step_copies_question_text_poster_and_progress() {
        let question = Question {
            poster: Poster::Asset("Tesla".to_string()),
            text: "Is the rating of this movie higher than 6?".to_string(),
            correct_answer: false,
        };
        let step = QuizStep::for_question(&question, "3/10".to_string());
        assert_eq!(step.poster, Poster::Asset("Tesla".to_string()));
        assert_eq!(step.question, question.text);
        assert_eq!(step.progress, "3/10");
    }
}
