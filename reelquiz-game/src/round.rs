//! Round orchestration: questions in, feedback and results out.
//!
//! The round is a pull-based state machine. `answer` locks in feedback
//! for the current question, `proceed` either advances to the next
//! display step or finishes the round. Any presentation delay between
//! the two belongs to the caller.

use chrono::Utc;
use smallvec::SmallVec;

use crate::GameResult;
use crate::constants::QUESTIONS_PER_ROUND;
use crate::question::Question;
use crate::session::GameSession;
use crate::view::QuizStep;

/// Inline storage sized for a standard round.
type QuestionList = SmallVec<[Question; QUESTIONS_PER_ROUND as usize]>;

/// Verdict on a single answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
}

/// What the round hands back from `proceed`.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundPhase {
    /// Another question awaits an answer.
    Question(QuizStep),
    /// The round is over; the result is ready to store.
    Finished(GameResult),
}

/// One quiz round from first question to final result.
#[derive(Debug, Clone)]
pub struct QuizRound {
    questions: QuestionList,
    session: GameSession,
    answered: bool,
    finished: Option<GameResult>,
}

impl QuizRound {
    /// Start a round over the given questions.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let round_size = u32::try_from(questions.len()).unwrap_or(u32::MAX);
        Self {
            questions: QuestionList::from_vec(questions),
            session: GameSession::new(round_size),
            answered: false,
            finished: None,
        }
    }

    /// Number of questions dealt into this round.
    #[must_use]
    pub const fn question_count(&self) -> u32 {
        self.session.round_size()
    }

    /// Whether the round has produced its final result.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// The question currently awaiting an answer. `None` once finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.finished.is_some() {
            return None;
        }
        self.questions.get(self.session.index() as usize)
    }

    /// Display record for the current question. `None` once finished.
    #[must_use]
    pub fn current_step(&self) -> Option<QuizStep> {
        self.current_question()
            .map(|question| QuizStep::for_question(question, self.session.progress_label()))
    }

    /// Record the player's yes/no answer for the current question,
    /// returning whether it was correct.
    ///
    /// Returns `None` when no question is awaiting an answer: the round
    /// already finished, or feedback for the current question is still
    /// pending a `proceed` call. Repeated answers never double-count.
    pub fn answer(&mut self, answer: bool) -> Option<AnswerFeedback> {
        if self.answered || self.finished.is_some() {
            return None;
        }
        let correct_answer = self.current_question()?.correct_answer;
        let correct = self.session.record_answer(answer, correct_answer);
        self.answered = true;
        Some(AnswerFeedback { correct })
    }

    /// Advance past the answered question: the next display step, or the
    /// finished result when the last question was just answered.
    ///
    /// Calling before `answer` re-issues the current step; calling after
    /// the round finished re-issues the result.
    pub fn proceed(&mut self) -> RoundPhase {
        if let Some(result) = &self.finished {
            return RoundPhase::Finished(result.clone());
        }
        if self.answered {
            if self.session.is_last_question() {
                return RoundPhase::Finished(self.finish());
            }
            self.session.advance();
            self.answered = false;
        }
        match self.current_step() {
            Some(step) => RoundPhase::Question(step),
            None => RoundPhase::Finished(self.finish()),
        }
    }

    fn finish(&mut self) -> GameResult {
        let result = self.session.result_at(Utc::now());
        self.finished = Some(result.clone());
        result
    }
}
