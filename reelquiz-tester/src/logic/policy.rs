use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use reelquiz_game::{Question, QuizStep};

/// Policy interface for scripted yes/no answering.
pub trait AnswerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick the yes/no answer for the question on screen.
    fn answer(&mut self, question: &Question, step: &QuizStep) -> bool;
}

/// Built-in answer strategies for automated rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnswerStrategy {
    AlwaysYes,
    AlwaysNo,
    Alternating,
    Coin,
    Oracle,
    Contrarian,
}

impl AnswerStrategy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnswerStrategy::AlwaysYes => "Always Yes",
            AnswerStrategy::AlwaysNo => "Always No",
            AnswerStrategy::Alternating => "Alternating",
            AnswerStrategy::Coin => "Coin Flip",
            AnswerStrategy::Oracle => "Oracle",
            AnswerStrategy::Contrarian => "Contrarian",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn AnswerPolicy + Send> {
        match self {
            AnswerStrategy::AlwaysYes => Box::new(FixedPolicy {
                name: "Always Yes",
                answer: true,
            }),
            AnswerStrategy::AlwaysNo => Box::new(FixedPolicy {
                name: "Always No",
                answer: false,
            }),
            AnswerStrategy::Alternating => Box::new(AlternatingPolicy { next: true }),
            AnswerStrategy::Coin => Box::new(CoinPolicy::new(seed)),
            AnswerStrategy::Oracle => Box::new(OraclePolicy),
            AnswerStrategy::Contrarian => Box::new(ContrarianPolicy),
        }
    }
}

impl fmt::Display for AnswerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct FixedPolicy {
    name: &'static str,
    answer: bool,
}

struct AlternatingPolicy {
    next: bool,
}

struct OraclePolicy;
struct ContrarianPolicy;

struct CoinPolicy {
    rng: ChaCha20Rng,
}

impl CoinPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl AnswerPolicy for FixedPolicy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn answer(&mut self, _question: &Question, _step: &QuizStep) -> bool {
        self.answer
    }
}

impl AnswerPolicy for AlternatingPolicy {
    fn name(&self) -> &'static str {
        "Alternating"
    }

    fn answer(&mut self, _question: &Question, _step: &QuizStep) -> bool {
        let current = self.next;
        self.next = !self.next;
        current
    }
}

impl AnswerPolicy for CoinPolicy {
    fn name(&self) -> &'static str {
        "Coin Flip"
    }

    fn answer(&mut self, _question: &Question, _step: &QuizStep) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Reads the ground truth off the question, so every answer lands.
impl AnswerPolicy for OraclePolicy {
    fn name(&self) -> &'static str {
        "Oracle"
    }

    fn answer(&mut self, question: &Question, _step: &QuizStep) -> bool {
        question.correct_answer
    }
}

/// Inverts the ground truth, so every answer misses.
impl AnswerPolicy for ContrarianPolicy {
    fn name(&self) -> &'static str {
        "Contrarian"
    }

    fn answer(&mut self, question: &Question, _step: &QuizStep) -> bool {
        !question.correct_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelquiz_game::Poster;

    fn question(correct_answer: bool) -> Question {
        Question {
            poster: Poster::Asset("poster".to_string()),
            text: "Is the rating of this movie higher than 7?".to_string(),
            correct_answer,
        }
    }

    fn step() -> QuizStep {
        QuizStep {
            poster: Poster::Asset("poster".to_string()),
            question: "Is the rating of this movie higher than 7?".to_string(),
            progress: "1/10".to_string(),
        }
    }

    fn all_strategies() -> Vec<AnswerStrategy> {
        vec![
            AnswerStrategy::AlwaysYes,
            AnswerStrategy::AlwaysNo,
            AnswerStrategy::Alternating,
            AnswerStrategy::Coin,
            AnswerStrategy::Oracle,
            AnswerStrategy::Contrarian,
        ]
    }

    #[test]
    fn oracle_always_matches_the_ground_truth() {
        let mut policy = AnswerStrategy::Oracle.create_policy(1);
        assert!(policy.answer(&question(true), &step()));
        assert!(!policy.answer(&question(false), &step()));
    }

    #[test]
    fn contrarian_always_misses() {
        let mut policy = AnswerStrategy::Contrarian.create_policy(1);
        assert!(!policy.answer(&question(true), &step()));
        assert!(policy.answer(&question(false), &step()));
    }

    #[test]
    fn fixed_policies_never_change_their_answer() {
        let mut yes = AnswerStrategy::AlwaysYes.create_policy(1);
        let mut no = AnswerStrategy::AlwaysNo.create_policy(1);
        for truth in [true, false, true] {
            assert!(yes.answer(&question(truth), &step()));
            assert!(!no.answer(&question(truth), &step()));
        }
    }

    #[test]
    fn alternating_flips_on_every_question() {
        let mut policy = AnswerStrategy::Alternating.create_policy(1);
        let answers: Vec<bool> = (0..4)
            .map(|_| policy.answer(&question(true), &step()))
            .collect();
        assert_eq!(answers, vec![true, false, true, false]);
    }

    #[test]
    fn coin_is_deterministic_per_seed() {
        let flips = |seed: u64| -> Vec<bool> {
            let mut policy = AnswerStrategy::Coin.create_policy(seed);
            (0..20)
                .map(|_| policy.answer(&question(true), &step()))
                .collect()
        };
        assert_eq!(flips(42), flips(42));
        assert_ne!(flips(42), flips(43));
    }

    #[test]
    fn policy_names_match_strategy_labels() {
        for strategy in all_strategies() {
            assert_eq!(strategy.create_policy(7).name(), strategy.label());
            assert_eq!(strategy.to_string(), strategy.label());
        }
    }
}
