//! Named scenarios: which strategy to run, over which backend, and the
//! invariants every round must satisfy.

use anyhow::Result;
use reelquiz_game::GameResult;

use crate::logic::policy::AnswerStrategy;
use crate::logic::runner::{RoundSummary, STANDARD_ROUND_SIZE, ScenarioPlan, StorageKind};

/// A runnable scenario: the label reports use plus its plan.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub plan: ScenarioPlan,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, plan: ScenarioPlan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }
}

/// Invariants every scenario checks, whatever the strategy.
fn base_plan(strategy: AnswerStrategy) -> ScenarioPlan {
    ScenarioPlan::new(strategy)
        .with_expectation(round_shape_expectation)
        .with_expectation(counters_expectation)
        .with_expectation(persistence_expectation)
        .with_expectation(alert_expectation)
}

fn round_shape_expectation(summary: &RoundSummary) -> Result<()> {
    let wanted = STANDARD_ROUND_SIZE as usize;
    anyhow::ensure!(
        summary.progress_labels.len() == wanted,
        "Round should show {wanted} steps, got {}",
        summary.progress_labels.len()
    );
    for (i, label) in summary.progress_labels.iter().enumerate() {
        let expected = format!("{}/{STANDARD_ROUND_SIZE}", i + 1);
        anyhow::ensure!(
            label == &expected,
            "Step {} should be labeled {expected}, got {label}",
            i + 1
        );
    }
    anyhow::ensure!(
        summary.answers.len() == wanted,
        "Every question should produce feedback, got {} of {wanted}",
        summary.answers.len()
    );
    anyhow::ensure!(
        summary.result.total() == STANDARD_ROUND_SIZE,
        "Result should cover the whole round, got total {}",
        summary.result.total()
    );
    anyhow::ensure!(
        summary.result.correct() <= summary.result.total(),
        "Correct count {} cannot exceed total {}",
        summary.result.correct(),
        summary.result.total()
    );
    Ok(())
}

fn counters_expectation(summary: &RoundSummary) -> Result<()> {
    let rounds = summary.round_index + 1;
    anyhow::ensure!(
        summary.stats.games_count as usize == rounds,
        "Games count should be {rounds} after round {rounds}, got {}",
        summary.stats.games_count
    );
    let history_sum: u32 = summary.history.iter().map(GameResult::correct).sum();
    anyhow::ensure!(
        summary.stats.total_correct_answers == history_sum,
        "Total correct {} should equal the history sum {history_sum}",
        summary.stats.total_correct_answers
    );
    let history_best = summary
        .history
        .iter()
        .map(GameResult::correct)
        .max()
        .unwrap_or(0);
    match &summary.stats.best_game {
        Some(best) => anyhow::ensure!(
            best.correct() == history_best,
            "Best game {} should match the history maximum {history_best}",
            best.correct()
        ),
        None => anyhow::bail!("Best game should exist after a recorded round"),
    }
    Ok(())
}

fn persistence_expectation(summary: &RoundSummary) -> Result<()> {
    anyhow::ensure!(
        summary.reloaded == summary.stats,
        "Reloaded record should match the stored counters: {:?} vs {:?}",
        summary.reloaded,
        summary.stats
    );
    Ok(())
}

fn alert_expectation(summary: &RoundSummary) -> Result<()> {
    anyhow::ensure!(
        summary.alert.title == "Round complete!",
        "Results alert title should announce the round end, got '{}'",
        summary.alert.title
    );
    anyhow::ensure!(
        summary.alert.action_label == "Play again",
        "Results alert should offer a replay, got '{}'",
        summary.alert.action_label
    );
    let score = format!("Your score: {}", summary.result.score_line());
    anyhow::ensure!(
        summary.alert.message.contains(&score),
        "Alert should lead with '{score}', got '{}'",
        summary.alert.message
    );
    let games = format!("Games played: {}", summary.stats.games_count);
    anyhow::ensure!(
        summary.alert.message.contains(&games),
        "Alert should carry the statistics block, missing '{games}'"
    );
    Ok(())
}

fn oracle_scoring_expectation(summary: &RoundSummary) -> Result<()> {
    anyhow::ensure!(
        summary.result.correct() == summary.result.total(),
        "Oracle should score {}, got {}",
        summary.result.total(),
        summary.result.correct()
    );
    anyhow::ensure!(
        summary.answers.iter().all(|record| record.was_correct),
        "Every oracle answer should be marked correct"
    );
    Ok(())
}

fn contrarian_scoring_expectation(summary: &RoundSummary) -> Result<()> {
    anyhow::ensure!(
        summary.result.correct() == 0,
        "Contrarian should score 0, got {}",
        summary.result.correct()
    );
    anyhow::ensure!(
        summary.answers.iter().all(|record| !record.was_correct),
        "No contrarian answer should be marked correct"
    );
    Ok(())
}

/// Oracle rounds all tie at a full score, so the retained best game
/// must stay the first one recorded.
fn best_game_tie_expectation(summary: &RoundSummary) -> Result<()> {
    let Some(best) = &summary.stats.best_game else {
        anyhow::bail!("Best game should exist after a recorded round");
    };
    let Some(first) = summary.history.first() else {
        anyhow::bail!("History should hold the recorded rounds");
    };
    anyhow::ensure!(
        best.date() == first.date(),
        "A tied best game should keep the first result ({}), got {}",
        first.date_label(),
        best.date_label()
    );
    Ok(())
}

fn accuracy_expectation(summary: &RoundSummary) -> Result<()> {
    let answered = f64::from(summary.stats.games_count) * f64::from(STANDARD_ROUND_SIZE);
    let expected = f64::from(summary.stats.total_correct_answers) / answered * 100.0;
    anyhow::ensure!(
        (summary.accuracy - expected).abs() < 1e-9,
        "Accuracy {} should equal {expected}",
        summary.accuracy
    );
    anyhow::ensure!(
        (0.0..=100.0).contains(&summary.accuracy),
        "Accuracy {} should stay within 0..=100",
        summary.accuracy
    );
    anyhow::ensure!(
        summary.summary_block.contains("Average accuracy:"),
        "Summary block should report the average accuracy"
    );
    Ok(())
}

fn smoke_scenario() -> TestScenario {
    TestScenario::new(
        "Smoke Test",
        base_plan(AnswerStrategy::Alternating).with_rounds(1),
    )
}

fn round_sequencing_scenario() -> TestScenario {
    TestScenario::new("Round Sequencing", base_plan(AnswerStrategy::AlwaysYes))
}

fn oracle_scenario() -> TestScenario {
    TestScenario::new(
        "Oracle Scoring",
        base_plan(AnswerStrategy::Oracle).with_expectation(oracle_scoring_expectation),
    )
}

fn contrarian_scenario() -> TestScenario {
    TestScenario::new(
        "Contrarian Scoring",
        base_plan(AnswerStrategy::Contrarian).with_expectation(contrarian_scoring_expectation),
    )
}

fn persistence_scenario() -> TestScenario {
    TestScenario::new(
        "Stats Persistence",
        base_plan(AnswerStrategy::Coin).with_storage(StorageKind::TempFile),
    )
}

fn best_game_tie_scenario() -> TestScenario {
    TestScenario::new(
        "Best Game Tie",
        base_plan(AnswerStrategy::Oracle)
            .with_rounds(3)
            .with_expectation(best_game_tie_expectation),
    )
}

fn accuracy_scenario() -> TestScenario {
    TestScenario::new(
        "Accuracy Average",
        base_plan(AnswerStrategy::Coin).with_expectation(accuracy_expectation),
    )
}

fn strategy_scenario(name: &'static str, strategy: AnswerStrategy) -> TestScenario {
    TestScenario::new(name, base_plan(strategy))
}

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(smoke_scenario()),
        "round-sequencing" | "sequencing" => Some(round_sequencing_scenario()),
        "oracle-scoring" | "oracle" => Some(oracle_scenario()),
        "contrarian-scoring" | "contrarian" => Some(contrarian_scenario()),
        "stats-persistence" | "persistence" => Some(persistence_scenario()),
        "best-game-tie" | "tie" => Some(best_game_tie_scenario()),
        "accuracy-average" | "accuracy" => Some(accuracy_scenario()),
        "always-yes" => Some(strategy_scenario(
            "Always Yes Strategy",
            AnswerStrategy::AlwaysYes,
        )),
        "always-no" => Some(strategy_scenario(
            "Always No Strategy",
            AnswerStrategy::AlwaysNo,
        )),
        "alternating" => Some(strategy_scenario(
            "Alternating Strategy",
            AnswerStrategy::Alternating,
        )),
        "coin-flip" | "coin" => Some(strategy_scenario(
            "Coin Flip Strategy",
            AnswerStrategy::Coin,
        )),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("round-sequencing", "Round Sequencing"),
        ("oracle-scoring", "Oracle Scoring"),
        ("contrarian-scoring", "Contrarian Scoring"),
        ("stats-persistence", "Stats Persistence"),
        ("best-game-tie", "Best Game Tie"),
        ("accuracy-average", "Accuracy Average"),
        ("always-yes", "Always Yes Strategy"),
        ("always-no", "Always No Strategy"),
        ("alternating", "Alternating Strategy"),
        ("coin-flip", "Coin Flip Strategy"),
    ]
}
