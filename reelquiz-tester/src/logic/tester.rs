use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::logic::runner::{QuizRunner, RoundSummary, ScenarioPlan};
use crate::logic::scenario::TestScenario;

/// Outcome of one scenario under one seed, as reports consume it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub rounds_run: usize,
    pub successful_rounds: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    runner: QuizRunner,
    verbose: bool,
}

impl LogicTester {
    #[must_use]
    pub const fn new(runner: QuizRunner, verbose: bool) -> Self {
        Self { runner, verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        default_rounds: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (strategy: {} seed: {})",
                    scenario.name.bright_white(),
                    scenario.plan.strategy,
                    seed
                );
            }

            results.push(self.run_single_scenario(scenario, seed, default_rounds));
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        default_rounds: usize,
    ) -> ScenarioResult {
        let rounds = scenario.plan.rounds.unwrap_or(default_rounds).max(1);
        let (successes, failures, performance_data) = self.run_rounds(&scenario.plan, seed, rounds);

        let avg_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            passed: failures.is_empty(),
            rounds_run: rounds,
            successful_rounds: successes,
            failures,
            average_duration: avg_duration,
            performance_data,
        }
    }

    fn run_rounds(
        &self,
        plan: &ScenarioPlan,
        seed: u64,
        rounds: usize,
    ) -> (usize, Vec<String>, Vec<Duration>) {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        let mut run = match self.runner.start_run(plan, seed) {
            Ok(run) => run,
            Err(err) => {
                failures.push(format!("Run setup (seed {seed}): {err:#}"));
                return (successes, failures, performance_data);
            }
        };

        for i in 0..rounds {
            let start_time = Instant::now();

            let summary = match run.play_round() {
                Ok(summary) => summary,
                Err(err) => {
                    failures.push(format!("Round {} of {rounds} (seed {seed}): {err:#}", i + 1));
                    continue;
                }
            };

            if let Some(err) = evaluate_expectations(plan, &summary) {
                let context = summarize_answers(&summary);
                failures.push(format!(
                    "Round {} of {rounds} (strategy {}, seed {}, score {}, games {}, accuracy {:.2}%): {} | {}",
                    i + 1,
                    summary.strategy.label(),
                    summary.seed,
                    summary.result.score_line(),
                    summary.stats.games_count,
                    summary.accuracy,
                    err,
                    context
                ));

                if self.verbose {
                    println!("  ❌ Round {}/{} failed: {}", i + 1, rounds, err.red());
                    println!(
                        "     ↳ Seed {} | Score {} | Games {} | Answers: {}",
                        summary.seed,
                        summary.result.score_line(),
                        summary.stats.games_count,
                        context
                    );
                }
            } else {
                successes += 1;
                let duration = start_time.elapsed();
                performance_data.push(duration);

                if self.verbose {
                    println!(
                        "  ✅ Round {}/{} passed ({duration:?}) score:{} games:{} strategy:{}",
                        i + 1,
                        rounds,
                        summary.result.score_line(),
                        summary.stats.games_count,
                        summary.strategy.label()
                    );
                }
            }
        }

        run.finish();
        (successes, failures, performance_data)
    }
}

fn evaluate_expectations(plan: &ScenarioPlan, summary: &RoundSummary) -> Option<String> {
    for expectation in &plan.expectations {
        if let Err(err) = expectation.evaluate(summary) {
            return Some(err.to_string());
        }
    }
    None
}

fn summarize_answers(summary: &RoundSummary) -> String {
    if summary.answers.is_empty() {
        return "no answers recorded".to_string();
    }

    summary
        .answers
        .iter()
        .enumerate()
        .rev()
        .take(3)
        .map(|(i, record)| {
            let given = if record.answer { "yes" } else { "no" };
            let verdict = if record.was_correct { "hit" } else { "miss" };
            format!("q{} {given} ({verdict})", i + 1)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations
            .iter()
            .map(std::time::Duration::as_millis)
            .collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}
