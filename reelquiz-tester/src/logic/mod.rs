pub mod policy;
pub mod reports;
pub mod runner;
pub mod scenario;
pub mod seeds;
pub mod tester;

pub use policy::{AnswerPolicy, AnswerStrategy};
pub use runner::{QuizRunner, RoundSummary, ScenarioPlan, StorageKind};
pub use seeds::resolve_seed_inputs;
pub use tester::*;
