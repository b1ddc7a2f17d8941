pub mod config;
pub mod eval;
pub mod evaluator;
pub mod minimax;
pub mod random;

pub use config::AIConfig;
pub use eval::MaterialEvaluator;
pub use evaluator::Evaluator;
pub use minimax::{minimax, AIStrength, MinimaxAI, SearchContext};
pub use random::RandomAI;
