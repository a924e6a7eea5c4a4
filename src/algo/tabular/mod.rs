pub mod q_learning;
pub mod q_table;
pub mod reward_trace;

pub use q_learning::{QLearningAgent, QLearningAgentConfig, Trajectory};
pub use q_table::QTable;
pub use reward_trace::RewardTrace;
