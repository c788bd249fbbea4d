pub mod batch;
pub mod planner;
pub mod runner;

pub use batch::{BatchExecutor, BatchResult, TaskResult};
pub use planner::{EncodePlan, EncodePlanner, EncodeTask};
pub use runner::CommandRunner;
