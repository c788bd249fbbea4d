pub mod plan;
pub mod sweep;

pub use plan::{print_json, print_list};
pub use sweep::execute_sweep;
