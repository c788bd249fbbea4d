pub mod prompt;
pub mod progress;

pub use prompt::ConfirmPrompt;
pub use progress::BatchProgressDisplay;
