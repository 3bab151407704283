//! Console presentation: progress bars, message tables, tree rendering

mod messages;
mod progress;
mod tree;

pub use messages::{Language, Messages};
pub use progress::ProgressReporter;
pub use tree::render_tree;
