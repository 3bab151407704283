//! Directory scanning and reference indexing

mod index;
mod walker;

pub use index::index_reference;
pub use walker::{scan_tree, ProgressCallback};
