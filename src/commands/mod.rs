//! Commands run by the binary

pub mod console;
pub mod restructure;

pub use restructure::{run, RestructureReport, RunCallback, RunEvent};
