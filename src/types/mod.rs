//! Core type definitions for restructure

mod action;
mod entry;
mod error;
mod path;

pub use action::{CollisionPolicy, CopyAction, Placement};
pub use entry::{ReferenceEntry, SourceEntry};
pub use error::{DirRole, RestructureError};
pub use path::RelativePath;
