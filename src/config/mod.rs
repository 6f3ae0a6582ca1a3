//! Typed configuration: per-command options and resolved settings.

pub mod options;
pub mod settings;

pub use options::{AddRequest, EditRequest, ListOptions, SortKey, TagOp};
pub use settings::{Overrides, Settings};
