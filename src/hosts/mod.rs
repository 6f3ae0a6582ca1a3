//! Hosts file entry model, tag metadata and the list view.
//!
//! - [`entry`]: one line → [`HostEntry`]
//! - [`tags`]: hostname → tag set, stored as JSON beside the hosts file
//! - [`backup`]: timestamped copy taken before every write
//! - [`repository`]: add / edit / remove with tags kept in step
//! - [`view`]: tag filter and sort orders for `list`
//! - [`table`]: fixed-width rendering of the view

pub mod backup;
pub mod entry;
pub mod repository;
pub mod table;
pub mod tags;
pub mod view;

pub use entry::HostEntry;
pub use repository::{AddOutcome, EditOutcome, HostsRepository, RemoveOutcome};
pub use tags::{HostTags, TagSet, TagStore};
pub use view::Row;

/// Case-folded form used as the comparison key for hostnames and tags.
pub(crate) fn fold(value: &str) -> String {
    value.to_lowercase()
}
