//! Tag metadata attached to hostnames, persisted beside the hosts file.
//!
//! Hostnames and tags are matched case-insensitively. Each map is keyed by
//! the folded form and remembers the casing most recently written, which is
//! what ends up in the JSON file.
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::TagStoreError;

use super::fold;

/// The set of tags attached to one hostname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostTags {
    hostname: String,
    tags: BTreeMap<String, String>,
}

impl HostTags {
    fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            tags: BTreeMap::new(),
        }
    }

    /// Hostname in the casing last written.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Add a tag. Returns `false` if an equal tag (ignoring case) was present,
    /// in which case the stored casing is kept, or the tag is blank.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        match self.tags.entry(fold(tag)) {
            Entry::Vacant(slot) => {
                slot.insert(tag.to_string());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Remove a tag, ignoring case. Returns `true` if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.tags.remove(&fold(tag.trim())).is_some()
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains_key(&fold(tag.trim()))
    }

    /// Add every tag of `other` to this set.
    pub fn extend_from(&mut self, other: &Self) {
        for (key, tag) in &other.tags {
            self.tags.entry(key.clone()).or_insert_with(|| tag.clone());
        }
    }

    /// Tags in case-insensitive alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.values().map(String::as_str)
    }

    /// Owned, sorted copy of the tags.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.tags.values().cloned().collect()
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// `true` if no tags are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Mapping of hostname → [`HostTags`] for every tagged host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    hosts: BTreeMap<String, HostTags>,
}

impl TagSet {
    /// Create an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags for `hostname`, if any were ever attached.
    #[must_use]
    pub fn get(&self, hostname: &str) -> Option<&HostTags> {
        self.hosts.get(&fold(hostname))
    }

    /// Fetch the tags for `hostname`, creating an empty set if absent.
    ///
    /// The stored hostname takes the casing passed here.
    pub fn entry(&mut self, hostname: &str) -> &mut HostTags {
        let tags = self
            .hosts
            .entry(fold(hostname))
            .or_insert_with(|| HostTags::new(hostname));
        hostname.clone_into(&mut tags.hostname);
        tags
    }

    /// Drop the tags for `hostname`. Returns the removed set, if any.
    pub fn remove(&mut self, hostname: &str) -> Option<HostTags> {
        self.hosts.remove(&fold(hostname))
    }

    /// Move the tags of `old` onto `new`, merging with whatever `new` already
    /// carries.
    ///
    /// When both names fold to the same key only the stored casing changes.
    /// Returns `true` if the set changed.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if fold(old) == fold(new) {
            return match self.hosts.get_mut(&fold(old)) {
                Some(tags) if tags.hostname != new => {
                    new.clone_into(&mut tags.hostname);
                    true
                }
                _ => false,
            };
        }
        let Some(previous) = self.remove(old) else {
            return false;
        };
        self.entry(new).extend_from(&previous);
        true
    }

    /// Every tagged host, ordered by folded hostname.
    pub fn iter(&self) -> impl Iterator<Item = &HostTags> {
        self.hosts.values()
    }

    /// Number of hostnames carrying a tag set (possibly empty).
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// `true` if no hostname has tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    fn from_document(doc: BTreeMap<String, Vec<String>>) -> Self {
        let mut set = Self::new();
        for (hostname, tags) in doc {
            let entry = set.entry(&hostname);
            for tag in &tags {
                entry.insert(tag);
            }
        }
        set
    }

    fn to_document(&self) -> BTreeMap<String, Vec<String>> {
        self.hosts
            .values()
            .filter(|tags| !tags.is_empty())
            .map(|tags| (tags.hostname.clone(), tags.to_vec()))
            .collect()
    }
}

/// Reads and writes the JSON tag file.
#[derive(Debug, Clone)]
pub struct TagStore {
    path: PathBuf,
}

impl TagStore {
    /// Create a store backed by `path`. Nothing is read until [`load`](Self::load).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the tag file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the tag set. A missing file yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`TagStoreError::Io`] if the file exists but cannot be read,
    /// or [`TagStoreError::Format`] if it is not a hostname → tag list map.
    pub fn load(&self) -> Result<TagSet, TagStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Tag store not found, starting empty");
                return Ok(TagSet::new());
            }
            Err(source) => {
                return Err(TagStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if content.trim().is_empty() {
            return Ok(TagSet::new());
        }

        let doc: BTreeMap<String, Vec<String>> =
            serde_json::from_str(&content).map_err(|source| TagStoreError::Format {
                path: self.path.clone(),
                source,
            })?;
        let set = TagSet::from_document(doc);
        tracing::debug!(path = %self.path.display(), hosts = set.len(), "Loaded tag store");
        Ok(set)
    }

    /// Overwrite the tag file with `set`, pretty-printed with sorted tags.
    ///
    /// # Errors
    ///
    /// Returns [`TagStoreError::Io`] if the file cannot be written.
    pub fn save(&self, set: &TagSet) -> Result<(), TagStoreError> {
        let io_err = |source| TagStoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut json = serde_json::to_string_pretty(&set.to_document()).map_err(|source| {
            TagStoreError::Format {
                path: self.path.clone(),
                source,
            }
        })?;
        json.push('\n');
        fs::write(&self.path, json).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), hosts = set.len(), "Saved tag store");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_case_insensitive_sets() {
        let mut set = TagSet::new();
        let tags = set.entry("web.local");
        assert!(tags.insert("Web"));
        assert!(!tags.insert("web"));
        assert!(!tags.insert("  "));
        assert!(tags.contains("WEB"));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.to_vec(), vec!["Web"]);
    }

    #[test]
    fn tags_iterate_alphabetically_ignoring_case() {
        let mut set = TagSet::new();
        let tags = set.entry("a");
        for t in ["web", "Dev", "alpha"] {
            tags.insert(t);
        }
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["alpha", "Dev", "web"]);
    }

    #[test]
    fn hostname_lookup_ignores_case_and_keeps_latest_casing() {
        let mut set = TagSet::new();
        set.entry("Host.Local").insert("x");
        set.entry("host.local").insert("y");
        assert_eq!(set.len(), 1);
        let tags = set.get("HOST.LOCAL").unwrap();
        assert_eq!(tags.hostname(), "host.local");
        assert_eq!(tags.to_vec(), vec!["x", "y"]);
    }

    #[test]
    fn rename_merges_into_existing_target() {
        let mut set = TagSet::new();
        set.entry("old").insert("a");
        set.entry("old").insert("shared");
        set.entry("new").insert("b");
        set.entry("new").insert("Shared");

        assert!(set.rename("old", "new"));
        assert!(set.get("old").is_none());
        let merged = set.get("new").unwrap();
        assert_eq!(merged.to_vec(), vec!["a", "b", "Shared"]);
    }

    #[test]
    fn rename_case_only_updates_casing() {
        let mut set = TagSet::new();
        set.entry("host").insert("a");
        assert!(set.rename("host", "HOST"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("host").unwrap().hostname(), "HOST");
        assert!(!set.rename("HOST", "HOST"));
    }

    #[test]
    fn rename_without_tags_is_noop() {
        let mut set = TagSet::new();
        assert!(!set.rename("old", "new"));
        assert!(set.is_empty());
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TagStore::new(dir.path().join("tags.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_merges_keys_differing_by_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.json");
        fs::write(&path, r#"{"A.lan": ["x"], "a.lan": ["X", "y"]}"#).unwrap();
        let set = TagStore::new(&path).load().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a.LAN").unwrap().len(), 2);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.json");
        fs::write(&path, "[1, 2").unwrap();
        let err = TagStore::new(&path).load().unwrap_err();
        assert!(matches!(err, TagStoreError::Format { .. }));
    }

    #[test]
    fn save_writes_sorted_pretty_json_and_skips_empty_sets() {
        let dir = tempfile::tempdir().unwrap();
        let store = TagStore::new(dir.path().join("nested").join("tags.json"));
        let mut set = TagSet::new();
        set.entry("web.local").insert("web");
        set.entry("web.local").insert("dev");
        set.entry("empty.local");

        store.save(&set).unwrap();
        let json = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            json,
            "{\n  \"web.local\": [\n    \"dev\",\n    \"web\"\n  ]\n}\n"
        );
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get("web.local").unwrap().contains("DEV"));
    }
}
