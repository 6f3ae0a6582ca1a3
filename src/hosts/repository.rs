//! Add, edit and remove hosts entries while keeping tag metadata in step.
//!
//! Every mutation follows the same pipeline: read the whole hosts file,
//! validate against the parsed entries, snapshot the file, rewrite it, and
//! finally persist the tag store. The two files are updated independently;
//! a failure after the hosts write leaves the tags of that one operation
//! stale.
use std::collections::HashSet;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use crate::config::{AddRequest, EditRequest, TagOp};
use crate::error::HostsError;

use super::backup;
use super::entry::HostEntry;
use super::fold;
use super::tags::{TagSet, TagStore};

/// Result of a successful `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Lines appended, in order.
    pub added: Vec<HostEntry>,
    /// Snapshot taken before the write.
    pub backup: PathBuf,
}

/// Result of a successful `edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The line as it was.
    pub before: HostEntry,
    /// The line as written.
    pub after: HostEntry,
    /// Snapshot taken before the write.
    pub backup: PathBuf,
}

/// Result of a successful `remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// The deleted entry.
    pub removed: HostEntry,
    /// Whether a tag set was dropped along with it.
    pub tags_removed: bool,
    /// Snapshot taken before the write.
    pub backup: PathBuf,
}

/// The raw lines of a hosts file plus the line ending it used.
#[derive(Debug)]
struct HostsFile {
    lines: Vec<String>,
    newline: &'static str,
}

impl HostsFile {
    fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(String::from).collect(),
            newline: if content.contains("\r\n") { "\r\n" } else { "\n" },
        }
    }

    fn entries(&self) -> impl Iterator<Item = HostEntry> + '_ {
        self.lines.iter().filter_map(|line| HostEntry::parse(line))
    }

    /// Index of the first line whose hostname matches `host`, ignoring case.
    fn find(&self, host: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| HostEntry::parse(line).is_some_and(|e| e.matches(host)))
    }

    /// Locate `host` and parse its line.
    fn lookup(&self, host: &str) -> Result<(usize, HostEntry), HostsError> {
        let index = self
            .find(host)
            .ok_or_else(|| HostsError::HostNotFound(host.to_string()))?;
        let line = self.lines.get(index).map_or("", String::as_str);
        let entry =
            HostEntry::parse(line).ok_or_else(|| HostsError::UnparsableLine(line.to_string()))?;
        Ok((index, entry))
    }

    fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join(self.newline);
        out.push_str(self.newline);
        out
    }
}

/// Entry-level access to one hosts file and its tag store.
#[derive(Debug, Clone)]
pub struct HostsRepository {
    hosts_path: PathBuf,
    tag_store: TagStore,
}

impl HostsRepository {
    /// Create a repository over `hosts_path` with tags kept at `tags_path`.
    #[must_use]
    pub fn new(hosts_path: impl Into<PathBuf>, tags_path: impl Into<PathBuf>) -> Self {
        Self {
            hosts_path: hosts_path.into(),
            tag_store: TagStore::new(tags_path),
        }
    }

    /// Path of the hosts file.
    #[must_use]
    pub fn hosts_path(&self) -> &Path {
        &self.hosts_path
    }

    /// The tag store beside the hosts file.
    #[must_use]
    pub const fn tag_store(&self) -> &TagStore {
        &self.tag_store
    }

    /// Every parseable entry in file order.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if the hosts file cannot be read.
    pub fn entries(&self) -> Result<Vec<HostEntry>, HostsError> {
        Ok(self.read()?.entries().collect())
    }

    /// Load the tag set.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Tags`] if the tag store is unreadable.
    pub fn tags(&self) -> Result<TagSet, HostsError> {
        Ok(self.tag_store.load()?)
    }

    /// Append one line per requested hostname and tag each of them.
    ///
    /// Nothing is written if any hostname already exists (ignoring case) or
    /// appears twice in the request.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::HostExists`] on a conflict, or an I/O, backup
    /// or tag store error.
    pub fn add(&self, request: &AddRequest) -> Result<AddOutcome, HostsError> {
        let mut file = self.read()?;
        let existing: Vec<HostEntry> = file.entries().collect();
        let mut batch = HashSet::new();
        for hostname in &request.hostnames {
            if existing.iter().any(|e| e.matches(hostname)) || !batch.insert(fold(hostname)) {
                return Err(HostsError::HostExists(hostname.clone()));
            }
        }
        warn_if_not_ip(&request.ip);

        let mut tags = if request.tags.is_empty() {
            None
        } else {
            Some(self.tag_store.load()?)
        };

        let added: Vec<HostEntry> = request
            .hostnames
            .iter()
            .map(|hostname| HostEntry::new(&request.ip, hostname, request.comment.as_deref()))
            .collect();
        file.lines.extend(added.iter().map(HostEntry::to_line));
        let backup = self.write(&file)?;

        if let Some(set) = tags.as_mut() {
            for entry in &added {
                let host_tags = set.entry(&entry.hostname);
                for tag in &request.tags {
                    host_tags.insert(tag);
                }
            }
            self.tag_store.save(set)?;
        }

        tracing::info!(
            ip = %request.ip,
            hosts = added.len(),
            tags = request.tags.len(),
            "Added hosts entries"
        );
        Ok(AddOutcome { added, backup })
    }

    /// Rewrite the first line matching `request.host` in place.
    ///
    /// The comment is kept verbatim. Tag operations apply under the resulting
    /// hostname; on rename the old hostname's tags are then merged in, so a
    /// rename never loses a tag.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::HostNotFound`] if no line matches, or an I/O,
    /// backup or tag store error.
    pub fn edit(&self, request: &EditRequest) -> Result<EditOutcome, HostsError> {
        let mut file = self.read()?;
        let (index, before) = file.lookup(&request.host)?;

        let after = HostEntry {
            ip: request.ip.clone().unwrap_or_else(|| before.ip.clone()),
            hostname: request
                .rename
                .clone()
                .unwrap_or_else(|| before.hostname.clone()),
            comment: before.comment.clone(),
        };
        if request.ip.is_some() {
            warn_if_not_ip(&after.ip);
        }
        let renamed = after.hostname != before.hostname;

        let mut tags = if renamed || !request.tag_ops.is_empty() {
            Some(self.tag_store.load()?)
        } else {
            None
        };

        if let Some(line) = file.lines.get_mut(index) {
            *line = after.to_line();
        }
        let backup = self.write(&file)?;

        if let Some(set) = tags.as_mut() {
            let tagged = !request.tag_ops.is_empty();
            if tagged {
                apply_tag_ops(set, &after.hostname, &request.tag_ops);
            }
            let merged = renamed && set.rename(&before.hostname, &after.hostname);
            if tagged || merged {
                self.tag_store.save(set)?;
            }
        }

        tracing::info!(
            host = %before.hostname,
            ip = %after.ip,
            hostname = %after.hostname,
            "Edited hosts entry"
        );
        Ok(EditOutcome {
            before,
            after,
            backup,
        })
    }

    /// Delete the first line matching `host` and drop its tags.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::HostNotFound`] if no line matches, or an I/O,
    /// backup or tag store error.
    pub fn remove(&self, host: &str) -> Result<RemoveOutcome, HostsError> {
        let mut file = self.read()?;
        let (index, removed) = file.lookup(host)?;
        let mut tags = self.tag_store.load()?;

        file.lines.remove(index);
        let backup = self.write(&file)?;

        let tags_removed = tags.remove(&removed.hostname).is_some();
        if tags_removed {
            self.tag_store.save(&tags)?;
        }

        tracing::info!(host = %removed.hostname, tags_removed, "Removed hosts entry");
        Ok(RemoveOutcome {
            removed,
            tags_removed,
            backup,
        })
    }

    /// Snapshot the hosts file without modifying it.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Backup`] if the snapshot fails.
    pub fn backup(&self) -> Result<PathBuf, HostsError> {
        Ok(backup::snapshot(&self.hosts_path)?)
    }

    fn read(&self) -> Result<HostsFile, HostsError> {
        let content = fs::read_to_string(&self.hosts_path).map_err(|source| HostsError::Io {
            action: "read",
            path: self.hosts_path.clone(),
            source,
        })?;
        Ok(HostsFile::parse(&content))
    }

    /// Snapshot, then overwrite the hosts file with `file`.
    fn write(&self, file: &HostsFile) -> Result<PathBuf, HostsError> {
        let backup = backup::snapshot(&self.hosts_path)?;
        fs::write(&self.hosts_path, file.render()).map_err(|source| HostsError::Io {
            action: "write",
            path: self.hosts_path.clone(),
            source,
        })?;
        tracing::debug!(
            path = %self.hosts_path.display(),
            lines = file.lines.len(),
            "Wrote hosts file"
        );
        Ok(backup)
    }
}

fn apply_tag_ops(set: &mut TagSet, hostname: &str, ops: &[TagOp]) {
    let tags = set.entry(hostname);
    for op in ops {
        match op {
            TagOp::Add(tag) => {
                tags.insert(tag);
            }
            TagOp::Remove(tag) => {
                tags.remove(tag);
            }
        }
    }
}

fn warn_if_not_ip(ip: &str) {
    if ip.parse::<IpAddr>().is_err() {
        tracing::warn!(ip = %ip, "Address does not look like an IPv4 or IPv6 address");
    }
}
