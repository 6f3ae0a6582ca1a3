//! Typed per-command options.
//!
//! The CLI layer fills these from parsed arguments; the repository and view
//! code only ever sees these structures.
use crate::error::HostsError;

/// Ordering applied by `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// By address, IPv4 mapped into IPv6 space; ties by hostname.
    Ip,
    /// By hostname ignoring case; ties by address.
    Name,
    /// By first tag; ties by hostname, then address.
    Tag,
}

impl SortKey {
    /// Parse a `--sort` value. Unknown values yield `None` (file order).
    #[must_use]
    pub fn from_arg(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ip" => Some(Self::Ip),
            "name" => Some(Self::Name),
            "tag" => Some(Self::Tag),
            _ => None,
        }
    }
}

/// Options for `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Keep only rows carrying this tag.
    pub tag: Option<String>,
    /// Include disabled (commented-out) lines.
    pub all: bool,
    /// Sort order; `None` keeps file order.
    pub sort: Option<SortKey>,
    /// Reverse the final order.
    pub desc: bool,
}

/// A single `+tag` / `-tag` edit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOp {
    /// Attach a tag.
    Add(String),
    /// Detach a tag.
    Remove(String),
}

impl TagOp {
    /// Parse a comma-separated op list such as `"+web,-old,db"`.
    ///
    /// Bare tags are additions. Blank tokens are skipped.
    #[must_use]
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter_map(|token| match token.strip_prefix('-') {
                Some(tag) => non_blank(Some(tag)).map(Self::Remove),
                None => non_blank(Some(token.strip_prefix('+').unwrap_or(token))).map(Self::Add),
            })
            .collect()
    }
}

/// Validated arguments for `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    /// Address written for every hostname.
    pub ip: String,
    /// One new line is appended per hostname.
    pub hostnames: Vec<String>,
    /// Tags attached to every new hostname.
    pub tags: Vec<String>,
    /// Optional comment written on every new line.
    pub comment: Option<String>,
}

impl AddRequest {
    /// Build a request, trimming inputs and rejecting missing `ip` / hostnames.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::MissingOption`] if `ip` is blank or no non-blank
    /// hostname is given.
    pub fn new(
        ip: Option<&str>,
        hostnames: &[String],
        tags: &[String],
        comment: Option<&str>,
    ) -> Result<Self, HostsError> {
        let ip = ip
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .ok_or(HostsError::MissingOption("ip"))?;
        let hostnames = split_list(hostnames);
        if hostnames.is_empty() {
            return Err(HostsError::MissingOption("host"));
        }
        Ok(Self {
            ip: ip.to_string(),
            hostnames,
            tags: split_list(tags),
            comment: comment
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from),
        })
    }
}

/// Validated arguments for `edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    /// Hostname of the line to edit.
    pub host: String,
    /// Replacement address.
    pub ip: Option<String>,
    /// Replacement hostname.
    pub rename: Option<String>,
    /// Tag changes applied under the resulting hostname.
    pub tag_ops: Vec<TagOp>,
}

impl EditRequest {
    /// Build a request from raw options.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::MissingOption`] if `host` is blank, or
    /// [`HostsError::NothingToEdit`] if no change was requested.
    pub fn new(
        host: Option<&str>,
        ip: Option<&str>,
        rename: Option<&str>,
        tags: Option<&str>,
    ) -> Result<Self, HostsError> {
        let host = non_blank(host).ok_or(HostsError::MissingOption("host"))?;
        let request = Self {
            host,
            ip: non_blank(ip),
            rename: non_blank(rename),
            tag_ops: tags.map(TagOp::parse_list).unwrap_or_default(),
        };
        if request.ip.is_none() && request.rename.is_none() && tags.is_none() {
            return Err(HostsError::NothingToEdit);
        }
        Ok(request)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Flatten possibly comma-joined values into trimmed, non-blank items.
fn split_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}
