//! Hosts file line parsing.
//!
//! A hosts line is `IP HOSTNAME [ALIAS...] [# COMMENT]`. Only the first two
//! tokens are modelled; aliases are dropped on read and never re-emitted.

/// A single `(ip, hostname, comment)` triple parsed from one hosts line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// Address text as written in the file. Not validated.
    pub ip: String,
    /// First name following the address.
    pub hostname: String,
    /// Trailing comment text without the leading `#`.
    pub comment: Option<String>,
}

impl HostEntry {
    /// Create an entry from its parts. Blank comments become `None`.
    #[must_use]
    pub fn new(ip: impl Into<String>, hostname: impl Into<String>, comment: Option<&str>) -> Self {
        Self {
            ip: ip.into(),
            hostname: hostname.into(),
            comment: comment
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from),
        }
    }

    /// Parse one raw hosts line.
    ///
    /// Returns `None` for blank lines, comment-only lines and lines with
    /// fewer than two tokens before the comment.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (tokens, comment) = match line.split_once('#') {
            Some((tokens, comment)) => (tokens.trim(), Some(comment.trim())),
            None => (line, None),
        };
        if tokens.is_empty() {
            return None;
        }

        let mut parts = tokens.split_whitespace();
        let ip = parts.next()?;
        let hostname = parts.next()?;
        Some(Self::new(ip, hostname, comment))
    }

    /// Render the entry back to a hosts line.
    ///
    /// ```
    /// use hostsmgr_cli::hosts::HostEntry;
    ///
    /// let entry = HostEntry::new("10.0.0.5", "test.local", Some("dev box"));
    /// assert_eq!(entry.to_line(), "10.0.0.5 test.local  # dev box");
    /// ```
    #[must_use]
    pub fn to_line(&self) -> String {
        match &self.comment {
            Some(comment) => format!("{} {}  # {comment}", self.ip, self.hostname),
            None => format!("{} {}", self.ip, self.hostname),
        }
    }

    /// Case-insensitive hostname comparison.
    #[must_use]
    pub fn matches(&self, hostname: &str) -> bool {
        super::fold(&self.hostname) == super::fold(hostname)
    }
}
