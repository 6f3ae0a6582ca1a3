//! Filtering and ordering of listed entries.
use std::cmp::Ordering;
use std::net::IpAddr;

use crate::config::{ListOptions, SortKey};

use super::entry::HostEntry;
use super::fold;
use super::tags::TagSet;

/// An entry joined with its tags, as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Address text from the hosts file.
    pub ip: String,
    /// Hostname from the hosts file.
    pub hostname: String,
    /// Attached tags in case-insensitive alphabetical order.
    pub tags: Vec<String>,
    /// Trailing comment, if any.
    pub comment: Option<String>,
}

impl Row {
    /// Join `entry` with its tags from `tags`.
    #[must_use]
    pub fn new(entry: HostEntry, tags: &TagSet) -> Self {
        let tags = tags
            .get(&entry.hostname)
            .map(super::tags::HostTags::to_vec)
            .unwrap_or_default();
        Self {
            ip: entry.ip,
            hostname: entry.hostname,
            tags,
            comment: entry.comment,
        }
    }

    fn has_tag(&self, tag: &str) -> bool {
        let wanted = fold(tag.trim());
        self.tags.iter().any(|t| fold(t) == wanted)
    }

    fn first_tag(&self) -> String {
        self.tags.first().map(|t| fold(t)).unwrap_or_default()
    }
}

/// Build the `list` view: join, filter by tag, then sort.
#[must_use]
pub fn rows(entries: Vec<HostEntry>, tags: &TagSet, opts: &ListOptions) -> Vec<Row> {
    if opts.all {
        // Comment-only lines never parse into entries, so there is nothing
        // extra to reveal here.
        tracing::debug!("--all has no effect on comment-only lines");
    }

    let mut rows: Vec<Row> = entries
        .into_iter()
        .map(|entry| Row::new(entry, tags))
        .filter(|row| opts.tag.as_deref().is_none_or(|tag| row.has_tag(tag)))
        .collect();
    sort_rows(&mut rows, opts.sort, opts.desc);
    rows
}

/// Order `rows` by `key` with deterministic tie-breaks, then reverse the
/// whole sequence if `desc` is set. `None` keeps file order.
pub fn sort_rows(rows: &mut [Row], key: Option<SortKey>, desc: bool) {
    match key {
        Some(SortKey::Ip) => rows.sort_by(|a, b| by_ip(a, b).then_with(|| by_name(a, b))),
        Some(SortKey::Name) => rows.sort_by(|a, b| by_name(a, b).then_with(|| by_ip(a, b))),
        Some(SortKey::Tag) => rows.sort_by(|a, b| {
            a.first_tag()
                .cmp(&b.first_tag())
                .then_with(|| by_name(a, b))
                .then_with(|| by_ip(a, b))
        }),
        None => {}
    }
    if desc {
        rows.reverse();
    }
}

fn by_ip(a: &Row, b: &Row) -> Ordering {
    ip_sort_key(&a.ip).cmp(&ip_sort_key(&b.ip))
}

fn by_name(a: &Row, b: &Row) -> Ordering {
    fold(&a.hostname).cmp(&fold(&b.hostname))
}

/// 16-byte comparable form of an address.
///
/// IPv4 addresses are mapped into `::ffff:a.b.c.d` so they order alongside
/// IPv6. Text that is not an address maps to all `0xFF`, sorting last.
#[must_use]
pub fn ip_sort_key(ip: &str) -> [u8; 16] {
    match ip.trim().parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => v4.to_ipv6_mapped().octets(),
        Ok(IpAddr::V6(v6)) => v6.octets(),
        Err(_) => [0xFF; 16],
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn row(ip: &str, hostname: &str, tags: &[&str]) -> Row {
        Row {
            ip: ip.to_string(),
            hostname: hostname.to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            comment: None,
        }
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.hostname.as_str()).collect()
    }

    #[test]
    fn ipv4_maps_into_ipv6_space() {
        let key = ip_sort_key("192.168.0.1");
        assert_eq!(key[..10], [0; 10]);
        assert_eq!(key[10..12], [0xFF, 0xFF]);
        assert_eq!(key[12..], [192, 168, 0, 1]);
    }

    #[test]
    fn unparsable_ip_sorts_last() {
        assert_eq!(ip_sort_key("not-an-ip"), [0xFF; 16]);
        assert!(ip_sort_key("ffff::1") < ip_sort_key("garbage"));
    }

    #[test]
    fn sort_by_ip_orders_numerically_then_bad_text() {
        let mut rows = vec![
            row("bogus", "c", &[]),
            row("192.168.0.1", "b", &[]),
            row("10.0.0.1", "a", &[]),
        ];
        sort_rows(&mut rows, Some(SortKey::Ip), false);
        assert_eq!(names(&rows), vec!["a", "b", "c"]);
    }

    #[test]
    fn sort_by_ip_places_v4_before_global_v6() {
        let mut rows = vec![row("2001:db8::1", "v6", &[]), row("10.0.0.1", "v4", &[])];
        sort_rows(&mut rows, Some(SortKey::Ip), false);
        assert_eq!(names(&rows), vec!["v4", "v6"]);
    }

    #[test]
    fn sort_by_ip_breaks_ties_on_hostname() {
        let mut rows = vec![row("10.0.0.1", "Zeta", &[]), row("10.0.0.1", "alpha", &[])];
        sort_rows(&mut rows, Some(SortKey::Ip), false);
        assert_eq!(names(&rows), vec!["alpha", "Zeta"]);
    }

    #[test]
    fn sort_by_name_ignores_case() {
        let mut rows = vec![
            row("10.0.0.1", "example.org", &[]),
            row("10.0.0.2", "Example.com", &[]),
        ];
        sort_rows(&mut rows, Some(SortKey::Name), false);
        assert_eq!(names(&rows), vec!["Example.com", "example.org"]);
    }

    #[test]
    fn sort_by_name_breaks_ties_on_ip() {
        let mut rows = vec![row("10.0.0.9", "dup", &[]), row("10.0.0.2", "DUP", &[])];
        sort_rows(&mut rows, Some(SortKey::Name), false);
        assert_eq!(rows[0].ip, "10.0.0.2");
    }

    #[test]
    fn sort_by_tag_puts_untagged_first() {
        let mut rows = vec![
            row("10.0.0.1", "web", &["web"]),
            row("10.0.0.2", "plain", &[]),
            row("10.0.0.3", "db", &["Backend", "sql"]),
        ];
        sort_rows(&mut rows, Some(SortKey::Tag), false);
        assert_eq!(names(&rows), vec!["plain", "db", "web"]);
    }

    #[test]
    fn desc_reverses_the_tie_broken_order() {
        let mut asc = vec![
            row("10.0.0.1", "b", &[]),
            row("10.0.0.1", "a", &[]),
            row("9.0.0.1", "c", &[]),
        ];
        let mut desc = asc.clone();
        sort_rows(&mut asc, Some(SortKey::Ip), false);
        sort_rows(&mut desc, Some(SortKey::Ip), true);
        asc.reverse();
        assert_eq!(asc, desc);
        assert_eq!(names(&desc), vec!["b", "a", "c"]);
    }

    #[test]
    fn no_sort_key_keeps_file_order() {
        let mut rows = vec![row("10.0.0.9", "z", &[]), row("10.0.0.1", "a", &[])];
        sort_rows(&mut rows, None, false);
        assert_eq!(names(&rows), vec!["z", "a"]);
    }

    #[test]
    fn rows_filter_by_exact_tag_ignoring_case() {
        let mut tags = TagSet::new();
        tags.entry("web.lan").insert("Web");
        tags.entry("webby.lan").insert("webserver");
        let entries = vec![
            HostEntry::new("10.0.0.1", "web.lan", None),
            HostEntry::new("10.0.0.2", "webby.lan", None),
            HostEntry::new("10.0.0.3", "plain.lan", None),
        ];
        let opts = ListOptions {
            tag: Some("WEB".to_string()),
            ..ListOptions::default()
        };
        let rows = rows(entries, &tags, &opts);
        assert_eq!(names(&rows), vec!["web.lan"]);
        assert_eq!(rows[0].tags, vec!["Web"]);
    }

    #[test]
    fn rows_join_tags_case_insensitively() {
        let mut tags = TagSet::new();
        tags.entry("nas.lan").insert("storage");
        let entries = vec![HostEntry::new("10.0.0.4", "NAS.lan", Some("closet"))];
        let rows = rows(entries, &tags, &ListOptions::default());
        assert_eq!(rows[0].tags, vec!["storage"]);
        assert_eq!(rows[0].comment.as_deref(), Some("closet"));
    }
}
