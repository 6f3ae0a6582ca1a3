//! Fixed-width text table for `list`.
use std::fmt::Write as _;

use super::view::Row;

/// Width of the IP column.
pub const IP_WIDTH: usize = 14;
/// Width of the HOSTNAME column.
pub const HOSTNAME_WIDTH: usize = 27;
/// Width of the TAGS column.
pub const TAGS_WIDTH: usize = 19;
/// Width of the COMMENT separator. The column itself is unbounded.
pub const COMMENT_RULE_WIDTH: usize = 27;

/// Marker appended to values cut to fit their column.
pub const TRUNCATION_MARKER: char = '…';

/// Pad `value` to `width` characters, or cut it to `width - 1` characters
/// followed by [`TRUNCATION_MARKER`].
#[must_use]
pub fn fit(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len <= width {
        let mut out = value.to_string();
        out.extend(std::iter::repeat_n(' ', width - len));
        out
    } else {
        let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
        out.push(TRUNCATION_MARKER);
        out
    }
}

/// Render `rows` as a header, a dashed separator and one line per row.
///
/// Columns are separated by a single space; trailing whitespace is trimmed.
#[must_use]
pub fn render(rows: &[Row]) -> String {
    let mut out = String::new();
    push_line(&mut out, "IP", "HOSTNAME", "TAGS", "COMMENT");
    let _ = writeln!(
        out,
        "{} {} {} {}",
        "-".repeat(IP_WIDTH),
        "-".repeat(HOSTNAME_WIDTH),
        "-".repeat(TAGS_WIDTH),
        "-".repeat(COMMENT_RULE_WIDTH),
    );
    for row in rows {
        push_line(
            &mut out,
            &row.ip,
            &row.hostname,
            &row.tags.join(","),
            row.comment.as_deref().unwrap_or_default(),
        );
    }
    out
}

fn push_line(out: &mut String, ip: &str, hostname: &str, tags: &str, comment: &str) {
    let line = format!(
        "{} {} {} {comment}",
        fit(ip, IP_WIDTH),
        fit(hostname, HOSTNAME_WIDTH),
        fit(tags, TAGS_WIDTH),
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_short_values() {
        assert_eq!(fit("abc", 6), "abc   ");
        assert_eq!(fit("abcdef", 6), "abcdef");
    }

    #[test]
    fn fit_truncates_with_marker() {
        let hostname = "a".repeat(30);
        let cell = fit(&hostname, HOSTNAME_WIDTH);
        assert_eq!(cell.chars().count(), 27);
        assert!(cell.starts_with(&"a".repeat(26)));
        assert!(cell.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn fit_counts_characters_not_bytes() {
        assert_eq!(fit("ünï", 4), "ünï ");
        assert_eq!(fit("ééééé", 3), "éé…");
    }

    #[test]
    fn render_empty_has_header_and_rule() {
        let out = render(&[]);
        assert_eq!(out.lines().count(), 2);
        assert!(out.starts_with("IP "));
        assert!(out.lines().nth(1).unwrap().chars().all(|c| c == '-' || c == ' '));
    }

    #[test]
    fn render_table_layout() {
        let rows = vec![
            Row {
                ip: "10.0.0.5".to_string(),
                hostname: "test.local".to_string(),
                tags: vec!["dev".to_string(), "web".to_string()],
                comment: None,
            },
            Row {
                ip: "fe80::1234:5678:9abc".to_string(),
                hostname: "a-very-long-hostname-for-the-lab.local".to_string(),
                tags: ["alpha", "beta", "gamma", "delta"]
                    .iter()
                    .map(|t| (*t).to_string())
                    .collect(),
                comment: Some("rack 4".to_string()),
            },
        ];
        insta::assert_snapshot!(render(&rows).trim_end(), @r"
        IP             HOSTNAME                    TAGS                COMMENT
        -------------- --------------------------- ------------------- ---------------------------
        10.0.0.5       test.local                  dev,web
        fe80::1234:56… a-very-long-hostname-for-t… alpha,beta,gamma,d… rack 4
        ");
    }
}
