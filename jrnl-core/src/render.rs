//! Pure org-mode rendering helpers.
//!
//! Day heading: `* Entries for 2019/06/11`
//! Entry block:
//!   ** Title Is Here                                              :tag1:tag2:
//!   <2019/06/11 Tue 15:32>
//!   entry text with @tag1 and @tag2
//!
//! Title and body are written as they are; nothing is escaped.

use chrono::{NaiveDate, NaiveDateTime};

use crate::entry::ParsedEntry;

/// Column the tag cluster is right-aligned to.
pub const TAG_COLUMN: usize = 80;

/// `<2019/06/11 Tue 15:32>`
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %a %H:%M";

const DAY_FORMAT: &str = "%Y/%m/%d";

/// Renders entries as second-level org headlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    pub tag_column: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            tag_column: TAG_COLUMN,
        }
    }
}

impl Renderer {
    pub fn new(tag_column: usize) -> Self {
        Self { tag_column }
    }

    /// Headline, timestamp line and body paragraph of one entry.
    pub fn render(&self, entry: &ParsedEntry) -> String {
        let cluster = format_tag_cluster(&entry.tags);
        let mut out = format_headline(&entry.title, &cluster, self.tag_column);
        out.push_str(&format_timestamp_line(
            entry.resolved_time,
            entry
                .time_resolution_failed
                .then_some(entry.when_expression.as_str()),
        ));
        out.push_str(&entry.body);
        out.push_str("\n\n");
        out
    }
}

/// Renders `entry` with the tag cluster aligned to [`TAG_COLUMN`].
pub fn render_entry(entry: &ParsedEntry) -> String {
    Renderer::default().render(entry)
}

/// `["@a", "@b"]` becomes `:a:b:`; no tags give an empty string.
pub fn format_tag_cluster(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = tags.iter().map(|tag| strip_marker(tag)).collect();
    format!(":{}:", names.join(":"))
}

fn strip_marker(tag: &str) -> &str {
    let mut chars = tag.chars();
    chars.next();
    chars.as_str()
}

/// `** Title` with `cluster` ending on `column`, or one space after the
/// title when there is no room. Ends with a newline.
pub fn format_headline(title: &str, cluster: &str, column: usize) -> String {
    let headline = format!("** {}", title_case(title));
    let headline = headline.trim_end();
    if cluster.is_empty() {
        return format!("{headline}\n");
    }

    let len = headline.chars().count();
    let cluster_len = cluster.chars().count();
    let pad = if len + 1 + cluster_len <= column {
        column - len - cluster_len
    } else {
        1
    };
    format!("{headline}{}{cluster}\n", " ".repeat(pad))
}

/// `<2019/06/11 Tue 15:32>`, followed by ` [* when]` if `unresolved` is set.
pub fn format_timestamp_line(time: NaiveDateTime, unresolved: Option<&str>) -> String {
    let stamp = time.format(TIMESTAMP_FORMAT);
    match unresolved {
        Some(when) => format!("<{stamp}> [* {when}]\n"),
        None => format!("<{stamp}>\n"),
    }
}

/// Upper-cases the first letter of every space separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `* Entries for 2019/06/11`
pub fn format_day_heading(date: NaiveDate) -> String {
    format!("* {}\n", day_heading_marker(date))
}

/// The text looked up in a journal file to find a day's heading.
pub fn day_heading_marker(date: NaiveDate) -> String {
    format!("Entries for {}", date.format(DAY_FORMAT))
}
