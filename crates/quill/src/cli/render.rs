//! # Rendering Module
//!
//! Turns `CmdResult` pieces into terminal text. Nothing here prints; handlers
//! in `commands.rs` write the returned strings to stdout.
//!
//! ## List Layout
//!
//! One row per resource:
//! - `id` (12 chars)
//! - `type` (7 chars)
//! - `label` (fill): title or first line of text, truncated to fit
//! - `time_ago` (right-aligned): relative update time
//!
//! Widths are measured with `unicode-width`, so wide characters in titles
//! don't push the time column out of line.

use chrono::{DateTime, Utc};
use colored::Colorize;
use quillapp::commands::{CmdMessage, MessageLevel};
use quillapp::model::{Resource, ResourceContent};
use serde::Serialize;
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;

pub const COL_ID: usize = 12;
pub const COL_TYPE: usize = 7;
pub const COL_TIME: usize = 16;
const GAP: usize = 2;

const ELLIPSIS: char = '…';

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for msg in messages {
        let line = match msg.level {
            MessageLevel::Info => msg.content.normal(),
            MessageLevel::Success => msg.content.green(),
            MessageLevel::Warning => msg.content.yellow(),
            MessageLevel::Error => msg.content.red().bold(),
        };
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

pub fn render_list(resources: &[Resource], now: DateTime<Utc>) -> String {
    let label_width =
        LINE_WIDTH.saturating_sub(COL_ID + COL_TYPE + COL_TIME + GAP * 3);

    let mut out = String::new();
    for resource in resources {
        let label = truncate_to_width(&resource.label(), label_width);
        let pad = label_width.saturating_sub(label.width());
        out.push_str(&format!(
            "{}{:gap$}{:<type_w$}{:gap$}{}{:pad$}{:gap$}{}\n",
            resource.id.as_str().dimmed(),
            "",
            resource.kind().as_str(),
            "",
            label,
            "",
            "",
            format!("{:>w$}", format_time_ago(resource.updated, now), w = COL_TIME).dimmed(),
            gap = GAP,
            type_w = COL_TYPE,
            pad = pad,
        ));
    }
    out
}

/// Full view of one resource: a header block, then the text.
pub fn render_resource(resource: &Resource, record_path: Option<&Path>) -> String {
    let mut out = String::new();
    let mut field = |name: &str, value: &str| {
        out.push_str(&format!("{} {}\n", format!("{:<8}", format!("{}:", name)).dimmed(), value));
    };

    field("id", resource.id.as_str());
    field("type", resource.kind().as_str());
    match &resource.content {
        ResourceContent::Page(page) => {
            field("title", &page.title);
            field("slug", &page.slug);
        }
        ResourceContent::Article(article) => {
            field("title", &article.title);
            field("tags", &article.tags.join(", "));
            field("slug", &article.slug);
        }
        ResourceContent::Note(_) => {}
    }
    field("created", &resource.created.to_rfc3339());
    field("updated", &resource.updated.to_rfc3339());
    if let Some(public) = resource.is_public {
        field("public", if public { "yes" } else { "no" });
    }
    if let Some(path) = record_path {
        field("record", &path.display().to_string());
    }

    out.push('\n');
    out.push_str(resource.content.text());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value).map(|mut s| {
        s.push('\n');
        s
    })
}

/// Cuts `s` to at most `width` columns, ending in an ellipsis when cut.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now
        .signed_duration_since(timestamp)
        .to_std()
        .unwrap_or_default();
    let mut formatter = timeago::Formatter::new();
    formatter.num_items(1);
    formatter.convert(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quillapp::model::{ArticleContent, ResourceType};

    fn article(title: &str, minutes_ago: i64) -> Resource {
        let now = Utc::now();
        let mut resource = Resource::new(
            "1hk1p97490ar".parse().unwrap(),
            ResourceType::Article,
            now - Duration::minutes(minutes_ago),
        );
        resource.content = ResourceContent::Article(ArticleContent {
            title: title.to_string(),
            tags: vec!["rust".into(), "cli".into()],
            slug: "hello".into(),
            text: "Body text".into(),
        });
        resource
    }

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each of these takes two columns.
        let cut = truncate_to_width("日本語のタイトル", 7);
        assert_eq!(cut, "日本語…");
        assert!(cut.width() <= 7);
    }

    #[test]
    fn test_list_row_contains_fields() {
        let out = render_list(&[article("Hello", 5)], Utc::now());
        assert!(out.contains("1hk1p97490ar"));
        assert!(out.contains("article"));
        assert!(out.contains("Hello"));
        assert!(out.contains("5 minutes ago"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_list_empty() {
        assert_eq!(render_list(&[], Utc::now()), "");
    }

    #[test]
    fn test_resource_view() {
        let out = render_resource(&article("Hello", 0), Some(Path::new("/data/r.json")));
        assert!(out.contains("Hello"));
        assert!(out.contains("rust, cli"));
        assert!(out.contains("/data/r.json"));
        assert!(out.ends_with("Body text\n"));
    }

    #[test]
    fn test_messages_one_per_line() {
        let out = render_messages(&[
            CmdMessage::success("Committed"),
            CmdMessage::warning("Careful"),
        ]);
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("Committed"));
        assert!(out.contains("Careful"));
    }

    #[test]
    fn test_json_is_record_shaped() {
        let out = render_json(&[article("Hello", 0)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["type"], "article");
        assert_eq!(value[0]["content"]["title"], "Hello");
    }
}
