//! # Edit Buffers
//!
//! The scratch file handed to the editor holds a resource's editable fields:
//!
//! ```text
//! ---
//! title: My Article
//! tags:
//! - rust
//! slug: my-article
//! ---
//!
//! Body text goes here.
//! ```
//!
//! Front matter is YAML between two `---` marker lines. Notes have no titled
//! fields, so their buffer is the bare text and is never scanned for markers.
//!
//! Values equal to the placeholder (`.`) are read as absent, which is what a
//! freshly created resource shows until the author fills it in.

use crate::error::Result;
use crate::model::{
    split_tags, ArticleContent, NoteContent, PageContent, ResourceContent, ResourceType,
    PLACEHOLDER,
};
use crate::slug::slugify;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

const MARKER: &str = "---";

/// Parsed front matter. Every field is optional; absent and placeholder values
/// are both `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub kind: ResourceType,
    pub front_matter: FrontMatter,
    pub body: String,
}

#[derive(Serialize)]
struct RenderedFrontMatter<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
    slug: &'a str,
}

/// Renders the editable fields of `content` into buffer text.
pub fn render(content: &ResourceContent) -> Result<String> {
    let front = match content {
        ResourceContent::Page(c) => RenderedFrontMatter {
            title: &c.title,
            tags: None,
            slug: &c.slug,
        },
        ResourceContent::Article(c) => RenderedFrontMatter {
            title: &c.title,
            tags: Some(&c.tags),
            slug: &c.slug,
        },
        ResourceContent::Note(c) => return Ok(c.text.clone()),
    };

    let yaml = serde_yaml::to_string(&front)?;
    Ok(format!("{MARKER}\n{yaml}{MARKER}\n\n{}", content.text()))
}

/// Parses buffer text written for a resource of type `kind`.
pub fn parse(raw: &str, kind: ResourceType) -> Result<EditBuffer> {
    if !kind.has_slug() {
        return Ok(EditBuffer {
            kind,
            front_matter: FrontMatter::default(),
            body: clean_body(raw),
        });
    }

    let (front_matter, body) = match split_front_matter(raw) {
        Some((yaml, body)) => (parse_front_matter(yaml)?, body),
        None => (FrontMatter::default(), raw),
    };

    Ok(EditBuffer {
        kind,
        front_matter,
        body: clean_body(body),
    })
}

impl EditBuffer {
    /// Builds the committed content. The slug comes from the front matter when
    /// given, else from the title.
    pub fn into_content(self, slug_limit: usize) -> ResourceContent {
        let FrontMatter { title, slug, tags } = self.front_matter;
        let title = title.unwrap_or_default();
        let slug = slug.unwrap_or_else(|| slugify(&title, slug_limit));

        match self.kind {
            ResourceType::Page => ResourceContent::Page(PageContent {
                title,
                slug,
                text: self.body,
            }),
            ResourceType::Article => ResourceContent::Article(ArticleContent {
                title,
                tags: tags.unwrap_or_default(),
                slug,
                text: self.body,
            }),
            ResourceType::Note => ResourceContent::Note(NoteContent { text: self.body }),
        }
    }
}

/// Splits `---` delimited front matter from the body. Returns `None` when the
/// buffer does not open with a marker line or the block is never closed.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.trim_start_matches('\u{feff}');
    let first_end = rest.find('\n')?;
    if rest[..first_end].trim_end() != MARKER {
        return None;
    }

    let after_open = &rest[first_end + 1..];
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == MARKER {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    warn!("Front matter block is not closed; treating the whole buffer as body");
    None
}

fn parse_front_matter(yaml: &str) -> Result<FrontMatter> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let map: Mapping = serde_yaml::from_str(yaml)?;
    let mut front = FrontMatter::default();
    for (key, value) in map {
        let Some(key) = key.as_str() else { continue };
        match key {
            "title" => front.title = scalar(&value),
            "slug" => front.slug = scalar(&value),
            "tags" => front.tags = tag_list(&value),
            other => debug!(key = other, "Ignoring unknown front matter key"),
        }
    }
    Ok(front)
}

/// A scalar as text, with placeholder and empty values read as absent.
fn scalar(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty() && text != PLACEHOLDER).then_some(text)
}

fn tag_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Sequence(items) => Some(items.iter().filter_map(scalar).collect()),
        Value::String(raw) => Some(split_tags(raw)),
        _ => None,
    }
}

fn clean_body(body: &str) -> String {
    body.trim_start_matches(['\r', '\n']).trim_end().to_string()
}
