//! # Domain Model
//!
//! A [`Resource`] is a typed content record. The `type` field decides which
//! content fields exist, so content is a sum type ([`ResourceContent`]) rather
//! than a loose bag of optional fields:
//!
//! | type      | fields                         | slug |
//! |-----------|--------------------------------|------|
//! | `page`    | title, slug, text              | yes  |
//! | `article` | title, tags, slug, text        | yes  |
//! | `note`    | text                           | no   |
//!
//! ## Persisted Shape
//!
//! ```json
//! {
//!   "id": "1hk1p97490ar",
//!   "type": "article",
//!   "created": "2024-01-01T10:00:00Z",
//!   "updated": "2024-01-01T10:00:00Z",
//!   "content": { "title": "Test", "tags": [], "slug": "test", "text": "Hello" }
//! }
//! ```
//!
//! Older exports used `created_date` / `updated_date` / `is_public` and stored
//! tags as one comma-separated string. Both are accepted on read.
//!
//! ## Placeholders
//!
//! A freshly created resource carries [`PLACEHOLDER`] as title and slug so the
//! author sees the keys in the editor. The placeholder never reaches the slug
//! index.

use crate::error::ResourceError;
use crate::id::ResourceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stand-in value for fields the author has not filled in yet.
pub const PLACEHOLDER: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Page,
    Article,
    Note,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [ResourceType::Page, ResourceType::Article, ResourceType::Note];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Page => "page",
            ResourceType::Article => "article",
            ResourceType::Note => "note",
        }
    }

    /// Whether resources of this type carry a slug (and take part in the
    /// slug-uniqueness check).
    pub fn has_slug(&self) -> bool {
        !matches!(self, ResourceType::Note)
    }

    /// Types that own a slug index.
    pub fn slugged() -> impl Iterator<Item = ResourceType> {
        Self::ALL.into_iter().filter(|kind| kind.has_slug())
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "page" => Ok(ResourceType::Page),
            "article" => Ok(ResourceType::Article),
            // "ephemera" is the old name for notes.
            "note" | "ephemera" => Ok(ResourceType::Note),
            other => Err(ResourceError::UnknownType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub title: String,
    #[serde(default, deserialize_with = "tags_from_list_or_string")]
    pub tags: Vec<String>,
    pub slug: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContent {
    #[serde(default)]
    pub text: String,
}

/// Serializes as the bare content object; the resource type travels next to
/// it in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResourceContent {
    Page(PageContent),
    Article(ArticleContent),
    Note(NoteContent),
}

impl ResourceContent {
    /// Placeholder content for a resource that has just been created.
    pub fn placeholder(kind: ResourceType) -> Self {
        match kind {
            ResourceType::Page => ResourceContent::Page(PageContent {
                title: PLACEHOLDER.to_string(),
                slug: PLACEHOLDER.to_string(),
                text: String::new(),
            }),
            ResourceType::Article => ResourceContent::Article(ArticleContent {
                title: PLACEHOLDER.to_string(),
                tags: Vec::new(),
                slug: PLACEHOLDER.to_string(),
                text: String::new(),
            }),
            ResourceType::Note => ResourceContent::Note(NoteContent {
                text: String::new(),
            }),
        }
    }

    pub fn kind(&self) -> ResourceType {
        match self {
            ResourceContent::Page(_) => ResourceType::Page,
            ResourceContent::Article(_) => ResourceType::Article,
            ResourceContent::Note(_) => ResourceType::Note,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ResourceContent::Page(c) => &c.text,
            ResourceContent::Article(c) => &c.text,
            ResourceContent::Note(c) => &c.text,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ResourceContent::Page(c) => Some(&c.title),
            ResourceContent::Article(c) => Some(&c.title),
            ResourceContent::Note(_) => None,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            ResourceContent::Page(c) => Some(&c.slug),
            ResourceContent::Article(c) => Some(&c.slug),
            ResourceContent::Note(_) => None,
        }
    }

    /// The slug, if it is a real one (not empty, not the placeholder).
    pub fn indexable_slug(&self) -> Option<&str> {
        self.slug()
            .filter(|slug| !slug.is_empty() && *slug != PLACEHOLDER)
    }

    fn from_value(kind: ResourceType, value: serde_json::Value) -> serde_json::Result<Self> {
        // Some exports stored content as an embedded JSON string.
        let value = match value {
            serde_json::Value::String(raw) => serde_json::from_str(&raw)?,
            other => other,
        };
        Ok(match kind {
            ResourceType::Page => ResourceContent::Page(serde_json::from_value(value)?),
            ResourceType::Article => ResourceContent::Article(serde_json::from_value(value)?),
            ResourceType::Note => ResourceContent::Note(serde_json::from_value(value)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ResourceRepr")]
pub struct Resource {
    pub id: ResourceId,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub is_public: Option<bool>,
    pub content: ResourceContent,
}

impl Resource {
    /// A new resource with placeholder content, stamped `now`.
    pub fn new(id: ResourceId, kind: ResourceType, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created: now,
            updated: now,
            is_public: None,
            content: ResourceContent::placeholder(kind),
        }
    }

    pub fn kind(&self) -> ResourceType {
        self.content.kind()
    }

    /// Short human label: the title if there is a real one, else the first
    /// line of text.
    pub fn label(&self) -> String {
        match self.content.title() {
            Some(title) if !title.is_empty() && title != PLACEHOLDER => title.to_string(),
            _ => self
                .content
                .text()
                .lines()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("")
                .trim()
                .to_string(),
        }
    }
}

/// Wire representation of [`Resource`] as read from disk.
#[derive(Deserialize)]
struct ResourceRepr {
    id: ResourceId,
    #[serde(rename = "type")]
    kind: ResourceType,
    #[serde(alias = "created_date")]
    created: DateTime<Utc>,
    #[serde(alias = "updated_date")]
    updated: DateTime<Utc>,
    #[serde(
        rename = "isPublic",
        alias = "is_public",
        default,
        deserialize_with = "flag_from_bool_or_int"
    )]
    is_public: Option<bool>,
    content: serde_json::Value,
}

/// Wire representation of [`Resource`] as written.
#[derive(Serialize)]
struct ResourceReprRef<'a> {
    id: &'a ResourceId,
    #[serde(rename = "type")]
    kind: ResourceType,
    created: &'a DateTime<Utc>,
    updated: &'a DateTime<Utc>,
    #[serde(rename = "isPublic", skip_serializing_if = "Option::is_none")]
    is_public: Option<bool>,
    content: &'a ResourceContent,
}

impl Serialize for Resource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResourceReprRef {
            id: &self.id,
            kind: self.kind(),
            created: &self.created,
            updated: &self.updated,
            is_public: self.is_public,
            content: &self.content,
        }
        .serialize(serializer)
    }
}

impl TryFrom<ResourceRepr> for Resource {
    type Error = serde_json::Error;

    fn try_from(repr: ResourceRepr) -> Result<Self, Self::Error> {
        Ok(Resource {
            id: repr.id,
            created: repr.created,
            updated: repr.updated,
            is_public: repr.is_public,
            content: ResourceContent::from_value(repr.kind, repr.content)?,
        })
    }
}

/// Splits a comma-separated tag string, dropping blanks and placeholders.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != PLACEHOLDER)
        .map(str::to_string)
        .collect()
}

fn tags_from_list_or_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::List(tags)) => tags,
        Some(Tags::Joined(raw)) => split_tags(&raw),
        None => Vec::new(),
    })
}

fn flag_from_bool_or_int<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_id() -> ResourceId {
        "1hk1p97490ar".parse().unwrap()
    }

    #[test]
    fn placeholder_content_per_type() {
        let page = ResourceContent::placeholder(ResourceType::Page);
        assert_eq!(page.title(), Some(PLACEHOLDER));
        assert_eq!(page.slug(), Some(PLACEHOLDER));
        assert_eq!(page.indexable_slug(), None);

        let note = ResourceContent::placeholder(ResourceType::Note);
        assert_eq!(note.slug(), None);
        assert_eq!(note.kind(), ResourceType::Note);
    }

    #[test]
    fn parses_type_names() {
        assert_eq!("Article".parse::<ResourceType>().unwrap(), ResourceType::Article);
        assert_eq!("ephemera".parse::<ResourceType>().unwrap(), ResourceType::Note);
        assert!(matches!(
            "post".parse::<ResourceType>(),
            Err(ResourceError::UnknownType(_))
        ));
    }

    #[test]
    fn only_notes_lack_slugs() {
        let slugged: Vec<_> = ResourceType::slugged().collect();
        assert_eq!(slugged, vec![ResourceType::Page, ResourceType::Article]);
    }

    #[test]
    fn serializes_type_tag_and_content() {
        let mut resource = Resource::new(sample_id(), ResourceType::Article, Utc::now());
        if let ResourceContent::Article(c) = &mut resource.content {
            c.title = "Test".into();
            c.slug = "test".into();
            c.tags = vec!["rust".into()];
            c.text = "Hello".into();
        }

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["type"], "article");
        assert_eq!(value["content"]["slug"], "test");
        assert_eq!(value["content"]["tags"][0], "rust");
        assert!(value.get("isPublic").is_none());

        let back: Resource = serde_json::from_value(value).unwrap();
        assert_eq!(back, resource);
    }

    #[test]
    fn content_is_written_inline_for_every_type() {
        for kind in ResourceType::ALL {
            let resource = Resource::new(sample_id(), kind, Utc::now());
            let value = serde_json::to_value(&resource).unwrap();
            assert!(value["content"].is_object(), "{kind}: {value}");
            assert_eq!(value["content"]["text"], "");
        }
    }

    #[test]
    fn write_errors_propagate() {
        struct FullDisk;
        impl std::io::Write for FullDisk {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let resource = Resource::new(sample_id(), ResourceType::Page, Utc::now());
        assert!(serde_json::to_writer(FullDisk, &resource).is_err());
    }

    #[test]
    fn reads_legacy_field_names() {
        let json = r#"{
            "id": "1hk1p97490ar",
            "type": "article",
            "created_date": "2023-05-01T12:00:00Z",
            "updated_date": "2023-05-02T12:00:00Z",
            "is_public": 1,
            "content": "{\"title\":\"Old\",\"tags\":\"a, b\",\"slug\":\"old\",\"text\":\"x\"}"
        }"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.is_public, Some(true));
        match resource.content {
            ResourceContent::Article(c) => {
                assert_eq!(c.title, "Old");
                assert_eq!(c.tags, vec!["a", "b"]);
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn content_must_match_type() {
        let json = r#"{
            "id": "1hk1p97490ar",
            "type": "page",
            "created": "2023-05-01T12:00:00Z",
            "updated": "2023-05-01T12:00:00Z",
            "content": { "text": "missing title and slug" }
        }"#;
        assert!(serde_json::from_str::<Resource>(json).is_err());
    }

    #[test]
    fn label_prefers_real_title() {
        let mut resource = Resource::new(sample_id(), ResourceType::Page, Utc::now());
        assert_eq!(resource.label(), "");
        if let ResourceContent::Page(c) = &mut resource.content {
            c.text = "\n  first line\nsecond".into();
        }
        assert_eq!(resource.label(), "first line");
        if let ResourceContent::Page(c) = &mut resource.content {
            c.title = "About".into();
        }
        assert_eq!(resource.label(), "About");
    }
}
