use crate::error::{ResourceError, Result};
use crate::id::ResourceId;
use crate::model::ResourceType;
use crate::store::DataStore;
use std::fmt;
use std::str::FromStr;

/// How a command names a resource: by ID, or by `type/slug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(ResourceId),
    Slug(ResourceType, String),
}

impl FromStr for Selector {
    type Err = crate::error::QuillError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((kind, slug)) => {
                let kind: ResourceType = kind.parse()?;
                if !kind.has_slug() {
                    return Err(ResourceError::TypeMismatch(kind).into());
                }
                Ok(Selector::Slug(kind, slug.trim().to_string()))
            }
            None => Ok(Selector::Id(s.parse()?)),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "{}", id),
            Selector::Slug(kind, slug) => write!(f, "{}/{}", kind, slug),
        }
    }
}

/// Resolves a selector to a resource ID. Slug selectors go through the index.
pub fn resolve<S: DataStore>(store: &S, selector: &Selector) -> Result<ResourceId> {
    match selector {
        Selector::Id(id) => Ok(id.clone()),
        Selector::Slug(kind, slug) => store
            .resolve_slug(*kind, slug)?
            .ok_or_else(|| ResourceError::NotFound(selector.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IdError, QuillError};
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn parses_ids_and_slugs() {
        assert_eq!(
            "1HK1P97490AR".parse::<Selector>().unwrap(),
            Selector::Id("1hk1p97490ar".parse().unwrap())
        );
        assert_eq!(
            "article/hello-world".parse::<Selector>().unwrap(),
            Selector::Slug(ResourceType::Article, "hello-world".into())
        );
    }

    #[test]
    fn rejects_bad_selectors() {
        assert!(matches!(
            "note/x".parse::<Selector>(),
            Err(QuillError::Resource(ResourceError::TypeMismatch(ResourceType::Note)))
        ));
        assert!(matches!(
            "post/x".parse::<Selector>(),
            Err(QuillError::Resource(ResourceError::UnknownType(_)))
        ));
        assert!(matches!(
            "short".parse::<Selector>(),
            Err(QuillError::Id(IdError::Malformed(_)))
        ));
    }

    #[test]
    fn resolves_through_slug_index() {
        let fixture = StoreFixture::new().with_page("About", "about");
        let id = fixture.resources[0].id.clone();

        let selector = Selector::Slug(ResourceType::Page, "about".into());
        assert_eq!(resolve(&fixture.store, &selector).unwrap(), id);

        let missing = Selector::Slug(ResourceType::Page, "nope".into());
        assert!(matches!(
            resolve(&fixture.store, &missing),
            Err(QuillError::Resource(ResourceError::NotFound(_)))
        ));
    }
}
