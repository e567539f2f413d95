use super::mem_backend::MemBackend;
use super::resource_store::ResourceStore;

pub type InMemoryStore = ResourceStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        ResourceStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::IdError;
    use crate::id::IdGenerator;
    use crate::model::{
        ArticleContent, NoteContent, PageContent, Resource, ResourceContent, ResourceType,
    };
    use crate::store::DataStore;
    use chrono::{DateTime, Utc};

    /// Builds an in-memory store with committed resources. Slugs are indexed
    /// the same way a commit would index them.
    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub ids: IdGenerator,
        /// Resources in insertion order.
        pub resources: Vec<Resource>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                ids: IdGenerator::new(),
                resources: Vec::new(),
            }
        }

        /// A fresh placeholder resource, not yet saved.
        pub fn next_resource(&self, kind: ResourceType) -> Resource {
            let id = loop {
                match self.ids.generate() {
                    Ok(id) => break id,
                    // Random bucket start near the top; wait for the next millisecond.
                    Err(IdError::Overflow) => std::thread::sleep(std::time::Duration::from_millis(1)),
                    Err(e) => panic!("id generation failed: {e}"),
                }
            };
            Resource::new(id, kind, Utc::now())
        }

        fn push(mut self, kind: ResourceType, content: ResourceContent, at: DateTime<Utc>) -> Self {
            let mut resource = self.next_resource(kind);
            resource.created = at;
            resource.updated = at;
            resource.content = content;
            self.store.write(&resource).unwrap();
            if let Some(slug) = resource.content.indexable_slug() {
                self.store.index_slug(kind, slug, &resource.id).unwrap();
            }
            self.resources.push(resource);
            self
        }

        pub fn with_page_at(self, title: &str, slug: &str, at: DateTime<Utc>) -> Self {
            let content = ResourceContent::Page(PageContent {
                title: title.to_string(),
                slug: slug.to_string(),
                text: format!("Content for {}", title),
            });
            self.push(ResourceType::Page, content, at)
        }

        pub fn with_page(self, title: &str, slug: &str) -> Self {
            self.with_page_at(title, slug, Utc::now())
        }

        pub fn with_article(self, title: &str, slug: &str) -> Self {
            let content = ResourceContent::Article(ArticleContent {
                title: title.to_string(),
                tags: vec!["test".to_string()],
                slug: slug.to_string(),
                text: format!("Content for {}", title),
            });
            self.push(ResourceType::Article, content, Utc::now())
        }

        pub fn with_note(self, text: &str) -> Self {
            let content = ResourceContent::Note(NoteContent {
                text: text.to_string(),
            });
            self.push(ResourceType::Note, content, Utc::now())
        }
    }
}
