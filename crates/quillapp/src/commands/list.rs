use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ResourceType;
use crate::store::DataStore;

/// Lists resources newest first, optionally of one type.
pub fn run<S: DataStore>(store: &S, kind: Option<ResourceType>) -> Result<CmdResult> {
    let resources = match kind {
        Some(kind) => store.list_by_type(kind)?,
        None => store.list_all()?,
    };

    let mut result = CmdResult::default();
    if resources.is_empty() {
        result.add_message(CmdMessage::info(match kind {
            Some(kind) => format!("No {} resources", kind),
            None => "No resources".to_string(),
        }));
    }
    Ok(result.with_listed(resources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn lists_all_or_by_type() {
        let fixture = StoreFixture::new()
            .with_page("About", "about")
            .with_article("Hello", "hello")
            .with_article("World", "world");

        assert_eq!(run(&fixture.store, None).unwrap().listed.len(), 3);
        let articles = run(&fixture.store, Some(ResourceType::Article)).unwrap();
        assert_eq!(articles.listed.len(), 2);
        assert!(articles.messages.is_empty());
    }

    #[test]
    fn empty_store_says_so() {
        let store = InMemoryStore::new();
        let result = run(&store, Some(ResourceType::Note)).unwrap();
        assert_eq!(result.messages[0].content, "No note resources");
    }
}
