use crate::commands::helpers::{resolve, Selector};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lock::LockBackend;
use crate::session::EditSession;
use crate::store::DataStore;

pub fn run<S: DataStore, L: LockBackend>(
    store: &S,
    session: &EditSession<L>,
    selector: &Selector,
) -> Result<CmdResult> {
    let id = resolve(store, selector)?;
    let lock = session.edit(store, &id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Editing {} {}",
        lock.kind, lock.id
    )));
    Ok(result.with_lock(lock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::SessionEnv;
    use crate::lock::LockMode;
    use crate::model::ResourceType;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn edits_by_slug() {
        let env = SessionEnv::new();
        let fixture = StoreFixture::new().with_article("Hello", "hello");

        let selector = Selector::Slug(ResourceType::Article, "hello".into());
        let result = run(&fixture.store, &env.session, &selector).unwrap();
        let lock = result.lock.unwrap();
        assert_eq!(lock.mode, LockMode::Edit);
        assert_eq!(lock.id, fixture.resources[0].id);
    }

    #[test]
    fn unknown_slug_fails_without_lock() {
        let env = SessionEnv::new();
        let fixture = StoreFixture::new();
        let selector = Selector::Slug(ResourceType::Page, "ghost".into());

        assert!(run(&fixture.store, &env.session, &selector).is_err());
        assert!(!env.session.is_locked().unwrap());
    }
}
