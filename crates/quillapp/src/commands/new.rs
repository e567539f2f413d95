use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lock::LockBackend;
use crate::model::ResourceType;
use crate::session::EditSession;
use crate::store::DataStore;

pub fn run<S: DataStore, L: LockBackend>(
    store: &mut S,
    session: &EditSession<L>,
    kind: ResourceType,
) -> Result<CmdResult> {
    let lock = session.create(store, kind)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created {} {}",
        kind, lock.id
    )));
    Ok(result.with_lock(lock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::SessionEnv;
    use crate::lock::LockMode;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn creates_and_locks() {
        let env = SessionEnv::new();
        let mut store = InMemoryStore::new();

        let result = run(&mut store, &env.session, ResourceType::Page).unwrap();
        let lock = result.lock.unwrap();
        assert_eq!(lock.mode, LockMode::New);
        assert_eq!(result.paths, vec![lock.buffer_path.clone()]);
        assert!(result.messages[0].content.contains(lock.id.as_str()));
        assert!(store.read(&lock.id).is_ok());
    }

    #[test]
    fn refuses_when_locked() {
        let env = SessionEnv::new();
        let mut store = InMemoryStore::new();
        run(&mut store, &env.session, ResourceType::Page).unwrap();
        assert!(run(&mut store, &env.session, ResourceType::Note).is_err());
    }
}
