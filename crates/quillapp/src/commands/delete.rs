use crate::commands::helpers::{resolve, Selector};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LockError, QuillError, Result};
use crate::lock::LockBackend;
use crate::session::EditSession;
use crate::store::DataStore;

/// Deletes a resource. The resource under edit cannot be deleted.
pub fn run<S: DataStore, L: LockBackend>(
    store: &mut S,
    session: &EditSession<L>,
    selector: &Selector,
) -> Result<CmdResult> {
    let id = resolve(store, selector)?;

    match session.read() {
        Ok(lock) if lock.id == id => {
            return Err(QuillError::Api(format!(
                "{} is being edited; commit or discard first",
                id
            )));
        }
        Ok(_) | Err(QuillError::Lock(LockError::Missing)) => {}
        // A corrupted lock might name this resource.
        Err(e) => return Err(e),
    }

    let resource = store.delete(&id)?;
    let mut result = CmdResult::default();
    let label = resource.label();
    result.add_message(CmdMessage::success(if label.is_empty() {
        format!("Deleted {} {}", resource.kind(), id)
    } else {
        format!("Deleted {} {}: {}", resource.kind(), id, label)
    }));
    Ok(result.with_affected(vec![resource]))
}
