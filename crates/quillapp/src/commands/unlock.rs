use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LockError, QuillError, Result};
use crate::lock::LockBackend;
use crate::session::EditSession;

pub fn run<L: LockBackend>(session: &EditSession<L>) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match session.force_clear() {
        Ok(Some(lock)) => {
            result.add_message(CmdMessage::success(format!(
                "Cleared lock on {} {}; unsaved buffer changes are gone",
                lock.kind, lock.id
            )));
            result.lock = Some(lock);
        }
        Ok(None) => {
            result.add_message(CmdMessage::success("Cleared corrupted lock file"));
            result.add_message(CmdMessage::warning(
                "Its scratch directory could not be identified and was left in place",
            ));
        }
        Err(QuillError::Lock(LockError::Missing)) => {
            result.add_message(CmdMessage::info("Nothing to unlock"));
        }
        Err(e) => return Err(e),
    }

    Ok(result)
}
