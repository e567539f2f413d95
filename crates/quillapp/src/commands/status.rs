use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LockError, QuillError, Result};
use crate::lock::LockBackend;
use crate::session::EditSession;

/// Describes the edit in progress. A corrupted lock is reported, not raised.
pub fn run<L: LockBackend>(session: &EditSession<L>) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match session.read() {
        Ok(lock) => {
            result.add_message(CmdMessage::info(format!(
                "Editing {} {} ({})",
                lock.kind, lock.id, lock.mode
            )));
            if !lock.buffer_path.exists() {
                result.add_message(CmdMessage::warning(
                    "The edit buffer is missing; `quill open` re-creates it",
                ));
            }
            result = result.with_lock(lock);
        }
        Err(QuillError::Lock(LockError::Missing)) => {
            result.add_message(CmdMessage::info("No edit in progress"));
        }
        Err(QuillError::Lock(LockError::Corrupted(reason))) => {
            result.add_message(CmdMessage::error(format!(
                "Lock file {} is corrupted ({}); run `quill unlock --force`",
                session.lock().location().display(),
                reason
            )));
        }
        Err(e) => return Err(e),
    }

    Ok(result)
}
