use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lock::{LockBackend, LockMode};
use crate::session::EditSession;

pub fn run<L: LockBackend>(session: &EditSession<L>) -> Result<CmdResult> {
    let lock = session.discard()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Discarded edit of {} {}",
        lock.kind, lock.id
    )));
    if lock.mode == LockMode::New {
        result.add_message(CmdMessage::info(format!(
            "The new {} keeps its placeholder content; `quill delete {}` removes it",
            lock.kind, lock.id
        )));
    }
    result.lock = Some(lock);
    Ok(result)
}
