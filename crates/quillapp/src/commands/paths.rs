use crate::commands::CmdResult;
use crate::error::Result;
use crate::lock::LockBackend;
use crate::session::EditSession;
use crate::store::DataStore;

/// Path of the current edit buffer, re-rendered if it went missing.
pub fn run<S: DataStore, L: LockBackend>(store: &S, session: &EditSession<L>) -> Result<CmdResult> {
    let lock = session.reopen(store)?;
    Ok(CmdResult::default().with_lock(lock))
}
