use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lock::LockBackend;
use crate::session::EditSession;
use crate::store::DataStore;

pub fn run<S: DataStore, L: LockBackend>(
    store: &mut S,
    session: &EditSession<L>,
) -> Result<CmdResult> {
    let resource = session.commit(store)?;
    let mut result = CmdResult::default();

    let message = match resource.content.slug() {
        Some(slug) => format!("Committed {} {} as {}", resource.kind(), resource.id, slug),
        None => format!("Committed {} {}", resource.kind(), resource.id),
    };
    result.add_message(CmdMessage::success(message));

    Ok(result.with_affected(vec![resource]))
}
