use crate::commands::helpers::{resolve, Selector};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, selector: &Selector) -> Result<CmdResult> {
    let id = resolve(store, selector)?;
    let resource = store.read(&id)?;
    let mut result = CmdResult::default().with_listed(vec![resource]);
    result.paths.push(store.record_path(&id));
    Ok(result)
}
