use crate::commands::CmdResult;
use crate::error::Result;
use crate::id::IdGenerator;

/// Generates `count` IDs, for the current time or an explicit millisecond
/// timestamp.
pub fn run(ids: &IdGenerator, at: Option<i64>, count: usize) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for _ in 0..count {
        let id = match at {
            Some(timestamp) => ids.generate_at(timestamp)?,
            None => ids.generate()?,
        };
        result.ids.push(id);
    }
    Ok(result)
}
