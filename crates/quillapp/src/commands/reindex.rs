use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let report = store.rebuild_slug_index()?;
    let mut result = CmdResult::default();

    for (kind, count) in &report.entries {
        result.add_message(CmdMessage::info(format!("{}: {} slugs", kind, count)));
    }
    for dup in &report.duplicates {
        result.add_message(CmdMessage::warning(format!(
            "Duplicate {} slug '{}': kept {}, dropped {}",
            dup.kind, dup.slug, dup.kept, dup.dropped
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Rebuilt slug indexes ({} entries)",
        report.total_entries()
    )));

    result.reindex = Some(report);
    Ok(result)
}
