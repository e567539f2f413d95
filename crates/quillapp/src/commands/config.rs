use crate::commands::{CmdMessage, CmdResult};
use crate::config::{global_config_path, QuillConfig, CONFIG_FILE};
use crate::error::Result;
use std::path::Path;

/// Effective configuration and where it was read from.
pub fn run(config: &QuillConfig, root: &Path) -> Result<CmdResult> {
    let mut result = CmdResult {
        config: config
            .entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
        ..Default::default()
    };

    result.add_message(CmdMessage::info(format!("Data root: {}", root.display())));
    result.add_message(CmdMessage::info(format!(
        "Store config: {}",
        root.join(CONFIG_FILE).display()
    )));
    if let Some(global) = global_config_path() {
        result.add_message(CmdMessage::info(format!(
            "Global config: {}",
            global.display()
        )));
    }
    Ok(result)
}
