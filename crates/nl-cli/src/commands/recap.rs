//! `recap`: print the narrative memory of a save.

use std::path::Path;

use nl_sync::SyncConfig;

/// Print the story recap and context summary stored in `save`.
pub fn run(save: &Path) -> Result<(), String> {
    let manager = super::load_save(save, SyncConfig::default())?;
    println!("{}", manager.memory().story_recap());

    let summary = manager.context_summary();
    if !summary.is_empty() {
        println!();
        println!("== Context ==");
        println!("{summary}");
    }
    Ok(())
}
