//! Subcommand implementations. Each returns a printable error message.

pub mod extract;
pub mod play;
pub mod recap;
pub mod status;

use std::path::Path;

use nl_sync::{GameStateManager, SyncConfig};

/// Read a save file into a fresh manager.
fn load_save(path: &Path, config: SyncConfig) -> Result<GameStateManager, String> {
    let blob = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let mut manager = GameStateManager::new(config);
    manager
        .try_load_game_state(&blob)
        .map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(manager)
}
