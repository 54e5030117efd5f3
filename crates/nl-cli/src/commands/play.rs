//! `play`: feed a transcript through the sync core.

use std::path::Path;

use nl_extract::{StoryUpdates, clean_narrative};
use nl_sync::{GameStateManager, SyncConfig};

/// Apply every passage of `transcript` in order, print one line per turn,
/// and optionally write the save blob.
pub fn run(
    transcript: &Path,
    save: Option<&Path>,
    resume: bool,
    seed: u64,
    slots: usize,
) -> Result<(), String> {
    let text = std::fs::read_to_string(transcript)
        .map_err(|e| format!("cannot read {}: {e}", transcript.display()))?;
    let config = SyncConfig::default()
        .with_seed(seed)
        .with_inventory_slots(slots);

    let mut manager = match save {
        Some(path) if resume && path.exists() => super::load_save(path, config)?,
        _ => GameStateManager::new(config),
    };

    let passages = passages(&text);
    if passages.is_empty() {
        return Err(format!("{} has no passages", transcript.display()));
    }
    for (turn, passage) in passages.iter().enumerate() {
        let updates = manager.update_from_story(&clean_narrative(passage));
        println!("Turn {}: {}", turn + 1, describe(&updates, &manager));
    }
    println!();
    println!("{}", manager.character_info());

    if let Some(path) = save {
        let blob = manager.save_game_state().map_err(|e| e.to_string())?;
        std::fs::write(path, blob)
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), "save written");
        println!("Saved to {}", path.display());
    }
    Ok(())
}

/// Split a transcript into passages at blank lines.
fn passages(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                out.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out
}

/// One-line summary of what a turn changed.
fn describe(updates: &StoryUpdates, manager: &GameStateManager) -> String {
    let mut parts = Vec::new();
    if updates.experience_gained > 0 {
        parts.push(format!("+{} XP", updates.experience_gained));
    }
    if updates.damage_taken > 0 {
        parts.push(format!("-{} HP", updates.damage_taken));
    }
    if updates.eddies_delta != 0 {
        parts.push(format!("{:+} eddies", updates.eddies_delta));
    }
    if updates.cred_delta != 0 {
        parts.push(format!("{:+} cred", updates.cred_delta));
    }
    if !updates.items_found.is_empty() {
        parts.push(format!("found {}", updates.items_found.join(", ")));
    }
    if !updates.items_lost.is_empty() {
        parts.push(format!("lost {}", updates.items_lost.join(", ")));
    }
    if updates.location_changed {
        parts.push(format!("at {}", manager.map().current_location().name));
    }
    for trigger in &updates.triggers {
        parts.push(trigger.to_string().to_lowercase());
    }
    if parts.is_empty() {
        "nothing changed".to_string()
    } else {
        parts.join(", ")
    }
}
