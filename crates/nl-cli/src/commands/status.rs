//! `status`: tabulate character and inventory from a save.

use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use nl_sync::SyncConfig;

/// Print character, location and inventory tables for `save`.
pub fn run(save: &Path) -> Result<(), String> {
    let manager = super::load_save(save, SyncConfig::default())?;
    let stats = manager.character().stats();
    let background = manager.character().background();
    let location = manager.map().current_location();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Character", ""]);
    let rows = [
        ("Name", background.name.clone()),
        ("Identity", background.identity_line()),
        ("Level", stats.level.to_string()),
        (
            "Experience",
            format!("{}/{}", stats.experience, stats.experience_to_next),
        ),
        ("Health", stats.health.to_string()),
        ("Stamina", stats.stamina.to_string()),
        ("Eddies", stats.eddies.to_string()),
        ("Street Cred", stats.cred_rating.to_string()),
        ("Location", format!("{} ({})", location.name, location.district)),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    println!("{table}");

    let inventory = manager.inventory();
    let mut items = Table::new();
    items.set_content_arrangement(ContentArrangement::Dynamic);
    items.set_header(vec!["Item", "Type", "Qty", "Equipped"]);
    for stack in inventory.slots().into_iter().filter_map(|slot| slot.stack) {
        let equipped = if inventory.is_equipped(&stack.item.id) {
            "yes"
        } else {
            ""
        };
        items.add_row(vec![
            stack.item.name.clone(),
            stack.item.item_type.to_string(),
            stack.quantity.to_string(),
            equipped.to_string(),
        ]);
    }
    println!("{items}");
    println!();
    println!(
        "  {}/{} slots, {:.1}/{:.1} weight",
        inventory.current_capacity(),
        inventory.max_slots(),
        inventory.current_weight(),
        inventory.max_weight()
    );
    Ok(())
}
