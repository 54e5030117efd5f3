//! Static item catalog and narrative phrase lookup.

use nl_core::{slugify, title_case};

use crate::item::{Item, ItemEffects, ItemType, Rarity, StatBonuses};

/// Keywords that map a narrative noun phrase to a catalog id.
/// Checked in order; the first match wins.
const KEYWORDS: &[(&str, &str)] = &[
    ("shard", "data_shard"),
    ("drive", "data_shard"),
    ("credchip", "credchip"),
    ("eddies", "credchip"),
    ("cyberdeck", "cyberdeck"),
    ("deck", "cyberdeck"),
    ("optics", "kiroshi_optics"),
    ("kiroshi", "kiroshi_optics"),
    ("katana", "katana"),
    ("blade", "katana"),
    ("sword", "katana"),
    ("knife", "combat_knife"),
    ("pistol", "lexington_pistol"),
    ("handgun", "lexington_pistol"),
    ("gun", "lexington_pistol"),
    ("revolver", "unity_pistol"),
    ("rifle", "copperhead_rifle"),
    ("smg", "copperhead_rifle"),
    ("vest", "kevlar_vest"),
    ("armor", "kevlar_vest"),
    ("armour", "kevlar_vest"),
    ("jacket", "street_jacket"),
    ("maxdoc", "maxdoc"),
    ("medkit", "maxdoc"),
    ("stim", "maxdoc"),
    ("inhaler", "bounce_back"),
    ("drink", "spunky_monkey"),
    ("soda", "spunky_monkey"),
    ("multitool", "multitool"),
    ("tool", "multitool"),
    ("scanner", "multitool"),
    ("scrap", "tech_scrap"),
    ("component", "tech_scrap"),
    ("chip", "data_shard"),
];

/// Articles stripped from a phrase before it becomes a generic item.
const ARTICLES: &[&str] = &["a", "an", "the", "some", "your"];

/// Ids the Scavenge trigger draws from.
const SCAVENGE_IDS: &[&str] = &[
    "maxdoc",
    "spunky_monkey",
    "tech_scrap",
    "data_shard",
    "credchip",
    "combat_knife",
];

/// Every catalog item.
pub fn all_items() -> Vec<Item> {
    vec![
        Item::new("lexington_pistol", "Lexington Pistol", ItemType::Weapon)
            .with_description("Cheap, reliable, everywhere.")
            .with_value(200, 1.5)
            .with_bonuses(StatBonuses {
                damage: 5,
                ..Default::default()
            }),
        Item::new("unity_pistol", "Unity Pistol", ItemType::Weapon)
            .with_description("Standard sidearm with a heavy kick.")
            .with_rarity(Rarity::Uncommon)
            .with_value(450, 2.0)
            .with_bonuses(StatBonuses {
                damage: 8,
                ..Default::default()
            }),
        Item::new("copperhead_rifle", "Copperhead Rifle", ItemType::Weapon)
            .with_description("Militech assault rifle.")
            .with_rarity(Rarity::Uncommon)
            .with_value(700, 4.5)
            .with_bonuses(StatBonuses {
                damage: 10,
                ..Default::default()
            }),
        Item::new("combat_knife", "Combat Knife", ItemType::Weapon)
            .with_description("Quiet and quick.")
            .with_value(90, 0.5)
            .with_bonuses(StatBonuses {
                damage: 3,
                stealth: 1,
                ..Default::default()
            }),
        Item::new("katana", "Katana", ItemType::Weapon)
            .with_description("Arasaka-forged monoblade.")
            .with_rarity(Rarity::Rare)
            .with_value(900, 3.0)
            .with_bonuses(StatBonuses {
                damage: 12,
                ..Default::default()
            }),
        Item::new("street_jacket", "Street Jacket", ItemType::Armor)
            .with_description("Synthleather with a thin armor weave.")
            .with_value(150, 2.5)
            .with_bonuses(StatBonuses {
                defense: 4,
                ..Default::default()
            }),
        Item::new("kevlar_vest", "Kevlar Vest", ItemType::Armor)
            .with_description("Stops most small-caliber rounds.")
            .with_rarity(Rarity::Uncommon)
            .with_value(500, 5.0)
            .with_bonuses(StatBonuses {
                defense: 8,
                ..Default::default()
            }),
        Item::new("kiroshi_optics", "Kiroshi Optics", ItemType::Cyberware)
            .with_description("Zoom, scan, and tag targets.")
            .with_rarity(Rarity::Rare)
            .with_value(1500, 0.2)
            .with_bonuses(StatBonuses {
                hacking: 2,
                stealth: 1,
                ..Default::default()
            }),
        Item::new("cyberdeck", "Militech Paraline Cyberdeck", ItemType::Cyberware)
            .with_description("Entry-level deck with room for three daemons.")
            .with_rarity(Rarity::Epic)
            .with_value(2000, 1.0)
            .with_bonuses(StatBonuses {
                hacking: 6,
                ..Default::default()
            }),
        Item::new("maxdoc", "MaxDoc", ItemType::Consumable)
            .with_description("Trauma Team-grade injector.")
            .with_value(50, 0.3)
            .with_effects(ItemEffects {
                heal: 40,
                ..Default::default()
            }),
        Item::new("bounce_back", "Bounce Back", ItemType::Consumable)
            .with_description("Nanite inhaler that closes wounds fast.")
            .with_rarity(Rarity::Uncommon)
            .with_value(120, 0.3)
            .with_effects(ItemEffects {
                heal: 80,
                ..Default::default()
            }),
        Item::new("spunky_monkey", "Spunky Monkey", ItemType::Consumable)
            .with_description("Sugar, caffeine, regret.")
            .with_value(10, 0.4)
            .with_effects(ItemEffects {
                stamina: 30,
                ..Default::default()
            }),
        Item::new("data_shard", "Data Shard", ItemType::Data)
            .with_description("Encrypted. Someone will pay for this.")
            .with_rarity(Rarity::Uncommon)
            .with_value(100, 0.1)
            .with_effects(ItemEffects {
                experience: 50,
                ..Default::default()
            }),
        Item::new("credchip", "Credchip", ItemType::Misc)
            .with_description("Anonymous eddies on a chip.")
            .with_value(100, 0.1)
            .with_effects(ItemEffects {
                eddies: 100,
                ..Default::default()
            }),
        Item::new("multitool", "Multitool", ItemType::Tool)
            .with_description("Opens panels, bypasses locks.")
            .with_value(80, 1.0)
            .with_bonuses(StatBonuses::default()),
        Item::new("tech_scrap", "Tech Scrap", ItemType::Misc)
            .with_description("Crafting components.")
            .with_value(5, 0.5),
    ]
}

/// Look up a catalog item by id.
pub fn item_by_id(id: &str) -> Option<Item> {
    all_items().into_iter().find(|item| item.id == id)
}

/// Map a narrative noun phrase to an item.
///
/// A phrase containing a known keyword resolves to that catalog item.
/// Anything else becomes a common Misc item named after the phrase.
pub fn item_from_phrase(phrase: &str) -> Item {
    let lowered = phrase.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let matched = KEYWORDS.iter().find(|&&(keyword, _)| {
        words
            .iter()
            .any(|&w| w == keyword || w.strip_suffix('s') == Some(keyword))
    });
    if let Some(item) = matched.and_then(|&(_, id)| item_by_id(id)) {
        return item;
    }
    generic_item(&words)
}

/// Items the Scavenge trigger can produce.
pub fn scavenge_table() -> Vec<Item> {
    SCAVENGE_IDS.iter().filter_map(|id| item_by_id(id)).collect()
}

/// Items every new character starts with.
pub fn starter_kit() -> Vec<(Item, u32)> {
    [("lexington_pistol", 1), ("street_jacket", 1), ("maxdoc", 2)]
        .into_iter()
        .filter_map(|(id, qty)| item_by_id(id).map(|item| (item, qty)))
        .collect()
}

fn generic_item(words: &[&str]) -> Item {
    let start = words
        .iter()
        .position(|w| !ARTICLES.contains(w))
        .unwrap_or(words.len());
    let phrase = words[start..].join(" ");
    let phrase = if phrase.is_empty() {
        "unknown item".to_string()
    } else {
        phrase
    };
    Item::new(&slugify(&phrase), &title_case(&phrase), ItemType::Misc)
        .with_description("Picked up on the street.")
        .with_value(10, 0.5)
}
