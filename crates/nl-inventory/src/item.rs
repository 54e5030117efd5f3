//! Item value objects.

use serde::{Deserialize, Serialize};

/// Item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Guns and blades.
    Weapon,
    /// Clothing and plating.
    Armor,
    /// Implants.
    Cyberware,
    /// Single-use healing and boosts.
    Consumable,
    /// Gadgets.
    Tool,
    /// Shards and drives.
    Data,
    /// Everything else.
    Misc,
}

impl ItemType {
    /// Whether units of the same id share one slot.
    pub fn is_stackable(&self) -> bool {
        matches!(self, Self::Consumable | Self::Data | Self::Misc)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::Armor => "Armor",
            Self::Cyberware => "Cyberware",
            Self::Consumable => "Consumable",
            Self::Tool => "Tool",
            Self::Data => "Data",
            Self::Misc => "Misc",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Five-tier rarity, ordered from most to least common.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Found everywhere.
    #[default]
    Common,
    /// Slightly better than stock.
    Uncommon,
    /// Hard to come by.
    Rare,
    /// Top-shelf.
    Epic,
    /// One of a kind.
    Legendary,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        };
        f.write_str(name)
    }
}

/// Flat bonuses an equipped item grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonuses {
    /// Damage bonus.
    #[serde(default)]
    pub damage: i32,
    /// Defense bonus.
    #[serde(default)]
    pub defense: i32,
    /// Hacking power bonus.
    #[serde(default)]
    pub hacking: i32,
    /// Stealth rating bonus.
    #[serde(default)]
    pub stealth: i32,
}

impl std::ops::Add for StatBonuses {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            damage: self.damage + rhs.damage,
            defense: self.defense + rhs.defense,
            hacking: self.hacking + rhs.hacking,
            stealth: self.stealth + rhs.stealth,
        }
    }
}

/// What using a consumable does. Applying it is up to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEffects {
    /// Health restored.
    #[serde(default)]
    pub heal: u32,
    /// Stamina restored.
    #[serde(default)]
    pub stamina: u32,
    /// Eddies granted.
    #[serde(default)]
    pub eddies: i64,
    /// Experience granted.
    #[serde(default)]
    pub experience: u64,
}

/// An item. Identity is the `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Category.
    pub item_type: ItemType,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Street value in eddies.
    pub value: u32,
    /// Weight per unit.
    pub weight: f64,
    /// Can be consumed with `use_item`.
    pub usable: bool,
    /// Can be equipped.
    pub equippable: bool,
    /// Bonuses while equipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_bonuses: Option<StatBonuses>,
    /// Effects when used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<ItemEffects>,
}

impl Item {
    /// A plain item with no bonuses or effects.
    pub fn new(id: &str, name: &str, item_type: ItemType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            item_type,
            rarity: Rarity::Common,
            value: 0,
            weight: 0.0,
            usable: false,
            equippable: false,
            stat_bonuses: None,
            effects: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set rarity.
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set value and unit weight.
    pub fn with_value(mut self, value: u32, weight: f64) -> Self {
        self.value = value;
        self.weight = weight;
        self
    }

    /// Make equippable with the given bonuses.
    pub fn with_bonuses(mut self, bonuses: StatBonuses) -> Self {
        self.equippable = true;
        self.stat_bonuses = Some(bonuses);
        self
    }

    /// Make usable with the given effects.
    pub fn with_effects(mut self, effects: ItemEffects) -> Self {
        self.usable = true;
        self.effects = Some(effects);
        self
    }

    /// Whether units of this item share one slot.
    pub fn is_stackable(&self) -> bool {
        self.item_type.is_stackable()
    }
}
