//! The slot-based inventory store.

use serde::{Deserialize, Serialize};

use nl_core::ActionResult;

use crate::error::{InventoryError, InventoryResult};
use crate::item::{Item, ItemEffects, StatBonuses};

/// Default number of slots.
pub const DEFAULT_SLOTS: usize = 20;
/// Default weight limit.
pub const DEFAULT_MAX_WEIGHT: f64 = 100.0;

/// A quantity of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// The item.
    pub item: Item,
    /// Units held, always at least 1.
    pub quantity: u32,
}

/// One fixed inventory position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySlot {
    /// Contents, if any.
    pub stack: Option<ItemStack>,
}

impl InventorySlot {
    /// Returns true if the slot holds nothing.
    pub fn is_empty(&self) -> bool {
        self.stack.is_none()
    }

    fn holds(&self, id: &str) -> bool {
        self.stack.as_ref().is_some_and(|s| s.item.id == id)
    }
}

/// Ordering for [`Inventory::sort_inventory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Alphabetical by name.
    Name,
    /// By item category.
    Type,
    /// Rarest first.
    Rarity,
    /// Most valuable first.
    Value,
    /// Lightest first.
    Weight,
}

/// Result of [`Inventory::use_item`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUse {
    /// Whether a unit was consumed.
    pub outcome: ActionResult,
    /// Effects the caller should apply. `None` when nothing was consumed.
    pub effects: Option<ItemEffects>,
}

/// Serialized form of the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Every slot, empty ones included.
    pub slots: Vec<InventorySlot>,
    /// Equipped item ids.
    pub equipped: Vec<String>,
    /// Weight limit.
    pub max_weight: f64,
}

/// Fixed-size slot inventory with one equipped item per item type.
///
/// Capacity limits are advisory: [`Inventory::can_add_item`] checks them,
/// [`Inventory::add_item`] only fails when there is no slot to put an item in.
#[derive(Debug, Clone)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
    equipped: Vec<Item>,
    max_weight: f64,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS, DEFAULT_MAX_WEIGHT)
    }
}

impl Inventory {
    /// An empty inventory.
    pub fn new(max_slots: usize, max_weight: f64) -> Self {
        Self {
            slots: vec![InventorySlot::default(); max_slots.max(1)],
            equipped: Vec::new(),
            max_weight,
        }
    }

    /// Empty every slot and unequip everything. Limits are kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.slots.len(), self.max_weight);
    }

    // -- Accessors -----------------------------------------------------------

    /// Every slot, empty ones included.
    pub fn slots(&self) -> Vec<InventorySlot> {
        self.slots.clone()
    }

    /// Equipped items.
    pub fn equipped_items(&self) -> Vec<Item> {
        self.equipped.clone()
    }

    /// Number of slots.
    pub fn max_slots(&self) -> usize {
        self.slots.len()
    }

    /// Weight limit.
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    /// Change the weight limit.
    pub fn set_max_weight(&mut self, max_weight: f64) {
        self.max_weight = max_weight.max(0.0);
    }

    /// Number of filled slots.
    pub fn current_capacity(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Total carried weight.
    pub fn current_weight(&self) -> f64 {
        self.stacks()
            .map(|s| s.item.weight * f64::from(s.quantity))
            .sum()
    }

    /// The item with this id, if held.
    pub fn find_item(&self, id: &str) -> Option<Item> {
        self.stacks().find(|s| s.item.id == id).map(|s| s.item.clone())
    }

    /// Units of this id held across all slots.
    pub fn item_count(&self, id: &str) -> u32 {
        self.stacks()
            .filter(|s| s.item.id == id)
            .map(|s| s.quantity)
            .sum()
    }

    /// Sum of the bonuses of every equipped item.
    pub fn equipment_bonuses(&self) -> StatBonuses {
        self.equipped
            .iter()
            .filter_map(|item| item.stat_bonuses)
            .fold(StatBonuses::default(), |acc, b| acc + b)
    }

    fn stacks(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter().filter_map(|s| s.stack.as_ref())
    }

    // -- Capacity ------------------------------------------------------------

    fn slots_needed(&self, item: &Item, quantity: u32) -> usize {
        if item.is_stackable() {
            usize::from(!self.slots.iter().any(|s| s.holds(&item.id)))
        } else {
            quantity as usize
        }
    }

    /// Whether adding would stay within both the slot and weight limits.
    pub fn can_add_item(&self, item: &Item, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        let slots_ok = self.current_capacity() + self.slots_needed(item, quantity)
            <= self.slots.len();
        let weight_ok =
            self.current_weight() + item.weight * f64::from(quantity) <= self.max_weight;
        slots_ok && weight_ok
    }

    // -- Mutation ------------------------------------------------------------

    /// Add units of an item.
    ///
    /// Stackable items join an existing stack of the same id, else take the
    /// first empty slot. Other items take one empty slot per unit. Returns
    /// false and changes nothing if there are not enough empty slots.
    pub fn add_item(&mut self, item: Item, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        let empty = self.slots.iter().filter(|s| s.is_empty()).count();
        if self.slots_needed(&item, quantity) > empty {
            tracing::debug!(item = %item.id, quantity, "no free slot");
            return false;
        }

        if item.is_stackable() {
            if let Some(stack) = self
                .slots
                .iter_mut()
                .filter_map(|s| s.stack.as_mut())
                .find(|s| s.item.id == item.id)
            {
                stack.quantity = stack.quantity.saturating_add(quantity);
            } else if let Some(slot) = self.slots.iter_mut().find(|s| s.is_empty()) {
                slot.stack = Some(ItemStack {
                    item: item.clone(),
                    quantity,
                });
            }
        } else {
            for slot in self
                .slots
                .iter_mut()
                .filter(|s| s.is_empty())
                .take(quantity as usize)
            {
                slot.stack = Some(ItemStack {
                    item: item.clone(),
                    quantity: 1,
                });
            }
        }
        tracing::debug!(item = %item.id, quantity, "item added");
        true
    }

    /// Remove units of an item, clearing slots that run out. Returns false
    /// and changes nothing if fewer units are held.
    ///
    /// An equipped item whose last unit is removed is unequipped.
    pub fn remove_item(&mut self, id: &str, quantity: u32) -> bool {
        if quantity == 0 || self.item_count(id) < quantity {
            return false;
        }
        let mut remaining = quantity;
        for slot in self.slots.iter_mut().rev() {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot.stack.as_mut().filter(|s| s.item.id == id) else {
                continue;
            };
            let taken = remaining.min(stack.quantity);
            stack.quantity -= taken;
            remaining -= taken;
            if stack.quantity == 0 {
                slot.stack = None;
            }
        }
        if self.item_count(id) == 0 {
            self.equipped.retain(|item| item.id != id);
        }
        tracing::debug!(item = id, quantity, "item removed");
        true
    }

    /// Equip a held item, replacing any equipped item of the same type.
    /// Returns false for unknown or non-equippable ids.
    pub fn equip_item(&mut self, id: &str) -> bool {
        let Some(item) = self.find_item(id).filter(|item| item.equippable) else {
            return false;
        };
        self.equipped.retain(|e| e.item_type != item.item_type);
        tracing::debug!(item = id, item_type = %item.item_type, "item equipped");
        self.equipped.push(item);
        true
    }

    /// Unequip an item. Returns false if it was not equipped.
    pub fn unequip_item(&mut self, id: &str) -> bool {
        let before = self.equipped.len();
        self.equipped.retain(|item| item.id != id);
        self.equipped.len() != before
    }

    /// Whether an item with this id is equipped.
    pub fn is_equipped(&self, id: &str) -> bool {
        self.equipped.iter().any(|item| item.id == id)
    }

    /// Consume one unit of a usable item and hand back its effects.
    pub fn use_item(&mut self, id: &str) -> ItemUse {
        match self.try_use_item(id) {
            Ok((name, effects)) => ItemUse {
                outcome: ActionResult::ok(format!("Used {name}")),
                effects: Some(effects),
            },
            Err(e) => ItemUse {
                outcome: ActionResult::fail(e.to_string()),
                effects: None,
            },
        }
    }

    fn try_use_item(&mut self, id: &str) -> InventoryResult<(String, ItemEffects)> {
        let item = self
            .find_item(id)
            .ok_or_else(|| InventoryError::ItemNotFound(id.to_string()))?;
        if !item.usable {
            return Err(InventoryError::NotUsable(item.name));
        }
        self.remove_item(id, 1);
        Ok((item.name, item.effects.unwrap_or_default()))
    }

    /// Stable sort of the filled slots; empty slots go last.
    pub fn sort_inventory(&mut self, key: SortKey) {
        let (mut filled, empty): (Vec<_>, Vec<_>) =
            self.slots.drain(..).partition(|s| !s.is_empty());
        filled.sort_by(|a, b| match (&a.stack, &b.stack) {
            (Some(a), Some(b)) => compare(&a.item, &b.item, key),
            _ => std::cmp::Ordering::Equal,
        });
        self.slots = filled;
        self.slots.extend(empty);
    }

    // -- Persistence ---------------------------------------------------------

    /// Capture the inventory.
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            slots: self.slots.clone(),
            equipped: self.equipped.iter().map(|item| item.id.clone()).collect(),
            max_weight: self.max_weight,
        }
    }

    /// Check a snapshot against the slot invariants.
    pub fn validate(snapshot: &InventorySnapshot) -> InventoryResult<()> {
        let invalid = |reason: String| Err(InventoryError::InvalidSnapshot(reason));
        if snapshot.slots.is_empty() {
            return invalid("no slots".to_string());
        }
        for stack in snapshot.slots.iter().filter_map(|s| s.stack.as_ref()) {
            if stack.quantity == 0 {
                return invalid(format!("empty stack of '{}'", stack.item.id));
            }
            if !stack.item.is_stackable() && stack.quantity > 1 {
                return invalid(format!("'{}' cannot stack", stack.item.id));
            }
        }
        let mut types = Vec::new();
        for id in &snapshot.equipped {
            let Some(stack) = snapshot
                .slots
                .iter()
                .filter_map(|s| s.stack.as_ref())
                .find(|s| &s.item.id == id)
            else {
                return invalid(format!("equipped '{id}' is not held"));
            };
            if !stack.item.equippable || types.contains(&stack.item.item_type) {
                return invalid(format!("'{id}' cannot be equipped"));
            }
            types.push(stack.item.item_type);
        }
        Ok(())
    }

    /// Replace the inventory with a snapshot. Nothing changes if the
    /// snapshot is invalid.
    pub fn restore(&mut self, snapshot: InventorySnapshot) -> InventoryResult<()> {
        Self::validate(&snapshot)?;
        let equipped = snapshot
            .equipped
            .iter()
            .filter_map(|id| {
                snapshot
                    .slots
                    .iter()
                    .filter_map(|s| s.stack.as_ref())
                    .find(|s| &s.item.id == id)
                    .map(|s| s.item.clone())
            })
            .collect();
        self.slots = snapshot.slots;
        self.equipped = equipped;
        self.max_weight = snapshot.max_weight;
        Ok(())
    }
}

fn compare(a: &Item, b: &Item, key: SortKey) -> std::cmp::Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Type => a.item_type.cmp(&b.item_type),
        SortKey::Rarity => b.rarity.cmp(&a.rarity),
        SortKey::Value => b.value.cmp(&a.value),
        SortKey::Weight => a.weight.total_cmp(&b.weight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::item_by_id;
    use crate::item::Rarity;
    use proptest::prelude::*;

    fn item(id: &str) -> Item {
        item_by_id(id).unwrap()
    }

    #[test]
    fn starts_empty() {
        let inv = Inventory::default();
        assert_eq!(inv.max_slots(), 20);
        assert_eq!(inv.current_capacity(), 0);
        assert_eq!(inv.current_weight(), 0.0);
    }

    #[test]
    fn stackables_share_a_slot() {
        let mut inv = Inventory::default();
        assert!(inv.add_item(item("maxdoc"), 1));
        assert!(inv.add_item(item("maxdoc"), 2));
        assert_eq!(inv.current_capacity(), 1);
        assert_eq!(inv.item_count("maxdoc"), 3);
    }

    #[test]
    fn non_stackables_take_a_slot_each() {
        let mut inv = Inventory::default();
        assert!(inv.add_item(item("katana"), 2));
        assert_eq!(inv.current_capacity(), 2);
        assert_eq!(inv.item_count("katana"), 2);
    }

    #[test]
    fn full_inventory_rejects_new_slot() {
        let mut inv = Inventory::new(2, 100.0);
        assert!(inv.add_item(item("katana"), 1));
        assert!(inv.add_item(item("maxdoc"), 1));
        assert!(!inv.add_item(item("kevlar_vest"), 1));
        assert!(inv.add_item(item("maxdoc"), 4));
        assert_eq!(inv.item_count("maxdoc"), 5);
    }

    #[test]
    fn multi_unit_add_is_all_or_nothing() {
        let mut inv = Inventory::new(2, 100.0);
        assert!(!inv.add_item(item("katana"), 3));
        assert_eq!(inv.current_capacity(), 0);
    }

    #[test]
    fn weight_cap_is_advisory() {
        let mut inv = Inventory::new(20, 4.0);
        let vest = item("kevlar_vest");
        assert!(!inv.can_add_item(&vest, 1));
        assert!(inv.add_item(vest, 1));
        assert!(inv.current_weight() > inv.max_weight());
    }

    #[test]
    fn can_add_checks_slots() {
        let mut inv = Inventory::new(1, 100.0);
        inv.add_item(item("maxdoc"), 1);
        assert!(inv.can_add_item(&item("maxdoc"), 3));
        assert!(!inv.can_add_item(&item("katana"), 1));
        assert!(!inv.can_add_item(&item("maxdoc"), 0));
    }

    #[test]
    fn remove_clears_slot() {
        let mut inv = Inventory::default();
        inv.add_item(item("maxdoc"), 2);
        assert!(!inv.remove_item("maxdoc", 3));
        assert!(inv.remove_item("maxdoc", 1));
        assert_eq!(inv.item_count("maxdoc"), 1);
        assert!(inv.remove_item("maxdoc", 1));
        assert_eq!(inv.current_capacity(), 0);
        assert!(!inv.remove_item("maxdoc", 1));
    }

    #[test]
    fn equip_replaces_same_type() {
        let mut inv = Inventory::default();
        inv.add_item(item("lexington_pistol"), 1);
        inv.add_item(item("katana"), 1);
        inv.add_item(item("street_jacket"), 1);
        assert!(inv.equip_item("lexington_pistol"));
        assert!(inv.equip_item("street_jacket"));
        assert!(inv.equip_item("katana"));
        let ids: Vec<String> = inv.equipped_items().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["street_jacket", "katana"]);
        assert_eq!(inv.equipment_bonuses().damage, 12);
        assert_eq!(inv.equipment_bonuses().defense, 4);
    }

    #[test]
    fn equip_invalid_is_noop() {
        let mut inv = Inventory::default();
        inv.add_item(item("maxdoc"), 1);
        assert!(!inv.equip_item("maxdoc"));
        assert!(!inv.equip_item("katana"));
        assert!(!inv.unequip_item("katana"));
        assert!(inv.equipped_items().is_empty());
    }

    #[test]
    fn removing_last_unit_unequips() {
        let mut inv = Inventory::default();
        inv.add_item(item("katana"), 1);
        inv.equip_item("katana");
        inv.remove_item("katana", 1);
        assert!(!inv.is_equipped("katana"));
    }

    #[test]
    fn use_item_consumes_one() {
        let mut inv = Inventory::default();
        inv.add_item(item("maxdoc"), 2);
        let used = inv.use_item("maxdoc");
        assert!(used.outcome.success);
        assert_eq!(used.effects.map(|e| e.heal), Some(40));
        assert_eq!(inv.item_count("maxdoc"), 1);
    }

    #[test]
    fn use_item_rejections() {
        let mut inv = Inventory::default();
        inv.add_item(item("katana"), 1);
        let r = inv.use_item("katana");
        assert!(!r.outcome.success);
        assert_eq!(r.outcome.message, "Katana can't be used");
        assert!(r.effects.is_none());
        assert!(!inv.use_item("maxdoc").outcome.success);
        assert_eq!(inv.item_count("katana"), 1);
    }

    #[test]
    fn sort_pushes_empty_slots_last() {
        let mut inv = Inventory::new(6, 100.0);
        inv.add_item(item("tech_scrap"), 1);
        inv.add_item(item("katana"), 1);
        inv.add_item(item("maxdoc"), 1);
        inv.remove_item("tech_scrap", 1);
        inv.add_item(item("cyberdeck"), 1);

        inv.sort_inventory(SortKey::Rarity);
        let rarities: Vec<Rarity> = inv
            .slots()
            .iter()
            .filter_map(|s| s.stack.as_ref().map(|st| st.item.rarity))
            .collect();
        assert_eq!(rarities, vec![Rarity::Epic, Rarity::Rare, Rarity::Common]);
        assert!(inv.slots()[3..].iter().all(InventorySlot::is_empty));

        inv.sort_inventory(SortKey::Name);
        let names: Vec<String> = inv
            .slots()
            .iter()
            .filter_map(|s| s.stack.as_ref().map(|st| st.item.name.clone()))
            .collect();
        assert_eq!(names, vec!["Katana", "MaxDoc", "Militech Paraline Cyberdeck"]);
    }

    #[test]
    fn sort_is_stable() {
        let mut inv = Inventory::default();
        inv.add_item(item("lexington_pistol"), 1);
        inv.add_item(item("combat_knife"), 1);
        inv.add_item(item("street_jacket"), 1);
        inv.sort_inventory(SortKey::Type);
        let ids: Vec<String> = inv
            .slots()
            .iter()
            .filter_map(|s| s.stack.as_ref().map(|st| st.item.id.clone()))
            .collect();
        assert_eq!(ids, vec!["lexington_pistol", "combat_knife", "street_jacket"]);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut inv = Inventory::default();
        inv.add_item(item("katana"), 1);
        inv.add_item(item("maxdoc"), 3);
        inv.equip_item("katana");
        let json = serde_json::to_string(&inv.snapshot()).unwrap();
        let snapshot: InventorySnapshot = serde_json::from_str(&json).unwrap();
        let mut restored = Inventory::default();
        restored.restore(snapshot).unwrap();
        assert_eq!(restored.slots(), inv.slots());
        assert_eq!(restored.equipped_items(), inv.equipped_items());
    }

    #[test]
    fn invalid_snapshot_rejected() {
        let mut inv = Inventory::default();
        inv.add_item(item("maxdoc"), 1);
        let mut snapshot = Inventory::default().snapshot();
        snapshot.equipped.push("katana".to_string());
        assert!(inv.restore(snapshot).is_err());
        assert_eq!(inv.item_count("maxdoc"), 1);
    }

    #[test]
    fn reset_keeps_limits() {
        let mut inv = Inventory::new(8, 42.0);
        inv.add_item(item("katana"), 1);
        inv.reset();
        assert_eq!(inv.current_capacity(), 0);
        assert_eq!(inv.max_slots(), 8);
        assert_eq!(inv.max_weight(), 42.0);
    }

    fn any_item() -> impl Strategy<Value = Item> {
        prop::sample::select(crate::catalog::all_items())
    }

    proptest! {
        #[test]
        fn two_stackable_units_use_at_most_one_slot(item in any_item()) {
            prop_assume!(item.item_type.is_stackable());
            let mut inv = Inventory::default();
            let before = inv.current_capacity();
            inv.add_item(item.clone(), 1);
            inv.add_item(item, 1);
            prop_assert!(inv.current_capacity() - before <= 1);
        }

        #[test]
        fn non_stackable_units_use_one_slot_each(item in any_item()) {
            prop_assume!(!item.is_stackable());
            let mut inv = Inventory::default();
            inv.add_item(item.clone(), 1);
            inv.add_item(item, 1);
            prop_assert_eq!(inv.current_capacity(), 2);
        }

        #[test]
        fn quantities_stay_positive(
            ops in prop::collection::vec((any_item(), 0u32..4, any::<bool>()), 0..40),
        ) {
            let mut inv = Inventory::new(10, 100.0);
            for (item, qty, add) in ops {
                if add {
                    inv.add_item(item, qty);
                } else {
                    inv.remove_item(&item.id, qty);
                }
            }
            prop_assert!(inv.current_capacity() <= inv.max_slots());
            for slot in inv.slots() {
                if let Some(stack) = slot.stack {
                    prop_assert!(stack.quantity > 0);
                }
            }
        }
    }
}
