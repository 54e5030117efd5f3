//! Slot-based inventory for Nightline.
//!
//! [`Inventory`] holds a fixed number of slots. Consumables, data, and misc
//! items stack by id; everything else takes one slot per unit. At most one
//! item of each type is equipped. The [`catalog`] maps narrative phrases to
//! concrete items.

/// Static item catalog.
pub mod catalog;
/// Error types.
pub mod error;
/// The inventory store.
pub mod inventory;
/// Item value objects.
pub mod item;

pub use error::{InventoryError, InventoryResult};
pub use inventory::{Inventory, InventorySlot, InventorySnapshot, ItemStack, ItemUse, SortKey};
pub use item::{Item, ItemEffects, ItemType, Rarity, StatBonuses};
