//! Inventory domain: the player's selectable items and their counts.

use bevy::prelude::*;
use crate::shared::*;

pub mod selector;

pub use selector::{CyclicSelector, SelectorError};

/// Seed count the player starts with when no config says otherwise.
pub const STARTING_SEEDS: i32 = 5;

/// The player's inventory: tools first, then seeds, then anything picked up.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct Inventory(pub CyclicSelector<ItemId>);

impl Inventory {
    pub fn starting(seeds: i32) -> Self {
        let mut items = CyclicSelector::from_first(
            ItemId::Hoe,
            [
                ItemId::Axe,
                ItemId::WateringCan,
                ItemId::Crop(CropKind::Corn),
                ItemId::Crop(CropKind::Tomato),
            ],
        );
        items.set(&ItemId::Crop(CropKind::Corn), seeds);
        items.set(&ItemId::Crop(CropKind::Tomato), seeds);
        Self(items)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::starting(STARTING_SEEDS)
    }
}

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Inventory>()
            .add_event::<ItemPickupEvent>()
            .add_systems(Update, credit_item_pickups.in_set(TickStage::Flush));
    }
}

/// The inventory sink: every pickup event lands here.
pub fn credit_item_pickups(
    mut events: EventReader<ItemPickupEvent>,
    mut inventory: ResMut<Inventory>,
) {
    for ev in events.read() {
        let total = inventory.update(&ev.item, ev.quantity);
        debug!("[Inventory] {} {:+} -> {}", ev.item, ev.quantity, total);
    }
}
