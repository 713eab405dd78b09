//! Harvest on contact: walking into a ripe plant picks it.

use bevy::prelude::*;
use crate::player::{ActorController, Player};
use crate::shared::*;
use super::SoilGrid;

pub fn harvest_on_contact(
    player_query: Query<&ActorController, With<Player>>,
    mut soil: ResMut<SoilGrid>,
    mut pickups: EventWriter<ItemPickupEvent>,
    mut harvested: EventWriter<CropHarvestedEvent>,
) {
    let Ok(controller) = player_query.get_single() else {
        return;
    };
    let hitbox = controller.hitbox();

    let ripe: Vec<GridCell> = soil
        .plants()
        .filter(|(_, plant)| plant.harvestable && overlaps(&plant.bounds, &hitbox))
        .map(|(cell, _)| cell)
        .collect();

    for cell in ripe {
        let Some((kind, quantity)) = soil.harvest(cell) else {
            continue;
        };
        info!("[Farming] Harvested {} x{} at {}", kind.name(), quantity, cell);
        pickups.send(ItemPickupEvent {
            item: ItemId::Crop(kind),
            quantity: quantity as i32,
        });
        harvested.send(CropHarvestedEvent { kind, quantity, cell });
    }
}
