use bevy::prelude::*;
use crate::shared::*;
use crate::world::Tree;
use super::{ActorController, Player};

/// Resolves an expired interact timer.
///
/// A tree at the target point with apples on it gives one apple. Failing
/// that, an interaction zone touching the player fires: the bed puts the
/// player to sleep, the trader asks the shop UI to open.
pub fn handle_interact(
    mut interact_events: EventReader<InteractEvent>,
    mut trees: Query<(&mut Tree, &Placed)>,
    zones: Query<(&InteractionZone, &Placed), Without<Tree>>,
    mut player_query: Query<&mut ActorController, With<Player>>,
    mut rng: ResMut<WorldRng>,
    mut pickups: EventWriter<ItemPickupEvent>,
    mut trader: EventWriter<OpenTraderEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in interact_events.read() {
        let picked = trees
            .iter_mut()
            .find(|(_, placed)| contains_point(&placed.bounds, ev.target))
            .and_then(|(mut tree, _)| tree.pick_apple(&mut rng.0));
        if picked.is_some() {
            sfx.send(PlaySfxEvent::new("interact"));
            pickups.send(ItemPickupEvent { item: ItemId::Apple, quantity: 1 });
            continue;
        }

        let Some((zone, _)) = zones.iter().find(|(_, placed)| overlaps(&placed.bounds, &ev.hitbox))
        else {
            continue;
        };
        match zone.kind {
            InteractionKind::Bed => {
                if let Ok(mut controller) = player_query.get_single_mut() {
                    controller.fall_asleep();
                    info!("[Player] Went to bed");
                }
            }
            InteractionKind::Trader => {
                trader.send(OpenTraderEvent);
                info!("[Player] Opened the trader");
            }
        }
    }
}
