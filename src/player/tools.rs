use bevy::prelude::*;
use crate::inventory::Inventory;
use crate::shared::*;
use super::{ActorController, Player, TimerAction};

/// What using `item` does. Seeds are sown; produce does nothing.
pub fn tool_effect(item: &ItemId) -> ToolEffect {
    match item {
        ItemId::Hoe => ToolEffect::Till,
        ItemId::Axe => ToolEffect::Chop,
        ItemId::WateringCan => ToolEffect::Water,
        ItemId::Crop(kind) => ToolEffect::Sow(*kind),
        ItemId::Apple | ItemId::Wood => ToolEffect::Nothing,
    }
}

/// Polls the player's cooldown timers and turns expiries into world events.
///
/// A finished tool swing acts on the facing target. With a seed selected it
/// starts the seed-use countdown instead, and the seed is planted when that
/// one runs out, provided there is still stock of the selected seed.
pub fn dispatch_expired_timers(
    time: Res<Time>,
    inventory: Res<Inventory>,
    mut query: Query<&mut ActorController, With<Player>>,
    mut tool_events: EventWriter<ToolUseEvent>,
    mut seed_events: EventWriter<PlantSeedEvent>,
    mut interact_events: EventWriter<InteractEvent>,
) {
    let Ok(mut controller) = query.get_single_mut() else {
        return;
    };
    let now = now_ms(&time);
    let target = controller.target_point();

    for action in controller.timers.update(now) {
        match action {
            TimerAction::UseTool => match tool_effect(inventory.selected()) {
                ToolEffect::Sow(_) => {
                    controller.timers.seed_use.activate(now);
                    controller.direction = Vec2::ZERO;
                }
                ToolEffect::Nothing => {}
                effect => {
                    debug!("[Player] {effect:?} facing {} at {target}", controller.facing.label());
                    tool_events.send(ToolUseEvent { effect, target });
                }
            },
            TimerAction::PlantSeed => {
                if let ToolEffect::Sow(kind) = tool_effect(inventory.selected()) {
                    if inventory.selected_quantity() > 0 {
                        seed_events.send(PlantSeedEvent { kind, target });
                    }
                }
            }
            TimerAction::Interact => {
                interact_events.send(InteractEvent {
                    target,
                    hitbox: controller.hitbox(),
                });
            }
        }
    }
}
