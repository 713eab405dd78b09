//! Handlers for the events that touch the soil: tool use, seed use and the
//! day cycle. Each handler is a thin wrapper over a `SoilGrid` operation.

use bevy::prelude::*;
use crate::config::GameConfig;
use crate::shared::*;
use super::{SoilGrid, SoilVisualEvent};

// ─────────────────────────────────────────────────────────────────────────────
// Tool and seed use
// ─────────────────────────────────────────────────────────────────────────────

/// Hoe and watering-can effects. The axe is handled by the world domain.
pub fn apply_tool_effects(
    mut tool_events: EventReader<ToolUseEvent>,
    mut soil: ResMut<SoilGrid>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in tool_events.read() {
        match ev.effect {
            ToolEffect::Till => {
                // The swing is heard whether or not the ground gives.
                sfx.send(PlaySfxEvent::new("hoe"));
                if soil.till(ev.target) {
                    debug!("[Farming] Tilled soil at {}", ev.target);
                }
            }
            ToolEffect::Water => {
                sfx.send(PlaySfxEvent::new("water"));
                soil.water(ev.target);
            }
            ToolEffect::Chop | ToolEffect::Sow(_) | ToolEffect::Nothing => {}
        }
    }
}

pub fn plant_seeds(
    mut seed_events: EventReader<PlantSeedEvent>,
    mut soil: ResMut<SoilGrid>,
    crop_registry: Res<CropRegistry>,
    config: Res<GameConfig>,
    mut pickups: EventWriter<ItemPickupEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in seed_events.read() {
        let Some(def) = crop_registry.get(ev.kind) else {
            warn!("[Farming] No crop definition for {:?}", ev.kind);
            continue;
        };
        if !soil.plant(ev.target, def) {
            continue;
        }
        sfx.send(PlaySfxEvent::new("plant"));
        if config.player.consume_seeds {
            pickups.send(ItemPickupEvent {
                item: ItemId::Crop(ev.kind),
                quantity: -1,
            });
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Day cycle
// ─────────────────────────────────────────────────────────────────────────────

/// Overnight growth. Runs before the new day's weather touches the soil, so
/// growth sees the water the player left on the ended day.
pub fn on_day_end(mut day_end: EventReader<DayEndEvent>, mut soil: ResMut<SoilGrid>) {
    for ev in day_end.read() {
        let report = soil.advance_growth();
        info!(
            "[Farming] Day {} ended: {} plants grew, {} ripened",
            ev.day,
            report.grown.len(),
            report.ripened.len()
        );
    }
}

/// Rain waters every tilled cell; a dry morning dries them all.
pub fn on_day_start(mut day_start: EventReader<DayStartEvent>, mut soil: ResMut<SoilGrid>) {
    for ev in day_start.read() {
        soil.set_raining(ev.raining);
        if ev.raining {
            let watered = soil.water_all();
            debug!("[Farming] Rain watered {watered} cells");
        } else {
            soil.remove_water();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Visual sync
// ─────────────────────────────────────────────────────────────────────────────

/// Forwards the grid's queued visual changes, in the order they happened.
pub fn flush_soil_events(mut soil: ResMut<SoilGrid>, mut out: EventWriter<SoilVisualEvent>) {
    for ev in soil.drain_events() {
        out.send(ev);
    }
}
