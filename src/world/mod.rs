//! World domain plugin.
//!
//! Responsible for:
//! - Spawning everything the map places: colliders, fences, water, trees,
//!   decorations, interaction zones and the player
//! - Axe hits on trees
//! - Regrowing apples each morning

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::player::spawn_player;
use crate::shared::*;

pub mod maps;
pub mod objects;

pub use maps::{MapData, MapObject, TileCoord};
pub use objects::{Tree, TreeSize};

use maps::{
    COLLISION_LAYER, DECORATION_LAYER, FENCE_LAYER, PLAYER_LAYER, TREES_LAYER, WATER_LAYER,
};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TreeFelledEvent>()
            .add_systems(Startup, spawn_world)
            .add_systems(Update, chop_trees.in_set(TickStage::Effects))
            .add_systems(
                Update,
                regrow_apples
                    .in_set(TickStage::DayCycle)
                    .after(crate::calendar::start_new_day),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWNING
// ═══════════════════════════════════════════════════════════════════════

/// Hitbox of generic map furniture: collision tiles and fences.
fn generic_hitbox(bounds: Rect) -> Rect {
    shrink(bounds, bounds.width() * 0.2, bounds.height() * 0.75)
}

fn tile_bounds(tile: TileCoord) -> Rect {
    let min = Vec2::new(tile.x as f32, tile.y as f32) * TILE_SIZE;
    Rect::from_corners(min, min + Vec2::splat(TILE_SIZE))
}

/// Builds the world from the map layers. Runs once, on the first tick.
pub fn spawn_world(
    mut commands: Commands,
    map: Res<MapData>,
    config: Res<GameConfig>,
    mut rng: ResMut<WorldRng>,
) {
    for (layer, visual) in [(COLLISION_LAYER, "collision"), (FENCE_LAYER, "fence")] {
        for &tile in map.tiles(layer) {
            let bounds = tile_bounds(tile);
            commands.spawn((
                Placed { bounds, visual: visual.to_string() },
                Collider { hitbox: generic_hitbox(bounds) },
            ));
        }
    }

    for &tile in map.tiles(WATER_LAYER) {
        commands.spawn(Placed {
            bounds: tile_bounds(tile),
            visual: "water".to_string(),
        });
    }

    for obj in map.objects(TREES_LAYER) {
        let bounds = obj.bounds();
        let size = TreeSize::from_name(&obj.name);
        let mut tree = Tree::new(size);
        tree.regrow_apples(bounds.min, &mut rng.0);
        commands.spawn((
            Placed { bounds, visual: size.visual().to_string() },
            Collider { hitbox: Tree::standing_hitbox(bounds) },
            tree,
        ));
    }

    for obj in map.objects(DECORATION_LAYER) {
        let bounds = obj.bounds();
        commands.spawn((
            Placed { bounds, visual: format!("decoration/{}", obj.name.to_lowercase()) },
            Collider { hitbox: shrink(bounds, 20.0, bounds.height() * 0.9) },
        ));
    }

    let mut start = None;
    for obj in map.objects(PLAYER_LAYER) {
        let kind = match obj.name.as_str() {
            "Start" => {
                start = Some(Vec2::new(obj.x, obj.y));
                continue;
            }
            "Bed" => InteractionKind::Bed,
            "Trader" => InteractionKind::Trader,
            other => {
                warn!("[World] Unknown player-layer object '{other}'");
                continue;
            }
        };
        commands.spawn((
            Placed {
                bounds: obj.bounds(),
                visual: format!("interaction/{}", obj.name.to_lowercase()),
            },
            InteractionZone { kind },
        ));
    }

    let start = start.unwrap_or_else(|| {
        warn!("[World] Map has no player start; using the map centre");
        map.centre(TILE_SIZE)
    });
    spawn_player(&mut commands, start, &config);

    info!(
        "[World] Spawned {}x{} map: {} trees, player at {}",
        map.width,
        map.height,
        map.objects(TREES_LAYER).len(),
        start
    );
}

// ═══════════════════════════════════════════════════════════════════════
// TREES
// ═══════════════════════════════════════════════════════════════════════

/// Axe hits land on the first standing tree whose bounds contain the target.
/// A felled tree drops its apples and one wood, and shrinks to a stump.
pub fn chop_trees(
    mut tool_events: EventReader<ToolUseEvent>,
    mut trees: Query<(Entity, &mut Tree, &mut Placed, &mut Collider)>,
    mut pickups: EventWriter<ItemPickupEvent>,
    mut felled: EventWriter<TreeFelledEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in tool_events.read() {
        if ev.effect != ToolEffect::Chop {
            continue;
        }
        sfx.send(PlaySfxEvent::new("axe"));

        let Some((entity, mut tree, mut placed, mut collider)) = trees
            .iter_mut()
            .find(|(_, tree, placed, _)| !tree.is_stump() && contains_point(&placed.bounds, ev.target))
        else {
            continue;
        };

        let Some(apples) = tree.damage() else {
            continue;
        };

        let (stump, hitbox) = Tree::stump_shape(placed.bounds);
        placed.bounds = stump;
        placed.visual = format!("stump/{}", placed.visual.trim_start_matches("tree/"));
        collider.hitbox = hitbox;

        if apples > 0 {
            pickups.send(ItemPickupEvent { item: ItemId::Apple, quantity: apples as i32 });
        }
        pickups.send(ItemPickupEvent { item: ItemId::Wood, quantity: WOOD_PER_TREE as i32 });
        sfx.send(PlaySfxEvent::new("interact"));
        felled.send(TreeFelledEvent { entity, apples });
        info!("[World] Tree felled, {apples} apples dropped");
    }
}

/// Every morning the standing trees reroll their apples.
pub fn regrow_apples(
    mut day_start: EventReader<DayStartEvent>,
    mut trees: Query<(&mut Tree, &Placed)>,
    mut rng: ResMut<WorldRng>,
) {
    if day_start.read().count() == 0 {
        return;
    }
    for (mut tree, placed) in trees.iter_mut() {
        tree.regrow_apples(placed.bounds.min, &mut rng.0);
    }
}
