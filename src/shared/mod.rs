//! Shared components, resources, events and constants for Dew Valley.
//!
//! This is the type contract. Every domain plugin imports from here.
//! Domains talk to each other through these events; the soil grid and the
//! inventory are the two resources more than one domain mutates.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

/// Edge length of one map tile, in pixels.
pub const TILE_SIZE: f32 = 64.0;

/// Quantity credited to the inventory when a ripe plant is harvested.
pub const HARVEST_YIELD: u32 = 2;

pub const TREE_HEALTH: u8 = 5;
pub const MAX_APPLES: usize = 3;

/// Wood credited when a tree is felled.
pub const WOOD_PER_TREE: u32 = 1;

// ═══════════════════════════════════════════════════════════════════════
// TICK ORDER
// ═══════════════════════════════════════════════════════════════════════

/// Stages of one simulation tick, chained in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickStage {
    Input,
    Movement,
    Timers,
    Effects,
    Harvest,
    DayCycle,
    Flush,
}

// ═══════════════════════════════════════════════════════════════════════
// GRID & GEOMETRY
// ═══════════════════════════════════════════════════════════════════════

/// A cell of the soil grid. Row grows downwards (map space is y-down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Shrinks a rectangle around its centre, like a negative inflate.
/// The result never has a negative size.
pub fn shrink(rect: Rect, dx: f32, dy: f32) -> Rect {
    let size = (rect.size() - Vec2::new(dx, dy)).max(Vec2::ZERO);
    Rect::from_center_size(rect.center(), size)
}

/// Strict overlap: rectangles that only share an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Half-open point test (`min <= p < max`), so a point on a shared edge
/// belongs to exactly one of two adjacent tiles.
pub fn contains_point(rect: &Rect, point: Vec2) -> bool {
    point.x >= rect.min.x && point.x < rect.max.x && point.y >= rect.min.y && point.y < rect.max.y
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER FACING
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Offset from the player's centre to the point a tool acts on.
    pub fn tool_offset(self) -> Vec2 {
        match self {
            Facing::Left => Vec2::new(-50.0, 40.0),
            Facing::Right => Vec2::new(50.0, 40.0),
            Facing::Up => Vec2::new(0.0, -10.0),
            Facing::Down => Vec2::new(0.0, 50.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CropKind {
    Corn,
    Tomato,
}

impl CropKind {
    pub fn name(self) -> &'static str {
        match self {
            CropKind::Corn => "corn",
            CropKind::Tomato => "tomato",
        }
    }
}

/// Everything the inventory selector can hold. Crops double as their own seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemId {
    Hoe,
    Axe,
    WateringCan,
    Crop(CropKind),
    Apple,
    Wood,
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Hoe => f.write_str("hoe"),
            ItemId::Axe => f.write_str("axe"),
            ItemId::WateringCan => f.write_str("water"),
            ItemId::Crop(kind) => f.write_str(kind.name()),
            ItemId::Apple => f.write_str("apple"),
            ItemId::Wood => f.write_str("wood"),
        }
    }
}

/// Static growth data for one crop kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CropDef {
    pub kind: CropKind,
    /// Age gained per watered day.
    pub growth_rate: f32,
    /// Number of visual growth stages; the last one is harvestable.
    pub stages: u32,
    /// Vertical sprite offset against the soil tile, in pixels (y-down).
    pub y_offset: f32,
}

impl CropDef {
    pub fn max_age(&self) -> f32 {
        self.stages.saturating_sub(1) as f32
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CropRegistry {
    pub crops: HashMap<CropKind, CropDef>,
}

impl CropRegistry {
    pub fn get(&self, kind: CropKind) -> Option<&CropDef> {
        self.crops.get(&kind)
    }
}

/// What using the selected item does to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEffect {
    Till,
    Chop,
    Water,
    Sow(CropKind),
    Nothing,
}

// ═══════════════════════════════════════════════════════════════════════
// PLACED ENTITIES
// ═══════════════════════════════════════════════════════════════════════

/// Record shared by everything spawned from the map: where it is and which
/// sprite the front end should draw for it.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Placed {
    pub bounds: Rect,
    pub visual: String,
}

/// Collidable capability. Movement resolves against `hitbox`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub hitbox: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    Bed,
    Trader,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct InteractionZone {
    pub kind: InteractionKind,
}

// ═══════════════════════════════════════════════════════════════════════
// RANDOMNESS & CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// The single random source of a world. Seeded from config for reproducible runs.
#[derive(Resource, Debug)]
pub struct WorldRng(pub StdRng);

impl WorldRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl Default for WorldRng {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Monotonic millisecond clock used by cooldown timers.
pub fn now_ms(time: &Time) -> u64 {
    time.elapsed().as_millis() as u64
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// The tool-use cooldown expired with a tool selected.
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub effect: ToolEffect,
    pub target: Vec2,
}

/// The seed-use cooldown expired with a seed in stock.
#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub kind: CropKind,
    pub target: Vec2,
}

/// The interact cooldown expired.
#[derive(Event, Debug, Clone)]
pub struct InteractEvent {
    pub target: Vec2,
    pub hitbox: Rect,
}

/// Credit (or debit, when negative) the inventory.
#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub item: ItemId,
    pub quantity: i32,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub kind: CropKind,
    pub quantity: u32,
    pub cell: GridCell,
}

#[derive(Event, Debug, Clone)]
pub struct TreeFelledEvent {
    pub entity: Entity,
    pub apples: u32,
}

/// The sleep transition reached full darkness; the current day is over.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
}

/// A new day has begun with freshly rolled weather.
#[derive(Event, Debug, Clone)]
pub struct DayStartEvent {
    pub day: u32,
    pub raining: bool,
}

/// Asks the external shop UI to open.
#[derive(Event, Debug, Clone)]
pub struct OpenTraderEvent;

/// Sound cue for the external audio collaborator.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

impl PlaySfxEvent {
    pub fn new(sfx_id: &str) -> Self {
        Self { sfx_id: sfx_id.to_string() }
    }
}
