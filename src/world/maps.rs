//! Map data: named tile layers and object layers, as exported by the level
//! editor and converted to RON.
//!
//! The world reads these layers once, when it is built:
//!   tile layers:   Farmable, Collision, Fence, Water
//!   object layers: Trees, Decoration, Player (Start / Bed / Trader)

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{load_ron, parse_ron, LoadError};
use crate::shared::*;

pub const FARMABLE_LAYER: &str = "Farmable";
pub const COLLISION_LAYER: &str = "Collision";
pub const FENCE_LAYER: &str = "Fence";
pub const WATER_LAYER: &str = "Water";
pub const TREES_LAYER: &str = "Trees";
pub const DECORATION_LAYER: &str = "Decoration";
pub const PLAYER_LAYER: &str = "Player";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: usize,
    pub y: usize,
}

impl From<TileCoord> for GridCell {
    fn from(t: TileCoord) -> Self {
        GridCell::new(t.y, t.x)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub tiles: Vec<TileCoord>,
}

/// A named object in pixel space. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl MapObject {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectLayer {
    pub name: String,
    pub objects: Vec<MapObject>,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Width in tiles.
    pub width: usize,
    /// Height in tiles.
    pub height: usize,
    #[serde(default)]
    pub tile_layers: Vec<TileLayer>,
    #[serde(default)]
    pub object_layers: Vec<ObjectLayer>,
}

impl MapData {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tile_layers: Vec::new(),
            object_layers: Vec::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        load_ron(path)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, LoadError> {
        parse_ron(text, "map")
    }

    /// Tiles of the named layer; empty when the layer does not exist.
    pub fn tiles(&self, layer: &str) -> &[TileCoord] {
        self.tile_layers
            .iter()
            .find(|l| l.name == layer)
            .map(|l| l.tiles.as_slice())
            .unwrap_or(&[])
    }

    /// Objects of the named layer; empty when the layer does not exist.
    pub fn objects(&self, layer: &str) -> &[MapObject] {
        self.object_layers
            .iter()
            .find(|l| l.name == layer)
            .map(|l| l.objects.as_slice())
            .unwrap_or(&[])
    }

    pub fn with_tiles(mut self, layer: &str, tiles: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let tiles = tiles.into_iter().map(|(x, y)| TileCoord { x, y });
        match self.tile_layers.iter_mut().find(|l| l.name == layer) {
            Some(existing) => existing.tiles.extend(tiles),
            None => self.tile_layers.push(TileLayer {
                name: layer.to_string(),
                tiles: tiles.collect(),
            }),
        }
        self
    }

    pub fn with_object(mut self, layer: &str, object: MapObject) -> Self {
        match self.object_layers.iter_mut().find(|l| l.name == layer) {
            Some(existing) => existing.objects.push(object),
            None => self.object_layers.push(ObjectLayer {
                name: layer.to_string(),
                objects: vec![object],
            }),
        }
        self
    }

    /// Pixel-space centre of the map, used when no start point is given.
    pub fn centre(&self, tile_size: f32) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * tile_size / 2.0
    }
}
