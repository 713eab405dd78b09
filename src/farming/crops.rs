//! Per-cell crop growth state.

use bevy::prelude::*;
use crate::shared::*;

/// A crop growing in one planted soil cell. Owned by the `SoilGrid`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantInstance {
    pub kind: CropKind,
    /// Fractional age in stages. Never decreases, never exceeds `max_age`.
    pub age: f32,
    pub max_age: f32,
    pub growth_rate: f32,
    pub harvestable: bool,
    /// Sprite bounds in map space; harvest-on-contact tests against these.
    pub bounds: Rect,
}

impl PlantInstance {
    /// A fresh seedling sitting on `soil`, lifted by the crop's sprite offset.
    pub fn new(def: &CropDef, soil: Rect) -> Self {
        let bounds = Rect::from_corners(
            Vec2::new(soil.min.x, soil.min.y + def.y_offset),
            Vec2::new(soil.max.x, soil.max.y + def.y_offset),
        );
        Self {
            kind: def.kind,
            age: 0.0,
            max_age: def.max_age(),
            growth_rate: def.growth_rate,
            harvestable: false,
            bounds,
        }
    }

    /// Visual growth stage, `0..=max_age`.
    pub fn stage(&self) -> u32 {
        self.age.floor() as u32
    }

    /// Plants block movement once they show their first grown stage.
    pub fn is_solid(&self) -> bool {
        self.stage() > 0
    }

    pub fn hitbox(&self) -> Option<Rect> {
        self.is_solid()
            .then(|| shrink(self.bounds, 26.0, self.bounds.height() * 0.4))
    }

    /// One watered day of growth. Clamps at `max_age`, where the plant turns
    /// harvestable. Returns true when the visual stage changed.
    pub fn grow(&mut self) -> bool {
        let before = self.stage();
        self.age += self.growth_rate;
        if self.age >= self.max_age {
            self.age = self.max_age;
            self.harvestable = true;
        }
        self.stage() != before
    }
}
