//! Trees: chopped with the axe, picked for apples, regrown every morning.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeSize {
    Small,
    Large,
}

impl TreeSize {
    /// Map object names are "Small" and "Large"; anything else is small.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Large" => TreeSize::Large,
            _ => TreeSize::Small,
        }
    }

    /// Where apples may hang, relative to the tree's top-left corner.
    pub fn apple_offsets(self) -> &'static [(f32, f32)] {
        match self {
            TreeSize::Small => &[(18.0, 17.0), (30.0, 37.0), (12.0, 50.0), (30.0, 45.0), (20.0, 30.0), (30.0, 10.0)],
            TreeSize::Large => &[(30.0, 24.0), (50.0, 65.0), (50.0, 50.0), (16.0, 40.0), (45.0, 50.0), (42.0, 70.0)],
        }
    }

    pub fn visual(self) -> &'static str {
        match self {
            TreeSize::Small => "tree/small",
            TreeSize::Large => "tree/large",
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Tree {
    pub size: TreeSize,
    pub health: u8,
    /// Apple positions in map space.
    pub apples: Vec<Vec2>,
}

impl Tree {
    pub fn new(size: TreeSize) -> Self {
        Self {
            size,
            health: TREE_HEALTH,
            apples: Vec::new(),
        }
    }

    pub fn is_stump(&self) -> bool {
        self.health == 0
    }

    /// Hitbox of a standing tree: a thin band through its middle.
    pub fn standing_hitbox(bounds: Rect) -> Rect {
        shrink(bounds, bounds.width() * 0.2, bounds.height() * 0.9)
    }

    /// Bounds and hitbox once felled: a stump in the bottom quarter of the
    /// tree's footprint.
    pub fn stump_shape(bounds: Rect) -> (Rect, Rect) {
        let stump = Rect::new(bounds.min.x, bounds.max.y - bounds.height() * 0.25, bounds.max.x, bounds.max.y);
        (stump, shrink(stump, 10.0, stump.height() * 0.95))
    }

    /// Rolls a fresh set of apples: each position has a 2-in-11 chance,
    /// at most `MAX_APPLES` in total. Stumps grow nothing.
    pub fn regrow_apples(&mut self, origin: Vec2, rng: &mut impl Rng) {
        self.apples.clear();
        if self.is_stump() {
            return;
        }
        for &(dx, dy) in self.size.apple_offsets() {
            if self.apples.len() >= MAX_APPLES {
                break;
            }
            if rng.gen_range(0..=10) < 2 {
                self.apples.push(origin + Vec2::new(dx, dy));
            }
        }
    }

    /// One axe hit. Returns the number of apples dropped when this hit
    /// fells the tree; stumps ignore further hits.
    pub fn damage(&mut self) -> Option<u32> {
        if self.is_stump() {
            return None;
        }
        self.health -= 1;
        if !self.is_stump() {
            return None;
        }
        let dropped = self.apples.len() as u32;
        self.apples.clear();
        Some(dropped)
    }

    /// Picks one apple at random, if any hang on the tree.
    pub fn pick_apple(&mut self, rng: &mut impl Rng) -> Option<Vec2> {
        if self.apples.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.apples.len());
        Some(self.apples.swap_remove(index))
    }
}
