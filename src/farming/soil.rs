//! The soil grid: per-cell farming flags, tile variants and the plants.
//!
//! Every operation is a silent no-op when its precondition does not hold.
//! The boolean/count return values are diagnostics only.

use std::collections::BTreeMap;

use bevy::prelude::*;
use crate::shared::*;

use super::crops::PlantInstance;
use super::tiles::{Neighbors, TileVariant};
use super::{SoilTile, SoilVisualEvent};

/// Flags of one cell. `planted ⇒ tilled ⇒ farmable` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoilCell {
    pub farmable: bool,
    pub tilled: bool,
    pub watered: bool,
    pub planted: bool,
}

/// Which cells changed during a day of growth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthReport {
    pub grown: Vec<GridCell>,
    pub ripened: Vec<GridCell>,
}

#[derive(Resource, Debug, Clone)]
pub struct SoilGrid {
    rows: usize,
    cols: usize,
    tile_size: f32,
    cells: Vec<SoilCell>,
    tiles: Vec<SoilTile>,
    plants: BTreeMap<GridCell, PlantInstance>,
    raining: bool,
    pending: Vec<SoilVisualEvent>,
}

impl SoilGrid {
    pub fn new(rows: usize, cols: usize, tile_size: f32) -> Self {
        Self {
            rows,
            cols,
            tile_size,
            cells: vec![SoilCell::default(); rows * cols],
            tiles: Vec::new(),
            plants: BTreeMap::new(),
            raining: false,
            pending: Vec::new(),
        }
    }

    /// A grid whose farmable cells are fixed here, once. Cells outside the
    /// grid are skipped.
    pub fn with_farmable(
        rows: usize,
        cols: usize,
        tile_size: f32,
        farmable: impl IntoIterator<Item = GridCell>,
    ) -> Self {
        let mut grid = Self::new(rows, cols, tile_size);
        for cell in farmable {
            match grid.index(cell) {
                Some(i) => grid.cells[i].farmable = true,
                None => warn!("[Farming] Farmable tile {cell} lies outside the {rows}x{cols} grid"),
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn raining(&self) -> bool {
        self.raining
    }

    pub fn set_raining(&mut self, raining: bool) {
        self.raining = raining;
    }

    fn index(&self, cell: GridCell) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.cols).then(|| cell.row * self.cols + cell.col)
    }

    pub fn cell(&self, cell: GridCell) -> Option<&SoilCell> {
        self.index(cell).map(|i| &self.cells[i])
    }

    /// The cell whose bounds contain `point`, if any.
    pub fn cell_at(&self, point: Vec2) -> Option<GridCell> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let cell = GridCell::new(
            (point.y / self.tile_size).floor() as usize,
            (point.x / self.tile_size).floor() as usize,
        );
        self.index(cell).map(|_| cell)
    }

    pub fn cell_rect(&self, cell: GridCell) -> Rect {
        let min = Vec2::new(cell.col as f32, cell.row as f32) * self.tile_size;
        Rect::from_corners(min, min + Vec2::splat(self.tile_size))
    }

    /// Tilled-ness of the four orthogonal neighbours.
    pub fn neighbors(&self, cell: GridCell) -> Neighbors {
        let tilled = |row: Option<usize>, col: Option<usize>| match (row, col) {
            (Some(row), Some(col)) => self
                .cell(GridCell::new(row, col))
                .is_some_and(|c| c.tilled),
            _ => false,
        };
        Neighbors {
            top: tilled(cell.row.checked_sub(1), Some(cell.col)),
            right: tilled(Some(cell.row), cell.col.checked_add(1)),
            bottom: tilled(cell.row.checked_add(1), Some(cell.col)),
            left: tilled(Some(cell.row), cell.col.checked_sub(1)),
        }
    }

    /// Current tile sprites, one per tilled cell, in row-major order.
    pub fn tiles(&self) -> &[SoilTile] {
        &self.tiles
    }

    pub fn plant_at(&self, cell: GridCell) -> Option<&PlantInstance> {
        self.plants.get(&cell)
    }

    pub fn plants(&self) -> impl Iterator<Item = (GridCell, &PlantInstance)> {
        self.plants.iter().map(|(cell, plant)| (*cell, plant))
    }

    /// Hitboxes of plants that currently block movement.
    pub fn solid_plant_hitboxes(&self) -> impl Iterator<Item = Rect> + '_ {
        self.plants.values().filter_map(PlantInstance::hitbox)
    }

    /// Takes the visual changes queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SoilVisualEvent> {
        std::mem::take(&mut self.pending)
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Tills the farmable cell under `point`. Rebuilds every tile variant,
    /// and waters everything when it is raining.
    pub fn till(&mut self, point: Vec2) -> bool {
        let Some(i) = self.cell_at(point).and_then(|c| self.index(c)) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if !cell.farmable || cell.tilled {
            debug!("[Farming] Till at {point} ignored");
            return false;
        }
        cell.tilled = true;
        self.rebuild_tiles();
        if self.raining {
            self.water_all();
        }
        true
    }

    /// Waters the tilled cell under `point`.
    pub fn water(&mut self, point: Vec2) -> bool {
        let Some(cell) = self.cell_at(point) else {
            return false;
        };
        self.water_cell(cell)
    }

    fn water_cell(&mut self, cell: GridCell) -> bool {
        let Some(i) = self.index(cell) else {
            return false;
        };
        let soil = &mut self.cells[i];
        if !soil.tilled || soil.watered {
            return false;
        }
        soil.watered = true;
        self.pending.push(SoilVisualEvent::WaterOverlayAdded { cell });
        true
    }

    /// Waters every tilled cell. Returns how many were newly watered.
    pub fn water_all(&mut self) -> usize {
        let cells: Vec<GridCell> = self.all_cells().collect();
        cells.into_iter().filter(|&cell| self.water_cell(cell)).count()
    }

    /// Dries every cell.
    pub fn remove_water(&mut self) {
        for cell in &mut self.cells {
            cell.watered = false;
        }
        self.pending.push(SoilVisualEvent::WaterOverlaysCleared);
    }

    pub fn is_watered(&self, point: Vec2) -> bool {
        self.cell_at(point)
            .and_then(|c| self.cell(c))
            .is_some_and(|c| c.watered)
    }

    /// Plants `crop` in the tilled, empty cell under `point`.
    pub fn plant(&mut self, point: Vec2, crop: &CropDef) -> bool {
        let Some(cell) = self.cell_at(point) else {
            return false;
        };
        let Some(i) = self.index(cell) else {
            return false;
        };
        let soil = &mut self.cells[i];
        if !soil.tilled || soil.planted {
            debug!("[Farming] Planting {} at {cell} ignored", crop.kind.name());
            return false;
        }
        soil.planted = true;
        let plant = PlantInstance::new(crop, self.cell_rect(cell));
        self.plants.insert(cell, plant);
        self.pending.push(SoilVisualEvent::PlantAdded { cell, kind: crop.kind });
        true
    }

    /// One day of growth: every plant on a watered cell grows once.
    /// Plants on dry cells are untouched.
    pub fn advance_growth(&mut self) -> GrowthReport {
        let mut report = GrowthReport::default();
        let cols = self.cols;
        for (&cell, plant) in self.plants.iter_mut() {
            if !self.cells[cell.row * cols + cell.col].watered {
                continue;
            }
            let was_harvestable = plant.harvestable;
            if plant.grow() {
                self.pending.push(SoilVisualEvent::PlantGrew {
                    cell,
                    stage: plant.stage(),
                    solid: plant.is_solid(),
                });
            }
            report.grown.push(cell);
            if plant.harvestable && !was_harvestable {
                report.ripened.push(cell);
            }
        }
        report
    }

    /// Removes a harvestable plant and clears the cell's planted flag.
    pub fn harvest(&mut self, cell: GridCell) -> Option<(CropKind, u32)> {
        if !self.plants.get(&cell).is_some_and(|p| p.harvestable) {
            return None;
        }
        let plant = self.plants.remove(&cell)?;
        if let Some(i) = self.index(cell) {
            self.cells[i].planted = false;
        }
        self.pending.push(SoilVisualEvent::PlantRemoved { cell, kind: plant.kind });
        Some((plant.kind, HARVEST_YIELD))
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn all_cells(&self) -> impl Iterator<Item = GridCell> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |i| GridCell::new(i / cols, i % cols))
    }

    fn rebuild_tiles(&mut self) {
        let tiles: Vec<SoilTile> = self
            .all_cells()
            .filter(|&cell| self.cell(cell).is_some_and(|c| c.tilled))
            .map(|cell| SoilTile {
                cell,
                variant: TileVariant::from_neighbors(self.neighbors(cell)),
            })
            .collect();
        self.tiles = tiles.clone();
        self.pending.push(SoilVisualEvent::TilesRebuilt(tiles));
    }
}
