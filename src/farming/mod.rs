//! Farming domain: soil tilling, watering, planting, crop growth, harvest.
//!
//! All soil state lives in the `SoilGrid` resource. Systems here translate
//! tool, seed and day-cycle events into grid operations and forward the
//! grid's visual changes as `SoilVisualEvent`s.

use bevy::prelude::*;
use crate::shared::*;

pub mod crops;
pub mod events_handler;
pub mod harvest;
pub mod soil;
pub mod tiles;

pub use crops::PlantInstance;
pub use soil::{GrowthReport, SoilCell, SoilGrid};
pub use tiles::{Neighbors, TileVariant};

/// One soil tile sprite: where it is and which of the 16 variants to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoilTile {
    pub cell: GridCell,
    pub variant: TileVariant,
}

/// Visual changes produced by the soil grid, for the render collaborator.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SoilVisualEvent {
    /// Discard every soil tile sprite and draw these instead.
    TilesRebuilt(Vec<SoilTile>),
    WaterOverlayAdded { cell: GridCell },
    WaterOverlaysCleared,
    PlantAdded { cell: GridCell, kind: CropKind },
    PlantGrew { cell: GridCell, stage: u32, solid: bool },
    PlantRemoved { cell: GridCell, kind: CropKind },
}

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SoilVisualEvent>()
            .add_event::<CropHarvestedEvent>()
            // Tool and seed responses
            .add_systems(
                Update,
                (
                    events_handler::apply_tool_effects,
                    events_handler::plant_seeds,
                )
                    .chain()
                    .in_set(TickStage::Effects),
            )
            .add_systems(
                Update,
                harvest::harvest_on_contact.in_set(TickStage::Harvest),
            )
            // Overnight: growth first, then the new day's weather
            .add_systems(
                Update,
                events_handler::on_day_end
                    .in_set(TickStage::DayCycle)
                    .after(crate::calendar::run_sleep_transition)
                    .before(crate::calendar::start_new_day),
            )
            .add_systems(
                Update,
                events_handler::on_day_start
                    .in_set(TickStage::DayCycle)
                    .after(crate::calendar::start_new_day),
            )
            .add_systems(
                Update,
                events_handler::flush_soil_events.in_set(TickStage::Flush),
            );
    }
}
