//! The farm itself: a headless Bevy world stepped once per run.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::calendar::CalendarPlugin;
use crate::config::GameConfig;
use crate::data::DataPlugin;
use crate::farming::{FarmingPlugin, SoilGrid};
use crate::inventory::{Inventory, InventoryPlugin};
use crate::input::PlayerInput;
use crate::player::PlayerPlugin;
use crate::shared::*;
use crate::world::maps::FARMABLE_LAYER;
use crate::world::{MapData, WorldPlugin};

use super::{Mode, ModeContext, ModeError, ModeType, RunOutcome};

#[derive(Debug, Clone)]
pub struct FarmArgs {
    pub config: GameConfig,
    pub map: MapData,
}

/// Builds the simulation app for `map`. Nothing has run yet; the first
/// `update` runs the startup systems (registries, world spawn, first
/// weather roll). Every update advances the clock by one frame.
pub fn build_world_app(config: &GameConfig, map: &MapData) -> App {
    let farmable = map.tiles(FARMABLE_LAYER).iter().map(|&tile| GridCell::from(tile));
    let soil = SoilGrid::with_farmable(map.height, map.width, TILE_SIZE, farmable);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(config.display.frame_duration()))
        .insert_resource(config.clone())
        .insert_resource(map.clone())
        .insert_resource(soil)
        .insert_resource(Inventory::starting(config.player.starting_seeds))
        .insert_resource(WorldRng::new(config.seed))
        .configure_sets(
            Update,
            (
                TickStage::Input,
                TickStage::Movement,
                TickStage::Timers,
                TickStage::Effects,
                TickStage::Harvest,
                TickStage::DayCycle,
                TickStage::Flush,
            )
                .chain(),
        )
        .add_plugins((
            DataPlugin,
            InventoryPlugin,
            PlayerPlugin,
            FarmingPlugin,
            WorldPlugin,
            CalendarPlugin,
        ));
    app.finish();
    app.cleanup();
    app
}

pub struct FarmMode {
    app: App,
}

impl FarmMode {
    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}

impl ModeType for FarmMode {
    type Args = FarmArgs;

    fn create(args: &FarmArgs, ctx: &ModeContext<'_>) -> Self {
        let mut config = args.config.clone();
        config.display = ctx.display.clone();
        Self {
            app: build_world_app(&config, &args.map),
        }
    }
}

impl Mode for FarmMode {
    fn setup(&mut self, _ctx: &mut ModeContext<'_>) {
        self.app.update();
        info!("[Farm] World ready");
    }

    fn run(&mut self, ctx: &mut ModeContext<'_>) -> Result<RunOutcome, ModeError> {
        let input = ctx.input.poll();
        if input.quit {
            return Ok(ctx.control.request_program_exit());
        }
        if input.menu {
            return ctx.control.request_mode_exit();
        }
        self.app.insert_resource::<PlayerInput>(input);
        self.app.update();
        Ok(RunOutcome::Continue)
    }
}
