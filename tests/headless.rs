//! Headless integration tests for Dew Valley.
//!
//! These tests drive the full simulation app (`build_world_app`) with
//! `MinimalPlugins` and a manual clock: every update advances time by one
//! frame, and the first update runs the startup systems with zero delta.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use dew_valley::calendar::Weather;
use dew_valley::config::{DisplaySettings, GameConfig, WeatherTuning};
use dew_valley::data::crops::default_registry;
use dew_valley::farming::{SoilGrid, TileVariant};
use dew_valley::input::{InputStep, PlayerInput, ScriptedInput};
use dew_valley::inventory::Inventory;
use dew_valley::modes::{
    build_world_app, FarmArgs, FarmMode, MainMenuMode, ModeManager, ModeType, RunOutcome,
};
use dew_valley::player::{ActorController, Player};
use dew_valley::shared::*;
use dew_valley::world::maps::{COLLISION_LAYER, FARMABLE_LAYER, PLAYER_LAYER, TREES_LAYER};
use dew_valley::world::{MapData, MapObject, Tree};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Player hitbox centre. Facing down, the tool lands on (160, 290): row 4,
/// column 2.
const START: Vec2 = Vec2::new(160.0, 240.0);
const PLOT: GridCell = GridCell { row: 4, col: 2 };
const TARGET: Vec2 = Vec2::new(160.0, 290.0);

/// 100 ms per update, no rain, a fast night.
fn test_config() -> GameConfig {
    GameConfig {
        display: DisplaySettings { fps: 10, ..default() },
        weather: WeatherTuning { rain_chance: 0.0, fade_speed: 64 },
        seed: Some(7),
        ..default()
    }
}

fn object(name: &str, x: f32, y: f32, width: f32, height: f32) -> MapObject {
    MapObject { name: name.to_string(), x, y, width, height }
}

/// A 10x8 map with two farmable cells under and beside the player's target.
fn plot_map() -> MapData {
    MapData::new(10, 8)
        .with_tiles(FARMABLE_LAYER, [(2, 4), (3, 4)])
        .with_object(PLAYER_LAYER, object("Start", START.x, START.y, 0.0, 0.0))
}

/// Builds the app and runs the startup tick.
fn build_test_app(map: MapData) -> App {
    let mut app = build_world_app(&test_config(), &map);
    app.update();
    app
}

fn tick(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

/// Holds `input` for one update, then releases everything.
fn press(app: &mut App, input: PlayerInput) {
    app.insert_resource(input);
    app.update();
    app.insert_resource(PlayerInput::default());
}

/// One full tool swing: 500 ms plus a frame of slack.
fn swing(app: &mut App) {
    press(app, PlayerInput { use_tool: true, ..default() });
    tick(app, 6);
}

fn select(app: &mut App, item: ItemId) {
    assert!(app.world_mut().resource_mut::<Inventory>().select(&item));
}

fn player(app: &mut App) -> ActorController {
    app.world_mut()
        .query_filtered::<&ActorController, With<Player>>()
        .single(app.world())
        .clone()
}

fn soil(app: &App) -> &SoilGrid {
    app.world().resource::<SoilGrid>()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_boot_spawns_player_and_loads_crops() {
    let mut app = build_test_app(plot_map());

    let controller = player(&mut app);
    assert_eq!(controller.position, START);
    assert_eq!(controller.facing, Facing::Down);
    assert_eq!(controller.target_point(), TARGET);

    assert_eq!(app.world().resource::<CropRegistry>().crops.len(), 2);
    assert_eq!(app.world().resource::<Weather>().day, 1);
    assert_eq!(app.world().resource::<Inventory>().selected(), &ItemId::Hoe);
}

// ─────────────────────────────────────────────────────────────────────────────
// Farming through input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hoe_swing_tills_target_cell() {
    let mut app = build_test_app(plot_map());

    press(&mut app, PlayerInput { use_tool: true, ..default() });
    // Mid-swing nothing has happened yet.
    tick(&mut app, 2);
    assert!(!soil(&app).cell(PLOT).unwrap().tilled);

    tick(&mut app, 4);
    let cell = soil(&app).cell(PLOT).unwrap();
    assert!(cell.tilled);
    assert_eq!(soil(&app).tiles().len(), 1);
    assert_eq!(soil(&app).tiles()[0].variant, TileVariant::Alone);
}

#[test]
fn test_next_tool_input_cycles_selection() {
    let mut app = build_test_app(plot_map());

    press(&mut app, PlayerInput { next_tool: true, ..default() });
    assert_eq!(app.world().resource::<Inventory>().selected(), &ItemId::Axe);

    // Held again before the switch cooldown ends: ignored.
    press(&mut app, PlayerInput { next_tool: true, ..default() });
    assert_eq!(app.world().resource::<Inventory>().selected(), &ItemId::Axe);

    tick(&mut app, 2);
    press(&mut app, PlayerInput { next_tool: true, ..default() });
    assert_eq!(app.world().resource::<Inventory>().selected(), &ItemId::WateringCan);
}

#[test]
fn test_till_water_and_sow() {
    let mut app = build_test_app(plot_map());

    swing(&mut app);
    select(&mut app, ItemId::WateringCan);
    swing(&mut app);
    assert!(soil(&app).is_watered(TARGET));

    select(&mut app, ItemId::Crop(CropKind::Corn));
    press(&mut app, PlayerInput { use_tool: true, ..default() });
    // Swing (500 ms) then seed use (200 ms).
    tick(&mut app, 8);

    let plant = soil(&app).plant_at(PLOT).expect("corn planted");
    assert_eq!(plant.kind, CropKind::Corn);
    assert_eq!(plant.stage(), 0);
    assert!(soil(&app).cell(PLOT).unwrap().planted);
    // Seeds are not consumed by default.
    assert_eq!(
        app.world().resource::<Inventory>().quantity(&ItemId::Crop(CropKind::Corn)),
        Some(5)
    );
}

#[test]
fn test_sowing_untilled_ground_does_nothing() {
    let mut app = build_test_app(plot_map());

    select(&mut app, ItemId::Crop(CropKind::Tomato));
    press(&mut app, PlayerInput { use_tool: true, ..default() });
    tick(&mut app, 8);

    assert!(soil(&app).plant_at(PLOT).is_none());
    assert!(!soil(&app).cell(PLOT).unwrap().planted);
}

// ─────────────────────────────────────────────────────────────────────────────
// Day cycle
// ─────────────────────────────────────────────────────────────────────────────

/// Tills, plants corn and waters the plot directly on the grid.
fn prepared_plot() -> App {
    let mut app = build_test_app(plot_map());
    let corn = default_registry().get(CropKind::Corn).cloned().unwrap();
    {
        let mut soil = app.world_mut().resource_mut::<SoilGrid>();
        assert!(soil.till(TARGET));
        assert!(soil.plant(TARGET, &corn));
        assert!(soil.water(TARGET));
    }
    app
}

fn end_day(app: &mut App) {
    let day = app.world().resource::<Weather>().day;
    app.world_mut().send_event(DayEndEvent { day });
    app.update();
}

#[test]
fn test_day_end_grows_watered_plants_and_dries_soil() {
    let mut app = prepared_plot();

    end_day(&mut app);

    assert_eq!(app.world().resource::<Weather>().day, 2);
    let plant = soil(&app).plant_at(PLOT).unwrap();
    assert_eq!(plant.stage(), 1);
    assert!(plant.is_solid());
    assert!(!soil(&app).is_watered(TARGET));

    // Dry overnight: no growth.
    end_day(&mut app);
    assert_eq!(soil(&app).plant_at(PLOT).unwrap().stage(), 1);
}

#[test]
fn test_ripe_plant_is_harvested_on_contact() {
    let mut app = prepared_plot();

    for _ in 0..3 {
        app.world_mut().resource_mut::<SoilGrid>().water(TARGET);
        end_day(&mut app);
    }
    assert!(soil(&app).plant_at(PLOT).unwrap().harvestable);

    // The player stands on the plot; the next tick picks the crop.
    app.update();

    assert!(soil(&app).plant_at(PLOT).is_none());
    assert!(!soil(&app).cell(PLOT).unwrap().planted);
    assert!(soil(&app).cell(PLOT).unwrap().tilled);
    assert_eq!(
        app.world().resource::<Inventory>().quantity(&ItemId::Crop(CropKind::Corn)),
        Some(5 + HARVEST_YIELD as i32)
    );
}

#[test]
fn test_sleeping_in_bed_ends_the_day() {
    let map = plot_map().with_object(PLAYER_LAYER, object("Bed", 120.0, 200.0, 80.0, 40.0));
    let mut app = build_test_app(map);
    let corn = default_registry().get(CropKind::Corn).cloned().unwrap();
    {
        let mut soil = app.world_mut().resource_mut::<SoilGrid>();
        soil.till(TARGET);
        soil.plant(TARGET, &corn);
        soil.water(TARGET);
    }

    press(&mut app, PlayerInput { interact: true, ..default() });
    tick(&mut app, 1);
    let controller = player(&mut app);
    assert!(controller.sleeping);
    assert_eq!(controller.facing, Facing::Left);

    // Input is ignored while asleep.
    press(&mut app, PlayerInput { right: true, ..default() });
    assert_eq!(player(&mut app).position, START);

    // Four steps down to dark, four back up to light.
    tick(&mut app, 10);
    assert_eq!(app.world().resource::<Weather>().day, 2);
    assert!(!player(&mut app).sleeping);
    assert_eq!(soil(&app).plant_at(PLOT).unwrap().stage(), 1);
}

#[test]
fn test_trader_zone_opens_shop() {
    let map = plot_map().with_object(PLAYER_LAYER, object("Trader", 100.0, 200.0, 40.0, 40.0));
    let mut app = build_test_app(map);

    press(&mut app, PlayerInput { interact: true, ..default() });
    app.update();

    let opened = app
        .world()
        .resource::<Events<OpenTraderEvent>>()
        .iter_current_update_events()
        .count();
    assert_eq!(opened, 1);
    assert!(!player(&mut app).sleeping);
}

// ─────────────────────────────────────────────────────────────────────────────
// Trees
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_axe_fells_tree_after_five_hits() {
    let map = MapData::new(10, 8)
        .with_object(PLAYER_LAYER, object("Start", START.x, START.y, 0.0, 0.0))
        .with_object(TREES_LAYER, object("Small", 128.0, 260.0, 64.0, 128.0));
    let mut app = build_test_app(map);
    select(&mut app, ItemId::Axe);

    for _ in 0..TREE_HEALTH - 1 {
        swing(&mut app);
    }
    {
        let world = app.world_mut();
        let tree = world.query::<&Tree>().single(world);
        assert_eq!(tree.health, 1);
    }

    swing(&mut app);
    let world = app.world_mut();
    let (tree, placed) = world.query::<(&Tree, &Placed)>().single(world);
    assert!(tree.is_stump());
    assert!(tree.apples.is_empty());
    assert_eq!(placed.visual, "stump/small");
    assert_eq!(placed.bounds.min.y, 260.0 + 128.0 * 0.75);
    assert_eq!(
        app.world().resource::<Inventory>().quantity(&ItemId::Wood),
        Some(WOOD_PER_TREE as i32)
    );

    // A stump takes no more hits.
    swing(&mut app);
    assert_eq!(
        app.world().resource::<Inventory>().quantity(&ItemId::Wood),
        Some(WOOD_PER_TREE as i32)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Movement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_walking_into_a_wall_stops_at_its_hitbox() {
    // Wall tile spans x 256..320; its hitbox x 262.4..313.6, y 216..232.
    let map = plot_map().with_tiles(COLLISION_LAYER, [(4, 3)]);
    let mut app = build_test_app(map);

    app.insert_resource(PlayerInput { right: true, ..default() });
    tick(&mut app, 20);

    let controller = player(&mut app);
    assert_eq!(controller.facing, Facing::Right);
    assert!(controller.position.x > START.x);
    assert!(controller.hitbox().max.x <= 262.4 + 1e-3);
    assert_eq!(controller.position.y, START.y);
}

#[test]
fn test_free_walk_covers_speed_times_time() {
    let mut app = build_test_app(plot_map());

    app.insert_resource(PlayerInput { right: true, ..default() });
    tick(&mut app, 2);

    // 300 px/s for two 100 ms frames.
    let moved = player(&mut app).position.x - START.x;
    assert!((moved - 60.0).abs() < 1e-3, "moved {moved}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Modes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_menu_to_farm_and_back_then_quit() {
    let script = ScriptedInput::new([
        InputStep { frames: 1, input: PlayerInput { interact: true, ..default() } },
        InputStep { frames: 3, input: PlayerInput::default() },
        InputStep { frames: 1, input: PlayerInput { menu: true, ..default() } },
    ]);
    let mut modes = ModeManager::new(test_config().display, Box::new(script));
    modes.register::<MainMenuMode>((), false).unwrap();
    modes
        .register::<FarmMode>(FarmArgs { config: test_config(), map: plot_map() }, false)
        .unwrap();

    let menu = MainMenuMode::mode_name();
    let farm = FarmMode::mode_name();
    modes.activate(&menu).unwrap();

    assert_eq!(modes.run_active().unwrap(), RunOutcome::ModeExit { previous: None });
    modes.activate(&farm).unwrap();

    for _ in 0..3 {
        assert_eq!(modes.run_active().unwrap(), RunOutcome::Continue);
    }
    assert_eq!(
        modes.run_active().unwrap(),
        RunOutcome::ModeExit { previous: Some(menu.clone()) }
    );
    modes.activate(&menu).unwrap();
    assert_eq!(modes.previous(), Some(farm.as_str()));

    // The script is spent: every poll now asks to quit.
    assert_eq!(
        modes.run_active().unwrap(),
        RunOutcome::ProgramExit { previous: Some(farm.clone()) }
    );
}
