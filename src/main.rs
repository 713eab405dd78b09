//! Dew Valley driver: loads the config, the map and an input script, then
//! steps the active mode until the program is asked to exit.

use anyhow::Context;
use bevy::log::info;
use tracing_subscriber::EnvFilter;

use dew_valley::config::GameConfig;
use dew_valley::input::ScriptedInput;
use dew_valley::modes::{FarmArgs, FarmMode, MainMenuMode, ModeManager, ModeType, RunOutcome};
use dew_valley::world::MapData;

const CONFIG_PATH: &str = "assets/config.ron";
const MAP_PATH: &str = "assets/farm.ron";
const INPUT_PATH: &str = "assets/demo_input.ron";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GameConfig::load_or_default(CONFIG_PATH);
    let map = MapData::load(MAP_PATH).context("loading the farm map")?;
    let input = ScriptedInput::load(INPUT_PATH).context("loading the input script")?;

    let mut modes = ModeManager::new(config.display.clone(), Box::new(input));
    modes.register::<MainMenuMode>((), false)?;
    modes.register::<FarmMode>(FarmArgs { config, map }, false)?;

    let menu = MainMenuMode::mode_name();
    let farm = FarmMode::mode_name();
    modes.activate(&menu)?;

    let mut ticks: u64 = 0;
    loop {
        ticks += 1;
        match modes.run_active()? {
            RunOutcome::Continue => {}
            RunOutcome::ModeExit { .. } => {
                // Menu and farm hand over to each other.
                let next = if modes.current() == Some(menu.as_str()) { &farm } else { &menu };
                modes.activate(next)?;
            }
            RunOutcome::ProgramExit { previous } => {
                info!("[Main] Exiting after {ticks} ticks (previous mode: {previous:?})");
                break;
            }
        }
    }
    Ok(())
}
