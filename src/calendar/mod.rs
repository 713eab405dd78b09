//! Calendar domain: weather, the sleep transition and the day boundary.
//!
//! Going to bed starts a fade to black. At full darkness the day ends
//! (`DayEndEvent`), the next day's weather is rolled (`DayStartEvent`),
//! and the fade reverses; the player wakes when it is fully light again.

use bevy::prelude::*;
use rand::Rng;

use crate::config::GameConfig;
use crate::farming::SoilGrid;
use crate::player::{ActorController, Player};
use crate::shared::*;

/// Brightness of a fully lit day.
pub const FULL_BRIGHTNESS: i32 = 255;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Weather {
    pub day: u32,
    pub raining: bool,
}

impl Default for Weather {
    fn default() -> Self {
        Self { day: 1, raining: false }
    }
}

/// The overnight fade. `level` runs 255 → 0 → 255 while the player sleeps.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SleepTransition {
    pub level: i32,
    pub step: i32,
}

impl SleepTransition {
    pub fn new(fade_speed: i32) -> Self {
        Self {
            level: FULL_BRIGHTNESS,
            step: -fade_speed.abs().max(1),
        }
    }

    pub fn brightness(&self) -> u8 {
        self.level.clamp(0, FULL_BRIGHTNESS) as u8
    }
}

impl Default for SleepTransition {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Outcome of one fade step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStep {
    Fading,
    /// Reached darkness this step; the day is over.
    Dark,
    /// Fully light again; the sleeper wakes.
    Light,
}

impl SleepTransition {
    pub fn advance(&mut self) -> FadeStep {
        self.level += self.step;
        if self.level <= 0 {
            self.level = 0;
            self.step = self.step.abs();
            return FadeStep::Dark;
        }
        if self.level > FULL_BRIGHTNESS {
            self.level = FULL_BRIGHTNESS;
            self.step = -self.step.abs();
            return FadeStep::Light;
        }
        FadeStep::Fading
    }
}

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Weather>()
            .init_resource::<SleepTransition>()
            .add_event::<DayEndEvent>()
            .add_event::<DayStartEvent>()
            .add_systems(Startup, roll_first_day)
            .add_systems(
                Update,
                (run_sleep_transition, start_new_day)
                    .chain()
                    .in_set(TickStage::DayCycle),
            );
    }
}

fn roll_rain(config: &GameConfig, rng: &mut WorldRng) -> bool {
    rng.0.gen_bool(config.weather.rain_chance.clamp(0.0, 1.0))
}

fn roll_first_day(
    config: Res<GameConfig>,
    mut rng: ResMut<WorldRng>,
    mut weather: ResMut<Weather>,
    mut transition: ResMut<SleepTransition>,
    mut soil: ResMut<SoilGrid>,
) {
    *transition = SleepTransition::new(config.weather.fade_speed);
    weather.raining = roll_rain(&config, &mut rng);
    soil.set_raining(weather.raining);
    info!("[Calendar] Day {} begins, raining: {}", weather.day, weather.raining);
}

/// Steps the fade while the player sleeps.
pub fn run_sleep_transition(
    mut transition: ResMut<SleepTransition>,
    weather: Res<Weather>,
    mut player_query: Query<&mut ActorController, With<Player>>,
    mut day_end: EventWriter<DayEndEvent>,
) {
    let Ok(mut controller) = player_query.get_single_mut() else {
        return;
    };
    if !controller.sleeping {
        return;
    }
    match transition.advance() {
        FadeStep::Dark => {
            day_end.send(DayEndEvent { day: weather.day });
        }
        FadeStep::Light => {
            controller.wake_up();
            info!("[Calendar] Player woke up on day {}", weather.day);
        }
        FadeStep::Fading => {}
    }
}

/// Turns the page: next day number and fresh weather.
pub fn start_new_day(
    mut day_end: EventReader<DayEndEvent>,
    config: Res<GameConfig>,
    mut rng: ResMut<WorldRng>,
    mut weather: ResMut<Weather>,
    mut day_start: EventWriter<DayStartEvent>,
) {
    for ev in day_end.read() {
        weather.day = ev.day + 1;
        weather.raining = roll_rain(&config, &mut rng);
        info!("[Calendar] Day {} begins, raining: {}", weather.day, weather.raining);
        day_start.send(DayStartEvent {
            day: weather.day,
            raining: weather.raining,
        });
    }
}
