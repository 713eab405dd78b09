//! Player domain: input sampling, movement with collision, cooldown timers
//! and the tool dispatch they trigger.

pub mod interaction;
pub mod movement;
pub mod timers;
pub mod tools;

use bevy::prelude::*;
use crate::config::{GameConfig, PlayerTuning};
use crate::input::PlayerInput;
use crate::inventory::Inventory;
use crate::shared::*;

pub use timers::{CooldownTimer, PlayerTimers, TimerAction};

/// Marker for the controlled actor.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Movement and tool state of the player.
///
/// `position` is the hitbox centre in map space (y-down). The direction is a
/// unit vector or zero; it is cleared while a tool or seed is in use.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ActorController {
    pub position: Vec2,
    pub direction: Vec2,
    pub facing: Facing,
    pub speed: f32,
    pub hitbox_size: Vec2,
    pub sleeping: bool,
    pub timers: PlayerTimers,
}

impl ActorController {
    pub fn new(position: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            position,
            direction: Vec2::ZERO,
            facing: Facing::Down,
            speed: tuning.speed,
            hitbox_size: Vec2::new(tuning.hitbox.0, tuning.hitbox.1),
            sleeping: false,
            timers: PlayerTimers::new(tuning),
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center_size(self.position, self.hitbox_size)
    }

    /// The point the selected tool acts on.
    pub fn target_point(&self) -> Vec2 {
        self.position + self.facing.tool_offset()
    }

    /// True while a tool swing is playing out or the player is asleep;
    /// input is ignored meanwhile.
    pub fn is_busy(&self) -> bool {
        self.timers.tool_use.is_active() || self.sleeping
    }

    /// Samples one tick of input: movement intent, facing, and the
    /// interact / tool-use / tool-switch triggers.
    pub fn apply_input(&mut self, input: &PlayerInput, inventory: &mut Inventory, now_ms: u64) {
        if self.is_busy() {
            return;
        }

        if input.up {
            self.facing = Facing::Up;
        } else if input.down {
            self.facing = Facing::Down;
        }
        if input.left {
            self.facing = Facing::Left;
        } else if input.right {
            self.facing = Facing::Right;
        }
        self.direction = input.direction();

        if input.interact {
            self.timers.interact.activate(now_ms);
        }

        if input.use_tool {
            self.timers.tool_use.activate(now_ms);
            self.direction = Vec2::ZERO;
        }

        if !input.use_tool && !self.timers.tool_switch.is_active() {
            if input.next_tool {
                self.timers.tool_switch.activate(now_ms);
                let item = inventory.select_next();
                debug!("[Player] Selected {item}");
            } else if input.previous_tool {
                self.timers.tool_switch.activate(now_ms);
                let item = inventory.select_previous();
                debug!("[Player] Selected {item}");
            }
        }
    }

    pub fn fall_asleep(&mut self) {
        self.sleeping = true;
        self.timers.seed_use.deactivate();
        self.timers.interact.deactivate();
        self.facing = Facing::Left;
        self.direction = Vec2::ZERO;
    }

    pub fn wake_up(&mut self) {
        self.sleeping = false;
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_event::<ToolUseEvent>()
            .add_event::<PlantSeedEvent>()
            .add_event::<InteractEvent>()
            .add_event::<PlaySfxEvent>()
            .add_event::<OpenTraderEvent>()
            .add_systems(Update, read_player_input.in_set(TickStage::Input))
            .add_systems(Update, movement::move_player.in_set(TickStage::Movement))
            .add_systems(Update, tools::dispatch_expired_timers.in_set(TickStage::Timers))
            .add_systems(Update, interaction::handle_interact.in_set(TickStage::Effects));
    }
}

/// Spawns the player at `position`.
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: &GameConfig) -> Entity {
    commands
        .spawn((Player, ActorController::new(position, &config.player)))
        .id()
}

fn read_player_input(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut inventory: ResMut<Inventory>,
    mut query: Query<&mut ActorController, With<Player>>,
) {
    let Ok(mut controller) = query.get_single_mut() else {
        return;
    };
    controller.apply_input(&input, &mut inventory, now_ms(&time));
}
