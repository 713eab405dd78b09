//! Input abstraction. Device polling lives in the front end; the core only
//! sees one `PlayerInput` snapshot per tick, pulled from an `InputSource`.

use std::collections::VecDeque;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{load_ron, parse_ron, LoadError};

/// Held buttons for one tick.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub interact: bool,
    pub use_tool: bool,
    pub next_tool: bool,
    pub previous_tool: bool,
    /// Leave the current mode.
    pub menu: bool,
    /// Leave the program.
    pub quit: bool,
}

impl PlayerInput {
    /// Unit movement intent in map space (y-down). Up wins over down and
    /// left over right when both are held.
    pub fn direction(&self) -> Vec2 {
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y).normalize_or_zero()
    }
}

/// Anything that can produce a per-tick input snapshot.
pub trait InputSource {
    fn poll(&mut self) -> PlayerInput;
}

/// A run of identical ticks in a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputStep {
    pub frames: u32,
    #[serde(default)]
    pub input: PlayerInput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct InputScript {
    steps: Vec<InputStep>,
}

/// Replays a fixed sequence of inputs, then asks to quit forever after.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: VecDeque<InputStep>,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = InputStep>) -> Self {
        Self {
            steps: steps.into_iter().filter(|s| s.frames > 0).collect(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let script: InputScript = load_ron(path)?;
        Ok(Self::new(script.steps))
    }

    pub fn from_ron_str(text: &str) -> Result<Self, LoadError> {
        let script: InputScript = parse_ron(text, "input script")?;
        Ok(Self::new(script.steps))
    }

    pub fn is_exhausted(&self) -> bool {
        self.steps.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> PlayerInput {
        let Some(step) = self.steps.front_mut() else {
            return PlayerInput { quit: true, ..default() };
        };
        let input = step.input.clone();
        step.frames -= 1;
        if step.frames == 0 {
            self.steps.pop_front();
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_normalised_and_prioritised() {
        let diag = PlayerInput { up: true, right: true, ..default() };
        let dir = diag.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y < 0.0);

        let both = PlayerInput { up: true, down: true, ..default() };
        assert_eq!(both.direction(), Vec2::new(0.0, -1.0));
        assert_eq!(PlayerInput::default().direction(), Vec2::ZERO);
    }

    #[test]
    fn test_script_replays_then_quits() {
        let mut source = ScriptedInput::new([
            InputStep { frames: 2, input: PlayerInput { right: true, ..default() } },
            InputStep { frames: 0, input: PlayerInput { left: true, ..default() } },
            InputStep { frames: 1, input: PlayerInput { use_tool: true, ..default() } },
        ]);
        assert!(source.poll().right);
        assert!(source.poll().right);
        assert!(source.poll().use_tool);
        assert!(source.is_exhausted());
        assert!(source.poll().quit);
        assert!(source.poll().quit);
    }

    #[test]
    fn test_script_parses_from_ron() {
        let mut source = ScriptedInput::from_ron_str(
            "(steps: [(frames: 1, input: (interact: true)), (frames: 3)])",
        )
        .unwrap();
        assert!(source.poll().interact);
        assert_eq!(source.poll(), PlayerInput::default());
    }
}
