use bevy::log::info;

use crate::inventory::CyclicSelector;

use super::{Mode, ModeContext, ModeError, ModeType, RunOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEntry {
    Play,
    Quit,
}

/// Title screen: pick Play to leave for the farm, Quit to leave the program.
pub struct MainMenuMode {
    entries: CyclicSelector<MenuEntry>,
}

impl MainMenuMode {
    pub fn selected(&self) -> MenuEntry {
        *self.entries.selected()
    }
}

impl ModeType for MainMenuMode {
    type Args = ();

    fn create(_args: &(), _ctx: &ModeContext<'_>) -> Self {
        Self {
            entries: CyclicSelector::from_first(MenuEntry::Play, [MenuEntry::Quit]),
        }
    }
}

impl Mode for MainMenuMode {
    fn setup(&mut self, ctx: &mut ModeContext<'_>) {
        info!(
            "[Menu] Ready at {}x{}",
            ctx.display.width, ctx.display.height
        );
    }

    fn run(&mut self, ctx: &mut ModeContext<'_>) -> Result<RunOutcome, ModeError> {
        let input = ctx.input.poll();
        if input.quit {
            return Ok(ctx.control.request_program_exit());
        }

        if input.down || input.next_tool {
            self.entries.select_next();
        } else if input.up || input.previous_tool {
            self.entries.select_previous();
        }

        if input.interact || input.use_tool {
            info!("[Menu] Chose {:?}", self.selected());
            return match self.selected() {
                MenuEntry::Play => ctx.control.request_mode_exit(),
                MenuEntry::Quit => Ok(ctx.control.request_program_exit()),
            };
        }
        Ok(RunOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplaySettings;
    use crate::input::{InputSource, PlayerInput};
    use crate::modes::ModeControl;

    struct Keys(Vec<PlayerInput>);

    impl InputSource for Keys {
        fn poll(&mut self) -> PlayerInput {
            if self.0.is_empty() {
                PlayerInput::default()
            } else {
                self.0.remove(0)
            }
        }
    }

    fn run_menu(presses: Vec<PlayerInput>) -> (MainMenuMode, Vec<RunOutcome>) {
        let display = DisplaySettings::default();
        let count = presses.len();
        let mut keys = Keys(presses);
        let mut ctx = ModeContext {
            display: &display,
            input: &mut keys,
            control: ModeControl::new(Some("MainMenuMode".into()), None),
        };
        let mut menu = MainMenuMode::create(&(), &ctx);
        let outcomes = (0..count).map(|_| menu.run(&mut ctx).unwrap()).collect();
        (menu, outcomes)
    }

    #[test]
    fn test_confirm_play_leaves_mode() {
        let confirm = PlayerInput { interact: true, ..default_input() };
        let (_, outcomes) = run_menu(vec![confirm]);
        assert_eq!(outcomes, vec![RunOutcome::ModeExit { previous: None }]);
    }

    #[test]
    fn test_down_then_confirm_quits() {
        let down = PlayerInput { down: true, ..default_input() };
        let confirm = PlayerInput { interact: true, ..default_input() };
        let (menu, outcomes) = run_menu(vec![down, confirm]);
        assert_eq!(menu.selected(), MenuEntry::Quit);
        assert_eq!(
            outcomes,
            vec![RunOutcome::Continue, RunOutcome::ProgramExit { previous: None }]
        );
    }

    #[test]
    fn test_selection_wraps() {
        let up = PlayerInput { up: true, ..default_input() };
        let (menu, _) = run_menu(vec![up]);
        assert_eq!(menu.selected(), MenuEntry::Quit);
    }

    fn default_input() -> PlayerInput {
        PlayerInput::default()
    }
}
