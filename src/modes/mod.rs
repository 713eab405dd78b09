//! Top-level modes (main menu, the farm) and the manager that runs them.
//!
//! Exactly one mode is active at a time. A mode's `run` step reports what
//! the driver should do next through `RunOutcome`; leaving a mode or the
//! program is a normal outcome, not an error.

use std::fmt;
use std::rc::Rc;

use crate::config::DisplaySettings;
use crate::input::InputSource;

pub mod error;
pub mod farm;
pub mod main_menu;
pub mod manager;

pub use error::ModeError;
pub use farm::{build_world_app, FarmArgs, FarmMode};
pub use main_menu::{MainMenuMode, MenuEntry};
pub use manager::ModeManager;

/// A mode's identity: its type name.
pub type ModeName = String;

/// What the driving loop should do after a run step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Continue,
    /// Leave the current mode. `previous` is the mode active before it.
    ModeExit { previous: Option<ModeName> },
    /// Leave the program.
    ProgramExit { previous: Option<ModeName> },
}

/// Snapshot of the manager's pointers, handed to a mode so it can signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeControl {
    current: Option<ModeName>,
    previous: Option<ModeName>,
}

impl ModeControl {
    pub fn new(current: Option<ModeName>, previous: Option<ModeName>) -> Self {
        Self { current, previous }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn request_mode_exit(&self) -> Result<RunOutcome, ModeError> {
        match self.current {
            Some(_) => Ok(RunOutcome::ModeExit {
                previous: self.previous.clone(),
            }),
            None => Err(ModeError::NoActiveMode {
                previous: self.previous.clone(),
            }),
        }
    }

    pub fn request_program_exit(&self) -> RunOutcome {
        RunOutcome::ProgramExit {
            previous: self.previous.clone(),
        }
    }
}

/// Everything a mode may touch besides itself: the shared display settings,
/// the input source, and the manager's pointers.
pub struct ModeContext<'a> {
    pub display: &'a DisplaySettings,
    pub input: &'a mut dyn InputSource,
    pub control: ModeControl,
}

pub trait Mode {
    /// Called once, right after construction.
    fn setup(&mut self, _ctx: &mut ModeContext<'_>) {}

    /// One tick of the mode.
    fn run(&mut self, ctx: &mut ModeContext<'_>) -> Result<RunOutcome, ModeError>;
}

/// A mode the manager can construct by type.
pub trait ModeType: Mode + Sized + 'static {
    type Args: 'static;

    fn create(args: &Self::Args, ctx: &ModeContext<'_>) -> Self;

    /// Registry key. Defaults to the bare type name.
    fn mode_name() -> ModeName {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }
}

type ModeFactory = dyn Fn(&ModeContext<'_>) -> Box<dyn Mode>;

/// A mode type together with its construction arguments. Unregistering
/// hands this back so the same mode can be registered again.
#[derive(Clone)]
pub struct ModeBlueprint {
    name: ModeName,
    factory: Rc<ModeFactory>,
}

impl ModeBlueprint {
    pub fn of<M: ModeType>(args: M::Args) -> Self {
        Self {
            name: M::mode_name(),
            factory: Rc::new(move |ctx: &ModeContext<'_>| Box::new(M::create(&args, ctx)) as Box<dyn Mode>),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn build(&self, ctx: &ModeContext<'_>) -> Box<dyn Mode> {
        (self.factory)(ctx)
    }
}

impl fmt::Debug for ModeBlueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeBlueprint").field("name", &self.name).finish()
    }
}
