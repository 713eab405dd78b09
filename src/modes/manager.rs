//! Registry of modes and the active/previous pointers.

use bevy::log::{info, warn};

use crate::config::DisplaySettings;
use crate::input::InputSource;

use super::{Mode, ModeBlueprint, ModeContext, ModeControl, ModeError, ModeName, ModeType, RunOutcome};

struct ModeEntry {
    blueprint: ModeBlueprint,
    instance: Box<dyn Mode>,
}

/// Owns every registered mode and drives whichever one is active.
///
/// Registration order is kept: `names()` and `reload` preserve it.
pub struct ModeManager {
    display: DisplaySettings,
    input: Box<dyn InputSource>,
    modes: Vec<ModeEntry>,
    current: Option<ModeName>,
    previous: Option<ModeName>,
}

impl ModeManager {
    pub fn new(display: DisplaySettings, input: Box<dyn InputSource>) -> Self {
        Self {
            display,
            input,
            modes: Vec::new(),
            current: None,
            previous: None,
        }
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modes.iter().map(|entry| entry.blueprint.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.modes.iter().position(|entry| entry.blueprint.name() == name)
    }

    fn control(&self) -> ModeControl {
        ModeControl::new(self.current.clone(), self.previous.clone())
    }

    // ───────────────────────────────────────────────────────────────────
    // Registration
    // ───────────────────────────────────────────────────────────────────

    /// Builds an `M` from `args`, runs its setup and stores it.
    ///
    /// Registering a name twice fails unless `force` is set, in which case
    /// the old instance is replaced in place.
    pub fn register<M: ModeType>(&mut self, args: M::Args, force: bool) -> Result<(), ModeError> {
        self.register_blueprint(ModeBlueprint::of::<M>(args), force)
    }

    pub fn register_blueprint(&mut self, blueprint: ModeBlueprint, force: bool) -> Result<(), ModeError> {
        let slot = self.position(blueprint.name());
        if slot.is_some() && !force {
            return Err(ModeError::DuplicateMode {
                name: blueprint.name().to_string(),
                previous: self.previous.clone(),
            });
        }
        self.install(blueprint, slot);
        Ok(())
    }

    fn install(&mut self, blueprint: ModeBlueprint, slot: Option<usize>) {
        let control = self.control();
        let mut ctx = ModeContext {
            display: &self.display,
            input: &mut *self.input,
            control,
        };
        let mut instance = blueprint.build(&ctx);
        instance.setup(&mut ctx);

        info!("[Modes] Registered {}", blueprint.name());
        let entry = ModeEntry { blueprint, instance };
        match slot {
            Some(index) if index < self.modes.len() => {
                if self.modes[index].blueprint.name() == entry.blueprint.name() {
                    self.modes[index] = entry;
                } else {
                    self.modes.insert(index, entry);
                }
            }
            _ => self.modes.push(entry),
        }
    }

    /// Removes a mode and hands back what is needed to register it again.
    ///
    /// The active mode can only be removed with `force`; doing so leaves no
    /// mode active.
    pub fn unregister(&mut self, name: &str, force: bool) -> Result<ModeBlueprint, ModeError> {
        let index = self.position(name).ok_or_else(|| ModeError::UnknownMode {
            name: name.to_string(),
            previous: self.previous.clone(),
        })?;

        if self.current.as_deref() == Some(name) {
            if !force {
                return Err(ModeError::ActiveMode {
                    name: name.to_string(),
                    previous: self.previous.clone(),
                });
            }
            warn!("[Modes] Unregistering active mode {name}");
            self.current = None;
        }

        info!("[Modes] Unregistered {name}");
        Ok(self.modes.remove(index).blueprint)
    }

    /// Tears a mode down and builds it fresh from the same arguments.
    /// If it was active it stays active.
    pub fn reload(&mut self, name: &str, force: bool) -> Result<&mut dyn Mode, ModeError> {
        let was_active = self.current.as_deref() == Some(name);
        let slot = self.position(name);
        let blueprint = self.unregister(name, force)?;
        self.install(blueprint, slot);
        if was_active {
            self.current = Some(name.to_string());
        }

        let index = self.position(name).ok_or_else(|| ModeError::UnknownMode {
            name: name.to_string(),
            previous: self.previous.clone(),
        })?;
        Ok(self.modes[index].instance.as_mut())
    }

    // ───────────────────────────────────────────────────────────────────
    // Activation and running
    // ───────────────────────────────────────────────────────────────────

    /// Makes `name` the active mode. The mode it replaces, even if that is
    /// `name` itself or nothing, becomes `previous`.
    pub fn activate(&mut self, name: &str) -> Result<(), ModeError> {
        if !self.contains(name) {
            return Err(ModeError::UnknownMode {
                name: name.to_string(),
                previous: self.previous.clone(),
            });
        }
        self.previous = self.current.replace(name.to_string());
        info!("[Modes] Activated {name} (previous: {:?})", self.previous);
        Ok(())
    }

    /// Leaves the active mode without entering another one.
    pub fn deactivate(&mut self) -> Option<ModeName> {
        let left = self.current.take()?;
        self.previous = Some(left.clone());
        info!("[Modes] Left {left}");
        Some(left)
    }

    /// Runs one step of the active mode.
    pub fn run_active(&mut self) -> Result<RunOutcome, ModeError> {
        let control = self.control();
        let Some(index) = self.current.as_deref().and_then(|name| self.position(name)) else {
            return Err(ModeError::NoActiveMode {
                previous: self.previous.clone(),
            });
        };
        let mut ctx = ModeContext {
            display: &self.display,
            input: &mut *self.input,
            control,
        };
        self.modes[index].instance.run(&mut ctx)
    }

    pub fn request_mode_exit(&self) -> Result<RunOutcome, ModeError> {
        self.control().request_mode_exit()
    }

    pub fn request_program_exit(&self) -> RunOutcome {
        self.control().request_program_exit()
    }
}
