use thiserror::Error;

use super::ModeName;

/// Mode manager failures. Each carries the mode that was active before the
/// current one, for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    #[error("mode `{name}` is already registered")]
    DuplicateMode {
        name: ModeName,
        previous: Option<ModeName>,
    },

    #[error("mode `{name}` is not registered")]
    UnknownMode {
        name: ModeName,
        previous: Option<ModeName>,
    },

    #[error("mode `{name}` is active and cannot be unregistered")]
    ActiveMode {
        name: ModeName,
        previous: Option<ModeName>,
    },

    #[error("no mode is active")]
    NoActiveMode { previous: Option<ModeName> },
}

impl ModeError {
    pub fn previous(&self) -> Option<&str> {
        match self {
            ModeError::DuplicateMode { previous, .. }
            | ModeError::UnknownMode { previous, .. }
            | ModeError::ActiveMode { previous, .. }
            | ModeError::NoActiveMode { previous } => previous.as_deref(),
        }
    }
}
