//! Dew Valley library crate: the simulation core.
//!
//! The binary (`main.rs`) wires these modules to a scripted input source
//! and drives them through the mode manager. Integration tests import the
//! same types and systems without a window or GPU.

pub mod shared;
pub mod config;
pub mod input;
pub mod calendar;
pub mod player;
pub mod farming;
pub mod inventory;
pub mod world;
pub mod data;
pub mod modes;
