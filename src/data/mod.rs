//! Data layer: populates the registries at startup.
//!
//! The registries are hard-coded game-design data. Other domains read them
//! from the first `Update` onwards.

pub mod crops;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CropRegistry>()
            .add_systems(Startup, load_all_data);
    }
}

fn load_all_data(mut crop_registry: ResMut<CropRegistry>) {
    crops::populate_crops(&mut crop_registry);
    info!("[Data] Crops loaded: {}", crop_registry.crops.len());
}
