use bevy::prelude::*;

mod galaxy_config;
mod points_material;
mod points_mesh;
mod spawn_points;

pub use galaxy_config::{apply_ui_updates, GalaxyConfig, GalaxyConfigPlugin};
pub use spawn_points::GalaxyPointsPlugin;

/// Figures about the currently installed galaxy, for the stats overlay.
#[derive(Resource, Default)]
pub struct GalaxyStats {
    pub particles: usize,
    pub generation_ms: f32,
}
