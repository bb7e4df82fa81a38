use bevy::prelude::*;
use galaxy_points::GalaxyParameters;

/// The committed galaxy parameters.
///
/// `generation` identifies the parameter state; the installer rebuilds the galaxy whenever it moves.
#[derive(Resource, Clone, PartialEq)]
pub struct GalaxyConfig {
    pub generation: i32,
    pub params: GalaxyParameters,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            generation: 1,
            params: GalaxyParameters::default(),
        }
    }
}

impl GalaxyConfig {
    /// Forces a rebuild with unchanged parameters (a fresh random draw unless the seed is fixed).
    pub fn regenerate(&mut self) {
        self.generation += 1;
    }
}

#[derive(Resource)]
pub struct GalaxyConfigOld(GalaxyParameters);

impl Default for GalaxyConfigOld {
    fn default() -> Self {
        Self(GalaxyConfig::default().params)
    }
}

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyConfig::default())
            .insert_resource(GalaxyConfigOld::default())
            .add_systems(Update, apply_ui_updates);
    }
}

pub fn apply_ui_updates(
    mut galaxy_config_old: ResMut<GalaxyConfigOld>,
    mut galaxy_config: ResMut<GalaxyConfig>,
) {
    if galaxy_config.is_changed() && galaxy_config.params != galaxy_config_old.0 {
        galaxy_config.generation += 1;
        debug!("Galaxy parameters committed, generation {}", galaxy_config.generation);

        galaxy_config_old.0 = galaxy_config.params.clone();
    }
}
