use super::points_material::GalaxyPointsMaterial;
use super::points_mesh::build_points_mesh;
use crate::prelude::*;
use bevy::{prelude::*, render::view::NoFrustumCulling};
use std::time::Instant;

pub struct GalaxyPointsPlugin;

impl Plugin for GalaxyPointsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<GalaxyPointsMaterial>::default())
            .init_resource::<InstalledGalaxy>()
            .init_resource::<GalaxyStats>()
            .add_systems(Update, regenerate_galaxy.after(super::apply_ui_updates));
    }
}

#[derive(Component)]
pub struct GalaxyPoints;

/// Everything one generation put into the world.
struct GalaxyRenderable {
    entity: Entity,
    mesh: Handle<Mesh>,
    material: Handle<GalaxyPointsMaterial>,
}

impl GalaxyRenderable {
    fn release(
        self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<GalaxyPointsMaterial>,
    ) {
        commands.entity(self.entity).despawn();
        meshes.remove(&self.mesh);
        materials.remove(&self.material);
    }
}

/// Sole owner of the galaxy currently in the scene.
#[derive(Resource, Default)]
pub struct InstalledGalaxy {
    generation: Option<i32>,
    current: Option<GalaxyRenderable>,
}

impl InstalledGalaxy {
    /// Releases the previous renderable, then takes ownership of `renderable`.
    fn install(
        &mut self,
        generation: i32,
        renderable: Option<GalaxyRenderable>,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<GalaxyPointsMaterial>,
    ) {
        if let Some(previous) = self.current.take() {
            previous.release(commands, meshes, materials);
        }
        self.current = renderable;
        self.generation = Some(generation);
    }
}

/// Rebuilds the galaxy whenever the committed generation moves.
///
/// Generation, release of the old galaxy and spawning of the new one all land in the same
/// command flush, so a frame never sees both or neither.
fn regenerate_galaxy(
    mut commands: Commands,
    galaxy_config: Res<GalaxyConfig>,
    mut installed: ResMut<InstalledGalaxy>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
    mut stats: ResMut<GalaxyStats>,
) {
    if installed.generation == Some(galaxy_config.generation) {
        return;
    }

    let started = Instant::now();
    let params = &galaxy_config.params;
    let buffers = galaxy_points::generate(params);

    // an empty mesh has nothing to upload
    let renderable = (!buffers.is_empty()).then(|| {
        let mesh = meshes.add(build_points_mesh(&buffers));
        let material = materials.add(GalaxyPointsMaterial::new(params.size));
        let entity = commands
            .spawn((
                GalaxyPoints,
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                NoFrustumCulling,
            ))
            .id();
        GalaxyRenderable {
            entity,
            mesh,
            material,
        }
    });

    installed.install(
        galaxy_config.generation,
        renderable,
        &mut commands,
        &mut meshes,
        &mut materials,
    );

    stats.particles = buffers.len();
    stats.generation_ms = started.elapsed().as_secs_f32() * 1000.0;
    info!(
        "Generated galaxy {}: {} particles, {} branches in {:.1} ms",
        galaxy_config.generation, stats.particles, params.branches, stats.generation_ms
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(count: u32) -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<GalaxyPointsMaterial>>()
            .insert_resource(GalaxyConfig {
                generation: 1,
                params: GalaxyParameters {
                    count,
                    ..default()
                },
            })
            .init_resource::<InstalledGalaxy>()
            .init_resource::<GalaxyStats>()
            .add_systems(Update, regenerate_galaxy);
        app.update();
        app
    }

    fn galaxy_entities(app: &mut App) -> Vec<Entity> {
        let mut query = app.world_mut().query_filtered::<Entity, With<GalaxyPoints>>();
        query.iter(app.world()).collect()
    }

    fn installed_mesh(app: &mut App) -> AssetId<Mesh> {
        let mut query = app.world_mut().query::<&Mesh3d>();
        query
            .iter(app.world())
            .next()
            .map(|mesh| mesh.id())
            .expect("galaxy mesh installed")
    }

    fn regenerate(app: &mut App) {
        app.world_mut().resource_mut::<GalaxyConfig>().regenerate();
        app.update();
    }

    #[test]
    fn startup_installs_one_galaxy() {
        let mut app = app(1_000);
        assert_eq!(galaxy_entities(&mut app).len(), 1);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 1);
        assert_eq!(app.world().resource::<Assets<GalaxyPointsMaterial>>().len(), 1);
        assert_eq!(app.world().resource::<GalaxyStats>().particles, 1_000);
    }

    #[test]
    fn regeneration_releases_previous_galaxy() {
        let mut app = app(1_000);
        let first_entity = galaxy_entities(&mut app)[0];
        let first_mesh = installed_mesh(&mut app);

        regenerate(&mut app);
        regenerate(&mut app);

        assert_eq!(galaxy_entities(&mut app).len(), 1);
        assert!(!app.world().entities().contains(first_entity));
        assert!(app.world().resource::<Assets<Mesh>>().get(first_mesh).is_none());
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 1);
        assert_eq!(app.world().resource::<Assets<GalaxyPointsMaterial>>().len(), 1);
    }

    #[test]
    fn unchanged_generation_keeps_galaxy() {
        let mut app = app(500);
        let mesh = installed_mesh(&mut app);
        app.update();
        app.update();
        assert_eq!(installed_mesh(&mut app), mesh);
    }

    #[test]
    fn new_size_reaches_material() {
        let mut app = app(500);
        app.world_mut().resource_mut::<GalaxyConfig>().params.size = 0.05;
        regenerate(&mut app);

        let materials = app.world().resource::<Assets<GalaxyPointsMaterial>>();
        let sizes: Vec<f32> = materials.iter().map(|(_, material)| material.size).collect();
        assert_eq!(sizes, vec![0.05]);
    }

    #[test]
    fn empty_galaxy_clears_scene() {
        let mut app = app(500);
        app.world_mut().resource_mut::<GalaxyConfig>().params.count = 0;
        regenerate(&mut app);

        assert!(galaxy_entities(&mut app).is_empty());
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);
        assert_eq!(app.world().resource::<GalaxyStats>().particles, 0);
    }
}
