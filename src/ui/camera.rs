use bevy::{
    core_pipeline::tonemapping::Tonemapping,
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
    window::PrimaryWindow,
};
use bevy_egui::EguiContexts;
use std::f32::consts::{FRAC_PI_2, TAU};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, camera_control_system);
    }
}

const FOV: f32 = 75.0 * std::f32::consts::PI / 180.0;
const START_POSITION: Vec3 = Vec3::new(3.0, 3.0, 3.0);

// Fraction of the pending motion applied each frame.
const DAMPING: f32 = 0.05;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 60.0;
const PIXELS_PER_LINE: f32 = 100.0;

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    let camera_main = CameraMain::looking_from(START_POSITION, Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV,
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        // vertex colors go to the screen as generated
        Tonemapping::None,
        Transform::from_translation(camera_main.translation()).looking_at(Vec3::ZERO, Vec3::Y),
        camera_main,
    ));
}

/// Orbit state around `target_pos`. Drags and scrolls are queued and eased in over the
/// following frames.
#[derive(Component, Clone)]
pub struct CameraMain {
    target_pos: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    orbit_velocity: Vec2,
    pan_velocity: Vec3,
    smooth_zoom_buffer: f32,
}

impl CameraMain {
    fn looking_from(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().max(MIN_DISTANCE);
        Self {
            target_pos: target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            orbit_velocity: Vec2::ZERO,
            pan_velocity: Vec3::ZERO,
            smooth_zoom_buffer: 0.0,
        }
    }

    fn translation(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.look_pos() + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    fn look_pos(&self) -> Vec3 {
        self.target_pos
    }

    /// Queues a rotation: `x` is yaw, `y` is pitch, both in radians.
    fn orbit(&mut self, delta: Vec2) {
        self.orbit_velocity += delta;
    }

    fn pan(&mut self, delta: Vec3) {
        self.pan_velocity += delta;
    }

    /// Positive zooms in.
    fn zoom(&mut self, amount: f32) {
        self.smooth_zoom_buffer += amount;
    }

    /// Advances the easing by one frame.
    fn step(&mut self) {
        self.yaw += self.orbit_velocity.x * DAMPING;
        self.pitch = (self.pitch + self.orbit_velocity.y * DAMPING).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.orbit_velocity *= 1.0 - DAMPING;

        self.target_pos += self.pan_velocity * DAMPING;
        self.pan_velocity *= 1.0 - DAMPING;

        let smooth_zoom_min = 0.001f32;
        let smooth_zoom_factor = 0.2f32;

        let smooth_zoom_amount = if self.smooth_zoom_buffer < 0.0 {
            f32::min(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                (-smooth_zoom_min).max(self.smooth_zoom_buffer),
            )
        } else {
            f32::max(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                smooth_zoom_min.min(self.smooth_zoom_buffer),
            )
        };
        self.distance = (self.distance * (1.0 - smooth_zoom_amount)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.smooth_zoom_buffer -= smooth_zoom_amount;
    }
}

pub fn camera_control_system(
    mut query: Query<(&mut Transform, &Projection, &mut CameraMain)>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
) {
    let motion: Vec2 = motion_evr.read().map(|ev| ev.delta).sum();
    let scroll: f32 = scroll_evr
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        })
        .sum();

    let Ok((mut transform, projection, mut camera_main)) = query.single_mut() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };

    let ctx = contexts.ctx_mut();
    let panel_has_pointer = ctx.wants_pointer_input() || ctx.is_pointer_over_area();

    if !panel_has_pointer {
        let height = window.height().max(1.0);

        if mouse_buttons.pressed(MouseButton::Left) {
            camera_main.orbit(Vec2::new(-TAU * motion.x / height, TAU * motion.y / height));
        }
        if mouse_buttons.pressed(MouseButton::Right) {
            let fov = match projection {
                Projection::Perspective(perspective) => perspective.fov,
                _ => FOV,
            };
            // world units per pixel at the target's depth
            let scale = 2.0 * camera_main.distance * (fov * 0.5).tan() / height;
            let delta = (transform.up() * motion.y - transform.right() * motion.x) * scale;
            camera_main.pan(delta);
        }
        camera_main.zoom(scroll * 0.05);
    }

    camera_main.step();

    transform.translation = camera_main.translation();
    transform.look_at(camera_main.look_pos(), Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(camera: &mut CameraMain) {
        for _ in 0..400 {
            camera.step();
        }
    }

    #[test]
    fn starts_at_the_requested_position() {
        let camera = CameraMain::looking_from(START_POSITION, Vec3::ZERO);
        assert!(camera.translation().distance(START_POSITION) < 1e-4);
    }

    #[test]
    fn orbit_eases_in_to_the_full_angle() {
        let mut camera = CameraMain::looking_from(START_POSITION, Vec3::ZERO);
        let yaw = camera.yaw;
        camera.orbit(Vec2::new(1.0, 0.0));

        camera.step();
        assert!((camera.yaw - yaw - DAMPING).abs() < 1e-6);

        settle(&mut camera);
        assert!((camera.yaw - yaw - 1.0).abs() < 1e-3);
        assert!(camera.orbit_velocity.length() < 1e-3);
        assert!((camera.translation().length() - camera.distance).abs() < 1e-4);
    }

    #[test]
    fn pitch_stops_short_of_the_pole() {
        let mut camera = CameraMain::looking_from(START_POSITION, Vec3::ZERO);
        camera.orbit(Vec2::new(0.0, 50.0));
        settle(&mut camera);
        assert!(camera.pitch <= PITCH_LIMIT);
        assert!(camera.translation().y < camera.distance);
    }

    #[test]
    fn zoom_moves_closer_within_limits() {
        let mut camera = CameraMain::looking_from(START_POSITION, Vec3::ZERO);
        let distance = camera.distance;
        camera.zoom(0.5);
        settle(&mut camera);
        assert!(camera.distance < distance);
        assert!(camera.distance >= MIN_DISTANCE);

        camera.zoom(-1000.0);
        settle(&mut camera);
        assert_eq!(camera.distance, MAX_DISTANCE);
    }

    #[test]
    fn pan_moves_the_target() {
        let mut camera = CameraMain::looking_from(START_POSITION, Vec3::ZERO);
        camera.pan(Vec3::X);
        settle(&mut camera);
        assert!((camera.look_pos() - Vec3::X).length() < 1e-3);
    }
}
