use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::{
    core_pipeline::tonemapping::Tonemapping,
    input::mouse::{AccumulatedMouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};
use bevy_egui::EguiContexts;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, camera_control_system);
    }
}

const START_POSITION: Vec3 = Vec3::new(3.0, 3.0, 3.0);
const FOV_DEGREES: f32 = 75.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    let orbit = OrbitCamera::looking_from(START_POSITION, Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR,
            far: FAR,
            ..default()
        }),
        // additive sprites should keep their picked colors
        Tonemapping::None,
        Transform::from_translation(orbit.translation()).looking_at(orbit.target, Vec3::Y),
        orbit,
    ));
}

/// Orbits a target point on a sphere, easing out rotation and zoom.
///
/// Input is queued into `pending_yaw`/`pending_pitch` and the zoom buffer;
/// every [`OrbitCamera::update`] applies a fixed fraction of what is queued.
#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    smooth_zoom_buffer: f32,
}

impl OrbitCamera {
    const DAMPING: f32 = 0.05;
    const MIN_DISTANCE: f32 = 0.5;
    const MAX_DISTANCE: f32 = 50.0;
    const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(Self::MIN_DISTANCE);
        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            smooth_zoom_buffer: 0.0,
        }
    }

    pub fn translation(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Queues a drag of `delta` pixels; a drag across the full viewport height
    /// turns the camera once around.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let scale = TAU / viewport_height.max(1.0);
        self.pending_yaw -= delta.x * scale;
        self.pending_pitch += delta.y * scale;
    }

    /// Queues a zoom; positive values move the camera closer.
    pub fn zoom(&mut self, amount: f32) {
        self.smooth_zoom_buffer += amount;
    }

    pub fn update(&mut self) {
        self.yaw += self.pending_yaw * Self::DAMPING;
        self.pitch = (self.pitch + self.pending_pitch * Self::DAMPING)
            .clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
        self.pending_yaw *= 1.0 - Self::DAMPING;
        self.pending_pitch *= 1.0 - Self::DAMPING;

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
        self.smooth_zoom_buffer -= smooth_zoom_amount;
        self.distance = (self.distance * (1.0 - smooth_zoom_amount.clamp(-1.0, 0.9)))
            .clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }
}

fn camera_control_system(
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
    windows: Query<&Window>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
) {
    let Ok((mut transform, mut orbit)) = query.single_mut() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let pointer_on_ui = contexts.ctx_mut().wants_pointer_input();

    for ev in scroll_evr.read() {
        if pointer_on_ui {
            continue;
        }
        match ev.unit {
            MouseScrollUnit::Line => orbit.zoom(ev.y * 0.05),
            MouseScrollUnit::Pixel => orbit.zoom(ev.y * 0.002),
        }
    }

    if !pointer_on_ui && mouse_buttons.pressed(MouseButton::Left) {
        orbit.rotate(mouse_motion.delta, window.height());
    }

    orbit.update();
    transform.translation = orbit.translation();
    transform.look_at(orbit.target, Vec3::Y);
}
