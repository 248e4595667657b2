//! FlyCamera component and systems: pointer-lock mouse look plus
//! impulse-and-damping WASD movement.
//!
//! Two cursor modes, toggled with Tab. Walk mode grabs the cursor and feeds
//! mouse motion into yaw/pitch; explorer mode releases it for the UI and
//! picking. Damping applies every frame so the camera glides to a stop when
//! keys are released, in either mode.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

const PITCH_LIMIT: f32 = 1.54;

#[derive(Component)]
pub struct FlyCamera {
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub accel: f32,
    pub damping: f32,
    pub look_sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            accel: 30.0,
            damping: 6.0,
            look_sensitivity: 0.002,
        }
    }
}

/// Cursor mode. When active the cursor is free for panels and picking and
/// mouse look is suspended; keyboard movement still works.
#[derive(Resource)]
pub struct ExplorerMode {
    pub active: bool,
}

impl Default for ExplorerMode {
    fn default() -> Self {
        Self { active: true }
    }
}

pub fn fly_camera_plugin(app: &mut App) {
    app.init_resource::<ExplorerMode>().add_systems(
        Update,
        (toggle_mode_system, mouse_look_system, movement_system).chain(),
    );
}

fn toggle_mode_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut mode: ResMut<ExplorerMode>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !keys.just_pressed(KeyCode::Tab) {
        return;
    }
    mode.active = !mode.active;

    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    if mode.active {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

fn mouse_look_system(
    mode: Res<ExplorerMode>,
    mut motion: EventReader<MouseMotion>,
    mut cameras: Query<(&mut FlyCamera, &mut Transform)>,
) {
    if mode.active {
        motion.clear();
        return;
    }
    let Ok((mut camera, mut transform)) = cameras.get_single_mut() else {
        return;
    };
    for event in motion.read() {
        camera.yaw -= event.delta.x * camera.look_sensitivity;
        camera.pitch -= event.delta.y * camera.look_sensitivity;
    }
    camera.pitch = camera.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    transform.rotation = Quat::from_euler(EulerRot::YXZ, camera.yaw, camera.pitch, 0.0);
}

fn movement_system(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mode: Res<ExplorerMode>,
    mut cameras: Query<(&mut FlyCamera, &mut Transform)>,
) {
    let Ok((mut camera, mut transform)) = cameras.get_single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    let forward = *transform.forward();
    let right = *transform.right();

    // Keys drive nothing in explorer mode, but damping still runs so a
    // mid-flight toggle glides to a stop instead of freezing.
    let mut wish = Vec3::ZERO;
    if !mode.active {
        if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
            wish += forward;
        }
        if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
            wish -= forward;
        }
        if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
            wish += right;
        }
        if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
            wish -= right;
        }
        if keys.pressed(KeyCode::Space) {
            wish += Vec3::Y;
        }
        if keys.pressed(KeyCode::ShiftLeft) {
            wish -= Vec3::Y;
        }
    }

    let (velocity, translation) = integrate_velocity(
        camera.velocity,
        wish,
        camera.accel,
        camera.damping,
        dt,
    );
    camera.velocity = velocity;
    transform.translation += translation;
}

/// One Euler step: accelerate toward the wish direction, then apply
/// exponential-style damping. Returns the new velocity and the frame's
/// displacement.
pub fn integrate_velocity(
    velocity: Vec3,
    wish: Vec3,
    accel: f32,
    damping: f32,
    dt: f32,
) -> (Vec3, Vec3) {
    let mut velocity = velocity + wish.normalize_or_zero() * accel * dt;
    velocity *= (1.0 - damping * dt).clamp(0.0, 1.0);
    (velocity, velocity * dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_a_key_accelerates_along_the_wish_direction() {
        let (velocity, step) =
            integrate_velocity(Vec3::ZERO, Vec3::Z, 30.0, 6.0, 1.0 / 60.0);
        assert!(velocity.z > 0.0);
        assert_eq!(velocity.x, 0.0);
        assert!(step.z > 0.0);
    }

    #[test]
    fn released_keys_damp_velocity_toward_zero() {
        let mut velocity = Vec3::new(0.0, 0.0, 5.0);
        for _ in 0..120 {
            let (v, _) = integrate_velocity(velocity, Vec3::ZERO, 30.0, 6.0, 1.0 / 60.0);
            assert!(v.length() <= velocity.length());
            velocity = v;
        }
        assert!(velocity.length() < 0.01);
    }

    #[test]
    fn large_timestep_never_reverses_velocity() {
        let (velocity, _) =
            integrate_velocity(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 30.0, 6.0, 0.5);
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn diagonal_wish_is_normalized() {
        let dt = 1.0 / 60.0;
        let (straight, _) = integrate_velocity(Vec3::ZERO, Vec3::Z, 30.0, 6.0, dt);
        let (diagonal, _) =
            integrate_velocity(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0), 30.0, 6.0, dt);
        let diff = (straight.length() - diagonal.length()).abs();
        assert!(diff < 1e-5);
    }
}
