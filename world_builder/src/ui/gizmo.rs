//! Drag transform controller for the selected object.
//!
//! A left press on the current selection begins a drag in the active mode;
//! releasing the button ends it. Every frame of the drag writes the entity
//! transform and pushes the same values into the store, so observers (and
//! the JSON file behind them) track the drag live.

use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy_egui::EguiContexts;

use crate::camera::ExplorerMode;
use crate::scene::{transform_to_parts, SceneNode};
use crate::store::WorldStore;
use crate::ui::inspector::{pick_node, SelectedObject};

const ROTATE_SENSITIVITY: f32 = 0.01;
const SCALE_SENSITIVITY: f32 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

pub struct DragState {
    pub object_id: String,
    pub entity: Entity,
    start_cursor: Vec2,
    start_rotation: Quat,
    start_scale: Vec3,
    grab_offset: Vec3,
    plane_y: f32,
}

#[derive(Resource, Default)]
pub struct GizmoState {
    pub mode: GizmoMode,
    pub drag: Option<DragState>,
}

pub fn gizmo_plugin(app: &mut App) {
    app.init_resource::<GizmoState>()
        .add_systems(Update, (mode_hotkey_system, drag_system));
}

fn mode_hotkey_system(
    keys: Res<ButtonInput<KeyCode>>,
    mode: Res<ExplorerMode>,
    mut contexts: EguiContexts,
    mut gizmo: ResMut<GizmoState>,
) {
    if !mode.active || contexts.ctx_mut().wants_keyboard_input() {
        return;
    }
    if keys.just_pressed(KeyCode::KeyT) {
        gizmo.mode = GizmoMode::Translate;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        gizmo.mode = GizmoMode::Rotate;
    }
    if keys.just_pressed(KeyCode::KeyS) {
        gizmo.mode = GizmoMode::Scale;
    }
}

/// Where the cursor ray crosses the horizontal plane the drag started on.
pub fn cursor_on_plane(ray_origin: Vec3, ray_dir: Vec3, plane_y: f32) -> Option<Vec3> {
    if ray_dir.y.abs() < 1e-6 {
        return None;
    }
    let t = (plane_y - ray_origin.y) / ray_dir.y;
    (t > 0.0).then(|| ray_origin + ray_dir * t)
}

/// Yaw applied on top of the starting orientation, horizontal drag only.
pub fn rotate_from_drag(start_rotation: Quat, dx: f32) -> Quat {
    Quat::from_rotation_y(dx * ROTATE_SENSITIVITY) * start_rotation
}

/// Uniform factor from vertical drag. Deliberately unclamped; the store
/// accepts whatever the drag produces.
pub fn scale_from_drag(start_scale: Vec3, dy: f32) -> Vec3 {
    start_scale * (1.0 + dy * SCALE_SENSITIVITY)
}

#[allow(clippy::too_many_arguments)]
fn drag_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mode: Res<ExplorerMode>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    nodes: Query<(Entity, &GlobalTransform, &Aabb), With<SceneNode>>,
    mut transforms: Query<&mut Transform, With<SceneNode>>,
    selected: Res<SelectedObject>,
    mut gizmo: ResMut<GizmoState>,
    mut store: ResMut<WorldStore>,
) {
    if !mode.active {
        gizmo.drag = None;
        return;
    }
    if mouse.just_released(MouseButton::Left) {
        gizmo.drag = None;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_transform)) = cameras.get_single() else {
        return;
    };

    if mouse.just_pressed(MouseButton::Left) && !contexts.ctx_mut().is_pointer_over_area() {
        try_begin_drag(
            cursor_pos,
            camera,
            cam_transform,
            &nodes,
            &transforms,
            &selected,
            &mut gizmo,
        );
        return;
    }

    if !mouse.pressed(MouseButton::Left) {
        return;
    }
    let Some(drag) = &gizmo.drag else {
        return;
    };
    let Ok(mut transform) = transforms.get_mut(drag.entity) else {
        return;
    };

    match gizmo.mode {
        GizmoMode::Translate => {
            let Ok(ray) = camera.viewport_to_world(cam_transform, cursor_pos) else {
                return;
            };
            let Some(point) = cursor_on_plane(ray.origin, *ray.direction, drag.plane_y) else {
                return;
            };
            transform.translation = point + drag.grab_offset;
        }
        GizmoMode::Rotate => {
            let dx = cursor_pos.x - drag.start_cursor.x;
            transform.rotation = rotate_from_drag(drag.start_rotation, dx);
        }
        GizmoMode::Scale => {
            let dy = drag.start_cursor.y - cursor_pos.y;
            transform.scale = scale_from_drag(drag.start_scale, dy);
        }
    }

    let (position, rotation, scale) = transform_to_parts(&transform);
    store
        .0
        .update_transform(&drag.object_id, position, rotation, scale);
}

fn try_begin_drag(
    cursor_pos: Vec2,
    camera: &Camera,
    cam_transform: &GlobalTransform,
    nodes: &Query<(Entity, &GlobalTransform, &Aabb), With<SceneNode>>,
    transforms: &Query<&mut Transform, With<SceneNode>>,
    selected: &SelectedObject,
    gizmo: &mut GizmoState,
) {
    let (Some(entity), Some(id)) = (selected.entity, selected.id.clone()) else {
        return;
    };
    let hit = pick_node(
        cursor_pos,
        camera,
        cam_transform,
        nodes
            .iter()
            .map(|(e, t, aabb)| (e, t.translation(), aabb.clone())),
    );
    if hit.map(|(e, _)| e) != Some(entity) {
        return;
    }
    let Ok(transform) = transforms.get(entity) else {
        return;
    };

    let plane_y = transform.translation.y;
    let grab_offset = camera
        .viewport_to_world(cam_transform, cursor_pos)
        .ok()
        .and_then(|ray| cursor_on_plane(ray.origin, *ray.direction, plane_y))
        .map(|point| transform.translation - point)
        .unwrap_or(Vec3::ZERO);

    gizmo.drag = Some(DragState {
        object_id: id,
        entity,
        start_cursor: cursor_pos,
        start_rotation: transform.rotation,
        start_scale: transform.scale,
        grab_offset,
        plane_y,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_intersection_lands_on_the_requested_height() {
        let point = cursor_on_plane(Vec3::new(0.0, 5.0, 5.0), Vec3::new(0.0, -1.0, -1.0), 1.0)
            .unwrap();
        assert!((point.y - 1.0).abs() < 1e-6);
        assert!((point.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn parallel_ray_never_hits_the_plane() {
        assert!(cursor_on_plane(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 1.0).is_none());
        // Plane behind the camera.
        assert!(cursor_on_plane(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn rotation_drag_spins_around_y_only() {
        let rotated = rotate_from_drag(Quat::IDENTITY, 100.0);
        let (y, x, z) = rotated.to_euler(EulerRot::YXZ);
        assert!((y - 1.0).abs() < 1e-5);
        assert!(x.abs() < 1e-6);
        assert!(z.abs() < 1e-6);
    }

    #[test]
    fn scale_drag_is_unclamped() {
        assert_eq!(scale_from_drag(Vec3::ONE, 100.0), Vec3::splat(2.0));
        // Dragging far enough down inverts; the store takes it as-is.
        let inverted = scale_from_drag(Vec3::ONE, -300.0);
        assert!(inverted.x < 0.0);
    }
}
