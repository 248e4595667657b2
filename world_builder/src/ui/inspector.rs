//! Object inspector: click a placed object to select it, inspect its
//! fields and provenance, and run chain actions on it.
//!
//! Uses manual ray-AABB intersection instead of Bevy's mesh picking to avoid
//! input absorption conflicts with bevy_egui.

use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy_egui::{egui, EguiContexts};

use crate::camera::ExplorerMode;
use crate::chain::nft::ChainRef;
use crate::chain::{provenance_chain, ChainBridge, ChainCommand, RequestState};
use crate::config;
use crate::scene::materials::HIGHLIGHT_EMISSIVE;
use crate::scene::SceneNode;
use crate::store::WorldStore;
use crate::ui::gizmo::{GizmoMode, GizmoState};
use crate::ui::Notifications;

/// Current selection: store id, its entity, and the material to restore on
/// deselect. Model roots have no material of their own, so the highlight is
/// best-effort.
#[derive(Resource, Default)]
pub struct SelectedObject {
    pub id: Option<String>,
    pub entity: Option<Entity>,
    original_material: Option<Handle<StandardMaterial>>,
}

/// Destination picked in the transfer combo, kept across frames.
#[derive(Resource)]
pub struct ChainPanelState {
    pub destination: ChainRef,
}

impl Default for ChainPanelState {
    fn default() -> Self {
        Self {
            destination: ChainRef::Substrate("asset-hub".to_string()),
        }
    }
}

pub fn inspector_plugin(app: &mut App) {
    app.init_resource::<SelectedObject>()
        .init_resource::<ChainPanelState>()
        .add_systems(
            Update,
            (
                click_select_system,
                inspector_panel_system,
                dismiss_selection_system,
                delete_selected_system,
            ),
        );
}

/// Ray through the cursor against every scene node's AABB; nearest hit wins.
pub(crate) fn pick_node(
    cursor_pos: Vec2,
    camera: &Camera,
    cam_transform: &GlobalTransform,
    nodes: impl Iterator<Item = (Entity, Vec3, Aabb)>,
) -> Option<(Entity, f32)> {
    let ray = camera.viewport_to_world(cam_transform, cursor_pos).ok()?;
    let origin = ray.origin;
    let dir: Vec3 = *ray.direction;

    let mut best: Option<(Entity, f32)> = None;
    for (entity, translation, aabb) in nodes {
        let center: Vec3 = aabb.center.into();
        let half: Vec3 = aabb.half_extents.into();
        let aabb_min = translation + center - half;
        let aabb_max = translation + center + half;
        if let Some(dist) = ray_aabb_intersect(origin, dir, aabb_min, aabb_max) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((entity, dist));
            }
        }
    }
    best
}

fn ray_aabb_intersect(origin: Vec3, dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let inv_dir = 1.0 / dir;
    let t1 = (aabb_min - origin) * inv_dir;
    let t2 = (aabb_max - origin) * inv_dir;
    let t_min = t1.min(t2);
    let t_max = t1.max(t2);
    let t_enter = t_min.x.max(t_min.y).max(t_min.z);
    let t_exit = t_max.x.min(t_max.y).min(t_max.z);
    if t_enter <= t_exit && t_exit > 0.0 {
        Some(t_enter.max(0.0))
    } else {
        None
    }
}

#[allow(clippy::too_many_arguments)]
fn click_select_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mode: Res<ExplorerMode>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    nodes: Query<(Entity, &GlobalTransform, &Aabb), With<SceneNode>>,
    node_ids: Query<&SceneNode>,
    material_query: Query<&MeshMaterial3d<StandardMaterial>>,
    mut selected: ResMut<SelectedObject>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if !mode.active || !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if contexts.ctx_mut().is_pointer_over_area() {
        return;
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

    let hit = pick_node(
        cursor_pos,
        camera,
        cam_transform,
        nodes
            .iter()
            .map(|(e, t, aabb)| (e, t.translation(), aabb.clone())),
    );
    let Some((hit_entity, _)) = hit else {
        return;
    };

    // A press on the current selection belongs to the gizmo, not reselect.
    if selected.entity == Some(hit_entity) {
        return;
    }

    restore_material(&mut commands, &mut selected);

    let Ok(node) = node_ids.get(hit_entity) else {
        return;
    };
    selected.id = Some(node.id.clone());
    selected.entity = Some(hit_entity);

    if let Ok(current_material) = material_query.get(hit_entity) {
        selected.original_material = Some(current_material.0.clone());
        if let Some(mat_data) = materials.get(&current_material.0) {
            let mut highlight = mat_data.clone();
            highlight.emissive = HIGHLIGHT_EMISSIVE;
            let handle = materials.add(highlight);
            commands.entity(hit_entity).insert(MeshMaterial3d(handle));
        }
    }
}

pub(crate) fn restore_material(commands: &mut Commands, selected: &mut SelectedObject) {
    selected.id = None;
    if let Some(entity) = selected.entity.take() {
        if let Some(original) = selected.original_material.take() {
            if let Some(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.insert(MeshMaterial3d(original));
            }
        }
    }
}

fn dismiss_selection_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut selected: ResMut<SelectedObject>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        restore_material(&mut commands, &mut selected);
    }
}

fn delete_selected_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut store: ResMut<WorldStore>,
    mut commands: Commands,
    mut selected: ResMut<SelectedObject>,
) {
    if !keys.just_pressed(KeyCode::Delete) && !keys.just_pressed(KeyCode::Backspace) {
        return;
    }
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }
    let Some(id) = selected.id.clone() else {
        return;
    };
    // Entity despawn happens in the sync system once the store notifies.
    selected.entity = None;
    selected.original_material = None;
    selected.id = None;
    store.0.remove(&id);
}

#[allow(clippy::too_many_arguments)]
fn inspector_panel_system(
    mut contexts: EguiContexts,
    store: Res<WorldStore>,
    selected: Res<SelectedObject>,
    mut panel: ResMut<ChainPanelState>,
    mut gizmo: ResMut<GizmoState>,
    mut request: ResMut<RequestState>,
    mut notices: ResMut<Notifications>,
    bridge: Res<ChainBridge>,
) {
    let Some(id) = selected.id.clone() else {
        return;
    };
    let Some(object) = store.0.get(&id).cloned() else {
        return;
    };

    egui::SidePanel::right("inspector")
        .default_width(280.0)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 220))
                .inner_margin(egui::Margin::same(14)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.label(
                egui::RichText::new(&object.id)
                    .size(16.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.add_space(8.0);

            let kind_line = match (object.primitive_kind(), object.model_uri()) {
                (Some(kind), _) => format!("Kind   {}", kind.name()),
                (None, Some(uri)) => format!("Model  {uri}"),
                (None, None) => "Kind   (default)".to_string(),
            };
            ui.label(kind_line);
            if let Some(color) = &object.color {
                ui.label(format!("Color  {color}"));
            }
            ui.label(format!(
                "Pos    {:.2} {:.2} {:.2}",
                object.position[0], object.position[1], object.position[2]
            ));
            ui.label(format!(
                "Rot    {:.2} {:.2} {:.2}",
                object.rotation[0], object.rotation[1], object.rotation[2]
            ));
            ui.label(format!(
                "Scale  {:.2} {:.2} {:.2}",
                object.scale[0], object.scale[1], object.scale[2]
            ));
            ui.add_space(8.0);

            ui.separator();
            ui.label("Gizmo (T/R/S)");
            ui.horizontal(|ui| {
                ui.selectable_value(&mut gizmo.mode, GizmoMode::Translate, "move");
                ui.selectable_value(&mut gizmo.mode, GizmoMode::Rotate, "rotate");
                ui.selectable_value(&mut gizmo.mode, GizmoMode::Scale, "scale");
            });
            ui.add_space(8.0);

            ui.separator();
            match provenance_chain(&object) {
                Some(chain) => {
                    ui.label(format!("Chain  {chain}"));
                    for key in ["nft:collection", "nft:item", "nft:tx", "nft:import"] {
                        if let Some(value) = object.metadata.get(key) {
                            let field = key.trim_start_matches("nft:");
                            ui.label(format!("{field:<6} {value}"));
                        }
                    }
                }
                None => {
                    ui.label("Chain  (not minted)");
                }
            }
            ui.add_space(8.0);

            let busy = request.is_in_flight();
            if ui
                .add_enabled(!busy, egui::Button::new("Mint as NFT"))
                .clicked()
            {
                mint_selected(&object, &mut request, &mut notices, &bridge);
            }

            egui::ComboBox::from_label("destination")
                .selected_text(panel.destination.to_string())
                .show_ui(ui, |ui| {
                    for chain in config::destination_chains() {
                        let label = chain.to_string();
                        ui.selectable_value(&mut panel.destination, chain, label);
                    }
                });
            if ui
                .add_enabled(!busy, egui::Button::new("XCM transfer"))
                .clicked()
            {
                let command = ChainCommand::XcmTransfer {
                    object_id: object.id.clone(),
                    destination: panel.destination.clone(),
                };
                if request.begin(command.label()) {
                    bridge.submit(command);
                }
            }

            if !matches!(*request, RequestState::Idle) && !busy && ui.button("Dismiss status").clicked()
            {
                request.acknowledge();
            }

            ui.add_space(12.0);
            ui.label(
                egui::RichText::new("Esc to dismiss, Del to remove")
                    .size(11.0)
                    .color(egui::Color32::from_rgb(120, 120, 140)),
            );
        });
}

fn mint_selected(
    object: &crate::store::SceneObject,
    request: &mut RequestState,
    notices: &mut Notifications,
    bridge: &ChainBridge,
) {
    let Some(owner) = config::owner_address() else {
        notices.error(format!(
            "{}: set OWNER_ADDRESS",
            crate::error::ChainError::WalletAbsent
        ));
        return;
    };
    let metadata = match serde_json::to_value(object) {
        Ok(value) => value,
        Err(err) => {
            notices.error(format!("mint aborted: {err}"));
            return;
        }
    };
    let command = ChainCommand::Mint {
        object_id: object.id.clone(),
        owner,
        metadata,
    };
    if request.begin(command.label()) {
        bridge.submit(command);
    } else {
        notices.error("another chain request is in flight");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_a_box_straight_ahead() {
        let dist = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
        );
        assert_eq!(dist, Some(4.5));
    }

    #[test]
    fn ray_misses_a_box_off_axis() {
        let dist = ray_aabb_intersect(
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
        );
        assert_eq!(dist, None);
    }

    #[test]
    fn ray_from_inside_the_box_still_hits() {
        let dist = ray_aabb_intersect(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
        );
        assert_eq!(dist, Some(0.0));
    }
}
