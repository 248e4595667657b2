//! Creation palette: primitives, library assets, plot templates, NFT import.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::camera::{ExplorerMode, FlyCamera};
use crate::chain::{ChainBridge, ChainCommand, RequestState};
use crate::scene::materials::rgb_to_hex;
use crate::scene::TEMPLATES;
use crate::store::{object_id, PrimitiveKind, SceneObject, WorldStore};
use crate::ui::Notifications;

/// New objects land this far in front of the camera.
const PLACE_DISTANCE: f32 = 5.0;

/// Bundled glTF models, addressed with the local `asset:` scheme.
const LIBRARY_ASSETS: &[(&str, &str)] = &[
    ("chair", "asset:models/chair.glb"),
    ("table", "asset:models/table.glb"),
    ("lamp", "asset:models/lamp.glb"),
    ("plant", "asset:models/plant.glb"),
];

#[derive(Resource)]
pub struct PaletteState {
    pub kind: PrimitiveKind,
    pub color: [f32; 3],
    pub scale: f32,
    pub import_collection: u32,
    pub import_item: u32,
}

impl Default for PaletteState {
    fn default() -> Self {
        Self {
            kind: PrimitiveKind::Box,
            color: [0x8B as f32 / 255.0, 0x5C as f32 / 255.0, 0xF6 as f32 / 255.0],
            scale: 1.0,
            import_collection: 0,
            import_item: 0,
        }
    }
}

pub fn palette_plugin(app: &mut App) {
    app.init_resource::<PaletteState>()
        .add_systems(Update, palette_panel_system);
}

fn spawn_point(camera: &Transform) -> [f32; 3] {
    (camera.translation + *camera.forward() * PLACE_DISTANCE).to_array()
}

#[allow(clippy::too_many_arguments)]
fn palette_panel_system(
    mut contexts: EguiContexts,
    mode: Res<ExplorerMode>,
    mut palette: ResMut<PaletteState>,
    mut store: ResMut<WorldStore>,
    mut request: ResMut<RequestState>,
    mut notices: ResMut<Notifications>,
    bridge: Res<ChainBridge>,
    cameras: Query<&Transform, With<FlyCamera>>,
) {
    if !mode.active {
        return;
    }
    let place_at = cameras.get_single().map(spawn_point).unwrap_or([0.0, 1.0, 0.0]);

    egui::SidePanel::left("palette")
        .default_width(220.0)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 220))
                .inner_margin(egui::Margin::same(14)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.label(
                egui::RichText::new("Create")
                    .size(14.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            egui::ComboBox::from_label("shape")
                .selected_text(palette.kind.name())
                .show_ui(ui, |ui| {
                    for kind in PrimitiveKind::ALL {
                        ui.selectable_value(&mut palette.kind, kind, kind.name());
                    }
                });
            ui.horizontal(|ui| {
                ui.label("color");
                ui.color_edit_button_rgb(&mut palette.color);
            });
            ui.add(egui::Slider::new(&mut palette.scale, 0.1..=10.0).text("scale"));
            if ui.button("Place").clicked() {
                let kind = palette.kind;
                store.0.add(
                    SceneObject::primitive(object_id(kind.name()), kind)
                        .at(place_at)
                        .colored(rgb_to_hex(palette.color))
                        .scaled(palette.scale),
                );
            }
            ui.add_space(8.0);

            ui.separator();
            ui.label(
                egui::RichText::new("Library")
                    .size(14.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            for (name, uri) in LIBRARY_ASSETS {
                if ui.button(*name).clicked() {
                    match uri.parse() {
                        Ok(uri) => {
                            store
                                .0
                                .add(SceneObject::model(object_id(name), uri).at(place_at));
                        }
                        Err(err) => notices.error(format!("bad asset uri {uri}: {err}")),
                    }
                }
            }
            ui.add_space(8.0);

            ui.separator();
            ui.label(
                egui::RichText::new("Plots")
                    .size(14.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            for template in TEMPLATES {
                if ui.button(template.name).clicked() {
                    store.0.replace_all(template.instantiate());
                    notices.info(format!("loaded plot '{}'", template.name));
                }
            }
            ui.add_space(8.0);

            ui.separator();
            ui.label(
                egui::RichText::new("Import NFT")
                    .size(14.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.horizontal(|ui| {
                ui.label("collection");
                ui.add(egui::DragValue::new(&mut palette.import_collection));
            });
            ui.horizontal(|ui| {
                ui.label("item");
                ui.add(egui::DragValue::new(&mut palette.import_item));
            });
            let busy = request.is_in_flight();
            if ui.add_enabled(!busy, egui::Button::new("Import")).clicked() {
                let command = ChainCommand::Import {
                    collection_id: palette.import_collection,
                    item_id: palette.import_item,
                };
                if request.begin(command.label()) {
                    bridge.submit(command);
                }
            }
            ui.add_space(12.0);

            ui.separator();
            if ui.button("Clear scene").clicked() {
                store.0.clear();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_the_purple_unit_box() {
        let palette = PaletteState::default();
        assert_eq!(palette.kind, PrimitiveKind::Box);
        assert_eq!(rgb_to_hex(palette.color), "#8B5CF6");
        assert_eq!(palette.scale, 1.0);
    }

    #[test]
    fn spawn_point_sits_in_front_of_the_camera() {
        let camera = Transform::from_xyz(0.0, 2.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y);
        let [x, y, z] = spawn_point(&camera);
        // Closer to the origin than the camera, along its view direction.
        assert!(z < 10.0);
        assert!(Vec3::new(x, y, z).distance(camera.translation) - PLACE_DISTANCE < 1e-4);
    }

    #[test]
    fn library_asset_uris_parse_with_the_asset_scheme() {
        for (_, uri) in LIBRARY_ASSETS {
            let parsed: url::Url = uri.parse().unwrap();
            assert_eq!(parsed.scheme(), "asset");
        }
    }
}
