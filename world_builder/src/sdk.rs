//! SDK entry points and builder for composing the world builder app.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use url::Url;

use crate::camera::fly_camera_plugin;
use crate::chain::nft::ChainRef;
use crate::chain::{apply_chain_outcomes, init_chain_bridge, RequestState};
use crate::chain::relay::RelayClient;
use crate::config;
use crate::render::{ObjectRenderer, PrimitiveMeshRenderer, RendererResource};
use crate::scene::{setup_scene, sync_scene_objects};
use crate::store::{load_objects, JsonFileStore, ObjectStore, WorldStore};
use crate::ui::{
    gizmo_plugin, hud_plugin, inspector_plugin, notifications_plugin, palette_plugin,
    Notifications, SelectedObject,
};

/// Builder for constructing a Genesis Frame app with customizable plugins.
pub struct WorldBuilderBuilder {
    storage_path: Option<std::path::PathBuf>,
    relay_url: Option<Url>,
    home_chain: Option<ChainRef>,
    renderer: Option<Box<dyn ObjectRenderer>>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_fly_camera: bool,
    enable_hud: bool,
    enable_inspector: bool,
    enable_palette: bool,
    enable_gizmo: bool,
    enable_notifications: bool,
}

impl Default for WorldBuilderBuilder {
    fn default() -> Self {
        Self {
            storage_path: None,
            relay_url: None,
            home_chain: None,
            renderer: None,
            window_title: "Genesis Frame".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.05, 0.05, 0.08),
            enable_fly_camera: true,
            enable_hud: true,
            enable_inspector: true,
            enable_palette: true,
            enable_gizmo: true,
            enable_notifications: true,
        }
    }
}

impl WorldBuilderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the scene file location (otherwise taken from the env).
    pub fn storage_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn relay_url(mut self, url: Url) -> Self {
        self.relay_url = Some(url);
        self
    }

    pub fn home_chain(mut self, chain: ChainRef) -> Self {
        self.home_chain = Some(chain);
        self
    }

    /// Provide a custom object renderer implementation.
    pub fn renderer(mut self, renderer: impl ObjectRenderer) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_fly_camera(mut self) -> Self {
        self.enable_fly_camera = false;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_inspector(mut self) -> Self {
        self.enable_inspector = false;
        self
    }

    pub fn disable_palette(mut self) -> Self {
        self.enable_palette = false;
        self
    }

    pub fn disable_gizmo(mut self) -> Self {
        self.enable_gizmo = false;
        self
    }

    pub fn disable_notifications(mut self) -> Self {
        self.enable_notifications = false;
        self
    }

    /// Build the Bevy app: load the persisted scene, wire the store to its
    /// JSON file, start the chain worker, and compose the selected plugins.
    pub fn build(self) -> App {
        let storage_path = self.storage_path.unwrap_or_else(config::storage_path);
        let relay_url = self.relay_url.unwrap_or_else(config::relay_url);
        let home_chain = self.home_chain.unwrap_or_else(config::home_chain);

        let objects = load_objects(&storage_path);
        eprintln!(
            "genesis: loaded {} objects from {}",
            objects.len(),
            storage_path.display()
        );
        let mut store = ObjectStore::with_objects(objects);
        store.subscribe(Box::new(JsonFileStore::new(storage_path)));

        let bridge = init_chain_bridge(RelayClient::new(relay_url), home_chain);
        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(PrimitiveMeshRenderer));

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(WorldStore(store))
        .insert_resource(bridge)
        .init_resource::<RequestState>()
        .init_resource::<Notifications>()
        .init_resource::<SelectedObject>()
        .init_resource::<crate::ui::GizmoState>()
        .add_systems(Startup, setup_scene)
        .add_systems(Update, (sync_scene_objects, apply_chain_outcomes));

        renderer.setup(&mut app);
        app.insert_resource(RendererResource(renderer));

        let any_ui = self.enable_hud
            || self.enable_inspector
            || self.enable_palette
            || self.enable_gizmo
            || self.enable_notifications;
        if any_ui {
            app.add_plugins(EguiPlugin);
        }

        if self.enable_fly_camera {
            app.add_plugins(fly_camera_plugin);
        } else {
            app.init_resource::<crate::camera::ExplorerMode>();
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_inspector {
            app.add_plugins(inspector_plugin);
        }
        if self.enable_palette {
            app.add_plugins(palette_plugin);
        }
        if self.enable_gizmo {
            app.add_plugins(gizmo_plugin);
        }
        if self.enable_notifications {
            app.add_plugins(notifications_plugin);
        }

        app
    }
}
