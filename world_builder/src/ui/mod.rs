pub mod gizmo;
mod hud;
pub mod inspector;
mod notifications;
mod palette;

pub use gizmo::{gizmo_plugin, GizmoMode, GizmoState};
pub use hud::hud_plugin;
pub use inspector::{inspector_plugin, SelectedObject};
pub use notifications::{notifications_plugin, NoticeLevel, Notifications};
pub use palette::{palette_plugin, PaletteState};
