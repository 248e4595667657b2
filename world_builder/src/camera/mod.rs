//! Camera control.

mod fly;

pub use fly::{fly_camera_plugin, integrate_velocity, ExplorerMode, FlyCamera};
