//! Genesis Frame — persisted 3D world builder. Runs the world_builder app.

use bevy::prelude::*;
use world_builder::prelude::WorldBuilderBuilder;

fn main() {
    let _ = dotenvy::dotenv();

    WorldBuilderBuilder::new()
        .window_title("Genesis Frame")
        .clear_color(Color::srgb(0.02, 0.02, 0.05))
        .build()
        .run();
}
