//! Shared color and material helpers for placed objects.

use bevy::prelude::*;

/// Fallback tint for objects without a color of their own.
pub const DEFAULT_OBJECT_COLOR: Color = Color::srgb(0.545, 0.361, 0.965);

/// Emissive used to mark the selected node; the original material is
/// restored on deselect.
pub const HIGHLIGHT_EMISSIVE: LinearRgba = LinearRgba::rgb(0.2, 0.8, 0.6);

/// Parses a `#RRGGBB` string. Anything else is `None` and the caller falls
/// back to the default tint.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::srgb_u8(r, g, b))
}

/// Formats an egui-style rgb triple back into the stored `#RRGGBB` form.
pub fn rgb_to_hex(rgb: [f32; 3]) -> String {
    let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02X}{:02X}{:02X}",
        to_byte(rgb[0]),
        to_byte(rgb[1]),
        to_byte(rgb[2])
    )
}

pub fn object_material(
    materials: &mut Assets<StandardMaterial>,
    color: Option<&str>,
) -> Handle<StandardMaterial> {
    let base_color = color
        .and_then(parse_hex_color)
        .unwrap_or(DEFAULT_OBJECT_COLOR);
    materials.add(StandardMaterial {
        base_color,
        ..default()
    })
}

/// Dim translucent material for model references that cannot be loaded
/// (remote or unknown URI schemes).
pub fn placeholder_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::srgba(0.6, 0.6, 0.7, 0.5),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_palette_purple() {
        let color = parse_hex_color("#8B5CF6").unwrap();
        assert_eq!(color, Color::srgb_u8(0x8B, 0x5C, 0xF6));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(parse_hex_color("8B5CF6").is_none());
        assert!(parse_hex_color("#8B5C").is_none());
        assert!(parse_hex_color("#8B5CZZ").is_none());
    }

    #[test]
    fn hex_round_trips_through_rgb() {
        let hex = rgb_to_hex([0x8B as f32 / 255.0, 0x5C as f32 / 255.0, 0xF6 as f32 / 255.0]);
        assert_eq!(hex, "#8B5CF6");
    }
}
