use csscolorparser::Color;

/// Renders a color with normalized channels as `#rrggbb`, or `#rrggbbaa`
/// when the color is not fully opaque.
///
/// Channels are expected in `[0, 1]`; they are scaled by 255 and rounded but
/// not clamped, so out-of-range input saturates at the byte bounds.
pub fn to_hex(color: &Color) -> String {
    let [r, g, b] = [color.r, color.g, color.b].map(channel);
    if color.a < 1.0 {
        format!("#{r:02x}{g:02x}{b:02x}{:02x}", channel(color.a))
    } else {
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

pub fn rgba_to_hex(r: f64, g: f64, b: f64, a: Option<f64>) -> String {
    to_hex(&Color {
        r,
        g,
        b,
        a: a.unwrap_or(1.0),
    })
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round() as u8
}
