//! crates/logging-sink/src/color.rs
//! Deterministic color assignment for severity tags and prefix segments.

use anstyle::{Color, RgbColor, Style};

/// Color used for caller-location annotations on `debug` and `error` output.
pub const LOCATION_COLOR: RgbColor = RgbColor(0xFF, 0x45, 0x00);

/// Returns the color for a severity tag.
///
/// The hue is the severity's rank divided by the scale length, swept around
/// the color wheel, so each level keeps a fixed color for the life of the
/// process and adjacent levels stay visually distinct.
#[must_use]
pub fn level_color(rank: usize, scale_len: usize) -> RgbColor {
    debug_assert!(scale_len > 0);
    hue_to_rgb(rank as f32 / scale_len as f32)
}

/// Returns the color for a prefix segment.
///
/// The hue is derived from an FNV-1a hash of the segment text, so the same
/// component name renders in the same color everywhere it appears.
#[must_use]
pub fn segment_color(segment: &str) -> RgbColor {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in segment.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hue_to_rgb((hash % 360) as f32 / 360.0)
}

/// Wraps `text` in the ANSI sequences selecting `color`, followed by a reset.
#[must_use]
pub fn paint(color: RgbColor, text: &str) -> String {
    let style = Style::new().fg_color(Some(Color::Rgb(color)));
    format!("{}{text}{}", style.render(), style.render_reset())
}

/// Maps a position on the color wheel (wrapping at 1.0) to a full-saturation,
/// full-value RGB triple.
fn hue_to_rgb(position: f32) -> RgbColor {
    let sector = (position.fract() + 1.0).fract() * 6.0;
    let ramp = 1.0 - (sector % 2.0 - 1.0).abs();
    let (r, g, b) = match sector as u32 {
        0 => (1.0, ramp, 0.0),
        1 => (ramp, 1.0, 0.0),
        2 => (0.0, 1.0, ramp),
        3 => (0.0, ramp, 1.0),
        4 => (ramp, 0.0, 1.0),
        _ => (1.0, 0.0, ramp),
    };
    RgbColor((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}
