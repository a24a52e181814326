//! # UI Common Utilities
//!
//! Conversions between the framework independent joystick types and egui,
//! plus the console's colour palette.

use crate::host::{Anchor, PartStyle, Placement};
use eframe::egui::{self, vec2, Align2, Color32, Frame, Rect, Stroke};

/// Maps an anchor onto egui's alignment
pub fn anchor_align(anchor: Anchor) -> Align2 {
    match anchor {
        Anchor::TopLeft => Align2::LEFT_TOP,
        Anchor::TopMid => Align2::CENTER_TOP,
        Anchor::TopRight => Align2::RIGHT_TOP,
        Anchor::LeftMid => Align2::LEFT_CENTER,
        Anchor::Center => Align2::CENTER_CENTER,
        Anchor::RightMid => Align2::RIGHT_CENTER,
        Anchor::BottomLeft => Align2::LEFT_BOTTOM,
        Anchor::BottomMid => Align2::CENTER_BOTTOM,
        Anchor::BottomRight => Align2::RIGHT_BOTTOM,
    }
}

/// Square of side `2 * radius` placed inside `parent`
pub fn place_circle(parent: Rect, placement: Placement, radius: f32) -> Rect {
    anchor_align(placement.anchor)
        .align_size_within_rect(vec2(radius * 2.0, radius * 2.0), parent)
        .translate(vec2(placement.offset_x as f32, placement.offset_y as f32))
}

pub fn rgb(color: (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

/// Paints one part of a joystick: filled disc plus padded outline ring
pub fn paint_part(painter: &egui::Painter, center: egui::Pos2, radius: f32, style: &PartStyle) {
    painter.circle_filled(center, radius, rgb(style.fill));
    if style.outline_width > 0.0 {
        painter.circle_stroke(
            center,
            radius + style.outline_pad,
            Stroke::new(style.outline_width, rgb(style.outline)),
        );
    }
}

pub fn create_frame(bg_color: Color32, border_color: Color32) -> Frame {
    Frame::new()
        .stroke(Stroke::new(1.0, border_color))
        .fill(bg_color)
        .inner_margin(4)
        .outer_margin(2)
}

/// Colour palette of the console
pub struct UiColors;

impl UiColors {
    /// Background of the panels (RGB: 25, 25, 25)
    pub const INNER_BG: Color32 = Color32::from_rgb(25, 25, 25);

    /// Border color for component separation (RGB: 60, 60, 60)
    pub const BORDER: Color32 = Color32::from_rgb(60, 60, 60);

    /// Joystick currently dragged (RGB: 50, 200, 20)
    pub const ACTIVE: Color32 = Color32::from_rgb(50, 200, 20);

    /// Joystick at rest (RGB: 200, 50, 20)
    pub const INACTIVE: Color32 = Color32::from_rgb(200, 50, 20);
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn placement_aligns_then_offsets() {
        let screen = Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 600.0));

        let centered = place_circle(screen, Placement::default(), 50.0);
        assert_eq!(centered.center(), pos2(400.0, 300.0));

        let corner = place_circle(screen, Placement::new(Anchor::BottomLeft, 20, -10), 50.0);
        assert_eq!(corner.min, pos2(20.0, 490.0));
        assert_eq!(corner.max, pos2(120.0, 590.0));
    }
}
