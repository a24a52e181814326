//! # Host Framework Interface
//!
//! The joystick core never draws anything and never listens to an input
//! device. Both are the job of the GUI framework it is embedded in. This
//! module describes what the core needs from that framework:
//!
//! - **Widget creation**: a circular base placed inside a parent, and a handle
//!   placed in the middle of the base
//! - **Handle placement**: mirror the handle position computed by the core
//! - **Widget deletion**: tear down a base together with its handle
//! - **Default styling**: a caller-owned [`JoystickStyle`] used when a
//!   joystick does not bring its own
//!
//! Notifications travel the other way: the framework hands
//! [`StickEvent`](crate::joystick::StickEvent)s for a handle widget to
//! [`JoystickPanel::dispatch`](crate::joystick::JoystickPanel::dispatch).
//!
//! [`crate::ui::EguiHost`] is the egui implementation used by the console.

#[cfg(test)]
pub(crate) mod recording;

use crate::joystick::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle of a widget owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

impl WidgetId {
    /// The root container every host provides
    pub const SCREEN: WidgetId = WidgetId(0);
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

/// Alignment of a base inside its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    TopMid,
    TopRight,
    LeftMid,
    #[default]
    Center,
    RightMid,
    BottomLeft,
    BottomMid,
    BottomRight,
}

/// Anchor plus a pixel offset from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub anchor: Anchor,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Placement {
    pub fn new(anchor: Anchor, offset_x: i32, offset_y: i32) -> Self {
        Self {
            anchor,
            offset_x,
            offset_y,
        }
    }
}

/// Look of one circular part of a joystick
///
/// Colours are stored as RGB tuples so they serialize cleanly and map 1:1 to
/// egui's `Color32`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartStyle {
    pub fill: (u8, u8, u8),
    pub outline: (u8, u8, u8),
    pub outline_width: f32,
    /// Gap between the filled circle and its outline
    pub outline_pad: f32,
}

/// Complete look of a joystick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickStyle {
    pub base: PartStyle,
    pub stick: PartStyle,
}

impl Default for JoystickStyle {
    /// Light grey base with a blue ring, blue handle with a green ring
    fn default() -> Self {
        Self {
            base: PartStyle {
                fill: (189, 189, 189),
                outline: (33, 150, 243),
                outline_width: 2.0,
                outline_pad: 8.0,
            },
            stick: PartStyle {
                fill: (33, 150, 243),
                outline: (76, 175, 80),
                outline_width: 2.0,
                outline_pad: 4.0,
            },
        }
    }
}

/// What the joystick core needs from a GUI framework
pub trait WidgetHost {
    /// Creates the stationary base inside `parent`
    fn create_base(
        &mut self,
        parent: WidgetId,
        placement: Placement,
        radius: u16,
        style: &PartStyle,
    ) -> WidgetId;

    /// Creates the handle, centred inside `base`
    fn create_stick(&mut self, base: WidgetId, radius: u16, style: &PartStyle) -> WidgetId;

    /// Moves the handle to `position` relative to the centre of its base
    fn set_stick_position(&mut self, stick: WidgetId, position: Point);

    /// Removes a widget and its children without notifying back
    fn delete(&mut self, widget: WidgetId);

    /// Style used for joysticks created without one
    fn default_style(&self) -> JoystickStyle;
}
