//! Virtual joystick core
//!
//! Implements the behaviour of an on-screen analog stick: a fixed base and a
//! handle that the user drags inside it. The host GUI framework delivers
//! pointer notifications, the core decides where the handle may go and what
//! the application gets to hear about it.
//!
//! 1. [`movement`] - Geometry check for every drag step
//! 2. [`report`] - Report-mode aware callback invocation
//! 3. [`dispatcher`] - Idle/Dragging gesture state machine
//! 4. [`lifecycle`] - Instance creation, widget attachment and release
//!
//! # Architecture
//!
//! ```text
//! WidgetHost ──► JoystickPanel ──► Gesture ──► MovementEngine
//!  (events)      (user data)      (dispatch)       │
//!                                     │            ▼
//!                                     └──► CallbackInvoker ──► application
//! ```
//!
//! Everything here runs on the UI thread. There is no shared state between
//! instances and nothing blocks.

pub mod dispatcher;
pub mod error;
pub mod instance;
pub mod lifecycle;
pub mod movement;
pub mod report;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use dispatcher::{Gesture, StickEvent};
pub use error::JoystickError;
pub use instance::{Dragging, GestureState, Idle, JoystickConfig, JoystickInstance};
pub use lifecycle::{JoystickHandle, JoystickPanel};
pub use movement::{Movement, MovementEngine};
pub use report::{CallbackInvoker, PositionCallback, ReportEvent, StickReport};

/// Caller-assigned identifier handed back on every callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoystickId(pub u8);

impl fmt::Display for JoystickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "joystick#{}", self.0)
    }
}

/// How a joystick talks to its callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// Handle position relative to the base centre
    #[default]
    Absolute,
    /// Pointer motion of the current drag step
    Relative,
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportMode::Absolute => write!(f, "Absolute"),
            ReportMode::Relative => write!(f, "Relative"),
        }
    }
}

/// Handle offset from the centre of its base, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the base centre
    pub fn distance_from_center(&self) -> f64 {
        let x = f64::from(self.x);
        let y = f64::from(self.y);
        (x * x + y * y).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Pointer motion for one press-move step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Delta {
    pub x: i16,
    pub y: i16,
}

impl Delta {
    pub const ZERO: Delta = Delta { x: 0, y: 0 };

    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:+}, {:+}]", self.x, self.y)
    }
}
