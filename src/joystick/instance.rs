//! Per-joystick state record with statum typestate
//!
//! A joystick is either resting (`Idle`) or following a pointer
//! (`Dragging`). Moves are only applied through the `Dragging` state; a
//! press-move on an idle joystick first transitions, then steps.
//!
//! ```text
//! Idle ──press-move──► Dragging ──press-move──► Dragging
//!  ▲                      │
//!  └───────release────────┘
//! ```

use super::{
    CallbackInvoker, Delta, JoystickError, JoystickId, Movement, MovementEngine,
    PositionCallback, Point, ReportEvent, ReportMode,
};
use crate::host::{JoystickStyle, Placement, WidgetHost, WidgetId};
use serde::{Deserialize, Serialize};
use statum::{machine, state};
use tracing::{debug, warn};

/// Everything needed to build one joystick, apart from its callback
///
/// Closures cannot be serialized, so the callback is handed to
/// [`JoystickPanel::create`](super::JoystickPanel::create) separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoystickConfig {
    pub id: JoystickId,
    #[serde(default)]
    pub placement: Placement,
    pub base_radius: u16,
    pub stick_radius: u16,
    #[serde(default)]
    pub report_mode: ReportMode,
    /// Falls back to the host's default style when absent
    #[serde(default)]
    pub style: Option<JoystickStyle>,
}

impl JoystickConfig {
    pub fn new(id: JoystickId, base_radius: u16, stick_radius: u16, report_mode: ReportMode) -> Self {
        Self {
            id,
            placement: Placement::default(),
            base_radius,
            stick_radius,
            report_mode,
            style: None,
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_style(mut self, style: JoystickStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Checks the geometry before any widget is created
    pub fn validate(&self) -> Result<(), JoystickError> {
        if self.base_radius == 0 || self.stick_radius == 0 {
            return Err(JoystickError::ZeroRadius {
                base: self.base_radius,
                stick: self.stick_radius,
            });
        }
        if self.stick_radius >= self.base_radius {
            return Err(JoystickError::StickTooLarge {
                base: self.base_radius,
                stick: self.stick_radius,
            });
        }
        if self.base_radius > i16::MAX as u16 {
            return Err(JoystickError::BaseTooLarge(self.base_radius));
        }
        Ok(())
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum GestureState {
    Idle,
    Dragging,
}

#[machine]
pub struct JoystickInstance<S: GestureState> {
    // Geometry of this joystick
    engine: MovementEngine,

    // Id, report mode and the application callback
    invoker: CallbackInvoker,

    // Handle offset from the base centre
    position: Point,

    // Host widgets
    base: WidgetId,
    stick: WidgetId,
}

// Available in every state
impl<S: GestureState> JoystickInstance<S> {
    pub fn id(&self) -> JoystickId {
        self.invoker.id()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn base_widget(&self) -> WidgetId {
        self.base
    }

    pub fn stick_widget(&self) -> WidgetId {
        self.stick
    }

    // Puts the handle back in the middle and tells the application
    fn recenter(&mut self, host: &mut dyn WidgetHost) {
        self.position = Point::ORIGIN;
        host.set_stick_position(self.stick, Point::ORIGIN);
        self.invoker.report(ReportEvent::Released);
    }
}

impl JoystickInstance<Idle> {
    /// Builds the record for freshly created widgets
    pub fn create(
        config: &JoystickConfig,
        base: WidgetId,
        stick: WidgetId,
        callback: Option<Box<dyn PositionCallback>>,
    ) -> Self {
        let engine = MovementEngine::new(config.base_radius, config.stick_radius);
        if engine.travel_limit() <= 0.0 {
            warn!(
                "{} can never move: stick radius {} leaves no room in base radius {}",
                config.id, config.stick_radius, config.base_radius
            );
        }
        if callback.is_none() {
            debug!("{} created without a position callback", config.id);
        }

        Self::new(
            engine,
            CallbackInvoker::new(config.id, config.report_mode, callback),
            Point::ORIGIN,
            base,
            stick,
        )
    }

    /// First press-move of a gesture
    pub fn press_move(
        self,
        delta: Delta,
        host: &mut dyn WidgetHost,
    ) -> (JoystickInstance<Dragging>, Movement) {
        debug!("{} starts dragging", self.id());
        let mut dragging: JoystickInstance<Dragging> = self.transition();
        let movement = dragging.press_move(delta, host);
        (dragging, movement)
    }

    /// Release without a preceding drag still recenters
    pub fn release(mut self, host: &mut dyn WidgetHost) -> JoystickInstance<Idle> {
        self.recenter(host);
        self
    }
}

impl JoystickInstance<Dragging> {
    /// Follow-up press-move, relative to the current position
    pub fn press_move(&mut self, delta: Delta, host: &mut dyn WidgetHost) -> Movement {
        let movement = self.engine.compute(self.position, delta);
        if let Movement::Accepted(position) = movement {
            self.position = position;
            host.set_stick_position(self.stick, position);
        }
        self.invoker.report(ReportEvent::Moved { movement, delta });
        movement
    }

    pub fn release(mut self, host: &mut dyn WidgetHost) -> JoystickInstance<Idle> {
        debug!("{} released at {}", self.id(), self.position);
        self.recenter(host);
        self.transition()
    }
}
