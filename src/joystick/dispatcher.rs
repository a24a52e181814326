//! Gesture dispatch
//!
//! Routes host notifications into the typestate machine of one joystick.
//! The runtime state lives in [`Gesture`], which owns the instance in
//! whichever state it currently is.

use super::{Delta, Dragging, Idle, JoystickId, JoystickInstance, Movement, Point};
use crate::host::WidgetHost;
use tracing::{debug, trace};

/// Notification delivered by the host to a handle widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickEvent {
    /// Pointer is held down and moved by the given delta this step
    PressMove(Delta),
    /// Pointer let go of the handle
    Release,
    /// The handle widget is being deleted by the host
    Destroy,
}

/// Runtime wrapper around the typestate instance
pub enum Gesture {
    Idle(JoystickInstance<Idle>),
    Dragging(JoystickInstance<Dragging>),
}

impl Gesture {
    pub fn new(instance: JoystickInstance<Idle>) -> Self {
        Gesture::Idle(instance)
    }

    /// Feeds one event through the state machine
    ///
    /// Returns `None` once the instance has been released by a destroy
    /// notification; the caller must not keep anything around afterwards.
    pub fn handle(self, event: StickEvent, host: &mut dyn WidgetHost) -> Option<Gesture> {
        match (self, event) {
            (Gesture::Idle(idle), StickEvent::PressMove(delta)) => {
                let (dragging, movement) = idle.press_move(delta, host);
                log_step(dragging.id(), delta, movement);
                Some(Gesture::Dragging(dragging))
            }
            (Gesture::Dragging(mut dragging), StickEvent::PressMove(delta)) => {
                let movement = dragging.press_move(delta, host);
                log_step(dragging.id(), delta, movement);
                Some(Gesture::Dragging(dragging))
            }
            (Gesture::Idle(idle), StickEvent::Release) => Some(Gesture::Idle(idle.release(host))),
            (Gesture::Dragging(dragging), StickEvent::Release) => {
                Some(Gesture::Idle(dragging.release(host)))
            }
            (gesture, StickEvent::Destroy) => {
                debug!("Releasing instance data of {}", gesture.id());
                None
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging(_))
    }

    pub fn id(&self) -> JoystickId {
        match self {
            Gesture::Idle(i) => i.id(),
            Gesture::Dragging(d) => d.id(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Gesture::Idle(i) => i.position(),
            Gesture::Dragging(d) => d.position(),
        }
    }
}

fn log_step(id: JoystickId, delta: Delta, movement: Movement) {
    match movement {
        Movement::Accepted(p) => trace!("{} moved by {} to {}", id, delta, p),
        Movement::Rejected(p) => trace!("{} held at {}, step {} out of range", id, p, delta),
    }
}
