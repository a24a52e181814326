//! Report-mode aware callback invocation

use super::{Delta, JoystickId, Movement, Point, ReportMode};
use std::fmt;
use tracing::trace;

/// Receiver for joystick reports
///
/// Implemented for every `FnMut(JoystickId, i16, i16)` closure, so a plain
/// closure is enough in most cases.
pub trait PositionCallback {
    fn on_position(&mut self, id: JoystickId, x: i16, y: i16);
}

impl<F> PositionCallback for F
where
    F: FnMut(JoystickId, i16, i16),
{
    fn on_position(&mut self, id: JoystickId, x: i16, y: i16) {
        self(id, x, y)
    }
}

/// Something worth telling the application about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportEvent {
    /// Outcome of a press-move step together with the step's delta
    Moved { movement: Movement, delta: Delta },
    /// The handle was let go
    Released,
}

/// One invocation of the application callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickReport {
    pub id: JoystickId,
    pub x: i16,
    pub y: i16,
}

impl fmt::Display for StickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> ({}, {})", self.id, self.x, self.y)
    }
}

/// Bound callback of one joystick
pub struct CallbackInvoker {
    id: JoystickId,
    mode: ReportMode,
    callback: Option<Box<dyn PositionCallback>>,
}

impl CallbackInvoker {
    pub fn new(
        id: JoystickId,
        mode: ReportMode,
        callback: Option<Box<dyn PositionCallback>>,
    ) -> Self {
        Self { id, mode, callback }
    }

    pub fn id(&self) -> JoystickId {
        self.id
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Invokes the callback as the report mode dictates
    ///
    /// Returns the report that was delivered, `None` if the callback was not
    /// called.
    pub fn report(&mut self, event: ReportEvent) -> Option<StickReport> {
        let callback = self.callback.as_mut()?;

        let (x, y) = match (event, self.mode) {
            (ReportEvent::Moved { movement: Movement::Rejected(_), .. }, _) => return None,
            (
                ReportEvent::Moved {
                    movement: Movement::Accepted(Point { x, y }),
                    ..
                },
                ReportMode::Absolute,
            ) => (x, y),
            (
                ReportEvent::Moved {
                    movement: Movement::Accepted(_),
                    delta,
                },
                ReportMode::Relative,
            ) => (delta.x, delta.y),
            (ReportEvent::Released, ReportMode::Absolute) => (0, 0),
            (ReportEvent::Released, ReportMode::Relative) => return None,
        };

        trace!("Reporting {} ({}) -> ({}, {})", self.id, self.mode, x, y);
        callback.on_position(self.id, x, y);
        Some(StickReport { id: self.id, x, y })
    }
}

impl fmt::Debug for CallbackInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackInvoker")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(mode: ReportMode) -> (CallbackInvoker, Rc<RefCell<Vec<StickReport>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let callback: Box<dyn PositionCallback> =
            Box::new(move |id: JoystickId, x: i16, y: i16| {
                sink.borrow_mut().push(StickReport { id, x, y })
            });
        let invoker = CallbackInvoker::new(JoystickId(7), mode, Some(callback));
        (invoker, calls)
    }

    fn moved(position: Point, delta: Delta) -> ReportEvent {
        ReportEvent::Moved {
            movement: Movement::Accepted(position),
            delta,
        }
    }

    #[test]
    fn absolute_mode_reports_position() {
        let (mut invoker, calls) = recording(ReportMode::Absolute);
        let report = invoker.report(moved(Point::new(12, -4), Delta::new(2, 1)));

        let expected = StickReport { id: JoystickId(7), x: 12, y: -4 };
        assert_eq!(report, Some(expected));
        assert_eq!(*calls.borrow(), vec![expected]);
    }

    #[test]
    fn relative_mode_reports_step_delta() {
        let (mut invoker, calls) = recording(ReportMode::Relative);
        assert_eq!(invoker.mode(), ReportMode::Relative);
        invoker.report(moved(Point::new(12, -4), Delta::new(3, -2)));

        assert_eq!(
            *calls.borrow(),
            vec![StickReport { id: JoystickId(7), x: 3, y: -2 }]
        );
    }

    #[test]
    fn rejected_moves_are_not_reported() {
        for mode in [ReportMode::Absolute, ReportMode::Relative] {
            let (mut invoker, calls) = recording(mode);
            let report = invoker.report(ReportEvent::Moved {
                movement: Movement::Rejected(Point::new(1, 1)),
                delta: Delta::new(90, 0),
            });
            assert_eq!(report, None);
            assert!(calls.borrow().is_empty());
        }
    }

    #[test]
    fn release_depends_on_mode() {
        let (mut absolute, abs_calls) = recording(ReportMode::Absolute);
        absolute.report(ReportEvent::Released);
        assert_eq!(
            *abs_calls.borrow(),
            vec![StickReport { id: JoystickId(7), x: 0, y: 0 }]
        );

        let (mut relative, rel_calls) = recording(ReportMode::Relative);
        assert_eq!(relative.report(ReportEvent::Released), None);
        assert!(rel_calls.borrow().is_empty());
    }

    #[test]
    fn missing_callback_is_a_no_op() {
        let mut invoker = CallbackInvoker::new(JoystickId(1), ReportMode::Absolute, None);
        assert!(!invoker.has_callback());
        assert_eq!(invoker.report(moved(Point::new(1, 2), Delta::new(1, 2))), None);
        assert_eq!(invoker.report(ReportEvent::Released), None);
    }
}
