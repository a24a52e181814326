//! Joystick creation, event routing and release
//!
//! [`JoystickPanel`] is the owner of every joystick instance living on one
//! host. It plays the part of the per-widget user-data slot: each instance is
//! stored under the id of its handle widget, and notifications for that
//! widget are routed to it.
//!
//! An instance is stored before [`JoystickPanel::create`] returns, so the
//! host cannot deliver an event to a handle that has no data attached. Data
//! goes away exactly once, either through [`JoystickPanel::destroy`] (which
//! consumes the [`JoystickHandle`]) or through a host destroy notification.

use super::{Gesture, JoystickConfig, JoystickError, JoystickId, JoystickInstance, Point};
use super::{PositionCallback, StickEvent};
use crate::host::{WidgetHost, WidgetId};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Proof of ownership for one created joystick
///
/// Deliberately neither `Clone` nor `Copy`: handing it to
/// [`JoystickPanel::destroy`] is the only way to get rid of it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct JoystickHandle {
    id: JoystickId,
    base: WidgetId,
    stick: WidgetId,
}

impl JoystickHandle {
    pub fn id(&self) -> JoystickId {
        self.id
    }

    pub fn base_widget(&self) -> WidgetId {
        self.base
    }

    /// Widget that receives the press-move, release and destroy notifications
    pub fn stick_widget(&self) -> WidgetId {
        self.stick
    }
}

/// Registry of all joysticks attached to one host
pub struct JoystickPanel<H: WidgetHost> {
    host: H,
    slots: HashMap<WidgetId, Gesture>,
}

impl<H: WidgetHost> JoystickPanel<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            slots: HashMap::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Creates the widgets of one joystick and attaches its instance data
    ///
    /// # Errors
    ///
    /// * [`JoystickError::ZeroRadius`], [`JoystickError::StickTooLarge`],
    ///   [`JoystickError::BaseTooLarge`] - geometry rejected by
    ///   [`JoystickConfig::validate`]
    /// * [`JoystickError::DuplicateId`] - a live joystick already uses the id
    ///
    /// Nothing is created on the host when an error is returned.
    pub fn create(
        &mut self,
        parent: WidgetId,
        config: &JoystickConfig,
        callback: Option<Box<dyn PositionCallback>>,
    ) -> Result<JoystickHandle, JoystickError> {
        config.validate()?;
        if self.slots.values().any(|g| g.id() == config.id) {
            return Err(JoystickError::DuplicateId(config.id));
        }

        let style = config.style.unwrap_or_else(|| self.host.default_style());
        let base = self
            .host
            .create_base(parent, config.placement, config.base_radius, &style.base);
        let stick = self.host.create_stick(base, config.stick_radius, &style.stick);

        let instance = JoystickInstance::create(config, base, stick, callback);
        self.slots.insert(stick, Gesture::new(instance));

        info!(
            "Created {} ({} mode, base {}px, stick {}px) on {}",
            config.id, config.report_mode, config.base_radius, config.stick_radius, stick
        );
        Ok(JoystickHandle {
            id: config.id,
            base,
            stick,
        })
    }

    /// Routes one host notification to the instance attached to `widget`
    pub fn dispatch(&mut self, widget: WidgetId, event: StickEvent) {
        let Some(gesture) = self.slots.remove(&widget) else {
            warn!("No joystick data attached to {}, ignoring {:?}", widget, event);
            return;
        };

        match gesture.handle(event, &mut self.host) {
            Some(gesture) => {
                self.slots.insert(widget, gesture);
            }
            None => info!("Joystick on {} destroyed by host", widget),
        }
    }

    /// Releases a joystick and deletes its widgets
    ///
    /// If the host already destroyed the widget this only logs; the instance
    /// data is gone either way.
    pub fn destroy(&mut self, handle: JoystickHandle) {
        match self.slots.remove(&handle.stick) {
            Some(gesture) => {
                debug!("Releasing instance data of {}", gesture.id());
                self.host.delete(handle.base);
                info!("Destroyed {} on {}", handle.id, handle.stick);
            }
            None => debug!(
                "{} on {} was already destroyed by the host",
                handle.id, handle.stick
            ),
        }
    }

    pub fn position(&self, stick: WidgetId) -> Option<Point> {
        self.slots.get(&stick).map(Gesture::position)
    }

    pub fn is_dragging(&self, stick: WidgetId) -> Option<bool> {
        self.slots.get(&stick).map(Gesture::is_dragging)
    }

    pub fn contains(&self, stick: WidgetId) -> bool {
        self.slots.contains_key(&stick)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Live joysticks as `(id, stick widget)`, ordered by id
    pub fn joysticks(&self) -> Vec<(JoystickId, WidgetId)> {
        let mut list: Vec<_> = self.slots.iter().map(|(w, g)| (g.id(), *w)).collect();
        list.sort();
        list
    }
}
