//! egui implementation of [`WidgetHost`]
//!
//! egui is immediate mode, the joystick core expects retained widgets. The
//! host bridges the two by keeping a small widget tree of its own and
//! replaying it every frame in [`EguiHost::show`]. While painting it also
//! turns egui drag input into press-move and release notifications.
//!
//! Pointer deltas from egui are fractional. The fraction left after rounding
//! is carried over to the next frame so slow drags still move the handle.

use super::common::{paint_part, place_circle};
use crate::host::{JoystickStyle, PartStyle, Placement, WidgetHost, WidgetId};
use crate::joystick::{Delta, Point, StickEvent};
use eframe::egui::{self, vec2, CursorIcon, Id, Rect, Sense, Vec2};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
enum HostWidget {
    Base {
        parent: WidgetId,
        placement: Placement,
        radius: u16,
        style: PartStyle,
    },
    Stick {
        base: WidgetId,
        radius: u16,
        style: PartStyle,
        position: Point,
        remainder: Vec2,
    },
}

/// Retained widget tree painted with egui
#[derive(Debug)]
pub struct EguiHost {
    next_id: u32,
    widgets: BTreeMap<WidgetId, HostWidget>,
    default_style: JoystickStyle,
    // Destroy notifications waiting for the next show()
    pending: Vec<(WidgetId, StickEvent)>,
}

impl EguiHost {
    pub fn new(default_style: JoystickStyle) -> Self {
        Self {
            next_id: WidgetId::SCREEN.0,
            widgets: BTreeMap::new(),
            default_style,
            pending: Vec::new(),
        }
    }

    fn allocate(&mut self) -> WidgetId {
        self.next_id += 1;
        WidgetId(self.next_id)
    }

    /// Host-side deletion of a base, e.g. when its screen goes away
    ///
    /// Unlike [`WidgetHost::delete`], every handle inside the base gets a
    /// destroy notification on the next [`EguiHost::show`].
    pub fn remove(&mut self, base: WidgetId) {
        for child in self.children_of(base) {
            match self.widgets.get(&child) {
                Some(HostWidget::Stick { .. }) => {
                    self.widgets.remove(&child);
                    self.pending.push((child, StickEvent::Destroy));
                }
                _ => self.remove(child),
            }
        }
        if self.widgets.remove(&base).is_some() {
            debug!("Host removed {}", base);
        }
    }

    /// Ids of all bases on the screen
    pub fn bases(&self) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|(_, w)| matches!(w, HostWidget::Base { .. }))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    fn children_of(&self, parent: WidgetId) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|(_, w)| match w {
                HostWidget::Base { parent: p, .. } => *p == parent,
                HostWidget::Stick { base, .. } => *base == parent,
            })
            .map(|(id, _)| *id)
            .collect()
    }

    // Screen rectangle of a base, following parents up to the screen
    fn base_rect(&self, id: WidgetId, screen: Rect) -> Option<Rect> {
        if id == WidgetId::SCREEN {
            return Some(screen);
        }
        match self.widgets.get(&id)? {
            HostWidget::Base {
                parent,
                placement,
                radius,
                ..
            } => {
                let parent_rect = self.base_rect(*parent, screen)?;
                Some(place_circle(parent_rect, *placement, f32::from(*radius)))
            }
            HostWidget::Stick { .. } => None,
        }
    }

    /// Paints every joystick into `ui` and collects the notifications for this frame
    pub fn show(&mut self, ui: &mut egui::Ui) -> Vec<(WidgetId, StickEvent)> {
        let screen = ui.max_rect();
        let painter = ui.painter().clone();
        let mut events = std::mem::take(&mut self.pending);

        let base_rects: BTreeMap<WidgetId, Rect> = self
            .bases()
            .into_iter()
            .filter_map(|id| self.base_rect(id, screen).map(|r| (id, r)))
            .collect();

        for (id, widget) in &self.widgets {
            if let HostWidget::Base { radius, style, .. } = widget {
                if let Some(rect) = base_rects.get(id) {
                    paint_part(&painter, rect.center(), f32::from(*radius), style);
                }
            }
        }

        for (id, widget) in self.widgets.iter_mut() {
            let HostWidget::Stick {
                base,
                radius,
                style,
                position,
                remainder,
            } = widget
            else {
                continue;
            };
            let Some(base_rect) = base_rects.get(&*base) else {
                warn!("{} has no base to sit in", id);
                continue;
            };

            let radius = f32::from(*radius);
            let center = base_rect.center() + vec2(f32::from(position.x), f32::from(position.y));
            let rect = Rect::from_center_size(center, vec2(radius * 2.0, radius * 2.0));
            // Drag-only sense starts the drag on press, no click threshold
            let response = ui
                .interact(rect, Id::new(("touchstick", id.0)), Sense::drag())
                .on_hover_cursor(CursorIcon::Grab);

            if response.dragged() {
                let total = response.drag_delta() + *remainder;
                let step = vec2(total.x.round(), total.y.round());
                *remainder = total - step;
                let delta = Delta::new(to_i16(step.x), to_i16(step.y));
                if !delta.is_zero() {
                    events.push((*id, StickEvent::PressMove(delta)));
                }
            }
            if response.drag_stopped() {
                *remainder = Vec2::ZERO;
                events.push((*id, StickEvent::Release));
            }

            paint_part(&painter, center, radius, style);
        }

        events
    }
}

fn to_i16(value: f32) -> i16 {
    value.clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

impl WidgetHost for EguiHost {
    fn create_base(
        &mut self,
        parent: WidgetId,
        placement: Placement,
        radius: u16,
        style: &PartStyle,
    ) -> WidgetId {
        let id = self.allocate();
        self.widgets.insert(
            id,
            HostWidget::Base {
                parent,
                placement,
                radius,
                style: *style,
            },
        );
        debug!("Created base {} in {} at {:?}", id, parent, placement);
        id
    }

    fn create_stick(&mut self, base: WidgetId, radius: u16, style: &PartStyle) -> WidgetId {
        let id = self.allocate();
        self.widgets.insert(
            id,
            HostWidget::Stick {
                base,
                radius,
                style: *style,
                position: Point::ORIGIN,
                remainder: Vec2::ZERO,
            },
        );
        debug!("Created stick {} in {}", id, base);
        id
    }

    fn set_stick_position(&mut self, stick: WidgetId, new_position: Point) {
        match self.widgets.get_mut(&stick) {
            Some(HostWidget::Stick { position, .. }) => *position = new_position,
            _ => warn!("Cannot position {}: not a stick", stick),
        }
    }

    fn delete(&mut self, widget: WidgetId) {
        for child in self.children_of(widget) {
            self.delete(child);
        }
        self.widgets.remove(&widget);
    }

    fn default_style(&self) -> JoystickStyle {
        self.default_style
    }
}
