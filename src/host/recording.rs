use super::{JoystickStyle, PartStyle, Placement, WidgetHost, WidgetId};
use crate::joystick::Point;
use std::collections::BTreeMap;

/// Host double that keeps the widget tree in memory
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    next_id: u32,
    pub bases: BTreeMap<WidgetId, (WidgetId, Placement, u16, PartStyle)>,
    pub sticks: BTreeMap<WidgetId, (WidgetId, u16, PartStyle, Point)>,
    pub position_updates: Vec<(WidgetId, Point)>,
    pub deleted: Vec<WidgetId>,
    pub style: JoystickStyle,
}

impl RecordingHost {
    fn allocate(&mut self) -> WidgetId {
        self.next_id += 1;
        WidgetId(self.next_id)
    }

    pub fn stick_position(&self, stick: WidgetId) -> Option<Point> {
        self.sticks.get(&stick).map(|(_, _, _, position)| *position)
    }
}

impl WidgetHost for RecordingHost {
    fn create_base(
        &mut self,
        parent: WidgetId,
        placement: Placement,
        radius: u16,
        style: &PartStyle,
    ) -> WidgetId {
        let id = self.allocate();
        self.bases.insert(id, (parent, placement, radius, *style));
        id
    }

    fn create_stick(&mut self, base: WidgetId, radius: u16, style: &PartStyle) -> WidgetId {
        let id = self.allocate();
        self.sticks.insert(id, (base, radius, *style, Point::ORIGIN));
        id
    }

    fn set_stick_position(&mut self, stick: WidgetId, position: Point) {
        if let Some(entry) = self.sticks.get_mut(&stick) {
            entry.3 = position;
        }
        self.position_updates.push((stick, position));
    }

    fn delete(&mut self, widget: WidgetId) {
        self.bases.remove(&widget);
        self.sticks.retain(|_, (base, ..)| *base != widget);
        self.sticks.remove(&widget);
        self.deleted.push(widget);
    }

    fn default_style(&self) -> JoystickStyle {
        self.style
    }
}
