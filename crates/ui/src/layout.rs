//! Border layout with a north strip above a center area.

use common::{Point, Rect, Size};
use embed::UiSurface;

/// Height of the north strip, in logical pixels.
pub const NORTH_HEIGHT: f32 = 28.0;

/// Approximate width of one text column.
const COLUMN_WIDTH: f32 = 7.0;

/// Layout slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    North,
    Center,
}

/// Focusable widget identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Widget {
    AddressField,
    BrowserView,
}

/// A component placed in the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    /// Text input of the given width in columns.
    AddressField { columns: usize },
    /// View rendered by the embedded browser.
    BrowserSurface(UiSurface),
}

impl Component {
    pub fn widget(&self) -> Widget {
        match self {
            Component::AddressField { .. } => Widget::AddressField,
            Component::BrowserSurface(_) => Widget::BrowserView,
        }
    }

    fn preferred_size(&self) -> Size {
        match self {
            Component::AddressField { columns } => {
                Size::new(*columns as f32 * COLUMN_WIDTH, NORTH_HEIGHT)
            }
            Component::BrowserSurface(_) => Size::ZERO,
        }
    }
}

/// Border layout.
#[derive(Clone, Debug, Default)]
pub struct BorderLayout {
    north: Option<Component>,
    center: Option<Component>,
}

impl BorderLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `component` in `slot`, replacing what was there.
    pub fn add(&mut self, component: Component, slot: Slot) -> Option<Component> {
        match slot {
            Slot::North => self.north.replace(component),
            Slot::Center => self.center.replace(component),
        }
    }

    pub fn component(&self, slot: Slot) -> Option<&Component> {
        match slot {
            Slot::North => self.north.as_ref(),
            Slot::Center => self.center.as_ref(),
        }
    }

    pub fn contains(&self, widget: Widget) -> bool {
        self.focus_order().contains(&widget)
    }

    /// Widgets in focus traversal order.
    pub fn focus_order(&self) -> Vec<Widget> {
        [self.north, self.center]
            .iter()
            .flatten()
            .map(Component::widget)
            .collect()
    }

    /// Smallest size showing every component at its preferred size.
    pub fn preferred_size(&self) -> Size {
        let north = self.north.map(|c| c.preferred_size()).unwrap_or(Size::ZERO);
        let center = self.center.map(|c| c.preferred_size()).unwrap_or(Size::ZERO);
        Size::new(north.width.max(center.width), north.height + center.height)
    }

    /// Bounds of each occupied slot within a window of `size`.
    pub fn regions(&self, size: Size) -> Vec<(Slot, Rect)> {
        let north_height = if self.north.is_some() {
            NORTH_HEIGHT.min(size.height)
        } else {
            0.0
        };

        let mut regions = Vec::with_capacity(2);
        if self.north.is_some() {
            regions.push((Slot::North, Rect::new(0.0, 0.0, size.width, north_height)));
        }
        if self.center.is_some() {
            regions.push((
                Slot::Center,
                Rect::new(0.0, north_height, size.width, size.height - north_height),
            ));
        }
        regions
    }

    /// Slot under `point` in a window of `size`.
    pub fn hit_test(&self, size: Size, point: Point) -> Option<Slot> {
        self.regions(size)
            .into_iter()
            .find(|(_, rect)| rect.contains_point(point))
            .map(|(slot, _)| slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embed::BrowserId;

    fn surface() -> UiSurface {
        UiSurface {
            browser: BrowserId(1),
            offscreen: false,
            transparent: false,
        }
    }

    fn full_layout() -> BorderLayout {
        let mut layout = BorderLayout::new();
        layout.add(Component::AddressField { columns: 100 }, Slot::North);
        layout.add(Component::BrowserSurface(surface()), Slot::Center);
        layout
    }

    #[test]
    fn test_focus_order() {
        let layout = full_layout();
        assert_eq!(
            layout.focus_order(),
            vec![Widget::AddressField, Widget::BrowserView]
        );
        assert!(layout.contains(Widget::BrowserView));
        assert!(!BorderLayout::new().contains(Widget::AddressField));
    }

    #[test]
    fn test_regions() {
        let layout = full_layout();
        let regions = layout.regions(Size::new(800.0, 600.0));
        assert_eq!(
            regions,
            vec![
                (Slot::North, Rect::new(0.0, 0.0, 800.0, NORTH_HEIGHT)),
                (Slot::Center, Rect::new(0.0, NORTH_HEIGHT, 800.0, 600.0 - NORTH_HEIGHT)),
            ]
        );
    }

    #[test]
    fn test_hit_test() {
        let layout = full_layout();
        let size = Size::new(800.0, 600.0);
        assert_eq!(layout.hit_test(size, Point::new(10.0, 5.0)), Some(Slot::North));
        assert_eq!(layout.hit_test(size, Point::new(10.0, 300.0)), Some(Slot::Center));
        assert_eq!(layout.hit_test(size, Point::new(900.0, 300.0)), None);
    }

    #[test]
    fn test_preferred_size() {
        let layout = full_layout();
        assert_eq!(layout.preferred_size(), Size::new(700.0, NORTH_HEIGHT));
    }

    #[test]
    fn test_add_replaces() {
        let mut layout = BorderLayout::new();
        assert!(layout.add(Component::AddressField { columns: 10 }, Slot::North).is_none());
        let previous = layout.add(Component::AddressField { columns: 20 }, Slot::North);
        assert_eq!(previous, Some(Component::AddressField { columns: 10 }));
    }
}
