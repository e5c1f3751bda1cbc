//! Coordinate conversion between screen space and diagram space.
//!
//! The viewport is centered on `pan`; its view box spans
//! `screen_size / zoom` diagram units. A screen point `s` maps to
//! `view_box.origin + s / zoom`, which is the same linear mapping as
//! `s / screen_size * view_box.size + view_box.origin` without dividing by
//! the screen size, so an unmeasured (zero-size) container stays finite.

use crate::geometry::{Coord, Point, Rect};
use crate::transform::TransformState;

/// Conversion context for one transform and container size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub screen_size: Point,
    pub transform: TransformState,
}

impl Viewport {
    pub fn new(screen_size: Point, transform: TransformState) -> Self {
        Self {
            screen_size,
            transform,
        }
    }

    /// The diagram-space rectangle currently visible.
    pub fn view_box(&self) -> Rect {
        let zoom = self.transform.zoom;
        let width = self.screen_size.x / zoom;
        let height = self.screen_size.y / zoom;
        Rect::new(
            self.transform.pan.x - width / 2.0,
            self.transform.pan.y - height / 2.0,
            width,
            height,
        )
    }

    /// Screen -> diagram. Missing axes stay missing.
    pub fn to_diagram_space(&self, coord: Coord) -> Coord {
        let view_box = self.view_box();
        let zoom = self.transform.zoom;
        Coord {
            x: coord.x.map(|x| x / zoom + view_box.x),
            y: coord.y.map(|y| y / zoom + view_box.y),
        }
    }

    /// Diagram -> screen. Missing axes stay missing.
    pub fn to_screen_space(&self, coord: Coord) -> Coord {
        let view_box = self.view_box();
        let zoom = self.transform.zoom;
        Coord {
            x: coord.x.map(|x| (x - view_box.x) * zoom),
            y: coord.y.map(|y| (y - view_box.y) * zoom),
        }
    }

    pub fn point_to_diagram(&self, p: Point) -> Point {
        let c = self.to_diagram_space(p.into());
        Point::new(c.x.unwrap_or_default(), c.y.unwrap_or_default())
    }

    pub fn point_to_screen(&self, p: Point) -> Point {
        let c = self.to_screen_space(p.into());
        Point::new(c.x.unwrap_or_default(), c.y.unwrap_or_default())
    }
}
