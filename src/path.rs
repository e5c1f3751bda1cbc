//! Relationship path engine.
//!
//! Computes the connector drawn between two field rows. Connectors are
//! either a straight segment (nearly level fields on tables that do not
//! overlap horizontally) or an elbow made of straight runs joined by
//! quarter-circle arcs. Paths are returned as a list of commands so callers
//! can inspect endpoints; [`RelationshipPath::to_svg`] renders SVG path data.
//!
//! ## Routing cases
//!
//! ```text
//!             end below start          end above start
//! FullyRight  exit right, mid elbow    exit right, mid elbow
//! OverlapsRight  wrap end's right side    wrap start's left side
//! OverlapsLeft   wrap end's left side     wrap start's right side
//! FullyLeft   exit left, mid elbow     exit left, mid elbow
//! ```

use crate::constants::{
    PATH_BASE_RADIUS, PATH_LINEAR_EPSILON, PATH_LINEAR_MAX_RADIUS, PATH_RADIUS_DIVISOR,
    TABLE_FIELD_HEIGHT, TABLE_HEADER_HEIGHT,
};
use crate::geometry::Point;
use std::fmt::Write as _;

/// Vertical center of field row `index` in a table whose top edge is at `table_y`.
#[inline]
pub fn field_anchor_y(table_y: f64, index: usize) -> f64 {
    table_y + index as f64 * TABLE_FIELD_HEIGHT + TABLE_HEADER_HEIGHT + TABLE_FIELD_HEIGHT / 2.0
}

/// Inputs to [`calc_path`]: table origins and field row indices of both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathGeometry {
    pub start_table: Point,
    pub end_table: Point,
    pub start_field_index: usize,
    pub end_field_index: usize,
}

/// Direction an arc is swept in, matching the SVG sweep flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sweep {
    CounterClockwise,
    Clockwise,
}

impl Sweep {
    fn flag(self) -> u8 {
        match self {
            Sweep::CounterClockwise => 0,
            Sweep::Clockwise => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quarter-circle arc of the given radius ending at `to`
    Arc { radius: f64, sweep: Sweep, to: Point },
}

impl PathCommand {
    fn end_point(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::Arc { to, .. } => to,
        }
    }
}

/// A computed connector.
#[derive(Clone, Debug, PartialEq)]
pub struct RelationshipPath {
    pub commands: Vec<PathCommand>,
    /// True for the straight-segment form
    pub is_linear: bool,
}

impl RelationshipPath {
    pub fn start(&self) -> Option<Point> {
        self.commands.first().map(PathCommand::end_point)
    }

    pub fn end(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::end_point)
    }

    /// Every coordinate and radius is finite.
    pub fn is_finite(&self) -> bool {
        self.commands.iter().all(|c| match *c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p.is_finite(),
            PathCommand::Arc { radius, to, .. } => radius.is_finite() && radius >= 0.0 && to.is_finite(),
        })
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *cmd {
                PathCommand::MoveTo(p) => write!(d, "M {} {}", p.x, p.y),
                PathCommand::LineTo(p) => write!(d, "L {} {}", p.x, p.y),
                PathCommand::Arc { radius, sweep, to } => write!(
                    d,
                    "A {r} {r} 0 0 {} {} {}",
                    sweep.flag(),
                    to.x,
                    to.y,
                    r = radius
                ),
            };
        }
        d
    }
}

/// Horizontal relation between the end table and the start table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Overlap {
    /// End table lies entirely to the right of the start table
    FullyRight,
    /// End table's left edge falls within the start table's span
    OverlapsRight,
    /// End table's right edge falls within the start table's span
    OverlapsLeft,
    /// End table lies entirely to the left
    FullyLeft,
}

fn classify(x1: f64, x2: f64, width: f64) -> Overlap {
    if x1 + width <= x2 {
        Overlap::FullyRight
    } else if x1 <= x2 && x2 <= x1 + width {
        Overlap::OverlapsRight
    } else if x1 <= x2 + width && x2 + width <= x1 + width {
        Overlap::OverlapsLeft
    } else {
        Overlap::FullyLeft
    }
}

struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    fn start(x: f64, y: f64) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(Point::new(x, y))],
        }
    }

    fn line(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    fn arc(mut self, radius: f64, sweep: Sweep, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Arc {
            radius,
            sweep,
            to: Point::new(x, y),
        });
        self
    }

    fn finish(self, is_linear: bool) -> RelationshipPath {
        RelationshipPath {
            commands: self.commands,
            is_linear,
        }
    }
}

/// Route a connector between two field rows.
///
/// `table_width` is the rendered width of both tables; `zoom` scales the
/// corner radius and the "nearly level" band. Non-finite or non-positive
/// zoom values are treated as 1.
pub fn calc_path(geometry: &PathGeometry, table_width: f64, zoom: f64) -> RelationshipPath {
    use Sweep::{Clockwise as CW, CounterClockwise as CCW};

    let zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 };
    let w = table_width;
    let x1 = geometry.start_table.x;
    let y1 = field_anchor_y(geometry.start_table.y, geometry.start_field_index);
    let x2 = geometry.end_table.x;
    let y2 = field_anchor_y(geometry.end_table.y, geometry.end_field_index);

    let gap = (y1 - y2).abs();
    let overlap = classify(x1, x2, w);

    if gap <= TABLE_FIELD_HEIGHT * zoom && gap / PATH_RADIUS_DIVISOR <= PATH_LINEAR_MAX_RADIUS {
        match overlap {
            Overlap::FullyRight => {
                return PathBuilder::start(x1 + w, y1)
                    .line(x2, y2 + PATH_LINEAR_EPSILON)
                    .finish(true);
            }
            Overlap::FullyLeft => {
                return PathBuilder::start(x1, y1)
                    .line(x2 + w, y2 + PATH_LINEAR_EPSILON)
                    .finish(true);
            }
            Overlap::OverlapsRight | Overlap::OverlapsLeft => {}
        }
    }

    let r = (gap / PATH_RADIUS_DIVISOR).max(PATH_BASE_RADIUS * zoom);
    let mid_x = (x2 + x1 + w) / 2.0;
    let end_x = if x2 + w < x1 { x2 + w } else { x2 };

    let path = if y1 <= y2 {
        match overlap {
            Overlap::FullyRight => PathBuilder::start(x1 + w, y1)
                .line(mid_x - r, y1)
                .arc(r, CW, mid_x, y1 + r)
                .line(mid_x, y2 - r)
                .arc(r, CCW, mid_x + r, y2)
                .line(end_x, y2),
            Overlap::OverlapsRight => PathBuilder::start(x1 + w, y1)
                .line(x2 + w, y1)
                .arc(r, CW, x2 + w + r, y1 + r)
                .line(x2 + w + r, y2 - r)
                .arc(r, CW, x2 + w, y2)
                .line(x2 + w, y2),
            Overlap::OverlapsLeft => PathBuilder::start(x1, y1)
                .line(x2 - r, y1)
                .arc(r, CCW, x2 - 2.0 * r, y1 + r)
                .line(x2 - 2.0 * r, y2 - r)
                .arc(r, CCW, x2 - r, y2)
                .line(x2, y2),
            Overlap::FullyLeft => PathBuilder::start(x1, y1)
                .line(mid_x + r, y1)
                .arc(r, CCW, mid_x, y1 + r)
                .line(mid_x, y2 - r)
                .arc(r, CW, mid_x - r, y2)
                .line(end_x, y2),
        }
    } else {
        match overlap {
            Overlap::FullyRight => PathBuilder::start(x1 + w, y1)
                .line(mid_x - r, y1)
                .arc(r, CCW, mid_x, y1 - r)
                .line(mid_x, y2 + r)
                .arc(r, CW, mid_x + r, y2)
                .line(end_x, y2),
            Overlap::OverlapsRight => PathBuilder::start(x1, y1)
                .line(x1 - 2.0 * r, y1)
                .arc(r, CW, x1 - 3.0 * r, y1 - r)
                .line(x1 - 3.0 * r, y2 + r)
                .arc(r, CW, x1 - 2.0 * r, y2)
                .line(end_x, y2),
            Overlap::OverlapsLeft => PathBuilder::start(x1 + w, y1)
                .line(x1 + w + r, y1)
                .arc(r, CCW, x1 + w + 2.0 * r, y1 - r)
                .line(x1 + w + 2.0 * r, y2 + r)
                .arc(r, CCW, x1 + w + r, y2)
                .line(x2 + w, y2),
            Overlap::FullyLeft => PathBuilder::start(x1, y1)
                .line(mid_x + r, y1)
                .arc(r, CW, mid_x, y1 - r)
                .line(mid_x, y2 + r)
                .arc(r, CCW, mid_x - r, y2)
                .line(end_x, y2),
        }
    };

    path.finish(false)
}

/// Dashed preview curve drawn while linking: a horizontal-tangent cubic.
pub fn link_preview_path(start: Point, end: Point) -> String {
    let mid_x = (start.x + end.x) / 2.0;
    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        start.x, start.y, mid_x, start.y, mid_x, end.y, end.x, end.y
    )
}
