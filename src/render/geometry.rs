//! Ring outline geometry
//!
//! The halo is a square centered on the origin with rounded corners: four
//! quarter arcs joined by straight edges. A corner radius of zero gives a
//! plain square, a radius equal to the half size gives a circle.

use std::f64::consts::{FRAC_PI_2, PI};
use tiny_skia::{Path, PathBuilder};

/// Cubic Bézier handle length for a unit quarter circle.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Dash stroke length in pixels.
pub const DASH_LENGTH: f64 = 2.0;
/// Smallest gap the dash fitter will aim for.
pub const MIN_DASH_GAP: f64 = 1.5;
/// Fewer dashes than this stop reading as a dashed ring.
pub const MIN_DASH_COUNT: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn on_circle(center: Point, radius: f64, angle: f64) -> Point {
        Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    }
}

/// One piece of the outline, traversed clockwise (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line { from: Point, to: Point },
    /// Quarter circle sweeping `+π/2` from `start_angle`.
    QuarterArc {
        center: Point,
        radius: f64,
        start_angle: f64,
    },
}

impl Segment {
    pub fn start(&self) -> Point {
        match *self {
            Segment::Line { from, .. } => from,
            Segment::QuarterArc {
                center,
                radius,
                start_angle,
            } => Point::on_circle(center, radius, start_angle),
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Segment::Line { to, .. } => to,
            Segment::QuarterArc {
                center,
                radius,
                start_angle,
            } => Point::on_circle(center, radius, start_angle + FRAC_PI_2),
        }
    }

    pub fn length(&self) -> f64 {
        match *self {
            Segment::Line { from, to } => (to.x - from.x).hypot(to.y - from.y),
            Segment::QuarterArc { radius, .. } => radius * FRAC_PI_2,
        }
    }
}

/// Rounded square of half size `half`, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedSquare {
    half: f64,
    radius: f64,
}

impl RoundedSquare {
    /// Negative sizes collapse to zero; the radius is clamped to `[0, half]`.
    pub fn new(half: f64, radius: f64) -> Self {
        let half = if half.is_finite() { half.max(0.0) } else { 0.0 };
        let radius = if radius.is_finite() {
            radius.clamp(0.0, half)
        } else {
            0.0
        };
        Self { half, radius }
    }

    pub fn half(&self) -> f64 {
        self.half
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Exact outline length: `8 (h - r) + 2πr`.
    pub fn perimeter(&self) -> f64 {
        8.0 * (self.half - self.radius) + 2.0 * PI * self.radius
    }

    /// Outline segments, starting just right of the top-left corner.
    /// Zero-length edges and zero-radius arcs are left out.
    pub fn segments(&self) -> Vec<Segment> {
        let h = self.half;
        let r = self.radius;
        let inner = h - r;
        let mut out = Vec::with_capacity(8);

        let corners = [
            // (edge start, edge end, arc center, arc start angle)
            (
                Point::new(-inner, -h),
                Point::new(inner, -h),
                Point::new(inner, -inner),
                -FRAC_PI_2,
            ),
            (
                Point::new(h, -inner),
                Point::new(h, inner),
                Point::new(inner, inner),
                0.0,
            ),
            (
                Point::new(inner, h),
                Point::new(-inner, h),
                Point::new(-inner, inner),
                FRAC_PI_2,
            ),
            (
                Point::new(-h, inner),
                Point::new(-h, -inner),
                Point::new(-inner, -inner),
                PI,
            ),
        ];

        for (from, to, center, start_angle) in corners {
            if inner > 0.0 {
                out.push(Segment::Line { from, to });
            }
            if r > 0.0 {
                out.push(Segment::QuarterArc {
                    center,
                    radius: r,
                    start_angle,
                });
            }
        }

        out
    }

    /// Closed tiny-skia path for stroking or filling.
    ///
    /// Returns `None` for a degenerate (zero-size) outline.
    pub fn to_path(&self) -> Option<Path> {
        let mut pb = PathBuilder::new();
        if !self.append_to(&mut pb) {
            return None;
        }
        pb.finish()
    }

    /// Append the outline as a closed contour. Returns false if there was
    /// nothing to append.
    pub fn append_to(&self, pb: &mut PathBuilder) -> bool {
        let segments = self.segments();
        let Some(first) = segments.first() else {
            return false;
        };

        let start = first.start();
        pb.move_to(start.x as f32, start.y as f32);

        for segment in &segments {
            match *segment {
                Segment::Line { to, .. } => pb.line_to(to.x as f32, to.y as f32),
                Segment::QuarterArc {
                    center,
                    radius,
                    start_angle,
                } => {
                    let end_angle = start_angle + FRAC_PI_2;
                    let p0 = Point::on_circle(center, radius, start_angle);
                    let p3 = Point::on_circle(center, radius, end_angle);
                    let k = KAPPA * radius;
                    let c1 = Point::new(p0.x - k * start_angle.sin(), p0.y + k * start_angle.cos());
                    let c2 = Point::new(p3.x + k * end_angle.sin(), p3.y - k * end_angle.cos());
                    pb.cubic_to(
                        c1.x as f32,
                        c1.y as f32,
                        c2.x as f32,
                        c2.y as f32,
                        p3.x as f32,
                        p3.y as f32,
                    );
                }
            }
        }

        pb.close();
        true
    }
}

/// Dash layout that tiles a closed outline exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash: f64,
    pub gap: f64,
    pub count: u32,
}

impl DashPattern {
    /// Length of one dash plus its gap.
    pub fn unit(&self) -> f64 {
        self.dash + self.gap
    }
}

/// Fit an integer number of dashes onto a closed outline.
///
/// The count is the integer closest to `perimeter / (dash + target_gap)`,
/// never below [`MIN_DASH_COUNT`]; the gap is then recomputed so that
/// `count * (dash + gap) == perimeter` and the loop closes without a seam.
/// Returns `None` when the outline is too short to carry dashes, i.e. when
/// `perimeter / MIN_DASH_COUNT` does not exceed [`DASH_LENGTH`]; callers then
/// draw the ring as a solid stroke.
pub fn fit_dashes(perimeter: f64, target_gap: f64) -> Option<DashPattern> {
    if !perimeter.is_finite() || perimeter <= 0.0 {
        return None;
    }

    let target_gap = if target_gap.is_finite() {
        target_gap.max(MIN_DASH_GAP)
    } else {
        MIN_DASH_GAP
    };
    let target_unit = DASH_LENGTH + target_gap;

    let count = ((perimeter / target_unit).round() as u32).max(MIN_DASH_COUNT);
    let gap = perimeter / count as f64 - DASH_LENGTH;
    if gap <= 0.0 {
        return None;
    }

    Some(DashPattern {
        dash: DASH_LENGTH,
        gap,
        count,
    })
}
