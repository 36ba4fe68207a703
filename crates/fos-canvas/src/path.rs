//! Canvas paths
//!
//! Points are mapped through the current transform when they are added, so
//! the stored path is already in device space.

use std::f64::consts::{FRAC_PI_2, TAU};

use tiny_skia::{PathBuilder, Transform};

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathOp {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32),
    CubicTo(f32, f32, f32, f32, f32, f32),
    Close,
}

/// Device-space path under construction
#[derive(Debug, Clone, Default)]
pub struct Path2D {
    ops: Vec<PathOp>,
    /// Start of the current subpath (device space)
    subpath_start: Option<(f32, f32)>,
    /// Last point (device space)
    current: Option<(f32, f32)>,
}

fn map(transform: &Transform, x: f64, y: f64) -> (f32, f32) {
    let (x, y) = (x as f32, y as f32);
    (
        transform.sx * x + transform.kx * y + transform.tx,
        transform.ky * x + transform.sy * y + transform.ty,
    )
}

fn finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

impl Path2D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of recorded segments, including moves
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn move_to(&mut self, transform: &Transform, x: f64, y: f64) {
        if !finite(&[x, y]) {
            return;
        }
        let p = map(transform, x, y);
        self.ops.push(PathOp::MoveTo(p.0, p.1));
        self.subpath_start = Some(p);
        self.current = Some(p);
    }

    pub fn line_to(&mut self, transform: &Transform, x: f64, y: f64) {
        if !finite(&[x, y]) {
            return;
        }
        if self.current.is_none() {
            return self.move_to(transform, x, y);
        }
        let p = map(transform, x, y);
        self.ops.push(PathOp::LineTo(p.0, p.1));
        self.current = Some(p);
    }

    pub fn quadratic_curve_to(&mut self, transform: &Transform, cpx: f64, cpy: f64, x: f64, y: f64) {
        if !finite(&[cpx, cpy, x, y]) {
            return;
        }
        if self.current.is_none() {
            self.move_to(transform, cpx, cpy);
        }
        let c = map(transform, cpx, cpy);
        let p = map(transform, x, y);
        self.ops.push(PathOp::QuadTo(c.0, c.1, p.0, p.1));
        self.current = Some(p);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn bezier_curve_to(
        &mut self,
        transform: &Transform,
        cp1x: f64,
        cp1y: f64,
        cp2x: f64,
        cp2y: f64,
        x: f64,
        y: f64,
    ) {
        if !finite(&[cp1x, cp1y, cp2x, cp2y, x, y]) {
            return;
        }
        if self.current.is_none() {
            self.move_to(transform, cp1x, cp1y);
        }
        let c1 = map(transform, cp1x, cp1y);
        let c2 = map(transform, cp2x, cp2y);
        let p = map(transform, x, y);
        self.ops.push(PathOp::CubicTo(c1.0, c1.1, c2.0, c2.1, p.0, p.1));
        self.current = Some(p);
    }

    pub fn close_path(&mut self) {
        if let Some(start) = self.subpath_start {
            self.ops.push(PathOp::Close);
            self.current = Some(start);
        }
    }

    /// Closed rectangle subpath; the current point ends at `(x, y)`
    pub fn rect(&mut self, transform: &Transform, x: f64, y: f64, w: f64, h: f64) {
        if !finite(&[x, y, w, h]) {
            return;
        }
        self.move_to(transform, x, y);
        self.line_to(transform, x + w, y);
        self.line_to(transform, x + w, y + h);
        self.line_to(transform, x, y + h);
        self.close_path();
        self.move_to(transform, x, y);
    }

    /// Elliptical arc, approximated with one cubic per quarter turn
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        transform: &Transform,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    ) {
        if !finite(&[cx, cy, rx, ry, rotation, start, end]) || rx < 0.0 || ry < 0.0 {
            return;
        }
        let sweep = arc_sweep(start, end, anticlockwise);
        let (sin_r, cos_r) = rotation.sin_cos();
        let point = |angle: f64| -> (f64, f64) {
            let (x, y) = (rx * angle.cos(), ry * angle.sin());
            (cx + x * cos_r - y * sin_r, cy + x * sin_r + y * cos_r)
        };
        let derivative = |angle: f64| -> (f64, f64) {
            let (dx, dy) = (-rx * angle.sin(), ry * angle.cos());
            (dx * cos_r - dy * sin_r, dx * sin_r + dy * cos_r)
        };

        let (sx, sy) = point(start);
        self.line_to(transform, sx, sy);
        if sweep == 0.0 {
            return;
        }

        let segments = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        let mut angle = start;
        for _ in 0..segments {
            let next = angle + step;
            let (x0, y0) = point(angle);
            let (dx0, dy0) = derivative(angle);
            let (x1, y1) = point(next);
            let (dx1, dy1) = derivative(next);
            self.bezier_curve_to(
                transform,
                x0 + k * dx0,
                y0 + k * dy0,
                x1 - k * dx1,
                y1 - k * dy1,
                x1,
                y1,
            );
            angle = next;
        }
    }

    /// Build a tiny-skia path; `None` when nothing drawable was recorded
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        for op in &self.ops {
            match *op {
                PathOp::MoveTo(x, y) => builder.move_to(x, y),
                PathOp::LineTo(x, y) => builder.line_to(x, y),
                PathOp::QuadTo(x1, y1, x, y) => builder.quad_to(x1, y1, x, y),
                PathOp::CubicTo(x1, y1, x2, y2, x, y) => builder.cubic_to(x1, y1, x2, y2, x, y),
                PathOp::Close => builder.close(),
            }
        }
        builder.finish()
    }
}

/// Signed sweep of an arc as canvas defines it
fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    let delta = end - start;
    if !anticlockwise {
        if delta >= TAU {
            TAU
        } else {
            delta.rem_euclid(TAU)
        }
    } else if -delta >= TAU {
        -TAU
    } else {
        -(-delta).rem_euclid(TAU)
    }
}
