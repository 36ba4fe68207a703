//! Text Drawing
//!
//! Canvas 2D text methods. Glyphs are not rasterized; each call records a
//! [`TextRun`] with the resolved position, font and color so callers can
//! inspect what was drawn.

use crate::{CanvasRenderingContext2D, Color};

/// Average advance as a fraction of the font size
const ADVANCE_RATIO: f64 = 0.6;

/// Text metrics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub actual_bounding_box_left: f64,
    pub actual_bounding_box_right: f64,
    pub actual_bounding_box_ascent: f64,
    pub actual_bounding_box_descent: f64,
}

/// One `fillText`/`strokeText` call
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Device-space anchor
    pub x: f64,
    pub y: f64,
    pub max_width: Option<f64>,
    pub font: String,
    pub align: &'static str,
    pub baseline: &'static str,
    pub color: Color,
    /// Filled (true) or stroked (false)
    pub filled: bool,
}

/// Pixel size from a CSS font shorthand (`bold 16px serif` -> 16)
pub fn font_size_px(font: &str) -> Option<f64> {
    font.split_whitespace().find_map(|token| {
        let token = token.split('/').next()?;
        if let Some(px) = token.strip_suffix("px") {
            return px.parse().ok();
        }
        if let Some(pt) = token.strip_suffix("pt") {
            return pt.parse::<f64>().ok().map(|pt| pt * 4.0 / 3.0);
        }
        if let Some(em) = token.strip_suffix("em") {
            return em.parse::<f64>().ok().map(|em| em * 16.0);
        }
        None
    })
}

impl CanvasRenderingContext2D {
    pub fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        self.record_text(text, x, y, max_width, true);
    }

    pub fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        self.record_text(text, x, y, max_width, false);
    }

    /// Estimated metrics from the current font size
    pub fn measure_text(&self, text: &str) -> TextMetrics {
        let size = font_size_px(self.font()).unwrap_or(10.0);
        let width = text.chars().count() as f64 * size * ADVANCE_RATIO;
        TextMetrics {
            width,
            actual_bounding_box_left: 0.0,
            actual_bounding_box_right: width,
            actual_bounding_box_ascent: size * 0.8,
            actual_bounding_box_descent: size * 0.2,
        }
    }

    /// Text drawn so far, oldest first
    pub fn text_runs(&self) -> &[TextRun] {
        &self.text_runs
    }

    fn record_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>, filled: bool) {
        if !x.is_finite() || !y.is_finite() || max_width.is_some_and(|w| !w.is_finite() || w <= 0.0) {
            return;
        }
        let state = self.state();
        let t = state.transform;
        let (fx, fy) = (x as f32, y as f32);
        let run = TextRun {
            text: text.to_string(),
            x: f64::from(t.sx * fx + t.kx * fy + t.tx),
            y: f64::from(t.ky * fx + t.sy * fy + t.ty),
            max_width,
            font: state.font.clone(),
            align: state.text_align.as_str(),
            baseline: state.text_baseline.as_str(),
            color: if filled { state.fill_style } else { state.stroke_style },
            filled,
        };
        self.text_runs.push(run);
    }
}
