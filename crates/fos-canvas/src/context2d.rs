//! Canvas 2D Rendering Context
//!
//! CanvasRenderingContext2D over a tiny-skia pixmap. Setters take the same
//! string/number shapes script assigns and ignore invalid values instead of
//! failing, as browsers do.

use tiny_skia::{BlendMode, FillRule, Mask, Paint, Pixmap, Rect, Stroke, StrokeDash, Transform};

use crate::path::Path2D;
use crate::text::TextRun;
use crate::Color;

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? } default $default:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }
    };
}

keyword_enum!(
    /// Line cap
    LineCap { Butt => "butt", Round => "round", Square => "square" } default Butt
);

keyword_enum!(
    /// Line join
    LineJoin { Miter => "miter", Round => "round", Bevel => "bevel" } default Miter
);

keyword_enum!(
    /// Text alignment
    TextAlign { Start => "start", End => "end", Left => "left", Right => "right", Center => "center" } default Start
);

keyword_enum!(
    /// Text baseline
    TextBaseline {
        Top => "top",
        Hanging => "hanging",
        Middle => "middle",
        Alphabetic => "alphabetic",
        Ideographic => "ideographic",
        Bottom => "bottom",
    } default Alphabetic
);

keyword_enum!(
    /// `globalCompositeOperation`
    CompositeOperation {
        SourceOver => "source-over",
        SourceIn => "source-in",
        SourceOut => "source-out",
        SourceAtop => "source-atop",
        DestinationOver => "destination-over",
        DestinationIn => "destination-in",
        DestinationOut => "destination-out",
        DestinationAtop => "destination-atop",
        Lighter => "lighter",
        Copy => "copy",
        Xor => "xor",
        Multiply => "multiply",
        Screen => "screen",
        Overlay => "overlay",
        Darken => "darken",
        Lighten => "lighten",
        ColorDodge => "color-dodge",
        ColorBurn => "color-burn",
        HardLight => "hard-light",
        SoftLight => "soft-light",
        Difference => "difference",
        Exclusion => "exclusion",
        Hue => "hue",
        Saturation => "saturation",
        Color => "color",
        Luminosity => "luminosity",
    } default SourceOver
);

impl CompositeOperation {
    fn blend_mode(self) -> BlendMode {
        match self {
            Self::SourceOver => BlendMode::SourceOver,
            Self::SourceIn => BlendMode::SourceIn,
            Self::SourceOut => BlendMode::SourceOut,
            Self::SourceAtop => BlendMode::SourceAtop,
            Self::DestinationOver => BlendMode::DestinationOver,
            Self::DestinationIn => BlendMode::DestinationIn,
            Self::DestinationOut => BlendMode::DestinationOut,
            Self::DestinationAtop => BlendMode::DestinationAtop,
            Self::Lighter => BlendMode::Plus,
            Self::Copy => BlendMode::Source,
            Self::Xor => BlendMode::Xor,
            Self::Multiply => BlendMode::Multiply,
            Self::Screen => BlendMode::Screen,
            Self::Overlay => BlendMode::Overlay,
            Self::Darken => BlendMode::Darken,
            Self::Lighten => BlendMode::Lighten,
            Self::ColorDodge => BlendMode::ColorDodge,
            Self::ColorBurn => BlendMode::ColorBurn,
            Self::HardLight => BlendMode::HardLight,
            Self::SoftLight => BlendMode::SoftLight,
            Self::Difference => BlendMode::Difference,
            Self::Exclusion => BlendMode::Exclusion,
            Self::Hue => BlendMode::Hue,
            Self::Saturation => BlendMode::Saturation,
            Self::Color => BlendMode::Color,
            Self::Luminosity => BlendMode::Luminosity,
        }
    }
}

/// Canvas state (for save/restore)
#[derive(Debug, Clone)]
pub struct CanvasState {
    pub transform: Transform,
    pub fill_style: Color,
    pub stroke_style: Color,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub line_dash: Vec<f64>,
    pub line_dash_offset: f64,
    pub font: String,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub global_alpha: f64,
    pub global_composite_operation: CompositeOperation,
    pub shadow_offset_x: f64,
    pub shadow_offset_y: f64,
    pub shadow_blur: f64,
    pub shadow_color: Color,
    pub image_smoothing_enabled: bool,
    clip: Option<Mask>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            fill_style: Color::BLACK,
            stroke_style: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            font: "10px sans-serif".to_string(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            global_alpha: 1.0,
            global_composite_operation: CompositeOperation::default(),
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            shadow_blur: 0.0,
            shadow_color: Color::TRANSPARENT,
            image_smoothing_enabled: true,
            clip: None,
        }
    }
}

/// Canvas 2D rendering context
#[derive(Debug)]
pub struct CanvasRenderingContext2D {
    width: u32,
    height: u32,
    /// `None` for a zero-sized canvas
    pixmap: Option<Pixmap>,
    /// State stack; never empty
    states: Vec<CanvasState>,
    current_path: Path2D,
    pub(crate) text_runs: Vec<TextRun>,
}

impl CanvasRenderingContext2D {
    /// Create a new 2D context with a transparent backing store
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixmap: Pixmap::new(width, height),
            states: vec![CanvasState::default()],
            current_path: Path2D::new(),
            text_runs: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    pub(crate) fn pixmap_mut(&mut self) -> Option<&mut Pixmap> {
        self.pixmap.as_mut()
    }

    /// Straight-alpha RGBA of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Color::rgba(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Current path, in device space
    pub fn current_path(&self) -> &Path2D {
        &self.current_path
    }

    // === State ===

    pub fn state(&self) -> &CanvasState {
        // The stack always holds the base state
        &self.states[self.states.len() - 1]
    }

    fn state_mut(&mut self) -> &mut CanvasState {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    /// Save current state
    pub fn save(&mut self) {
        let state = self.state().clone();
        self.states.push(state);
    }

    /// Restore previous state; no-op on the base state
    pub fn restore(&mut self) {
        if self.states.len() > 1 {
            self.states.pop();
        }
    }

    /// Reset everything, including pixels
    pub fn reset(&mut self) {
        *self = Self::new(self.width, self.height);
    }

    // === Settings ===

    pub fn fill_style(&self) -> String {
        self.state().fill_style.to_css()
    }

    pub fn set_fill_style(&mut self, value: &str) {
        if let Some(color) = Color::parse(value) {
            self.state_mut().fill_style = color;
        }
    }

    pub fn stroke_style(&self) -> String {
        self.state().stroke_style.to_css()
    }

    pub fn set_stroke_style(&mut self, value: &str) {
        if let Some(color) = Color::parse(value) {
            self.state_mut().stroke_style = color;
        }
    }

    pub fn line_width(&self) -> f64 {
        self.state().line_width
    }

    pub fn set_line_width(&mut self, value: f64) {
        if value.is_finite() && value > 0.0 {
            self.state_mut().line_width = value;
        }
    }

    pub fn line_cap(&self) -> &'static str {
        self.state().line_cap.as_str()
    }

    pub fn set_line_cap(&mut self, value: &str) {
        if let Some(cap) = LineCap::parse(value) {
            self.state_mut().line_cap = cap;
        }
    }

    pub fn line_join(&self) -> &'static str {
        self.state().line_join.as_str()
    }

    pub fn set_line_join(&mut self, value: &str) {
        if let Some(join) = LineJoin::parse(value) {
            self.state_mut().line_join = join;
        }
    }

    pub fn miter_limit(&self) -> f64 {
        self.state().miter_limit
    }

    pub fn set_miter_limit(&mut self, value: f64) {
        if value.is_finite() && value > 0.0 {
            self.state_mut().miter_limit = value;
        }
    }

    pub fn get_line_dash(&self) -> Vec<f64> {
        self.state().line_dash.clone()
    }

    /// Odd-length segment lists are repeated to make them even
    pub fn set_line_dash(&mut self, segments: &[f64]) {
        if segments.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return;
        }
        let mut dash = segments.to_vec();
        if dash.len() % 2 == 1 {
            dash.extend_from_slice(segments);
        }
        self.state_mut().line_dash = dash;
    }

    pub fn line_dash_offset(&self) -> f64 {
        self.state().line_dash_offset
    }

    pub fn set_line_dash_offset(&mut self, value: f64) {
        if value.is_finite() {
            self.state_mut().line_dash_offset = value;
        }
    }

    pub fn font(&self) -> &str {
        &self.state().font
    }

    /// Accepts shorthands that carry a size and a family (`bold 16px serif`)
    pub fn set_font(&mut self, value: &str) {
        let value = value.trim();
        if crate::text::font_size_px(value).is_some() && value.split_whitespace().count() >= 2 {
            self.state_mut().font = value.to_string();
        }
    }

    pub fn text_align(&self) -> &'static str {
        self.state().text_align.as_str()
    }

    pub fn set_text_align(&mut self, value: &str) {
        if let Some(align) = TextAlign::parse(value) {
            self.state_mut().text_align = align;
        }
    }

    pub fn text_baseline(&self) -> &'static str {
        self.state().text_baseline.as_str()
    }

    pub fn set_text_baseline(&mut self, value: &str) {
        if let Some(baseline) = TextBaseline::parse(value) {
            self.state_mut().text_baseline = baseline;
        }
    }

    pub fn global_alpha(&self) -> f64 {
        self.state().global_alpha
    }

    pub fn set_global_alpha(&mut self, value: f64) {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            self.state_mut().global_alpha = value;
        }
    }

    pub fn global_composite_operation(&self) -> &'static str {
        self.state().global_composite_operation.as_str()
    }

    pub fn set_global_composite_operation(&mut self, value: &str) {
        if let Some(op) = CompositeOperation::parse(value) {
            self.state_mut().global_composite_operation = op;
        }
    }

    pub fn shadow_offset_x(&self) -> f64 {
        self.state().shadow_offset_x
    }

    pub fn set_shadow_offset_x(&mut self, value: f64) {
        if value.is_finite() {
            self.state_mut().shadow_offset_x = value;
        }
    }

    pub fn shadow_offset_y(&self) -> f64 {
        self.state().shadow_offset_y
    }

    pub fn set_shadow_offset_y(&mut self, value: f64) {
        if value.is_finite() {
            self.state_mut().shadow_offset_y = value;
        }
    }

    pub fn shadow_blur(&self) -> f64 {
        self.state().shadow_blur
    }

    pub fn set_shadow_blur(&mut self, value: f64) {
        if value.is_finite() && value >= 0.0 {
            self.state_mut().shadow_blur = value;
        }
    }

    pub fn shadow_color(&self) -> String {
        self.state().shadow_color.to_css()
    }

    pub fn set_shadow_color(&mut self, value: &str) {
        if let Some(color) = Color::parse(value) {
            self.state_mut().shadow_color = color;
        }
    }

    pub fn image_smoothing_enabled(&self) -> bool {
        self.state().image_smoothing_enabled
    }

    pub fn set_image_smoothing_enabled(&mut self, value: bool) {
        self.state_mut().image_smoothing_enabled = value;
    }

    // === Transforms ===

    pub fn scale(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            let state = self.state_mut();
            state.transform = state.transform.pre_scale(x as f32, y as f32);
        }
    }

    /// Rotate by `angle` radians, clockwise
    pub fn rotate(&mut self, angle: f64) {
        if angle.is_finite() {
            let state = self.state_mut();
            state.transform = state
                .transform
                .pre_concat(Transform::from_rotate(angle.to_degrees() as f32));
        }
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            let state = self.state_mut();
            state.transform = state.transform.pre_translate(x as f32, y as f32);
        }
    }

    /// Multiply the current transform by `[a c e; b d f]`
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        if [a, b, c, d, e, f].iter().all(|v| v.is_finite()) {
            let m = Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32);
            let state = self.state_mut();
            state.transform = state.transform.pre_concat(m);
        }
    }

    pub fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        if [a, b, c, d, e, f].iter().all(|v| v.is_finite()) {
            self.state_mut().transform =
                Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32);
        }
    }

    pub fn reset_transform(&mut self) {
        self.state_mut().transform = Transform::identity();
    }

    /// Current transform as `[a, b, c, d, e, f]`
    pub fn get_transform(&self) -> [f64; 6] {
        let t = self.state().transform;
        [t.sx, t.ky, t.kx, t.sy, t.tx, t.ty].map(f64::from)
    }

    // === Rectangles ===

    /// Fill a rectangle
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(rect) = user_rect(x, y, width, height) else {
            return;
        };
        let paint = self.paint(self.state().fill_style);
        let transform = self.state().transform;
        let state = &self.states[self.states.len() - 1];
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_rect(rect, &paint, transform, state.clip.as_ref());
        }
    }

    /// Stroke a rectangle
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return;
        }
        let mut path = Path2D::new();
        path.rect(&self.state().transform, x, y, width, height);
        self.stroke_path(&path);
    }

    /// Clear a rectangle to transparent black
    pub fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(rect) = user_rect(x, y, width, height) else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        let transform = self.state().transform;
        let state = &self.states[self.states.len() - 1];
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_rect(rect, &paint, transform, state.clip.as_ref());
        }
    }

    // === Paths ===

    /// Begin a new path
    pub fn begin_path(&mut self) {
        self.current_path = Path2D::new();
    }

    pub fn close_path(&mut self) {
        self.current_path.close_path();
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        let transform = self.state().transform;
        self.current_path.move_to(&transform, x, y);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        let transform = self.state().transform;
        self.current_path.line_to(&transform, x, y);
    }

    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        let transform = self.state().transform;
        self.current_path.quadratic_curve_to(&transform, cpx, cpy, x, y);
    }

    pub fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        let transform = self.state().transform;
        self.current_path
            .bezier_curve_to(&transform, cp1x, cp1y, cp2x, cp2y, x, y);
    }

    pub fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        let transform = self.state().transform;
        self.current_path
            .ellipse(&transform, x, y, radius, radius, 0.0, start, end, anticlockwise);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    ) {
        let transform = self.state().transform;
        self.current_path.ellipse(
            &transform, x, y, radius_x, radius_y, rotation, start, end, anticlockwise,
        );
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let transform = self.state().transform;
        self.current_path.rect(&transform, x, y, width, height);
    }

    /// Fill the current path (non-zero winding)
    pub fn fill(&mut self) {
        let Some(path) = self.current_path.to_skia() else {
            return;
        };
        let paint = self.paint(self.state().fill_style);
        let state = &self.states[self.states.len() - 1];
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                state.clip.as_ref(),
            );
        }
    }

    /// Stroke the current path
    pub fn stroke(&mut self) {
        let path = self.current_path.clone();
        self.stroke_path(&path);
    }

    /// Intersect the clip region with the current path
    pub fn clip(&mut self) {
        let Some(path) = self.current_path.to_skia() else {
            return;
        };
        let (width, height) = (self.width, self.height);
        let state = self.state_mut();
        match state.clip.as_mut() {
            Some(mask) => {
                mask.intersect_path(&path, FillRule::Winding, true, Transform::identity());
            }
            None => {
                if let Some(mut mask) = Mask::new(width, height) {
                    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
                    state.clip = Some(mask);
                }
            }
        }
    }

    fn stroke_path(&mut self, path: &Path2D) {
        let Some(path) = path.to_skia() else {
            return;
        };
        let state = &self.states[self.states.len() - 1];
        let t = state.transform;
        // Width is specified in user space; scale by the transform's area factor
        let scale = f64::from((t.sx * t.sy - t.kx * t.ky).abs()).sqrt();
        let stroke = Stroke {
            width: (state.line_width * scale) as f32,
            miter_limit: state.miter_limit as f32,
            line_cap: match state.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match state.line_join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            dash: if state.line_dash.is_empty() {
                None
            } else {
                StrokeDash::new(
                    state.line_dash.iter().map(|d| (d * scale) as f32).collect(),
                    (state.line_dash_offset * scale) as f32,
                )
            },
        };
        let paint = self.paint(state.stroke_style);
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), state.clip.as_ref());
        }
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let state = self.state();
        let alpha = (f64::from(color.a) * state.global_alpha).round() as u8;
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, alpha);
        paint.blend_mode = state.global_composite_operation.blend_mode();
        paint.anti_alias = true;
        paint
    }
}

/// Normalize a canvas rectangle (negative sizes flip it)
fn user_rect(x: f64, y: f64, width: f64, height: f64) -> Option<Rect> {
    if ![x, y, width, height].iter().all(|v| v.is_finite()) || width == 0.0 || height == 0.0 {
        return None;
    }
    let (left, right) = if width < 0.0 { (x + width, x) } else { (x, x + width) };
    let (top, bottom) = if height < 0.0 { (y + height, y) } else { (y, y + height) };
    Rect::from_ltrb(left as f32, top as f32, right as f32, bottom as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_context() {
        let ctx = CanvasRenderingContext2D::new(100, 50);
        assert_eq!(ctx.width(), 100);
        assert_eq!(ctx.height(), 50);
        assert_eq!(ctx.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_fill_rect() {
        let mut ctx = CanvasRenderingContext2D::new(100, 100);
        ctx.set_fill_style("#ff0000");
        ctx.fill_rect(10.0, 10.0, 20.0, 20.0);
        assert_eq!(ctx.pixel(15, 15), Some(Color::rgb(255, 0, 0)));
        assert_eq!(ctx.pixel(50, 50), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_clear_rect() {
        let mut ctx = CanvasRenderingContext2D::new(20, 20);
        ctx.fill_rect(0.0, 0.0, 20.0, 20.0);
        ctx.clear_rect(0.0, 0.0, 10.0, 20.0);
        assert_eq!(ctx.pixel(5, 5), Some(Color::TRANSPARENT));
        assert_eq!(ctx.pixel(15, 5), Some(Color::BLACK));
    }

    #[test]
    fn test_translate_applies_to_rects() {
        let mut ctx = CanvasRenderingContext2D::new(40, 40);
        ctx.translate(20.0, 20.0);
        ctx.fill_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(ctx.pixel(5, 5), Some(Color::TRANSPARENT));
        assert_eq!(ctx.pixel(25, 25), Some(Color::BLACK));
        assert_eq!(ctx.get_transform(), [1.0, 0.0, 0.0, 1.0, 20.0, 20.0]);
    }

    #[test]
    fn test_path_fill() {
        let mut ctx = CanvasRenderingContext2D::new(40, 40);
        ctx.set_fill_style("blue");
        ctx.begin_path();
        ctx.rect(0.0, 0.0, 20.0, 20.0);
        ctx.fill();
        assert_eq!(ctx.pixel(10, 10), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn test_clip_limits_drawing() {
        let mut ctx = CanvasRenderingContext2D::new(40, 40);
        ctx.begin_path();
        ctx.rect(0.0, 0.0, 10.0, 10.0);
        ctx.clip();
        ctx.fill_rect(0.0, 0.0, 40.0, 40.0);
        assert_eq!(ctx.pixel(5, 5), Some(Color::BLACK));
        assert_eq!(ctx.pixel(30, 30), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_save_restore() {
        let mut ctx = CanvasRenderingContext2D::new(10, 10);
        ctx.set_global_alpha(0.5);
        ctx.save();
        ctx.set_global_alpha(0.3);
        ctx.set_fill_style("red");
        assert_eq!(ctx.global_alpha(), 0.3);
        ctx.restore();
        assert_eq!(ctx.global_alpha(), 0.5);
        assert_eq!(ctx.fill_style(), "#000000");
        ctx.restore();
        assert_eq!(ctx.global_alpha(), 0.5);
    }

    #[test]
    fn test_invalid_settings_are_ignored() {
        let mut ctx = CanvasRenderingContext2D::new(10, 10);
        ctx.set_line_width(-1.0);
        ctx.set_line_width(f64::NAN);
        ctx.set_line_cap("pointy");
        ctx.set_fill_style("definitely not a color");
        ctx.set_global_alpha(2.0);
        ctx.set_font("huge");
        assert_eq!(ctx.line_width(), 1.0);
        assert_eq!(ctx.line_cap(), "butt");
        assert_eq!(ctx.fill_style(), "#000000");
        assert_eq!(ctx.global_alpha(), 1.0);
        assert_eq!(ctx.font(), "10px sans-serif");
    }

    #[test]
    fn test_line_dash_doubles_odd_lists() {
        let mut ctx = CanvasRenderingContext2D::new(10, 10);
        ctx.set_line_dash(&[5.0, 10.0, 15.0]);
        assert_eq!(ctx.get_line_dash(), vec![5.0, 10.0, 15.0, 5.0, 10.0, 15.0]);
        ctx.set_line_dash(&[1.0, -2.0]);
        assert_eq!(ctx.get_line_dash().len(), 6);
    }

    #[test]
    fn test_zero_sized_canvas_draws_nothing() {
        let mut ctx = CanvasRenderingContext2D::new(0, 0);
        ctx.fill_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(ctx.pixel(0, 0), None);
    }
}
