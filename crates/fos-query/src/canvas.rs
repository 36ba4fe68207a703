//! Canvas-context collections
//!
//! A [`ContextSet`] forwards every drawing operation to each of its 2D
//! contexts with the same arguments and exposes a fixed list of settings
//! through [`ContextSet::apply`] / [`ContextSet::settings`]. Both lists are
//! written out by hand below.

use fos_canvas::{Blob, CanvasRenderingContext2D, ImageData};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{ContextSet, Normalized, QueryResult, Selection};

impl Selection {
    /// The 2D context of every target; each target must be a `<canvas>`
    pub fn contexts(&self) -> QueryResult<ContextSet> {
        let contexts = self
            .iter()
            .map(|&node| self.ops().context_2d(self.window(), node))
            .collect::<QueryResult<Vec<_>>>()?;
        tracing::debug!(contexts = contexts.len(), "context set built");
        Ok(ContextSet::new(self.query().clone(), contexts))
    }
}

macro_rules! drawing_operations {
    ($($(#[$meta:meta])* fn $name:ident($($arg:ident: $ty:ty),* $(,)?);)+) => {
        /// Every operation a [`ContextSet`] forwards
        pub const DRAWING_OPERATIONS: &[&str] = &[$(stringify!($name)),+];

        impl ContextSet {
            $(
                $(#[$meta])*
                #[allow(clippy::too_many_arguments)]
                pub fn $name(&self, $($arg: $ty),*) -> &Self {
                    for context in self.iter() {
                        context.borrow_mut().$name($($arg),*);
                    }
                    self
                }
            )+
        }
    };
}

drawing_operations! {
    fn save();
    fn restore();
    fn reset();
    fn scale(x: f64, y: f64);
    fn rotate(angle: f64);
    fn translate(x: f64, y: f64);
    fn transform(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
    fn set_transform(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
    fn reset_transform();
    fn set_line_dash(segments: &[f64]);
    fn fill_rect(x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(x: f64, y: f64, width: f64, height: f64);
    fn clear_rect(x: f64, y: f64, width: f64, height: f64);
    fn begin_path();
    fn close_path();
    fn move_to(x: f64, y: f64);
    fn line_to(x: f64, y: f64);
    fn quadratic_curve_to(cpx: f64, cpy: f64, x: f64, y: f64);
    fn bezier_curve_to(cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn arc(x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool);
    fn ellipse(
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    );
    fn rect(x: f64, y: f64, width: f64, height: f64);
    fn fill();
    fn stroke();
    fn clip();
    fn fill_text(text: &str, x: f64, y: f64, max_width: Option<f64>);
    fn stroke_text(text: &str, x: f64, y: f64, max_width: Option<f64>);
    fn put_image_data(image: &ImageData, dx: i32, dy: i32);
}

/// A canvas setting value, in the shapes script assigns
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl SettingValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
        }
    }

    fn as_bool(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Bool(b) => *b,
        }
    }
}

impl From<f64> for SettingValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Whitelisted context settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasSetting {
    FillStyle,
    StrokeStyle,
    LineWidth,
    LineCap,
    LineJoin,
    MiterLimit,
    LineDashOffset,
    Font,
    TextAlign,
    TextBaseline,
    GlobalAlpha,
    GlobalCompositeOperation,
    ShadowOffsetX,
    ShadowOffsetY,
    ShadowBlur,
    ShadowColor,
    ImageSmoothingEnabled,
}

impl CanvasSetting {
    pub const ALL: [CanvasSetting; 17] = [
        Self::FillStyle,
        Self::StrokeStyle,
        Self::LineWidth,
        Self::LineCap,
        Self::LineJoin,
        Self::MiterLimit,
        Self::LineDashOffset,
        Self::Font,
        Self::TextAlign,
        Self::TextBaseline,
        Self::GlobalAlpha,
        Self::GlobalCompositeOperation,
        Self::ShadowOffsetX,
        Self::ShadowOffsetY,
        Self::ShadowBlur,
        Self::ShadowColor,
        Self::ImageSmoothingEnabled,
    ];

    /// Script-facing property name
    pub fn name(self) -> &'static str {
        match self {
            Self::FillStyle => "fillStyle",
            Self::StrokeStyle => "strokeStyle",
            Self::LineWidth => "lineWidth",
            Self::LineCap => "lineCap",
            Self::LineJoin => "lineJoin",
            Self::MiterLimit => "miterLimit",
            Self::LineDashOffset => "lineDashOffset",
            Self::Font => "font",
            Self::TextAlign => "textAlign",
            Self::TextBaseline => "textBaseline",
            Self::GlobalAlpha => "globalAlpha",
            Self::GlobalCompositeOperation => "globalCompositeOperation",
            Self::ShadowOffsetX => "shadowOffsetX",
            Self::ShadowOffsetY => "shadowOffsetY",
            Self::ShadowBlur => "shadowBlur",
            Self::ShadowColor => "shadowColor",
            Self::ImageSmoothingEnabled => "imageSmoothingEnabled",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn read(self, ctx: &CanvasRenderingContext2D) -> SettingValue {
        match self {
            Self::FillStyle => ctx.fill_style().into(),
            Self::StrokeStyle => ctx.stroke_style().into(),
            Self::LineWidth => ctx.line_width().into(),
            Self::LineCap => ctx.line_cap().into(),
            Self::LineJoin => ctx.line_join().into(),
            Self::MiterLimit => ctx.miter_limit().into(),
            Self::LineDashOffset => ctx.line_dash_offset().into(),
            Self::Font => ctx.font().into(),
            Self::TextAlign => ctx.text_align().into(),
            Self::TextBaseline => ctx.text_baseline().into(),
            Self::GlobalAlpha => ctx.global_alpha().into(),
            Self::GlobalCompositeOperation => ctx.global_composite_operation().into(),
            Self::ShadowOffsetX => ctx.shadow_offset_x().into(),
            Self::ShadowOffsetY => ctx.shadow_offset_y().into(),
            Self::ShadowBlur => ctx.shadow_blur().into(),
            Self::ShadowColor => ctx.shadow_color().into(),
            Self::ImageSmoothingEnabled => ctx.image_smoothing_enabled().into(),
        }
    }

    /// Assign `value`; shapes the context cannot use are ignored
    pub fn write(self, ctx: &mut CanvasRenderingContext2D, value: &SettingValue) {
        let number = || value.as_number().unwrap_or(f64::NAN);
        match self {
            Self::FillStyle => ctx.set_fill_style(&value.as_text()),
            Self::StrokeStyle => ctx.set_stroke_style(&value.as_text()),
            Self::LineWidth => ctx.set_line_width(number()),
            Self::LineCap => ctx.set_line_cap(&value.as_text()),
            Self::LineJoin => ctx.set_line_join(&value.as_text()),
            Self::MiterLimit => ctx.set_miter_limit(number()),
            Self::LineDashOffset => ctx.set_line_dash_offset(number()),
            Self::Font => ctx.set_font(&value.as_text()),
            Self::TextAlign => ctx.set_text_align(&value.as_text()),
            Self::TextBaseline => ctx.set_text_baseline(&value.as_text()),
            Self::GlobalAlpha => ctx.set_global_alpha(number()),
            Self::GlobalCompositeOperation => ctx.set_global_composite_operation(&value.as_text()),
            Self::ShadowOffsetX => ctx.set_shadow_offset_x(number()),
            Self::ShadowOffsetY => ctx.set_shadow_offset_y(number()),
            Self::ShadowBlur => ctx.set_shadow_blur(number()),
            Self::ShadowColor => ctx.set_shadow_color(&value.as_text()),
            Self::ImageSmoothingEnabled => ctx.set_image_smoothing_enabled(value.as_bool()),
        }
    }
}

/// Snapshot of every setting of one context, keyed by setting name
pub type Settings = IndexMap<&'static str, SettingValue>;

fn snapshot(ctx: &CanvasRenderingContext2D) -> Settings {
    CanvasSetting::ALL
        .into_iter()
        .map(|setting| (setting.name(), setting.read(ctx)))
        .collect()
}

impl ContextSet {
    /// Copy every whitelisted key onto each context; other keys are dropped
    pub fn apply<V: Clone + Into<SettingValue>>(&self, settings: &[(&str, V)]) -> &Self {
        for (key, value) in settings {
            let Some(setting) = CanvasSetting::from_name(key) else {
                tracing::trace!(key, "dropping unknown canvas setting");
                continue;
            };
            let value: SettingValue = value.clone().into();
            for context in self.iter() {
                setting.write(&mut context.borrow_mut(), &value);
            }
        }
        self
    }

    /// Settings of the context at `index`, or of every context
    pub fn settings(&self, index: Option<usize>) -> QueryResult<Normalized<Settings>> {
        match index {
            Some(i) => Ok(Normalized::Single(snapshot(&self.at(i)?.borrow()))),
            None => Ok(self.normalize(|context| snapshot(&context.borrow()))),
        }
    }

    /// `data:` URL of every canvas (PNG unless another supported type is asked for)
    pub fn to_data_url(&self, mime: Option<&str>) -> QueryResult<Normalized<String>> {
        self.try_normalize(|context| Ok(context.borrow().to_data_url(mime)?))
    }

    pub fn to_blob(&self, mime: Option<&str>) -> QueryResult<Normalized<Blob>> {
        self.try_normalize(|context| Ok(context.borrow().to_blob(mime)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Query, QueryError};

    fn canvases() -> Query {
        Query::from_html(
            r#"<canvas id="a" width="20" height="10"></canvas><canvas id="b" width="20" height="10"></canvas><div id="d"></div>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_contexts_require_canvas() {
        let q = canvases();
        assert_eq!(q.select("canvas").unwrap().contexts().unwrap().len(), 2);
        assert!(matches!(
            q.select("canvas, div").unwrap().contexts(),
            Err(QueryError::NotACanvas(_))
        ));
    }

    #[test]
    fn test_contexts_are_stable_per_canvas() {
        let q = canvases();
        let first = q.select("#a").unwrap().contexts().unwrap();
        let again = q.select("#a").unwrap().contexts().unwrap();
        assert!(first.targets()[0].ptr_eq(&again.targets()[0]));
    }

    #[test]
    fn test_drawing_forwarded_to_every_context() {
        let q = canvases();
        let set = q.select("canvas").unwrap().contexts().unwrap();
        set.apply(&[("fillStyle", "red")]).fill_rect(0.0, 0.0, 5.0, 5.0);
        for context in set.iter() {
            let pixel = context.borrow().pixel(1, 1).unwrap();
            assert_eq!((pixel.r, pixel.g, pixel.b, pixel.a), (255, 0, 0, 255));
        }
    }

    #[test]
    fn test_apply_drops_unknown_keys() {
        let q = canvases();
        let set = q.select("#a").unwrap().contexts().unwrap();
        set.apply(&[("lineWidth", SettingValue::Number(4.0)), ("bogus", SettingValue::Number(1.0))]);
        let settings = set.settings(None).unwrap().into_single().unwrap();
        assert_eq!(settings.get("lineWidth"), Some(&SettingValue::Number(4.0)));
        assert!(!settings.contains_key("bogus"));
    }

    #[test]
    fn test_invalid_values_ignored() {
        let q = canvases();
        let set = q.select("#a").unwrap().contexts().unwrap();
        set.apply(&[("lineWidth", SettingValue::from("wide")), ("lineCap", SettingValue::from("round"))]);
        let settings = set.settings(Some(0)).unwrap().into_single().unwrap();
        assert_eq!(settings["lineWidth"], SettingValue::Number(1.0));
        assert_eq!(settings["lineCap"], SettingValue::Text("round".into()));
    }

    #[test]
    fn test_settings_normalized() {
        let q = canvases();
        let set = q.select("canvas").unwrap().contexts().unwrap();
        let all = set.settings(None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.many().unwrap()[0].len(), CanvasSetting::ALL.len());
        assert!(matches!(set.settings(Some(2)), Err(QueryError::IndexOutOfRange { index: 2, len: 2 })));
    }

    #[test]
    fn test_exports() {
        let q = canvases();
        let set = q.select("canvas").unwrap().contexts().unwrap();
        let urls = set.to_data_url(None).unwrap().into_vec();
        assert_eq!(urls.len(), 2);
        assert!(urls.iter().all(|u| u.starts_with("data:image/png;base64,")));

        let blob = set.nth(Some(0)).unwrap().to_blob(Some("image/webp")).unwrap();
        let blob = blob.into_single().unwrap();
        assert_eq!(blob.mime, "image/png");
        assert!(blob.size() > 0);
    }

    #[test]
    fn test_registry_lists_operations() {
        assert!(DRAWING_OPERATIONS.contains(&"fill_rect"));
        assert!(DRAWING_OPERATIONS.contains(&"ellipse"));
        for setting in CanvasSetting::ALL {
            assert_eq!(CanvasSetting::from_name(setting.name()), Some(setting));
        }
    }
}
