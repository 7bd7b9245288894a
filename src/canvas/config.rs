use crate::foundation::core::Rgb;
use crate::foundation::error::{InkError, InkResult};
use crate::foundation::math::hsv_to_rgb;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas configuration. Every field has a default, so `{}` is a valid JSON config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// Raster capacity width in pixels.
    pub max_width: u32,
    /// Raster capacity height in pixels.
    pub max_height: u32,
    /// View scale at startup and after a reset.
    pub initial_view_scale: i64,
    /// Most zoomed-in view scale.
    pub min_view_scale: i64,
    /// Most zoomed-out view scale.
    pub max_view_scale: i64,
    /// Multiplicative zoom step.
    pub zoom_factor: f64,
    /// In-progress raster bounding-box area (px²) above which a chunk is frozen.
    pub chunk_area_threshold: i64,
    /// Brush radius in pixels at the zoom the stroke is drawn at.
    pub brush_radius: i64,
    /// Stroke color (sRGB).
    pub brush_color: ColorSpec,
    /// Packed ARGB clear color.
    pub background: u32,
    /// In-progress point buffer size; a full buffer is flushed into a chunk.
    pub max_stroke_points: usize,
    /// Maximum chunks in one stroke.
    pub max_pending_chunks: usize,
    /// Persistent region capacity in points.
    pub persistent_points: usize,
    /// Persistent region capacity in chunk records.
    pub persistent_chunks: usize,
    /// Transient region capacity in points.
    pub transient_points: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            // 8k.
            max_width: 7680,
            max_height: 4320,
            initial_view_scale: 1 << 16,
            min_view_scale: 2,
            max_view_scale: 1_900_000,
            zoom_factor: 1.3,
            chunk_area_threshold: 20,
            brush_radius: 10,
            brush_color: ColorSpec::rgb(0.7, 0.6, 0.5),
            background: 0xFFFF_FFFF,
            max_stroke_points: 4096,
            max_pending_chunks: 4096,
            persistent_points: 16 * 1024 * 1024,
            persistent_chunks: 1024 * 1024,
            transient_points: 1024 * 1024,
        }
    }
}

impl CanvasConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> InkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read canvas config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> InkResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> InkResult<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(InkError::validation("max_width/max_height must be > 0"));
        }
        if self.min_view_scale < 1 {
            return Err(InkError::validation("min_view_scale must be >= 1"));
        }
        if !(self.min_view_scale..=self.max_view_scale).contains(&self.initial_view_scale) {
            return Err(InkError::validation(
                "initial_view_scale must lie within [min_view_scale, max_view_scale]",
            ));
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 1.0 {
            return Err(InkError::validation("zoom_factor must be finite and > 1"));
        }
        if self.chunk_area_threshold < 0 {
            return Err(InkError::validation("chunk_area_threshold must be >= 0"));
        }
        if self.brush_radius < 0 {
            return Err(InkError::validation("brush_radius must be >= 0"));
        }
        for (name, value) in [
            ("max_stroke_points", self.max_stroke_points),
            ("max_pending_chunks", self.max_pending_chunks),
            ("persistent_points", self.persistent_points),
            ("persistent_chunks", self.persistent_chunks),
            ("transient_points", self.transient_points),
        ] {
            if value == 0 {
                return Err(InkError::validation(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }
}

/// Brush color as written in configs: `"#rrggbb"`, `{r,g,b}`, `{h,s,v}` or `[r,g,b]`.
///
/// Channels are sRGB in `[0, 1]`; hue is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorSpec {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl ColorSpec {
    /// Build from sRGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamped sRGB color.
    pub fn to_rgb(self) -> Rgb {
        Rgb::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

impl From<Rgb> for ColorSpec {
    fn from(c: Rgb) -> Self {
        Self::rgb(c.r, c.g, c.b)
    }
}

impl<'de> Deserialize<'de> for ColorSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbObj { r: f32, g: f32, b: f32 },
            HsvObj { h: f32, s: f32, v: f32 },
            Arr(Vec<f32>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbObj { r, g, b } => Ok(Self::rgb(r, g, b)),
            Repr::HsvObj { h, s, v } => Ok(hsv_to_rgb(h, s, v).into()),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Self::rgb(r, g, b)),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorSpec, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return Err("hex color must be #RRGGBB (case-insensitive)".to_owned());
    }

    let channel = |i: usize| -> Result<f32, String> {
        let pair = &s[i..i + 2];
        u8::from_str_radix(pair, 16)
            .map(|v| f32::from(v) / 255.0)
            .map_err(|_| format!("invalid hex byte \"{pair}\""))
    };
    Ok(ColorSpec::rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/config.rs"]
mod tests;
