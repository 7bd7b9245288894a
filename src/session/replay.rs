use crate::canvas::config::CanvasConfig;
use crate::canvas::state::{Canvas, FrameInput};
use crate::foundation::core::{V2i, Viewport};
use crate::foundation::error::{InkError, InkResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A recorded input session: configuration, window size and one [`FrameInput`] per update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Canvas configuration; omitted fields take their defaults.
    #[serde(default)]
    pub config: CanvasConfig,
    /// Window size reported by the platform layer.
    pub viewport: Viewport,
    /// Inputs, one per update, in order.
    #[serde(default)]
    pub frames: Vec<FrameInput>,
}

/// Outcome of [`Script::run`].
pub struct Replay {
    /// Canvas after the last frame.
    pub canvas: Canvas,
    /// Number of updates that modified the raster.
    pub frames_updated: u64,
}

impl Script {
    /// Empty script with the given configuration and viewport.
    pub fn new(config: CanvasConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            frames: Vec::new(),
        }
    }

    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> InkResult<Self> {
        let script: Self = serde_json::from_reader(r)
            .map_err(|e| InkError::validation(format!("parse replay script JSON: {e}")))?;
        script.validate()?;
        Ok(script)
    }

    /// Parse a script from a JSON string.
    pub fn from_json_str(json: &str) -> InkResult<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> InkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            InkError::validation(format!("open replay script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the configuration and that the viewport fits the raster capacity.
    pub fn validate(&self) -> InkResult<()> {
        self.config.validate()?;
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(InkError::validation("script viewport must be non-zero"));
        }
        if self.viewport.width > self.config.max_width
            || self.viewport.height > self.config.max_height
        {
            return Err(InkError::validation(format!(
                "script viewport {}x{} exceeds raster capacity {}x{}",
                self.viewport.width,
                self.viewport.height,
                self.config.max_width,
                self.config.max_height
            )));
        }
        Ok(())
    }

    /// Append one input.
    pub fn push(&mut self, input: FrameInput) -> &mut Self {
        self.frames.push(input);
        self
    }

    /// Append a pointer-down run through `points` (raster space) followed by a release.
    pub fn stroke(&mut self, points: impl IntoIterator<Item = V2i>) -> &mut Self {
        for p in points {
            self.frames.push(FrameInput {
                pointer: Some(p),
                ..FrameInput::default()
            });
        }
        self.frames.push(FrameInput::release());
        self
    }

    /// Append one zoom step (`> 0` in, `< 0` out).
    pub fn zoom(&mut self, delta: i32) -> &mut Self {
        self.frames.push(FrameInput::zoom(delta));
        self
    }

    /// Build a canvas and feed every frame through [`Canvas::update`].
    #[tracing::instrument(skip(self), fields(frames = self.frames.len()))]
    pub fn run(&self) -> InkResult<Replay> {
        self.validate()?;
        let mut canvas = Canvas::new(self.config.clone())?;
        canvas.set_viewport(self.viewport)?;

        let mut frames_updated = 0;
        for input in &self.frames {
            if canvas.update(input)? {
                frames_updated += 1;
            }
        }
        tracing::debug!(
            frames_updated,
            strokes = canvas.stroke_count(),
            "replay finished"
        );
        Ok(Replay {
            canvas,
            frames_updated,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/replay.rs"]
mod tests;
