use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Canvas, Fps, Rgb8, Rgba8Premul};
use crate::foundation::error::{FramefoldError, FramefoldResult};

/// Background every frame starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Opaque solid color.
    Color(Rgb8),
    /// No color: fully transparent pixels.
    Transparent,
}

impl Background {
    /// Pixel value of this background.
    pub fn pixel(self) -> Rgba8Premul {
        match self {
            Self::Color(c) => Rgba8Premul::opaque(c),
            Self::Transparent => Rgba8Premul::transparent(),
        }
    }

    /// Color that opaque outputs show behind uncovered pixels: black for transparent backgrounds.
    pub fn matte(self) -> Rgb8 {
        match self {
            Self::Color(c) => c,
            Self::Transparent => Rgb8::BLACK,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(Rgb8::BLACK)
    }
}

/// Frame geometry and timing of a [`crate::Video`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
    /// Background of every frame.
    #[serde(default)]
    pub background: Background,
}

impl VideoConfig {
    /// Config with a black background.
    pub fn new(width: u32, height: u32, fps: Fps) -> Self {
        Self {
            width,
            height,
            fps,
            background: Background::default(),
        }
    }

    /// Replace the background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FramefoldResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| FramefoldError::serde(format!("parse video config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FramefoldResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FramefoldError::config(format!("open video config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check dimensions and frame rate.
    pub fn validate(&self) -> FramefoldResult<()> {
        Canvas::new(self.width, self.height)?;
        Fps::new(self.fps.num, self.fps.den)?;
        Ok(())
    }

    /// Output canvas.
    pub fn canvas(&self) -> FramefoldResult<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

/// How long a render pass runs. Exactly one field must be set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderLength {
    /// Length in frames.
    pub frames: Option<u64>,
    /// Length in seconds, converted with `round(seconds * fps)`.
    pub seconds: Option<f64>,
}

impl RenderLength {
    /// Render exactly `frames` frames.
    pub fn frames(frames: u64) -> Self {
        Self {
            frames: Some(frames),
            seconds: None,
        }
    }

    /// Render `seconds` worth of frames.
    pub fn seconds(seconds: f64) -> Self {
        Self {
            frames: None,
            seconds: Some(seconds),
        }
    }

    /// Number of frames at `fps`.
    pub fn resolve(self, fps: Fps) -> FramefoldResult<u64> {
        match (self.frames, self.seconds) {
            (Some(frames), None) => Ok(frames),
            (None, Some(seconds)) => {
                if !seconds.is_finite() || seconds < 0.0 {
                    return Err(FramefoldError::config(format!(
                        "length_seconds must be finite and >= 0, got {seconds}"
                    )));
                }
                Ok(fps.secs_to_frames_round(seconds))
            }
            (None, None) => Err(FramefoldError::config(
                "must provide length_frames or length_seconds",
            )),
            (Some(_), Some(_)) => Err(FramefoldError::config(
                "provide only one of length_frames and length_seconds",
            )),
        }
    }
}

/// Scheduling and progress controls for [`crate::Video::render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOpts {
    /// Emit a progress event every N frames; `None` uses the integral fps, `Some(0)` disables.
    pub progress_every: Option<u64>,
    /// Render frames on a rayon pool.
    pub parallel: bool,
    /// Frames rendered per parallel batch.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            progress_every: None,
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/config.rs"]
mod tests;
