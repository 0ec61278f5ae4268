use std::fmt;

use crate::foundation::error::{FramefoldError, FramefoldResult};

/// Position of a frame in the output sequence, counted from zero.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The index as a float, which is what parameter closures usually want.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output frame rate as the exact ratio `num / den` frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Frames shown every `den` seconds.
    pub num: u32,
    /// Seconds spanned by `num` frames.
    pub den: u32,
}

impl Fps {
    /// Frame rate with both terms non-zero.
    pub fn new(num: u32, den: u32) -> FramefoldResult<Self> {
        if num == 0 || den == 0 {
            return Err(FramefoldError::validation(format!(
                "frame rate {num}/{den} needs non-zero terms"
            )));
        }
        Ok(Self { num, den })
    }

    /// Frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Playback time of the first `frames` frames.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        frames as f64 * f64::from(self.den) / f64::from(self.num)
    }

    /// Frames needed to cover `secs`, rounded to the nearest frame. Negative input gives 0.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        let frames = (secs * self.as_f64()).round();
        if frames <= 0.0 { 0 } else { frames as u64 }
    }
}

/// Size shared by every frame of a video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

impl Canvas {
    /// Canvas with at least one pixel.
    pub fn new(width: u32, height: u32) -> FramefoldResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramefoldError::validation(format!(
                "canvas {width}x{height} has no pixels"
            )));
        }
        Ok(Self { width, height })
    }

    /// Byte length of one RGBA8 frame of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Opaque color with straight 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// `(0, 0, 0)`.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// `(255, 255, 255)`.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb8 {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Pixel whose color channels are already scaled by alpha, so `r, g, b <= a`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red times alpha.
    pub r: u8,
    /// Green times alpha.
    pub g: u8,
    /// Blue times alpha.
    pub b: u8,
    /// Coverage.
    pub a: u8,
}

impl Rgba8Premul {
    /// All channels zero.
    pub const fn transparent() -> Self {
        Self::from_array([0; 4])
    }

    /// `c` at full coverage.
    pub const fn opaque(c: Rgb8) -> Self {
        Self::from_array([c.r, c.g, c.b, 255])
    }

    /// Pixel from `[r, g, b, a]` bytes as stored in a [`crate::Frame`].
    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Pixel as `[r, g, b, a]` bytes.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
