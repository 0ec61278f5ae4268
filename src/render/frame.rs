use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{FramefoldError, FramefoldResult};

/// A frame as premultiplied RGBA8 pixels.
///
/// Frames produced by a [`crate::Video`] share one canvas size for the whole render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Frame {
    /// Frame of `canvas` size with every pixel set to `px`.
    pub fn filled(canvas: Canvas, px: Rgba8Premul) -> Self {
        let data = px.to_array().repeat(canvas.rgba_len() / 4);
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Fully transparent frame of `canvas` size.
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; canvas.rgba_len()],
        }
    }

    /// Wrap raw premultiplied RGBA8 bytes.
    pub fn from_rgba8_premul(width: u32, height: u32, data: Vec<u8>) -> FramefoldResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if data.len() != expected {
            return Err(FramefoldError::validation(format!(
                "frame data length {} does not match {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Canvas describing this frame's dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Return `true` when `other` has the same dimensions and buffer length.
    pub fn same_shape(&self, other: &Frame) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.data.len() == other.data.len()
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        let i = self.offset(x, y)?;
        let p = self.data.get(i..i + 4)?;
        Some(Rgba8Premul::from_array([p[0], p[1], p[2], p[3]]))
    }

    /// Overwrite the pixel at `(x, y)`; writes outside the frame are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8Premul) {
        if let Some(i) = self.offset(x, y)
            && let Some(dst) = self.data.get_mut(i..i + 4)
        {
            dst.copy_from_slice(&px.to_array());
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
