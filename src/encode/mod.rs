//! Sinks consume rendered frames in index order and are driven by [`crate::Video::render`].

/// H.264 MP4 through the system `ffmpeg`.
pub mod ffmpeg;
/// One PNG file per frame.
pub mod png;
/// The sink contract and the in-memory sink.
pub mod sink;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Rgb8;
use crate::foundation::error::FramefoldResult;
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::Frame;

/// Composite `frame` over an opaque `matte` into `out` as opaque RGBA8.
pub(crate) fn flatten_onto(frame: &Frame, matte: Rgb8, out: &mut Vec<u8>) {
    let matte = [matte.r, matte.g, matte.b].map(u16::from);
    out.clear();
    out.reserve(frame.data.len());
    for px in frame.data.chunks_exact(4) {
        let uncovered = 255 - u16::from(px[3]);
        for (c, m) in px[..3].iter().zip(matte) {
            out.push((u16::from(*c) + mul_div255_u16(m, uncovered)).min(255) as u8);
        }
        out.push(255);
    }
}

/// Convert `frame` into straight-alpha RGBA8 in `out`.
pub(crate) fn unpremultiply(frame: &Frame, out: &mut Vec<u8>) {
    out.clear();
    out.reserve(frame.data.len());
    for px in frame.data.chunks_exact(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            out.extend_from_slice(&[0; 4]);
            continue;
        }
        for &c in &px[..3] {
            out.push(((u16::from(c) * 255 + a / 2) / a).min(255) as u8);
        }
        out.push(px[3]);
    }
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> FramefoldResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/pixels.rs"]
mod tests;
