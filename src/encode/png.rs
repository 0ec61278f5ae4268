use std::path::PathBuf;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::{ensure_dir, unpremultiply};
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{FramefoldError, FramefoldResult};
use crate::render::frame::Frame;

/// Where and how [`PngSequenceSink`] names its files.
#[derive(Clone, Debug)]
pub struct PngSequenceOpts {
    /// Output directory, created on `begin`.
    pub dir: PathBuf,
    /// File name prefix; files are `{prefix}{index:06}.png`.
    pub prefix: String,
}

impl PngSequenceOpts {
    /// `frame_000000.png`, `frame_000001.png`, ... inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame_".to_string(),
        }
    }
}

/// Writes every frame as a straight-alpha RGBA PNG, so transparent backgrounds stay transparent.
#[derive(Debug)]
pub struct PngSequenceSink {
    opts: PngSequenceOpts,
    canvas: Option<Canvas>,
    next: u64,
    rgba: Vec<u8>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `opts.dir`.
    pub fn new(opts: PngSequenceOpts) -> Self {
        Self {
            opts,
            canvas: None,
            next: 0,
            rgba: Vec::new(),
            written: Vec::new(),
        }
    }

    /// Files written by the current or last pass.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File that frame `idx` goes to.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.opts
            .dir
            .join(format!("{}{:06}.png", self.opts.prefix, idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> FramefoldResult<()> {
        ensure_dir(&self.opts.dir)?;
        self.canvas = Some(cfg.canvas);
        self.next = 0;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> FramefoldResult<()> {
        let canvas = self
            .canvas
            .ok_or_else(|| FramefoldError::encode("png sink received a frame outside a pass"))?;
        if idx.0 != self.next {
            return Err(FramefoldError::encode(format!(
                "png sink expected frame {}, got {idx}",
                self.next
            )));
        }
        if frame.canvas() != canvas {
            return Err(FramefoldError::validation(format!(
                "frame is {}x{}, pass is {}x{}",
                frame.width, frame.height, canvas.width, canvas.height
            )));
        }

        unpremultiply(frame, &mut self.rgba);
        let path = self.path_for(idx);
        image::save_buffer_with_format(
            &path,
            &self.rgba,
            canvas.width,
            canvas.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| FramefoldError::encode(format!("write png '{}': {e}", path.display())))?;

        tracing::trace!(frame = idx.0, path = %path.display(), "wrote png");
        self.next += 1;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> FramefoldResult<()> {
        self.canvas = None;
        Ok(())
    }
}
