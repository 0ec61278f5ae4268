use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgb8};
use crate::foundation::error::FramefoldResult;
use crate::render::frame::Frame;

/// What a render pass is about to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Size of every pushed frame.
    pub canvas: Canvas,
    /// Playback rate.
    pub fps: Fps,
    /// Frames the pass will push if it completes.
    pub frames: u64,
    /// Color opaque outputs put behind uncovered pixels; the video background when it has one.
    pub matte: Rgb8,
}

/// Destination of a render pass.
///
/// A pass calls `begin` once, then `push_frame` for indices `0, 1, 2, ...` with no gaps, then
/// `end`. `end` is also called after a failed frame, so whatever was written can be closed.
pub trait FrameSink: Send {
    /// Prepare for a pass described by `cfg`.
    fn begin(&mut self, cfg: SinkConfig) -> FramefoldResult<()>;
    /// Accept the next frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> FramefoldResult<()>;
    /// Finish the pass.
    fn end(&mut self) -> FramefoldResult<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn begin(&mut self, cfg: SinkConfig) -> FramefoldResult<()> {
        (**self).begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> FramefoldResult<()> {
        (**self).push_frame(idx, frame)
    }

    fn end(&mut self) -> FramefoldResult<()> {
        (**self).end()
    }
}

/// Keeps every pushed frame; handy in tests.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Frame)>,
    ended: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config of the last pass, `None` until one begins.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Frames of the last pass in push order.
    pub fn frames(&self) -> &[(FrameIndex, Frame)] {
        &self.frames
    }

    /// `true` once the last pass has ended.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FramefoldResult<()> {
        *self = Self {
            cfg: Some(cfg),
            ..Self::default()
        };
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Frame) -> FramefoldResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> FramefoldResult<()> {
        self.ended = true;
        Ok(())
    }
}
