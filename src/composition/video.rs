use rayon::prelude::*;

use crate::composition::config::{RenderLength, RenderOpts, VideoConfig};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{FramefoldError, FramefoldResult};
use crate::layer::Layer;
use crate::render::frame::Frame;

/// Aggregated counters of one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Requested frames.
    pub frames_total: u64,
    /// Frames handed to the sink.
    pub frames_rendered: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VideoState {
    Open,
    Closed,
}

/// An ordered stack of layers rendered over a background into a [`FrameSink`].
///
/// Layers are painted in insertion order: each one is blended onto the result of all the layers
/// before it. A video renders once; afterwards it is closed and [`Video::render`] refuses to run
/// again because sinks are single-use.
pub struct Video<S: FrameSink> {
    config: VideoConfig,
    template: Frame,
    layers: Vec<Box<dyn Layer>>,
    sink: S,
    state: VideoState,
}

impl<S: FrameSink> Video<S> {
    /// Create an empty video writing to `sink`.
    pub fn new(config: VideoConfig, sink: S) -> FramefoldResult<Self> {
        config.validate()?;
        let template = Frame::filled(config.canvas()?, config.background.pixel());
        Ok(Self {
            config,
            template,
            layers: Vec::new(),
            sink,
            state: VideoState::Open,
        })
    }

    /// Geometry, timing and background.
    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    /// Frame every render starts from. It is never modified.
    pub fn background_template(&self) -> &Frame {
        &self.template
    }

    /// Append a layer on top of the existing ones.
    pub fn add_layer(&mut self, layer: impl Layer + 'static) -> &mut Self {
        self.add_boxed_layer(Box::new(layer))
    }

    /// Append an already boxed layer on top of the existing ones.
    pub fn add_boxed_layer(&mut self, layer: Box<dyn Layer>) -> &mut Self {
        if self.state == VideoState::Closed {
            tracing::warn!("layer added to a video that has already rendered");
        }
        self.layers.push(layer);
        self
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Whether [`Video::render`] has already started.
    pub fn is_closed(&self) -> bool {
        self.state == VideoState::Closed
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take the sink back, e.g. to inspect an [`crate::InMemorySink`].
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Fold every layer over a fresh copy of the background for `frame`.
    pub fn render_frame(&self, frame: FrameIndex) -> FramefoldResult<Frame> {
        self.stack().render_frame(frame)
    }

    /// Render `length` frames in index order into the sink, then close it.
    ///
    /// The length is checked before the sink is touched. If any frame fails, no part of it is
    /// pushed, the sink is closed, and the error is returned.
    #[tracing::instrument(skip(self, opts), fields(layers = self.layers.len()))]
    pub fn render(
        &mut self,
        length: RenderLength,
        opts: &RenderOpts,
    ) -> FramefoldResult<RenderStats> {
        if self.state == VideoState::Closed {
            return Err(FramefoldError::validation(
                "video has already been rendered; sinks are single-use",
            ));
        }
        let total = length.resolve(self.config.fps)?;
        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };

        self.state = VideoState::Closed;
        self.sink.begin(SinkConfig {
            canvas: self.template.canvas(),
            fps: self.config.fps,
            frames: total,
            matte: self.config.background.matte(),
        })?;

        let stack = LayerStack {
            template: &self.template,
            layers: &self.layers,
        };
        let mut pass = Pass {
            sink: &mut self.sink,
            fps: self.config.fps,
            total,
            progress_every: progress_interval(opts.progress_every, self.config.fps),
            stats: RenderStats {
                frames_total: total,
                frames_rendered: 0,
            },
        };

        tracing::info!(frames = total, parallel = opts.parallel, "starting render");
        let outcome = match pool.as_ref() {
            Some(pool) => render_parallel(&stack, &mut pass, pool, opts.chunk_size),
            None => render_sequential(&stack, &mut pass),
        };

        match outcome {
            Ok(()) => {
                pass.sink.end()?;
                tracing::info!(frames = pass.stats.frames_rendered, "render done");
                Ok(pass.stats)
            }
            Err(err) => {
                if let Err(end_err) = pass.sink.end() {
                    tracing::warn!(error = %end_err, "failed to close sink after aborted render");
                }
                Err(err)
            }
        }
    }

    fn stack(&self) -> LayerStack<'_> {
        LayerStack {
            template: &self.template,
            layers: &self.layers,
        }
    }
}

struct LayerStack<'a> {
    template: &'a Frame,
    layers: &'a [Box<dyn Layer>],
}

impl LayerStack<'_> {
    fn render_frame(&self, frame: FrameIndex) -> FramefoldResult<Frame> {
        let mut current = self.template.clone();
        for layer in self.layers {
            current = layer.render(&current, frame)?;
        }
        Ok(current)
    }
}

struct Pass<'a, S: FrameSink> {
    sink: &'a mut S,
    fps: Fps,
    total: u64,
    progress_every: u64,
    stats: RenderStats,
}

impl<S: FrameSink> Pass<'_, S> {
    fn push(&mut self, idx: FrameIndex, frame: &Frame) -> FramefoldResult<()> {
        self.sink.push_frame(idx, frame)?;
        self.stats.frames_rendered += 1;
        let done = idx.0 + 1;
        if self.progress_every > 0 && done % self.progress_every == 0 {
            tracing::info!(
                frame = done,
                total = self.total,
                seconds = self.fps.frames_to_secs(done),
                total_seconds = self.fps.frames_to_secs(self.total),
                "rendering"
            );
        }
        Ok(())
    }
}

fn render_sequential<S: FrameSink>(
    stack: &LayerStack<'_>,
    pass: &mut Pass<'_, S>,
) -> FramefoldResult<()> {
    for f in 0..pass.total {
        let frame = stack.render_frame(FrameIndex(f))?;
        pass.push(FrameIndex(f), &frame)?;
    }
    Ok(())
}

fn render_parallel<S: FrameSink>(
    stack: &LayerStack<'_>,
    pass: &mut Pass<'_, S>,
    pool: &rayon::ThreadPool,
    chunk_size: usize,
) -> FramefoldResult<()> {
    let chunk = normalized_chunk_size(chunk_size);
    let mut chunk_start = 0u64;
    while chunk_start < pass.total {
        let chunk_end = next_chunk_end(chunk_start, chunk, pass.total);
        tracing::debug!(start = chunk_start, end = chunk_end, "rendering chunk");

        let len = (chunk_end - chunk_start) as usize;
        let frames = pool.install(|| {
            (0..len)
                .into_par_iter()
                .map(|i| stack.render_frame(FrameIndex(chunk_start + i as u64)))
                .collect::<Vec<_>>()
        });

        for (i, frame) in frames.into_iter().enumerate() {
            let frame = frame?;
            pass.push(FrameIndex(chunk_start + i as u64), &frame)?;
        }
        chunk_start = chunk_end;
    }
    Ok(())
}

fn next_chunk_end(start: u64, chunk: u64, total: u64) -> u64 {
    start.saturating_add(chunk).min(total)
}

fn progress_interval(progress_every: Option<u64>, fps: Fps) -> u64 {
    match progress_every {
        Some(n) => n,
        None => (fps.as_f64().round() as u64).max(1),
    }
}

fn build_thread_pool(threads: Option<usize>) -> FramefoldResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FramefoldError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FramefoldError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/video.rs"]
mod tests;
