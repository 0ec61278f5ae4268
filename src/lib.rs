//! framefold is a procedural animation compositor.
//!
//! A [`Video`] holds an ordered stack of [`Layer`]s over a background. For every frame index the
//! stack is folded over a fresh copy of the background, each layer blending its overlay with its
//! own opacity and gamma, and the result is handed to a [`FrameSink`] in strictly increasing
//! order.
//!
//! Every visual attribute of a layer is a [`DynamicValue`]: a base value, an optional per-frame
//! setter, and a chain of `(value, frame) -> value` updaters.
//!
//! ```no_run
//! use framefold::{
//!     Circle, DynamicValue, FfmpegSink, FfmpegSinkOpts, Fps, RenderLength, RenderOpts, Rgb8,
//!     Video, VideoConfig,
//! };
//!
//! # fn main() -> framefold::FramefoldResult<()> {
//! let cfg = VideoConfig::new(640, 480, Fps::new(20, 1)?);
//! let mut video = Video::new(cfg, FfmpegSink::new(FfmpegSinkOpts::new("out/circle.mp4")))?;
//!
//! let radius = DynamicValue::new(1.0);
//! radius.add_updater(|r, f| r + f.as_f64() * 4.0);
//! video.add_layer(Circle::new(320.0, 240.0, radius, Rgb8::new(120, 200, 20)));
//!
//! video.render(RenderLength::seconds(5.0), &RenderOpts::default())?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Dynamic parameters and ready-made transforms.
pub mod animation;
/// Video configuration and the layer stack driver.
pub mod composition;
/// Frame sinks.
pub mod encode;
/// Layer trait and the built-in layers.
pub mod layer;
/// Frames and drawing collaborators.
pub mod render;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgb8, Rgba8Premul};
pub use crate::foundation::error::{FramefoldError, FramefoldResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::ops::{Lerp, Wave};
pub use crate::animation::param::DynamicValue;
pub use crate::composition::config::{Background, RenderLength, RenderOpts, VideoConfig};
pub use crate::composition::video::{RenderStats, Video};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceOpts, PngSequenceSink};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::layer::circle::{Circle, CircleGeometry};
pub use crate::layer::noise_field::NoiseField;
pub use crate::layer::{Layer, LayerBlend, add_weighted};
pub use crate::render::frame::Frame;
pub use crate::render::noise::{NoiseSource, Perlin};
pub use crate::render::raster::{FILLED, draw_circle};
