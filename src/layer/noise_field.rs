use std::sync::Arc;

use rayon::prelude::*;

use crate::animation::param::DynamicValue;
use crate::foundation::core::{FrameIndex, Rgb8};
use crate::foundation::error::{FramefoldError, FramefoldResult};
use crate::foundation::math::saturate_u8;
use crate::layer::{Layer, LayerBlend};
use crate::render::frame::Frame;
use crate::render::noise::{NoiseSource, Perlin};

/// Full-frame tint modulated by animated 3-D noise.
///
/// Each pixel is `tint * (noise / 5 + 1)`, where the noise is sampled over `[0, extent)` on both
/// axes at depth `(frame + 1) * speed`. The base frame is ignored.
#[derive(Clone)]
pub struct NoiseField {
    tint: Rgb8,
    speed: f64,
    extent: f64,
    octaves: u32,
    source: Arc<dyn NoiseSource>,
    blend: LayerBlend,
}

impl NoiseField {
    /// Noise field over `tint` with Perlin noise (seed 0), speed 0.02, extent 3 and 3 octaves.
    pub fn new(tint: Rgb8) -> Self {
        Self {
            tint,
            speed: 0.02,
            extent: 3.0,
            octaves: 3,
            source: Arc::new(Perlin::default()),
            blend: LayerBlend::default(),
        }
    }

    /// Depth advanced per frame.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Size of the sampled square in noise space.
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    /// Number of fractal octaves (at least one is always sampled).
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Replace the noise source.
    pub fn with_source(mut self, source: impl NoiseSource + 'static) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Layer opacity.
    pub fn with_opacity(mut self, opacity: impl Into<DynamicValue<f64>>) -> Self {
        self.blend.opacity = opacity.into();
        self
    }

    /// Additive blend offset.
    pub fn with_gamma(mut self, gamma: impl Into<DynamicValue<f64>>) -> Self {
        self.blend.gamma = gamma.into();
        self
    }

    /// Noise depth sampled for `frame`.
    pub fn depth(&self, frame: FrameIndex) -> f64 {
        (frame.as_f64() + 1.0) * self.speed
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("tint", &self.tint)
            .field("speed", &self.speed)
            .field("extent", &self.extent)
            .field("octaves", &self.octaves)
            .field("blend", &self.blend)
            .finish_non_exhaustive()
    }
}

impl Layer for NoiseField {
    fn blend(&self) -> &LayerBlend {
        &self.blend
    }

    fn get_overlay(&self, mut canvas: Frame, frame: FrameIndex) -> FramefoldResult<Frame> {
        if !self.speed.is_finite() || !self.extent.is_finite() {
            return Err(FramefoldError::validation(
                "noise field speed/extent must be finite",
            ));
        }
        let w = canvas.width as usize;
        let h = canvas.height as usize;
        if w == 0 || h == 0 {
            return Ok(canvas);
        }

        let z = self.depth(frame);
        let xs = (0..w)
            .map(|c| c as f64 / w as f64 * self.extent)
            .collect::<Vec<_>>();
        let tint = [
            f64::from(self.tint.r),
            f64::from(self.tint.g),
            f64::from(self.tint.b),
        ];
        let source = self.source.as_ref();
        let octaves = self.octaves;
        let extent = self.extent;

        canvas
            .data
            .par_chunks_exact_mut(w * 4)
            .enumerate()
            .for_each_init(
                || vec![0.0; w],
                |samples, (row, px)| {
                    let y = row as f64 / h as f64 * extent;
                    source.sample_row(&xs, y, z, octaves, samples);
                    for (d, n) in px.chunks_exact_mut(4).zip(samples.iter()) {
                        let m = n / 5.0 + 1.0;
                        d[0] = saturate_u8(tint[0] * m, 255);
                        d[1] = saturate_u8(tint[1] * m, 255);
                        d[2] = saturate_u8(tint[2] * m, 255);
                        d[3] = 255;
                    }
                },
            );
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/noise_field.rs"]
mod tests;
