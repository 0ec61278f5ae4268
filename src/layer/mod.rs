use crate::animation::param::DynamicValue;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FramefoldError, FramefoldResult};
use crate::foundation::math::saturate_u8;
use crate::render::frame::Frame;

/// Filled and stroked circles.
pub mod circle;
/// Full-frame tinted noise.
pub mod noise_field;

/// Opacity and additive offset applied when a layer is blended onto its base frame.
#[derive(Clone, Debug)]
pub struct LayerBlend {
    /// Weight of the overlay, conceptually in `[0, 1]`.
    pub opacity: DynamicValue<f64>,
    /// Offset added to every color channel after weighting.
    pub gamma: DynamicValue<f64>,
}

impl LayerBlend {
    /// Blend settings with the given opacity and gamma.
    pub fn new(opacity: impl Into<DynamicValue<f64>>, gamma: impl Into<DynamicValue<f64>>) -> Self {
        Self {
            opacity: opacity.into(),
            gamma: gamma.into(),
        }
    }
}

impl Default for LayerBlend {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// A drawable unit folded over the running frame by [`crate::Video`].
///
/// Implementors supply [`Layer::get_overlay`]; [`Layer::render`] takes care of copying the base
/// frame and blending the overlay back onto it.
pub trait Layer: Send + Sync {
    /// Opacity and gamma of this layer.
    fn blend(&self) -> &LayerBlend;

    /// Draw this layer's overlay for `frame`.
    ///
    /// `canvas` is a private copy of the base frame. Implementations may draw onto it or replace
    /// its contents entirely, but must return a frame of the same dimensions.
    fn get_overlay(&self, canvas: Frame, frame: FrameIndex) -> FramefoldResult<Frame>;

    /// Produce `overlay * o + base * (1 - o) + g` for `frame` without touching `base`.
    fn render(&self, base: &Frame, frame: FrameIndex) -> FramefoldResult<Frame> {
        let overlay = self.get_overlay(base.clone(), frame)?;
        if !overlay.same_shape(base) {
            return Err(FramefoldError::validation(format!(
                "layer overlay is {}x{}, expected {}x{}",
                overlay.width, overlay.height, base.width, base.height
            )));
        }
        let opacity = self.blend().opacity.get(frame)?;
        let gamma = self.blend().gamma.get(frame)?;
        add_weighted(&overlay, base, opacity, gamma)
    }
}

/// Weighted sum of two premultiplied frames plus a color offset.
///
/// Alpha and color are weighted as `overlay * o + base * (1 - o)`. `gamma` is then added to the
/// straight (unpremultiplied) color, which is premultiplied again. A pixel left with no coverage
/// counts as black, so a positive `gamma` turns it into an opaque gray. Every channel is rounded
/// half to even and saturated to `[0, 255]`.
pub fn add_weighted(
    overlay: &Frame,
    base: &Frame,
    opacity: f64,
    gamma: f64,
) -> FramefoldResult<Frame> {
    if !overlay.same_shape(base) {
        return Err(FramefoldError::validation(
            "add_weighted expects frames of identical shape",
        ));
    }
    if !opacity.is_finite() || !gamma.is_finite() {
        return Err(FramefoldError::evaluation(format!(
            "layer opacity/gamma must be finite, got opacity={opacity} gamma={gamma}"
        )));
    }

    let keep = 1.0 - opacity;
    let mut data = vec![0u8; base.data.len()];
    for ((d, o), b) in data
        .chunks_exact_mut(4)
        .zip(overlay.data.chunks_exact(4))
        .zip(base.data.chunks_exact(4))
    {
        let mix = |i: usize| f64::from(o[i]) * opacity + f64::from(b[i]) * keep;
        let a = saturate_u8(mix(3), 255);
        let px = match a {
            0 => {
                let v = saturate_u8(gamma, 255);
                if v == 0 { [0; 4] } else { [v, v, v, 255] }
            }
            255 => [
                saturate_u8(mix(0) + gamma, 255),
                saturate_u8(mix(1) + gamma, 255),
                saturate_u8(mix(2) + gamma, 255),
                255,
            ],
            _ => {
                let cover = f64::from(a) / 255.0;
                let shade = |i: usize| {
                    let straight = saturate_u8(mix(i) / cover + gamma, 255);
                    saturate_u8(f64::from(straight) * cover, a)
                };
                [shade(0), shade(1), shade(2), a]
            }
        };
        d.copy_from_slice(&px);
    }

    Ok(Frame {
        width: base.width,
        height: base.height,
        data,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layer/blend.rs"]
mod tests;
