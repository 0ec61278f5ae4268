use crate::animation::param::DynamicValue;
use crate::foundation::core::{FrameIndex, Rgb8, Rgba8Premul};
use crate::foundation::error::{FramefoldError, FramefoldResult};
use crate::layer::{Layer, LayerBlend};
use crate::render::frame::Frame;
use crate::render::raster::{FILLED, draw_circle};

/// Circle geometry resolved for one frame, in integer pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircleGeometry {
    /// Center column.
    pub cx: i64,
    /// Center row.
    pub cy: i64,
    /// Radius, always `>= 0`.
    pub radius: i64,
    /// Stroke width, or [`FILLED`].
    pub thickness: i64,
    /// Fill or stroke color.
    pub color: Rgb8,
}

/// A circle whose center, radius, stroke and color may all vary per frame.
#[derive(Clone, Debug)]
pub struct Circle {
    center_x: DynamicValue<f64>,
    center_y: DynamicValue<f64>,
    radius: DynamicValue<f64>,
    thickness: DynamicValue<f64>,
    color: DynamicValue<Rgb8>,
    blend: LayerBlend,
}

impl Circle {
    /// Filled, fully opaque circle.
    ///
    /// Passing an existing [`DynamicValue`] shares it instead of copying it.
    pub fn new(
        center_x: impl Into<DynamicValue<f64>>,
        center_y: impl Into<DynamicValue<f64>>,
        radius: impl Into<DynamicValue<f64>>,
        color: impl Into<DynamicValue<Rgb8>>,
    ) -> Self {
        Self {
            center_x: center_x.into(),
            center_y: center_y.into(),
            radius: radius.into(),
            thickness: DynamicValue::new(FILLED as f64),
            color: color.into(),
            blend: LayerBlend::default(),
        }
    }

    /// Stroke width in pixels; `-1` fills the circle.
    pub fn with_thickness(mut self, thickness: impl Into<DynamicValue<f64>>) -> Self {
        self.thickness = thickness.into();
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

    /// Horizontal center parameter.
    pub fn center_x(&self) -> &DynamicValue<f64> {
        &self.center_x
    }

    /// Vertical center parameter.
    pub fn center_y(&self) -> &DynamicValue<f64> {
        &self.center_y
    }

    /// Radius parameter.
    pub fn radius(&self) -> &DynamicValue<f64> {
        &self.radius
    }

    /// Stroke width parameter.
    pub fn thickness(&self) -> &DynamicValue<f64> {
        &self.thickness
    }

    /// Color parameter.
    pub fn color(&self) -> &DynamicValue<Rgb8> {
        &self.color
    }

    /// Resolve every parameter for `frame`, truncating geometry toward zero.
    pub fn resolve(&self, frame: FrameIndex) -> FramefoldResult<CircleGeometry> {
        let cx = to_pixels("center_x", self.center_x.get(frame)?)?;
        let cy = to_pixels("center_y", self.center_y.get(frame)?)?;
        let radius = to_pixels("radius", self.radius.get(frame)?)?;
        let thickness = to_pixels("thickness", self.thickness.get(frame)?)?;
        if radius < 0 {
            return Err(FramefoldError::validation(format!(
                "circle radius resolved to {radius} at frame {}",
                frame.0
            )));
        }
        if thickness < 0 && thickness != FILLED {
            return Err(FramefoldError::validation(format!(
                "circle thickness resolved to {thickness} at frame {}",
                frame.0
            )));
        }
        Ok(CircleGeometry {
            cx,
            cy,
            radius,
            thickness,
            color: self.color.get(frame)?,
        })
    }
}

impl Layer for Circle {
    fn blend(&self) -> &LayerBlend {
        &self.blend
    }

    fn get_overlay(&self, mut canvas: Frame, frame: FrameIndex) -> FramefoldResult<Frame> {
        let g = self.resolve(frame)?;
        draw_circle(
            &mut canvas,
            g.cx,
            g.cy,
            g.radius,
            Rgba8Premul::opaque(g.color),
            g.thickness,
        )?;
        Ok(canvas)
    }
}

fn to_pixels(name: &str, v: f64) -> FramefoldResult<i64> {
    if !v.is_finite() {
        return Err(FramefoldError::validation(format!(
            "circle {name} must be finite, got {v}"
        )));
    }
    Ok(v.trunc() as i64)
}

#[cfg(test)]
#[path = "../../tests/unit/layer/circle.rs"]
mod tests;
