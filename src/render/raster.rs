use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{FramefoldError, FramefoldResult};
use crate::render::frame::Frame;

/// Thickness sentinel requesting a filled shape.
pub const FILLED: i64 = -1;

/// Draw a circle centered at `(cx, cy)` in integer pixel units.
///
/// With `thickness == FILLED` every pixel whose center satisfies `dx² + dy² <= r²` is painted.
/// Otherwise a ring is painted where `|dist - r| <= max(thickness, 1) / 2`. Pixels outside the
/// frame are clipped.
pub fn draw_circle(
    frame: &mut Frame,
    cx: i64,
    cy: i64,
    radius: i64,
    color: Rgba8Premul,
    thickness: i64,
) -> FramefoldResult<()> {
    if radius < 0 {
        return Err(FramefoldError::validation(format!(
            "circle radius must be >= 0, got {radius}"
        )));
    }
    if thickness < 0 && thickness != FILLED {
        return Err(FramefoldError::validation(format!(
            "circle thickness must be >= 0 or FILLED (-1), got {thickness}"
        )));
    }

    let r = radius as f64;
    let (inner_sq, outer_sq, reach) = if thickness == FILLED {
        (f64::NEG_INFINITY, r * r, radius)
    } else {
        let half = (thickness.max(1) as f64) / 2.0;
        let inner = (r - half).max(0.0);
        let outer = r + half;
        let inner_sq = if r - half <= 0.0 {
            f64::NEG_INFINITY
        } else {
            inner * inner
        };
        (inner_sq, outer * outer, outer.ceil() as i64)
    };

    let w = i64::from(frame.width);
    let h = i64::from(frame.height);
    let x0 = cx.saturating_sub(reach).max(0);
    let x1 = cx.saturating_add(reach).min(w - 1);
    let y0 = cy.saturating_sub(reach).max(0);
    let y1 = cy.saturating_add(reach).min(h - 1);
    if x0 > x1 || y0 > y1 {
        return Ok(());
    }

    for y in y0..=y1 {
        let dy = (y - cy) as f64;
        for x in x0..=x1 {
            let dx = (x - cx) as f64;
            let d2 = dx * dx + dy * dy;
            if d2 <= outer_sq && d2 >= inner_sq {
                frame.set_pixel(x as u32, y as u32, color);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
