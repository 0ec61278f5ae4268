use super::*;
use crate::animation::ops::drift;
use crate::foundation::core::Canvas;

const GREEN: Rgb8 = Rgb8::new(120, 200, 20);

fn black(w: u32, h: u32) -> Frame {
    Frame::filled(Canvas::new(w, h).unwrap(), Rgba8Premul::opaque(Rgb8::BLACK))
}

#[test]
fn geometry_is_truncated_not_rounded() {
    let c = Circle::new(10.9, -3.7, 4.99, GREEN).with_thickness(2.6);
    let g = c.resolve(FrameIndex(0)).unwrap();
    assert_eq!(
        g,
        CircleGeometry {
            cx: 10,
            cy: -3,
            radius: 4,
            thickness: 2,
            color: GREEN,
        }
    );
}

#[test]
fn radius_updater_grows_with_frame() {
    let radius = DynamicValue::new(1.0);
    radius.add_updater(drift(4.0));
    let c = Circle::new(50.0, 50.0, radius, GREEN);
    assert_eq!(c.resolve(FrameIndex(0)).unwrap().radius, 1);
    assert_eq!(c.resolve(FrameIndex(5)).unwrap().radius, 21);
}

#[test]
fn shared_parameter_moves_both_axes() {
    let pos = DynamicValue::new(20.0);
    let c = Circle::new(pos.clone(), pos.clone(), 3.0, GREEN);
    assert!(c.center_x().ptr_eq(c.center_y()));

    pos.add_updater(|v, f| v + f.as_f64());
    let g = c.resolve(FrameIndex(7)).unwrap();
    assert_eq!((g.cx, g.cy), (27, 27));
}

#[test]
fn default_is_filled_and_opaque() {
    let c = Circle::new(0.0, 0.0, 1.0, GREEN);
    assert_eq!(c.resolve(FrameIndex(0)).unwrap().thickness, FILLED);
    assert_eq!(c.blend().opacity.get(FrameIndex(0)).unwrap(), 1.0);
    assert_eq!(c.blend().gamma.get(FrameIndex(0)).unwrap(), 0.0);
}

#[test]
fn overlay_draws_on_the_copy() {
    let base = black(32, 32);
    let c = Circle::new(16.0, 16.0, 5.0, GREEN);
    let overlay = c.get_overlay(base.clone(), FrameIndex(0)).unwrap();
    assert_eq!(overlay.pixel(16, 16), Some(Rgba8Premul::opaque(GREEN)));
    assert_eq!(overlay.pixel(0, 0), Some(Rgba8Premul::opaque(Rgb8::BLACK)));
    assert_eq!(base.pixel(16, 16), Some(Rgba8Premul::opaque(Rgb8::BLACK)));
}

#[test]
fn half_opacity_circle_blends_with_background() {
    let base = black(32, 32);
    let c = Circle::new(16.0, 16.0, 5.0, Rgb8::new(200, 100, 50)).with_opacity(0.5);
    let out = c.render(&base, FrameIndex(0)).unwrap();
    assert_eq!(out.pixel(16, 16).unwrap().to_array(), [100, 50, 25, 255]);
    assert_eq!(out.pixel(0, 0).unwrap().to_array(), [0, 0, 0, 255]);
}

#[test]
fn negative_radius_is_rejected_before_drawing() {
    let radius = DynamicValue::new(10.0);
    radius.add_updater(|v, f| v - f.as_f64() * 3.0);
    let c = Circle::new(5.0, 5.0, radius, GREEN);
    assert!(c.resolve(FrameIndex(3)).is_ok());
    let err = c.resolve(FrameIndex(4)).unwrap_err();
    assert!(matches!(err, FramefoldError::Validation(_)));
    assert!(c.render(&black(8, 8), FrameIndex(4)).is_err());
}

#[test]
fn invalid_thickness_and_non_finite_values_are_rejected() {
    let c = Circle::new(5.0, 5.0, 2.0, GREEN).with_thickness(-3.0);
    assert!(c.resolve(FrameIndex(0)).is_err());

    let c = Circle::new(f64::NAN, 5.0, 2.0, GREEN);
    assert!(c.resolve(FrameIndex(0)).is_err());
}

#[test]
fn animated_color_is_resolved_per_frame() {
    let color = DynamicValue::new(Rgb8::BLACK);
    color.add_setter(|f| Rgb8::new((f.0 * 10) as u8, 0, 0));
    let c = Circle::new(4.0, 4.0, 2.0, color);
    let out = c.render(&black(8, 8), FrameIndex(3)).unwrap();
    assert_eq!(out.pixel(4, 4).unwrap().to_array(), [30, 0, 0, 255]);
}

#[test]
fn color_accepts_a_plain_tuple() {
    let circle = Circle::new(4.0, 4.0, 2.0, (120, 200, 20));
    let g = circle.resolve(FrameIndex(0)).unwrap();
    assert_eq!(g.color, Rgb8::new(120, 200, 20));
}
