use super::*;
use crate::animation::param::DynamicValue;

#[test]
fn drift_grows_linearly_with_frame() {
    let radius = DynamicValue::new(1.0);
    radius.add_updater(drift(4.0));
    assert_eq!(radius.get(FrameIndex(0)).unwrap(), 1.0);
    assert_eq!(radius.get(FrameIndex(5)).unwrap(), 21.0);
}

#[test]
fn wave_matches_closed_form() {
    let x = DynamicValue::new(500.0);
    x.add_updater(wave(-4.0, 3.0, Wave::Cos));
    let expected = 500.0 - 4.0 * (7.0_f64 / 3.0).cos();
    assert_eq!(x.get(FrameIndex(7)).unwrap(), expected);

    let y = DynamicValue::new(0.0);
    y.add_updater(wave(2.0, 0.0, Wave::Sin));
    assert_eq!(y.get(FrameIndex(9)).unwrap(), 0.0);
}

#[test]
fn clamp_accepts_bounds_in_any_order() {
    let f = clamp(10.0, 0.0);
    assert_eq!(f(-3.0, FrameIndex(0)), 0.0);
    assert_eq!(f(30.0, FrameIndex(0)), 10.0);
    assert_eq!(f(4.0, FrameIndex(0)), 4.0);
}

#[test]
fn tween_holds_outside_span_and_eases_inside() {
    let s = tween(0.0, 100.0, FrameIndex(10), FrameIndex(20), Ease::Linear);
    assert_eq!(s(FrameIndex(0)), 0.0);
    assert_eq!(s(FrameIndex(10)), 0.0);
    assert_eq!(s(FrameIndex(15)), 50.0);
    assert_eq!(s(FrameIndex(20)), 100.0);
    assert_eq!(s(FrameIndex(99)), 100.0);
}

#[test]
fn tween_colors_round_per_channel() {
    let s = tween(
        Rgb8::new(0, 0, 0),
        Rgb8::new(255, 100, 1),
        FrameIndex(0),
        FrameIndex(2),
        Ease::Linear,
    );
    assert_eq!(s(FrameIndex(1)), Rgb8::new(128, 50, 1));
}
