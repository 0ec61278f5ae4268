use super::*;

fn frame(px: &[u8]) -> Frame {
    Frame::from_rgba8_premul((px.len() / 4) as u32, 1, px.to_vec()).unwrap()
}

#[test]
fn uncovered_pixels_show_the_matte() {
    let mut out = Vec::new();
    flatten_onto(&frame(&[0, 0, 0, 0]), Rgb8::new(10, 20, 30), &mut out);
    assert_eq!(out, vec![10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_pass_through_flattening() {
    let mut out = Vec::new();
    flatten_onto(&frame(&[1, 2, 3, 255, 9, 8, 7, 255]), Rgb8::WHITE, &mut out);
    assert_eq!(out, vec![1, 2, 3, 255, 9, 8, 7, 255]);
}

#[test]
fn half_covered_pixels_mix_with_the_matte() {
    let mut out = vec![42; 12];
    flatten_onto(&frame(&[100, 0, 0, 128]), Rgb8::WHITE, &mut out);
    assert_eq!(out, vec![227, 127, 127, 255]);
}

#[test]
fn unpremultiply_restores_straight_color() {
    let mut out = Vec::new();
    unpremultiply(&frame(&[60, 30, 0, 128, 0, 0, 0, 0, 5, 6, 7, 255]), &mut out);
    assert_eq!(out, vec![120, 60, 0, 128, 0, 0, 0, 0, 5, 6, 7, 255]);
}
