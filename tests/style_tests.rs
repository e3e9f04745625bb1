// Host-side tests for the CSS helpers used by the DOM resolver.

#![allow(dead_code)]
mod style {
    include!("../src/style.rs");
}

use style::*;

#[test]
fn identity_transform_is_none() {
    assert_eq!(compose_transform(&TransformParts::default()), "none");
}

#[test]
fn transform_keeps_fixed_order() {
    let p = TransformParts {
        translate_y: -50.0,
        scale: 0.5,
        rotate_x_deg: 90.0,
        ..Default::default()
    };
    assert_eq!(compose_transform(&p), "translateY(-50px) scale(0.5) rotateX(90deg)");

    let p = TransformParts {
        translate_x: 10.0,
        rotate_deg: 180.0,
        scale_x: 0.25,
        ..Default::default()
    };
    assert_eq!(compose_transform(&p), "translateX(10px) scaleX(0.25) rotate(180deg)");
}

#[test]
fn slide_is_written_in_percent_after_pixel_translates() {
    let p = TransformParts {
        slide_x_pct: -100.0,
        ..Default::default()
    };
    assert_eq!(compose_transform(&p), "translateX(-100%)");

    let p = TransformParts {
        translate_y: 4.0,
        slide_x_pct: 50.0,
        ..Default::default()
    };
    assert_eq!(compose_transform(&p), "translateY(4px) translateX(50%)");
}

#[test]
fn visibility_toggles_display_and_pointer_events() {
    assert_eq!(visibility_css(1.0, "flex"), ("flex", "auto"));
    assert_eq!(visibility_css(1.0, "block"), ("block", "auto"));
    assert_eq!(visibility_css(0.0, "flex"), ("none", "none"));
    // interpolated values snap at the midpoint
    assert_eq!(visibility_css(0.49, "flex"), ("none", "none"));
    assert_eq!(visibility_css(0.5, "flex"), ("flex", "auto"));
}

#[test]
fn backing_size_scales_by_dpr() {
    assert_eq!(backing_size(400.0, 300.0, 2.0, false), (800, 600));
    assert_eq!(backing_size(400.0, 300.0, 0.0, false), (400, 300));
}

#[test]
fn square_backing_follows_width() {
    assert_eq!(backing_size(320.0, 100.0, 1.5, true), (480, 480));
}

#[test]
fn backing_size_never_zero() {
    assert_eq!(backing_size(0.0, 0.0, 1.0, false), (1, 1));
}

#[test]
fn parses_hex_colors() {
    assert_eq!(parse_hex_color("#ff0080"), Some(0xff0080));
    assert_eq!(parse_hex_color("00FFFF"), Some(0x00ffff));
    assert_eq!(parse_hex_color(" 0x8000ff "), Some(0x8000ff));
    assert_eq!(parse_hex_color("#fff"), None);
    assert_eq!(parse_hex_color("+fffff"), None);
    assert_eq!(parse_hex_color("#gg0000"), None);
}

#[test]
fn rgba_clamps_alpha() {
    assert_eq!(rgba([0, 255, 255], 0.8), "rgba(0, 255, 255, 0.8)");
    assert_eq!(rgba([255, 0, 128], 1.5), "rgba(255, 0, 128, 1)");
    assert_eq!(rgba([0, 0, 0], -1.0), "rgba(0, 0, 0, 0)");
}
