// Host-side checks on the page contract constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod style {
    include!("../src/style.rs");
}

use constants::*;

#[test]
fn selectors_are_attribute_or_class_selectors() {
    for sel in [
        MODAL_OPEN_SELECTOR,
        MODAL_CLOSE_SELECTOR,
        CAROUSEL_INDEX_SELECTOR,
        CAROUSEL_PREV_SELECTOR,
        CAROUSEL_NEXT_SELECTOR,
        CAROUSEL_ITEM_SELECTOR,
    ] {
        assert!(sel.starts_with('[') && sel.ends_with(']'), "{sel}");
    }
    assert!(HOVER_SELECTOR.starts_with('.'));
    assert!(FOCUS_SELECTOR.starts_with('.'));
}

#[test]
fn index_selector_matches_its_attribute() {
    assert_eq!(CAROUSEL_INDEX_SELECTOR, format!("[{CAROUSEL_INDEX_ATTR}]"));
}

#[test]
fn mount_ids_are_distinct() {
    assert_ne!(SCENE_ROOT_ID, CAROUSEL_ROOT_ID);
    assert!(!SCENE_ROOT_ID.starts_with('#'));
}

#[test]
fn clear_color_is_transparent() {
    assert_eq!(CLEAR_COLOR[3], 0.0);
}

#[test]
fn fallback_accents_are_24_bit() {
    assert!(!FALLBACK_ACCENTS.is_empty());
    for c in FALLBACK_ACCENTS {
        assert!(c <= 0xff_ffff);
        let hex = format!("#{c:06x}");
        assert_eq!(style::parse_hex_color(&hex), Some(c));
    }
}

#[test]
fn hover_wiring_matches_the_orb_entrance() {
    use stage_core::entrance::{SKILL_ORB_INNER_SELECTOR, SKILL_ORB_SELECTOR};
    assert_eq!(HOVER_SELECTOR, SKILL_ORB_SELECTOR);
    assert_eq!(HOVER_INNER_SELECTOR, SKILL_ORB_INNER_SELECTOR);
    assert_ne!(HOVER_SELECTOR, HOVER_INNER_SELECTOR);
}

#[test]
fn shown_elements_get_an_explicit_display() {
    assert_ne!(DEFAULT_SHOWN_DISPLAY, "");
    assert_ne!(DEFAULT_SHOWN_DISPLAY, "none");
    assert_eq!(style::visibility_css(1.0, DEFAULT_SHOWN_DISPLAY).0, DEFAULT_SHOWN_DISPLAY);
}
