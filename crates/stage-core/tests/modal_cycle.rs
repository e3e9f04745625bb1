mod common;

use common::{frames, Page};
use stage_core::modal::{ModalScroll, ModalState, COLLAPSED_HEIGHT_PX, EXPANDED_HEIGHT_PX};
use stage_core::timeline::{Property, TimelineEngine};

fn page() -> Page {
    Page::new()
        .with("#decree-modal", 1)
        .with("#decree-top-handle", 1)
        .with("#decree-bottom-handle", 1)
        .with("#decree-parchment", 1)
        .with("#decree-content", 1)
}

/// Tick engine and modal together until `until_ms`; returns the time the
/// modal reported `want`.
fn settle(
    modal: &mut ModalScroll,
    engine: &mut TimelineEngine,
    page: &mut Page,
    from_ms: f64,
    until_ms: f64,
    want: ModalState,
) -> Option<f64> {
    let mut reached = None;
    frames(from_ms, until_ms, |t| {
        engine.tick(page, t);
        if modal.update(engine, page) == Some(want) && reached.is_none() {
            reached = Some(t);
        }
    });
    reached
}

#[test]
fn full_open_close_cycle() {
    let mut page = page();
    let mut engine = TimelineEngine::new();
    let mut modal = ModalScroll::default();

    assert!(modal.open(&mut engine, &mut page, 0.0));
    assert_eq!(modal.state(), ModalState::Opening);
    assert_eq!(page.value("#decree-modal", Property::Visible), Some(1.0));
    assert_eq!(page.value("#decree-parchment", Property::Height), Some(COLLAPSED_HEIGHT_PX));

    let opened = settle(&mut modal, &mut engine, &mut page, 0.0, 2400.0, ModalState::Open)
        .expect("modal opens");
    assert!((2100.0..2100.0 + 16.0).contains(&opened), "opened at {opened}");
    assert_eq!(page.value("#decree-parchment", Property::Height), Some(EXPANDED_HEIGHT_PX));
    assert_eq!(page.value("#decree-content", Property::Opacity), Some(1.0));

    let t0 = 3000.0;
    assert!(modal.close(&mut engine, &mut page, t0));
    assert_eq!(modal.state(), ModalState::Closing);
    let closed = settle(&mut modal, &mut engine, &mut page, t0, t0 + 1600.0, ModalState::Closed)
        .expect("modal closes");
    assert!((t0 + 1300.0..t0 + 1316.0).contains(&closed), "closed at {closed}");
    assert_eq!(page.value("#decree-modal", Property::Visible), Some(0.0));
    assert_eq!(page.value("#decree-parchment", Property::Height), Some(COLLAPSED_HEIGHT_PX));
    assert_eq!(engine.active_count(), 0);
}

#[test]
fn second_open_while_opening_is_ignored() {
    let mut page = page();
    let mut engine = TimelineEngine::new();
    let mut modal = ModalScroll::default();

    assert!(modal.open(&mut engine, &mut page, 0.0));
    let handle = modal.timeline();
    engine.tick(&mut page, 100.0);
    assert!(!modal.open(&mut engine, &mut page, 100.0));
    assert_eq!(modal.state(), ModalState::Opening);
    assert_eq!(modal.timeline(), handle);
    assert_eq!(engine.active_count(), 1);
}

#[test]
fn close_requests_outside_open_are_ignored() {
    let mut page = page();
    let mut engine = TimelineEngine::new();
    let mut modal = ModalScroll::default();

    assert!(!modal.close(&mut engine, &mut page, 0.0));
    assert_eq!(modal.state(), ModalState::Closed);
    assert_eq!(page.writes, 0);

    modal.open(&mut engine, &mut page, 0.0);
    assert!(!modal.close(&mut engine, &mut page, 50.0));
    assert_eq!(modal.state(), ModalState::Opening);
}

#[test]
fn reopen_after_close_runs_again() {
    let mut page = page();
    let mut engine = TimelineEngine::new();
    let mut modal = ModalScroll::default();

    modal.open(&mut engine, &mut page, 0.0);
    settle(&mut modal, &mut engine, &mut page, 0.0, 2200.0, ModalState::Open).expect("open");
    modal.close(&mut engine, &mut page, 2200.0);
    settle(&mut modal, &mut engine, &mut page, 2200.0, 3600.0, ModalState::Closed).expect("closed");

    assert!(modal.open(&mut engine, &mut page, 4000.0));
    // presets put the parchment back to its rolled height before unrolling
    assert_eq!(page.value("#decree-parchment", Property::Height), Some(COLLAPSED_HEIGHT_PX));
    assert_eq!(page.value("#decree-content", Property::TranslateY), Some(-50.0));
}
