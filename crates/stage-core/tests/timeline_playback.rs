mod common;

use common::{frames, Page};
use stage_core::easing::Easing;
use stage_core::reaction::{default_easter_egg, BURST_SELECTOR, GLYPH_SELECTOR};
use stage_core::timeline::{plan, Offset, Property, Step, Target, TimelineEngine, TimelineSpec};

#[test]
fn stagger_offsets_each_element() {
    let mut page = Page::new().with(".card", 5);
    let spec = TimelineSpec::named("cards").then(
        Step::new(".card")
            .from_to(Property::Opacity, 0.0, 1.0)
            .duration(400.0)
            .stagger(150.0),
    );
    let p = plan(&spec, &mut page);
    let starts: Vec<f64> = p.entries.iter().map(|e| e.start_ms).collect();
    assert_eq!(starts, vec![0.0, 150.0, 300.0, 450.0, 600.0]);
    assert_eq!(p.duration_ms, 1000.0);
}

#[test]
fn staggered_elements_first_apply_within_a_frame_of_their_start() {
    let mut page = Page::new();
    let cards = page.add(".card", 5);
    let spec = TimelineSpec::named("cards").then(
        Step::new(".card")
            .from_to(Property::Opacity, 0.0, 1.0)
            .duration(400.0)
            .stagger(150.0),
    );
    let mut engine = TimelineEngine::new();
    engine.run(&spec, &mut page, 0.0);

    let mut first_seen = vec![None; cards.len()];
    frames(0.0, 1100.0, |t| {
        engine.tick(&mut page, t);
        for (k, el) in cards.iter().enumerate() {
            if first_seen[k].is_none() && page.values.contains_key(&(*el, Property::Opacity)) {
                first_seen[k] = Some(t);
            }
        }
    });
    for (k, seen) in first_seen.iter().enumerate() {
        let seen = seen.expect("every card animates");
        let start = 150.0 * k as f64;
        assert!(seen >= start && seen < start + 16.0, "card {k} first applied at {seen}");
    }
    assert_eq!(engine.active_count(), 0);
    for el in &cards {
        assert_eq!(page.values[&(*el, Property::Opacity)], 1.0);
    }
}

#[test]
fn relative_offsets_chain_from_previous_group() {
    let mut page = Page::new().with("#a", 1).with("#b", 1).with("#c", 1);
    let spec = TimelineSpec::named("chain")
        .then(Step::new("#a").to(Property::Opacity, 1.0).duration(1000.0))
        .offset(
            Offset::AfterPrevious(-800.0),
            Step::new("#b").to(Property::Opacity, 1.0).duration(500.0),
        )
        .offset(
            Offset::WithPrevious(100.0),
            Step::new("#c").to(Property::Opacity, 1.0).duration(500.0),
        );
    let p = plan(&spec, &mut page);
    assert_eq!(p.group_starts, vec![0.0, 200.0, 300.0]);
    // the first group still ends last
    assert_eq!(p.duration_ms, 1000.0);
}

#[test]
fn unmatched_steps_are_skipped() {
    let mut page = Page::new().with("#present", 1);
    let spec = TimelineSpec::named("partial")
        .then(Step::new("#missing").from_to(Property::Opacity, 0.0, 1.0).duration(300.0))
        .then(Step::new("#present").from_to(Property::Opacity, 0.0, 1.0).duration(300.0));
    let mut engine = TimelineEngine::new();
    let h = engine.run(&spec, &mut page, 0.0);
    frames(0.0, 700.0, |t| {
        engine.tick(&mut page, t);
    });
    assert!(!engine.is_active(h));
    assert_eq!(page.value("#present", Property::Opacity), Some(1.0));
}

#[test]
fn cancel_leaves_last_values_in_place() {
    let mut page = Page::new().with("#box", 1);
    let spec = TimelineSpec::named("slide").then(
        Step::new("#box")
            .from_to(Property::TranslateX, 0.0, 100.0)
            .duration(1000.0)
            .easing(Easing::Linear),
    );
    let mut engine = TimelineEngine::new();
    let h = engine.run(&spec, &mut page, 0.0);
    engine.tick(&mut page, 500.0);
    assert!(engine.cancel(h));
    assert!(!engine.cancel(h));
    let mid = page.value("#box", Property::TranslateX).unwrap();
    assert!((mid - 50.0).abs() < 1e-3);

    engine.tick(&mut page, 2000.0);
    assert_eq!(page.value("#box", Property::TranslateX), Some(mid));
}

#[test]
fn to_tweens_start_from_the_current_value() {
    let mut page = Page::new().with(".orb", 1);
    let orb = page.first(".orb");
    page.values.insert((orb, Property::Scale), 1.2);
    let spec = TimelineSpec::named("leave").then(
        Step::new(Target::Element(orb))
            .to(Property::Scale, 1.0)
            .duration(300.0)
            .easing(Easing::Linear),
    );
    let mut engine = TimelineEngine::new();
    engine.run(&spec, &mut page, 0.0);
    engine.tick(&mut page, 150.0);
    let v = page.value(".orb", Property::Scale).unwrap();
    assert!((v - 1.1).abs() < 1e-4, "{v}");
}

#[test]
fn each_trigger_dispatch_runs_independently() {
    let mut page = Page::new().with(GLYPH_SELECTOR, 1).with(BURST_SELECTOR, 8);
    let mut engine = TimelineEngine::new();
    let first = engine.run(&default_easter_egg(), &mut page, 0.0);
    engine.tick(&mut page, 100.0);
    let second = engine.run(&default_easter_egg(), &mut page, 100.0);

    assert_ne!(first, second);
    assert_eq!(engine.active_count(), 2);

    // last of eight burst dots starts at 700 and runs 1500
    assert_eq!(engine.duration_of(first), Some(2200.0));
    engine.tick(&mut page, 2250.0);
    assert!(!engine.is_active(first));
    assert!(engine.is_active(second));
    engine.tick(&mut page, 2350.0);
    assert_eq!(engine.active_count(), 0);
}

#[test]
fn easter_egg_spins_glyph_a_full_turn() {
    let mut page = Page::new().with(GLYPH_SELECTOR, 1).with(BURST_SELECTOR, 3);
    let mut engine = TimelineEngine::new();
    engine.run(&default_easter_egg(), &mut page, 0.0);
    frames(0.0, 2100.0, |t| {
        engine.tick(&mut page, t);
    });
    assert_eq!(page.value(GLYPH_SELECTOR, Property::Rotate), Some(360.0));
    assert_eq!(page.value(GLYPH_SELECTOR, Property::Scale), Some(1.0));
    assert_eq!(page.value(BURST_SELECTOR, Property::Opacity), Some(0.0));
}
