//! Reaction to the page-wide trigger event: the hero glyph spins and pulses
//! while a ring of burst dots expands and fades.

use crate::easing::Easing;
use crate::timeline::{Offset, Property, Step, Target, TimelineSpec};

/// Window event name listened for by the web layer.
pub const TRIGGER_EVENT: &str = "triggerEasterEgg";

pub const GLYPH_SELECTOR: &str = "#hero-logo";
pub const BURST_SELECTOR: &str = ".particle-burst";

/// One dispatch → one of these. Each call yields an independent spec; the
/// engine never merges them.
pub fn easter_egg(glyph: Target, burst: Target) -> TimelineSpec {
    TimelineSpec::named("easter-egg").group(
        Offset::At(0.0),
        vec![
            Step::new(glyph)
                .keyframes(Property::Scale, &[1.0, 1.5, 1.0])
                .by(Property::Rotate, 360.0)
                .duration(2000.0)
                .easing(Easing::IN_OUT_QUART),
            Step::new(burst)
                .from_to(Property::Scale, 0.0, 2.0)
                .from_to(Property::Opacity, 1.0, 0.0)
                .duration(1500.0)
                .stagger(100.0)
                .easing(Easing::OUT_QUART),
        ],
    )
}

pub fn default_easter_egg() -> TimelineSpec {
    easter_egg(GLYPH_SELECTOR.into(), BURST_SELECTOR.into())
}
