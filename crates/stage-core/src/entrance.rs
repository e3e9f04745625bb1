//! Section entrance sequences and small hover/focus feedback tweens.

use crate::constants::VISIBILITY_THRESHOLD;
use crate::easing::Easing;
use crate::timeline::{Offset, Property, Step, Target, TimelineSpec};

const ELASTIC: Easing = Easing::out_elastic(1.0, 0.8);

pub const HOVER_SCALE: f32 = 1.2;
pub const FOCUS_SCALE: f32 = 1.02;
pub const FEEDBACK_MS: f64 = 300.0;

/// Skill orbs animate in as a whole; hover scales their inner disc so the
/// two tweens never share an element.
pub const SKILL_ORB_SELECTOR: &str = ".skill-orb";
pub const SKILL_ORB_INNER_SELECTOR: &str = ".skill-orb-inner";

pub const GATE_SELECTOR: &str = ".loading-gate";
pub const GATE_LEFT_SELECTOR: &str = ".loading-panel-left";
pub const GATE_RIGHT_SELECTOR: &str = ".loading-panel-right";
/// When the panels start sliding apart, measured from gate start.
pub const GATE_OPEN_AT_MS: f64 = 2500.0;
pub const GATE_OPEN_MS: f64 = 1500.0;

/// Ratios reported at the crossing can land just under the threshold.
const VISIBILITY_SLACK: f64 = 1e-3;

/// Page sections that animate in once when scrolled into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Hero, Section::About, Section::Projects, Section::Contact];

    /// Element observed for visibility.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Hero => "#hero",
            Section::About => "#about",
            Section::Projects => "#projects",
            Section::Contact => "#contact",
        }
    }

    /// `Hero` plays on a timer after start rather than on visibility.
    pub fn observed(self) -> bool {
        self != Section::Hero
    }

    pub fn timeline(self) -> TimelineSpec {
        match self {
            Section::Hero => hero_intro(),
            Section::About => about(),
            Section::Projects => projects(),
            Section::Contact => contact(),
        }
    }
}

pub fn hero_intro() -> TimelineSpec {
    TimelineSpec::named("hero-intro")
        .then(
            Step::new("#hero-logo")
                .from_to(Property::Scale, 0.0, 1.0)
                .from_to(Property::Rotate, 180.0, 0.0)
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(1500.0)
                .delay(500.0)
                .easing(ELASTIC),
        )
        .offset(
            Offset::AfterPrevious(-800.0),
            Step::new("#hero-text > *")
                .from_to(Property::TranslateY, 50.0, 0.0)
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(800.0)
                .stagger(200.0)
                .easing(Easing::OUT_QUART),
        )
}

pub fn about() -> TimelineSpec {
    TimelineSpec::named("about").group(
        Offset::At(0.0),
        vec![
            Step::new(SKILL_ORB_SELECTOR)
                .from_to(Property::Scale, 0.0, 1.0)
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(800.0)
                .stagger(150.0)
                .easing(ELASTIC),
            Step::new(".about-text")
                .from_to(Property::TranslateY, 50.0, 0.0)
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(1000.0)
                .delay(300.0)
                .easing(Easing::OUT_QUART),
        ],
    )
}

pub fn projects() -> TimelineSpec {
    TimelineSpec::named("projects").group(
        Offset::At(0.0),
        vec![
            Step::new(".project-title")
                .from_to(Property::TranslateY, 50.0, 0.0)
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(1000.0)
                .easing(Easing::OUT_QUART),
            Step::new(".project-card")
                .from_to(Property::Scale, 0.8, 1.0)
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(800.0)
                .delay(500.0)
                .easing(ELASTIC),
        ],
    )
}

pub fn contact() -> TimelineSpec {
    TimelineSpec::named("contact").group(
        Offset::At(0.0),
        vec![
            Step::new(".contact-form")
                .from_to(Property::TranslateY, 50.0, 0.0)
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(1000.0)
                .easing(Easing::OUT_QUART),
            Step::new(".contact-info")
                .from_to(Property::TranslateX, -50.0, 0.0)
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(1000.0)
                .delay(300.0)
                .easing(Easing::OUT_QUART),
            Step::new(".form-field")
                .from_to(Property::Scale, 0.9, 1.0)
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(800.0)
                .stagger_from(150.0, 600.0)
                .easing(ELASTIC),
        ],
    )
}

pub fn loading_gate() -> TimelineSpec {
    TimelineSpec::named("loading-gate")
        .then(
            Step::new(".loading-text")
                .from_to(Property::Opacity, 0.0, 1.0)
                .from_to(Property::Scale, 0.8, 1.0)
                .duration(1000.0)
                .easing(ELASTIC),
        )
        .offset(
            Offset::AfterPrevious(-500.0),
            Step::new(".loading-bar")
                .from_to(Property::ScaleX, 0.0, 1.0)
                .duration(2000.0)
                .easing(Easing::IN_OUT_QUART),
        )
        .offset(
            Offset::AfterPrevious(200.0),
            Step::new(".loading-text")
                .from_to(Property::Opacity, 1.0, 0.0)
                .from_to(Property::Scale, 1.0, 0.8)
                .duration(500.0)
                .easing(Easing::IN_QUART),
        )
        .group(
            Offset::At(GATE_OPEN_AT_MS),
            vec![
                Step::new(GATE_LEFT_SELECTOR)
                    .to(Property::SlideX, -100.0)
                    .duration(GATE_OPEN_MS)
                    .easing(Easing::IN_OUT_QUART),
                Step::new(GATE_RIGHT_SELECTOR)
                    .to(Property::SlideX, 100.0)
                    .duration(GATE_OPEN_MS)
                    .easing(Easing::IN_OUT_QUART),
            ],
        )
        .offset(
            Offset::AfterPrevious(0.0),
            Step::new(GATE_SELECTOR).from_to(Property::Visible, 1.0, 0.0),
        )
}

fn feedback(target: Target, label: &'static str, scale: f32) -> TimelineSpec {
    TimelineSpec::named(label).then(
        Step::new(target)
            .to(Property::Scale, scale)
            .duration(FEEDBACK_MS)
            .easing(Easing::OUT_QUART),
    )
}

pub fn hover_enter(target: Target) -> TimelineSpec {
    feedback(target, "hover-enter", HOVER_SCALE)
}

pub fn hover_leave(target: Target) -> TimelineSpec {
    feedback(target, "hover-leave", 1.0)
}

pub fn focus(target: Target) -> TimelineSpec {
    feedback(target, "focus", FOCUS_SCALE)
}

pub fn blur(target: Target) -> TimelineSpec {
    feedback(target, "blur", 1.0)
}

/// Fires once when the observed ratio first reaches the threshold.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityGate {
    threshold: f64,
    fired: bool,
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(VISIBILITY_THRESHOLD)
    }
}

impl VisibilityGate {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            fired: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Returns true exactly once.
    pub fn observe(&mut self, intersecting: bool, ratio: f64) -> bool {
        if self.fired || !intersecting || ratio < self.threshold - VISIBILITY_SLACK {
            return false;
        }
        self.fired = true;
        true
    }
}
