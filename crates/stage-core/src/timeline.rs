//! Timeline animation engine.
//!
//! A [`TimelineSpec`] is an ordered list of groups. Each group starts at an
//! offset (absolute, or relative to the previous group's start or end) and
//! holds steps that tween element properties. When a spec is run, its targets
//! are resolved once and the whole thing is flattened into a [`Plan`]: a list
//! of (absolute start, tween) entries sorted by start time. Playback then just
//! walks that list against the clock passed to [`TimelineEngine::tick`].
//!
//! The engine never talks to the DOM directly; everything goes through a
//! [`TargetResolver`], which the web layer implements over real elements and
//! tests implement in memory.

use crate::easing::Easing;
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use std::borrow::Cow;

/// Animatable properties. Transform components are composed by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
    /// Horizontal translate in percent of the element's own width.
    SlideX,
    Scale,
    ScaleX,
    /// Degrees.
    Rotate,
    /// Degrees.
    RotateX,
    /// CSS pixels.
    Height,
    /// 1 shows the element and makes it hit-testable, 0 removes it.
    Visible,
}

impl Property {
    /// Value assumed when an element has never been written or read.
    pub fn default_value(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale | Property::ScaleX | Property::Visible => 1.0,
            _ => 0.0,
        }
    }
}

/// Opaque element identity handed out by a resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Selector(Cow<'static, str>),
    Element(ElementRef),
    /// Several handles animated as one multi-match target, in order.
    List(Vec<Target>),
}

impl Target {
    pub fn selector(s: impl Into<Cow<'static, str>>) -> Self {
        Target::Selector(s.into())
    }
}

impl From<&'static str> for Target {
    fn from(s: &'static str) -> Self {
        Target::Selector(Cow::Borrowed(s))
    }
}

/// Capability the engine needs from the host view layer.
pub trait TargetResolver {
    /// Elements matched by a single selector or element handle, in document
    /// order. Never called with [`Target::List`].
    fn resolve(&mut self, target: &Target) -> Vec<ElementRef>;
    /// Last value written for this property, if known.
    fn read(&self, element: ElementRef, property: Property) -> Option<f32>;
    fn apply(&mut self, element: ElementRef, property: Property, value: f32);
}

/// Expand a target (including lists) into unique elements, first match wins.
pub fn resolve_target<R: TargetResolver + ?Sized>(resolver: &mut R, target: &Target) -> Vec<ElementRef> {
    let mut out = Vec::new();
    collect(resolver, target, &mut out);
    out
}

fn collect<R: TargetResolver + ?Sized>(resolver: &mut R, target: &Target, out: &mut Vec<ElementRef>) {
    match target {
        Target::List(items) => {
            for t in items {
                collect(resolver, t, out);
            }
        }
        single => {
            for el in resolver.resolve(single) {
                if !out.contains(&el) {
                    out.push(el);
                }
            }
        }
    }
}

/// How a tween gets its values.
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    /// Two values tween from the first to the second. Three or more are
    /// keyframes of `duration / n` each, the first reached from the current
    /// value.
    Keyframes(SmallVec<[f32; 4]>),
    /// From whatever the element currently holds to this value.
    To(f32),
    /// From the current value to current + delta (`"+=360"`).
    By(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub property: Property,
    pub values: Values,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    pub each_ms: f64,
    pub start_ms: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub target: Target,
    pub tweens: SmallVec<[Tween; 4]>,
    pub duration_ms: f64,
    pub delay_ms: f64,
    /// Falls back to the timeline's easing.
    pub easing: Option<Easing>,
    pub stagger: Option<Stagger>,
}

impl Step {
    pub fn new(target: impl Into<Target>) -> Self {
        Self {
            target: target.into(),
            tweens: SmallVec::new(),
            duration_ms: 0.0,
            delay_ms: 0.0,
            easing: None,
            stagger: None,
        }
    }

    pub fn from_to(self, property: Property, from: f32, to: f32) -> Self {
        self.keyframes(property, &[from, to])
    }

    pub fn keyframes(mut self, property: Property, values: &[f32]) -> Self {
        self.tweens.push(Tween {
            property,
            values: Values::Keyframes(values.iter().copied().collect()),
        });
        self
    }

    pub fn to(mut self, property: Property, value: f32) -> Self {
        self.tweens.push(Tween {
            property,
            values: Values::To(value),
        });
        self
    }

    pub fn by(mut self, property: Property, delta: f32) -> Self {
        self.tweens.push(Tween {
            property,
            values: Values::By(delta),
        });
        self
    }

    pub fn duration(mut self, ms: f64) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn delay(mut self, ms: f64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn stagger(self, each_ms: f64) -> Self {
        self.stagger_from(each_ms, 0.0)
    }

    pub fn stagger_from(mut self, each_ms: f64, start_ms: f64) -> Self {
        self.stagger = Some(Stagger { each_ms, start_ms });
        self
    }
}

/// Where a group starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    /// Milliseconds from the timeline start.
    At(f64),
    /// Relative to the previous group's end; negative values overlap.
    AfterPrevious(f64),
    /// Relative to the previous group's start.
    WithPrevious(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub offset: Offset,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineSpec {
    pub label: Cow<'static, str>,
    pub easing: Easing,
    pub groups: Vec<Group>,
}

impl Default for TimelineSpec {
    fn default() -> Self {
        Self::named("timeline")
    }
}

impl TimelineSpec {
    pub fn named(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            easing: Easing::default(),
            groups: Vec::new(),
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Add a single-step group right after the previous one.
    pub fn then(self, step: Step) -> Self {
        self.group(Offset::AfterPrevious(0.0), vec![step])
    }

    /// Add a single-step group at an absolute offset.
    pub fn at(self, ms: f64, step: Step) -> Self {
        self.group(Offset::At(ms), vec![step])
    }

    pub fn offset(self, offset: Offset, step: Step) -> Self {
        self.group(offset, vec![step])
    }

    pub fn group(mut self, offset: Offset, steps: Vec<Step>) -> Self {
        self.groups.push(Group { offset, steps });
        self
    }
}

/// One tween on one element at an absolute time.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedTween {
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    pub element: ElementRef,
    pub property: Property,
    pub values: Values,
    /// Position of the element within its step's resolved targets.
    pub target_index: usize,
    pub group: usize,
}

impl PlannedTween {
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plan {
    pub entries: Vec<PlannedTween>,
    pub group_starts: Vec<f64>,
    pub duration_ms: f64,
}

/// Resolve targets and flatten a spec into a time-sorted schedule.
pub fn plan<R: TargetResolver + ?Sized>(spec: &TimelineSpec, resolver: &mut R) -> Plan {
    let mut out = Plan::default();
    let mut prev_start = 0.0f64;
    let mut prev_end = 0.0f64;
    for (gi, group) in spec.groups.iter().enumerate() {
        let start = match group.offset {
            Offset::At(ms) => ms,
            Offset::AfterPrevious(ms) => prev_end + ms,
            Offset::WithPrevious(ms) => prev_start + ms,
        }
        .max(0.0);
        let mut end = start;
        for step in &group.steps {
            let elements = resolve_target(resolver, &step.target);
            if elements.is_empty() {
                log::debug!("[timeline] {}: no match for {:?}, skipped", spec.label, step.target);
                continue;
            }
            let easing = step.easing.unwrap_or(spec.easing);
            for (k, &element) in elements.iter().enumerate() {
                let stagger = step
                    .stagger
                    .map(|s| s.start_ms + s.each_ms * k as f64)
                    .unwrap_or(0.0);
                let t0 = start + step.delay_ms + stagger;
                for tween in &step.tweens {
                    out.entries.push(PlannedTween {
                        start_ms: t0,
                        duration_ms: step.duration_ms.max(0.0),
                        easing,
                        element,
                        property: tween.property,
                        values: tween.values.clone(),
                        target_index: k,
                        group: gi,
                    });
                }
                end = end.max(t0 + step.duration_ms.max(0.0));
            }
        }
        out.group_starts.push(start);
        out.duration_ms = out.duration_ms.max(end);
        prev_start = start;
        prev_end = end;
    }
    // Stable: ties keep declaration and target order.
    out.entries.sort_by(|a, b| a.start_ms.total_cmp(&b.start_ms));
    out
}

/// Sample evenly spaced keyframes at linear progress `t`, easing each segment.
pub fn sample(keys: &[f32], easing: Easing, t: f32) -> f32 {
    match keys.len() {
        0 => 0.0,
        1 => keys[0],
        n => {
            let segments = (n - 1) as f32;
            let scaled = t.clamp(0.0, 1.0) * segments;
            let seg = (scaled.floor() as usize).min(n - 2);
            let local = scaled - seg as f32;
            let e = easing.apply(local);
            keys[seg] + (keys[seg + 1] - keys[seg]) * e
        }
    }
}

new_key_type! {
    /// Handle to a running timeline.
    pub struct TimelineHandle;
}

struct ActiveTween {
    planned: PlannedTween,
    keys: Option<SmallVec<[f32; 4]>>,
    done: bool,
}

struct Running {
    label: Cow<'static, str>,
    origin_ms: f64,
    duration_ms: f64,
    tweens: Vec<ActiveTween>,
}

/// Owns every in-flight timeline and advances them from the frame clock.
#[derive(Default)]
pub struct TimelineEngine {
    running: SlotMap<TimelineHandle, Running>,
}

impl TimelineEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timeline starting at `now_ms`. Nothing is applied until the
    /// next [`tick`](Self::tick).
    pub fn run<R: TargetResolver + ?Sized>(
        &mut self,
        spec: &TimelineSpec,
        resolver: &mut R,
        now_ms: f64,
    ) -> TimelineHandle {
        let plan = plan(spec, resolver);
        log::debug!(
            "[timeline] run {} tweens={} duration={}ms",
            spec.label,
            plan.entries.len(),
            plan.duration_ms
        );
        self.running.insert(Running {
            label: spec.label.clone(),
            origin_ms: now_ms,
            duration_ms: plan.duration_ms,
            tweens: plan
                .entries
                .into_iter()
                .map(|planned| ActiveTween {
                    planned,
                    keys: None,
                    done: false,
                })
                .collect(),
        })
    }

    /// Stop a timeline where it is. Returns false for unknown or finished
    /// handles.
    pub fn cancel(&mut self, handle: TimelineHandle) -> bool {
        match self.running.remove(handle) {
            Some(r) => {
                log::debug!("[timeline] cancel {}", r.label);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.running.clear();
    }

    pub fn is_active(&self, handle: TimelineHandle) -> bool {
        self.running.contains_key(handle)
    }

    pub fn active_count(&self) -> usize {
        self.running.len()
    }

    /// Milliseconds from start to completion for a running timeline.
    pub fn duration_of(&self, handle: TimelineHandle) -> Option<f64> {
        self.running.get(handle).map(|r| r.duration_ms)
    }

    /// Advance every timeline to `now_ms`; returns the ones that completed.
    pub fn tick<R: TargetResolver + ?Sized>(
        &mut self,
        resolver: &mut R,
        now_ms: f64,
    ) -> SmallVec<[TimelineHandle; 4]> {
        let mut finished = SmallVec::new();
        for (handle, running) in self.running.iter_mut() {
            let elapsed = now_ms - running.origin_ms;
            if advance_running(running, resolver, elapsed) {
                finished.push(handle);
            }
        }
        for &h in &finished {
            if let Some(r) = self.running.remove(h) {
                log::debug!("[timeline] complete {}", r.label);
            }
        }
        finished
    }
}

fn advance_running<R: TargetResolver + ?Sized>(
    running: &mut Running,
    resolver: &mut R,
    elapsed: f64,
) -> bool {
    let mut all_done = true;
    for tween in running.tweens.iter_mut() {
        let p = &tween.planned;
        if elapsed < p.start_ms {
            // Sorted by start: nothing after this has begun either.
            all_done = false;
            break;
        }
        if tween.done {
            continue;
        }
        let keys = tween
            .keys
            .get_or_insert_with(|| starting_keys(resolver, p.element, p.property, &p.values));
        let progress = if p.duration_ms <= 0.0 {
            1.0
        } else {
            ((elapsed - p.start_ms) / p.duration_ms).min(1.0) as f32
        };
        resolver.apply(p.element, p.property, sample(keys, p.easing, progress));
        if progress >= 1.0 {
            tween.done = true;
        } else {
            all_done = false;
        }
    }
    all_done && elapsed >= running.duration_ms
}

fn starting_keys<R: TargetResolver + ?Sized>(
    resolver: &R,
    element: ElementRef,
    property: Property,
    values: &Values,
) -> SmallVec<[f32; 4]> {
    let current = || {
        resolver
            .read(element, property)
            .unwrap_or_else(|| property.default_value())
    };
    match values {
        Values::Keyframes(v) if v.len() > 2 => {
            let mut keys = SmallVec::with_capacity(v.len() + 1);
            keys.push(current());
            keys.extend_from_slice(v);
            keys
        }
        Values::Keyframes(v) => v.clone(),
        Values::To(to) => smallvec![current(), *to],
        Values::By(delta) => {
            let c = current();
            smallvec![c, c + delta]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnv::FnvHashMap;

    /// Selector → count of elements; ids are allocated per selector.
    #[derive(Default)]
    struct Fake {
        counts: FnvHashMap<&'static str, usize>,
        values: FnvHashMap<(ElementRef, Property), f32>,
    }

    impl Fake {
        fn with(mut self, selector: &'static str, n: usize) -> Self {
            self.counts.insert(selector, n);
            self
        }

        fn id(selector: &str, k: usize) -> ElementRef {
            let h = selector.bytes().fold(0u64, |a, b| a.wrapping_mul(31).wrapping_add(b as u64));
            ElementRef(h * 100 + k as u64)
        }

        fn get(&self, selector: &str, k: usize, p: Property) -> Option<f32> {
            self.values.get(&(Self::id(selector, k), p)).copied()
        }
    }

    impl TargetResolver for Fake {
        fn resolve(&mut self, target: &Target) -> Vec<ElementRef> {
            match target {
                Target::Selector(s) => {
                    let n = self.counts.get(s.as_ref()).copied().unwrap_or(0);
                    (0..n).map(|k| Self::id(s, k)).collect()
                }
                Target::Element(e) => vec![*e],
                Target::List(_) => unreachable!(),
            }
        }

        fn read(&self, element: ElementRef, property: Property) -> Option<f32> {
            self.values.get(&(element, property)).copied()
        }

        fn apply(&mut self, element: ElementRef, property: Property, value: f32) {
            self.values.insert((element, property), value);
        }
    }

    #[test]
    fn groups_chain_by_end_and_overlap_with_negative_offsets() {
        let mut fake = Fake::default().with(".a", 1).with(".b", 1);
        let spec = TimelineSpec::named("t")
            .then(Step::new(".a").from_to(Property::Opacity, 0.0, 1.0).duration(1000.0))
            .offset(
                Offset::AfterPrevious(-800.0),
                Step::new(".b").from_to(Property::Opacity, 0.0, 1.0).duration(500.0),
            );
        let p = plan(&spec, &mut fake);
        assert_eq!(p.group_starts, vec![0.0, 200.0]);
        assert_eq!(p.duration_ms, 1000.0);
    }

    #[test]
    fn with_previous_is_relative_to_start() {
        let mut fake = Fake::default().with(".a", 1).with(".b", 1);
        let spec = TimelineSpec::named("t")
            .at(300.0, Step::new(".a").to(Property::Scale, 2.0).duration(1000.0))
            .offset(Offset::WithPrevious(100.0), Step::new(".b").to(Property::Scale, 2.0).duration(10.0));
        let p = plan(&spec, &mut fake);
        assert_eq!(p.group_starts, vec![300.0, 400.0]);
        assert_eq!(p.duration_ms, 1300.0);
    }

    #[test]
    fn missing_targets_are_skipped_not_fatal() {
        let mut fake = Fake::default().with(".here", 1);
        let spec = TimelineSpec::named("t")
            .then(Step::new(".gone").from_to(Property::Opacity, 0.0, 1.0).duration(400.0))
            .then(Step::new(".here").from_to(Property::Opacity, 0.0, 1.0).duration(400.0));
        let mut engine = TimelineEngine::new();
        let h = engine.run(&spec, &mut fake, 0.0);
        // The empty group contributes no time.
        assert_eq!(engine.duration_of(h), Some(400.0));
        engine.tick(&mut fake, 400.0);
        assert_eq!(fake.get(".here", 0, Property::Opacity), Some(1.0));
        assert!(!engine.is_active(h));
    }

    #[test]
    fn keyframes_pass_through_the_middle_value() {
        assert_eq!(sample(&[1.0, 1.5, 1.0], Easing::Linear, 0.5), 1.5);
        assert_eq!(sample(&[1.0, 1.5, 1.0], Easing::Linear, 0.25), 1.25);
        assert_eq!(sample(&[1.0, 1.5, 1.0], Easing::Linear, 1.0), 1.0);
        assert_eq!(sample(&[3.0], Easing::Linear, 0.7), 3.0);
    }

    #[test]
    fn three_keyframes_take_a_third_each() {
        let mut fake = Fake::default().with(".pulse", 1);
        let spec = TimelineSpec::named("pulse").then(
            Step::new(".pulse")
                .keyframes(Property::Scale, &[1.0, 1.5, 1.0])
                .duration(300.0)
                .easing(Easing::Linear),
        );
        let mut engine = TimelineEngine::new();
        engine.run(&spec, &mut fake, 0.0);
        let mut at = |t: f64| {
            engine.tick(&mut fake, t);
            fake.get(".pulse", 0, Property::Scale)
        };
        // first third moves from the unwritten 1.0 to the first key
        assert_eq!(at(50.0), Some(1.0));
        assert_eq!(at(150.0), Some(1.25));
        assert_eq!(at(300.0), Some(1.0));
    }

    #[test]
    fn relative_tweens_start_from_current_value() {
        let mut fake = Fake::default().with(".logo", 1);
        fake.apply(Fake::id(".logo", 0), Property::Rotate, 90.0);
        let spec = TimelineSpec::named("spin")
            .then(Step::new(".logo").by(Property::Rotate, 360.0).duration(100.0).easing(Easing::Linear));
        let mut engine = TimelineEngine::new();
        engine.run(&spec, &mut fake, 0.0);
        engine.tick(&mut fake, 50.0);
        assert_eq!(fake.get(".logo", 0, Property::Rotate), Some(270.0));
        engine.tick(&mut fake, 100.0);
        assert_eq!(fake.get(".logo", 0, Property::Rotate), Some(450.0));
    }

    #[test]
    fn to_tween_defaults_when_unwritten() {
        let mut fake = Fake::default().with(".orb", 1);
        let spec = TimelineSpec::named("hover")
            .then(Step::new(".orb").to(Property::Scale, 1.2).duration(300.0).easing(Easing::Linear));
        let mut engine = TimelineEngine::new();
        engine.run(&spec, &mut fake, 0.0);
        engine.tick(&mut fake, 150.0);
        let v = fake.get(".orb", 0, Property::Scale).unwrap_or_default();
        assert!((v - 1.1).abs() < 1e-5);
    }

    #[test]
    fn cancel_leaves_last_applied_value() {
        let mut fake = Fake::default().with(".x", 1);
        let spec = TimelineSpec::named("t")
            .then(Step::new(".x").from_to(Property::TranslateY, 0.0, 100.0).duration(1000.0).easing(Easing::Linear));
        let mut engine = TimelineEngine::new();
        let h = engine.run(&spec, &mut fake, 0.0);
        engine.tick(&mut fake, 250.0);
        assert!(engine.cancel(h));
        assert!(!engine.cancel(h));
        engine.tick(&mut fake, 900.0);
        assert_eq!(fake.get(".x", 0, Property::TranslateY), Some(25.0));
    }

    #[test]
    fn tweens_apply_only_once_started() {
        let mut fake = Fake::default().with(".late", 1);
        let spec = TimelineSpec::named("t")
            .at(500.0, Step::new(".late").from_to(Property::Opacity, 0.0, 1.0).duration(100.0));
        let mut engine = TimelineEngine::new();
        engine.run(&spec, &mut fake, 1000.0);
        engine.tick(&mut fake, 1400.0);
        assert_eq!(fake.get(".late", 0, Property::Opacity), None);
        engine.tick(&mut fake, 1500.0);
        assert_eq!(fake.get(".late", 0, Property::Opacity), Some(0.0));
    }

    #[test]
    fn list_targets_are_deduplicated_in_order() {
        let mut fake = Fake::default().with("#top", 1).with("#bottom", 1);
        let t = Target::List(vec!["#top".into(), "#bottom".into(), "#top".into()]);
        let els = resolve_target(&mut fake, &t);
        assert_eq!(els, vec![Fake::id("#top", 0), Fake::id("#bottom", 0)]);
    }
}
