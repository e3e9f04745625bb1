#![allow(dead_code)]

use fnv::FnvHashMap;
use stage_core::timeline::{ElementRef, Property, Target, TargetResolver};

/// In-memory stand-in for a document: selectors map to fixed element lists
/// and applied values are recorded per element and property.
#[derive(Default)]
pub struct Page {
    selectors: FnvHashMap<String, Vec<ElementRef>>,
    pub values: FnvHashMap<(ElementRef, Property), f32>,
    pub writes: usize,
    next: u64,
}

impl Page {
    pub fn new() -> Self {
        Self {
            next: 1,
            ..Default::default()
        }
    }

    /// Register `n` elements under `selector` and return them.
    pub fn add(&mut self, selector: &str, n: usize) -> Vec<ElementRef> {
        let els: Vec<_> = (0..n)
            .map(|_| {
                let r = ElementRef(self.next);
                self.next += 1;
                r
            })
            .collect();
        self.selectors
            .entry(selector.to_string())
            .or_default()
            .extend(els.iter().copied());
        els
    }

    pub fn with(mut self, selector: &str, n: usize) -> Self {
        self.add(selector, n);
        self
    }

    pub fn first(&self, selector: &str) -> ElementRef {
        self.selectors[selector][0]
    }

    pub fn value(&self, selector: &str, property: Property) -> Option<f32> {
        self.values.get(&(self.first(selector), property)).copied()
    }
}

impl TargetResolver for Page {
    fn resolve(&mut self, target: &Target) -> Vec<ElementRef> {
        match target {
            Target::Selector(s) => self.selectors.get(s.as_ref()).cloned().unwrap_or_default(),
            Target::Element(e) => vec![*e],
            Target::List(_) => Vec::new(),
        }
    }

    fn read(&self, element: ElementRef, property: Property) -> Option<f32> {
        self.values.get(&(element, property)).copied()
    }

    fn apply(&mut self, element: ElementRef, property: Property, value: f32) {
        self.writes += 1;
        self.values.insert((element, property), value);
    }
}

/// Drive `engine` from `from_ms` to `to_ms` in 16 ms frames, calling
/// `each` after every tick.
pub fn frames(from_ms: f64, to_ms: f64, mut each: impl FnMut(f64)) {
    let mut t = from_ms;
    while t <= to_ms {
        each(t);
        t += 16.0;
    }
}
