use crate::constants::{DEFAULT_SHOWN_DISPLAY, ELEMENT_DISPLAY_ATTR, ELEMENT_ID_ATTR};
use crate::dom;
use crate::style::{compose_transform, visibility_css, TransformParts};
use fnv::FnvHashMap;
use stage_core::timeline::{ElementRef, Property, Target, TargetResolver};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Resolves selectors against the live document and writes animated values
/// into inline styles.
///
/// Elements get a numeric identity stored in a data attribute the first time
/// they are matched, so the same node maps to the same [`ElementRef`] across
/// timelines.
pub struct DomResolver {
    document: web::Document,
    elements: FnvHashMap<ElementRef, web::HtmlElement>,
    values: FnvHashMap<(ElementRef, Property), f32>,
    next_id: u64,
}

impl DomResolver {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            elements: FnvHashMap::default(),
            values: FnvHashMap::default(),
            next_id: 1,
        }
    }

    /// Identity for a concrete element, registering it if needed.
    pub fn element_ref(&mut self, el: &web::Element) -> Option<ElementRef> {
        let html = el.clone().dyn_into::<web::HtmlElement>().ok()?;
        if let Some(id) = el
            .get_attribute(ELEMENT_ID_ATTR)
            .and_then(|v| v.parse::<u64>().ok())
        {
            let r = ElementRef(id);
            self.elements.entry(r).or_insert(html);
            return Some(r);
        }
        let r = ElementRef(self.next_id);
        self.next_id += 1;
        _ = el.set_attribute(ELEMENT_ID_ATTR, &r.0.to_string());
        self.elements.insert(r, html);
        Some(r)
    }

    /// Forget nodes that left the document.
    pub fn prune(&mut self) {
        let before = self.elements.len();
        self.elements.retain(|_, el| el.is_connected());
        if self.elements.len() != before {
            let live = &self.elements;
            self.values.retain(|(r, _), _| live.contains_key(r));
        }
    }

    fn transform_of(&self, r: ElementRef) -> TransformParts {
        let get = |p: Property| self.values.get(&(r, p)).copied();
        let d = TransformParts::default();
        TransformParts {
            translate_x: get(Property::TranslateX).unwrap_or(d.translate_x),
            translate_y: get(Property::TranslateY).unwrap_or(d.translate_y),
            slide_x_pct: get(Property::SlideX).unwrap_or(d.slide_x_pct),
            scale: get(Property::Scale).unwrap_or(d.scale),
            scale_x: get(Property::ScaleX).unwrap_or(d.scale_x),
            rotate_deg: get(Property::Rotate).unwrap_or(d.rotate_deg),
            rotate_x_deg: get(Property::RotateX).unwrap_or(d.rotate_x_deg),
        }
    }
}

impl TargetResolver for DomResolver {
    fn resolve(&mut self, target: &Target) -> Vec<ElementRef> {
        match target {
            Target::Selector(sel) => dom::query_all(&self.document, sel)
                .iter()
                .filter_map(|el| self.element_ref(el))
                .collect(),
            Target::Element(r) => match self.elements.get(r) {
                Some(el) if el.is_connected() => vec![*r],
                _ => Vec::new(),
            },
            Target::List(_) => Vec::new(),
        }
    }

    fn read(&self, element: ElementRef, property: Property) -> Option<f32> {
        self.values.get(&(element, property)).copied()
    }

    fn apply(&mut self, element: ElementRef, property: Property, value: f32) {
        self.values.insert((element, property), value);
        let Some(el) = self.elements.get(&element) else {
            return;
        };
        let style = el.style();
        let res = match property {
            Property::Opacity => style.set_property("opacity", &value.to_string()),
            Property::Height => style.set_property("height", &format!("{value}px")),
            Property::Visible => {
                let shown = el
                    .get_attribute(ELEMENT_DISPLAY_ATTR)
                    .unwrap_or_else(|| DEFAULT_SHOWN_DISPLAY.to_string());
                let (display, pointer) = visibility_css(value, &shown);
                style
                    .set_property("display", display)
                    .and_then(|_| style.set_property("pointer-events", pointer))
            }
            Property::TranslateX
            | Property::TranslateY
            | Property::SlideX
            | Property::Scale
            | Property::ScaleX
            | Property::Rotate
            | Property::RotateX => {
                style.set_property("transform", &compose_transform(&self.transform_of(element)))
            }
        };
        if let Err(e) = res {
            log::warn!("[targets] style write failed: {e:?}");
        }
    }
}
