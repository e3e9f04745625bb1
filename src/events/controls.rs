use crate::carousel_view::sync_indicators;
use crate::constants::{
    CAROUSEL_INDEX_ATTR, CAROUSEL_INDEX_SELECTOR, CAROUSEL_NEXT_SELECTOR, CAROUSEL_PREV_SELECTOR,
    FOCUS_SELECTOR, HOVER_INNER_SELECTOR, HOVER_SELECTOR, MODAL_CLOSE_SELECTOR,
    MODAL_OPEN_SELECTOR,
};
use crate::dom::{self, Listener};
use crate::stage::Stage;
use stage_core::carousel::CarouselController;
use stage_core::entrance;
use stage_core::reaction::{default_easter_egg, TRIGGER_EVENT};
use stage_core::timeline::{Target, TimelineSpec};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_modal(document: &web::Document, stage: &Rc<RefCell<Stage>>) -> Vec<Listener> {
    let s = stage.clone();
    let mut out = dom::on_each(document, MODAL_OPEN_SELECTOR, "click", move |_, _| {
        if !s.borrow_mut().open_modal() {
            log::debug!("[modal] open ignored");
        }
    });
    let s = stage.clone();
    out.extend(dom::on_each(document, MODAL_CLOSE_SELECTOR, "click", move |_, _| {
        if !s.borrow_mut().close_modal() {
            log::debug!("[modal] close ignored");
        }
    }));
    out
}

/// Indicator, previous and next buttons.
pub fn wire_carousel(document: &web::Document, carousel: Rc<RefCell<CarouselController>>) -> Vec<Listener> {
    fn after(document: &web::Document, carousel: &Rc<RefCell<CarouselController>>, f: impl FnOnce(&mut CarouselController, f64)) {
        let focused = {
            let mut c = carousel.borrow_mut();
            f(&mut *c, instant::now());
            c.focused()
        };
        sync_indicators(document, focused);
    }

    let (doc, c) = (document.clone(), carousel.clone());
    let mut out = dom::on_each(document, CAROUSEL_INDEX_SELECTOR, "click", move |el, _| {
        let Some(index) = el
            .get_attribute(CAROUSEL_INDEX_ATTR)
            .and_then(|v| v.parse::<usize>().ok())
        else {
            return;
        };
        after(&doc, &c, |c, now| c.select(index, now));
    });
    let (doc, c) = (document.clone(), carousel.clone());
    out.extend(dom::on_each(document, CAROUSEL_PREV_SELECTOR, "click", move |_, _| {
        after(&doc, &c, |c, now| c.previous(now));
    }));
    let doc = document.clone();
    out.extend(dom::on_each(document, CAROUSEL_NEXT_SELECTOR, "click", move |_, _| {
        after(&doc, &carousel, |c, now| c.next(now));
    }));
    out
}

/// Listens on elements matching `selector` and tweens `inner` inside the
/// matched element when it has one, else the element itself.
fn feedback_pair(
    document: &web::Document,
    stage: &Rc<RefCell<Stage>>,
    selector: &str,
    inner: Option<&'static str>,
    events: [(&'static str, fn(Target) -> TimelineSpec); 2],
) -> Vec<Listener> {
    events
        .into_iter()
        .flat_map(|(event, build)| {
            let s = stage.clone();
            dom::on_each(document, selector, event, move |el, _| {
                let target = inner
                    .and_then(|sel| el.query_selector(sel).ok().flatten())
                    .unwrap_or_else(|| el.clone());
                let mut stage = s.borrow_mut();
                let Some(r) = stage.resolver_mut().element_ref(&target) else {
                    return;
                };
                stage.run_feedback(r, &build(Target::Element(r)));
            })
        })
        .collect()
}

/// Scale feedback on skill orbs and form inputs.
pub fn wire_feedback(document: &web::Document, stage: &Rc<RefCell<Stage>>) -> Vec<Listener> {
    let mut out = feedback_pair(
        document,
        stage,
        HOVER_SELECTOR,
        Some(HOVER_INNER_SELECTOR),
        [("mouseenter", entrance::hover_enter), ("mouseleave", entrance::hover_leave)],
    );
    out.extend(feedback_pair(
        document,
        stage,
        FOCUS_SELECTOR,
        None,
        [("focus", entrance::focus), ("blur", entrance::blur)],
    ));
    out
}

/// Every dispatch of the trigger event plays its own reaction.
pub fn wire_trigger(stage: &Rc<RefCell<Stage>>) -> Option<Listener> {
    let s = stage.clone();
    dom::window_listener(TRIGGER_EVENT, move |_| {
        log::info!("[stage] {TRIGGER_EVENT}");
        s.borrow_mut().run(&default_easter_egg());
    })
}
