// Page wiring and presentation constants for the browser front-end.
// Selectors and ids are the contract with the host page; motion tuning lives
// in `stage_core::constants`.

// Mount points
pub const SCENE_ROOT_ID: &str = "scene-root";
pub const CAROUSEL_ROOT_ID: &str = "carousel-root";

// Click and hover wiring
pub const MODAL_OPEN_SELECTOR: &str = "[data-modal-open]";
pub const MODAL_CLOSE_SELECTOR: &str = "[data-modal-close]";
pub const CAROUSEL_INDEX_SELECTOR: &str = "[data-carousel-index]";
pub const CAROUSEL_INDEX_ATTR: &str = "data-carousel-index";
pub const CAROUSEL_PREV_SELECTOR: &str = "[data-carousel-prev]";
pub const CAROUSEL_NEXT_SELECTOR: &str = "[data-carousel-next]";
pub const CAROUSEL_ITEM_SELECTOR: &str = "[data-carousel-item]";
pub const CAROUSEL_ACCENT_ATTR: &str = "data-accent";
pub const CAROUSEL_TITLE_ATTR: &str = "data-title";
pub const HOVER_SELECTOR: &str = ".skill-orb";
// Hover scales this child of the hovered orb, falling back to the orb itself
pub const HOVER_INNER_SELECTOR: &str = ".skill-orb-inner";
pub const FOCUS_SELECTOR: &str = ".neon-input";

// Attribute used to give DOM nodes a stable animation identity
pub const ELEMENT_ID_ATTR: &str = "data-stage-id";
// Display written when an element is shown; overridable per element
pub const ELEMENT_DISPLAY_ATTR: &str = "data-stage-display";
pub const DEFAULT_SHOWN_DISPLAY: &str = "flex";

// Canvas presentation
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0]; // transparent over page background
pub const TRAIL_CANVAS_CLASS: &str = "cursor-trail";
pub const TRAIL_Z_INDEX: i32 = 40;
pub const TRAIL_GLOW_BLUR_PX: f64 = 10.0;

// Carousel items used when the page does not declare its own
pub const FALLBACK_ACCENTS: [u32; 5] = [0xff0080, 0x00ffff, 0x00ff41, 0xff4000, 0x8000ff];
