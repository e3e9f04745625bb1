//! Ring of project cards with a focused index, timed auto-advance and two
//! independent suppressors (pointer hover, post-selection cooldown).

use crate::camera::Camera;
use crate::color::hex_to_rgb;
use crate::constants::*;
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct CarouselItem {
    pub id: u32,
    pub title: String,
    /// 0xRRGGBB used for the glow card.
    pub accent: u32,
    /// Display content reference resolved by the host page.
    pub content: Option<String>,
}

impl CarouselItem {
    pub fn new(id: u32, title: impl Into<String>, accent: u32) -> Self {
        Self {
            id,
            title: title.into(),
            accent,
            content: None,
        }
    }
}

/// Tuning for a carousel instance.
///
/// - `radius`: ring radius in world units
/// - `auto_advance_ms`: interval between automatic `next()` steps
/// - `cooldown_ms`: auto-rotation pause after a manual selection
/// - `spin_step`: ring yaw per frame while auto-rotating
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselParams {
    pub radius: f32,
    pub auto_advance_ms: f64,
    pub cooldown_ms: f64,
    pub spin_step: f32,
}

impl Default for CarouselParams {
    fn default() -> Self {
        Self {
            radius: CAROUSEL_RADIUS,
            auto_advance_ms: AUTO_ADVANCE_MS,
            cooldown_ms: SELECT_COOLDOWN_MS,
            spin_step: CAROUSEL_SPIN_STEP,
        }
    }
}

/// World transforms of one item's card and glow for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPose {
    pub card: Mat4,
    pub glow: Mat4,
    pub accent: Vec3,
    pub focused: bool,
}

#[derive(Debug)]
pub struct CarouselController {
    items: Vec<CarouselItem>,
    params: CarouselParams,
    focused: usize,
    hovered: bool,
    cooldown_until: Option<f64>,
    next_advance_at: Option<f64>,
    ring_yaw: f32,
    camera: Camera,
}

impl CarouselController {
    pub fn new(items: Vec<CarouselItem>, params: CarouselParams) -> Self {
        log::debug!("[carousel] {} items", items.len());
        Self {
            items,
            params,
            focused: 0,
            hovered: false,
            cooldown_until: None,
            next_advance_at: None,
            ring_yaw: 0.0,
            camera: Camera::new(Vec3::new(0.0, 0.0, CAROUSEL_CAMERA_Z), 1.0),
        }
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn ring_yaw(&self) -> f32 {
        self.ring_yaw
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn cooldown_until(&self) -> Option<f64> {
        self.cooldown_until
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// True when neither the hover nor the cooldown suppressor is active.
    pub fn is_auto_rotating(&self, now_ms: f64) -> bool {
        !self.hovered && self.cooldown_until.map_or(true, |t| now_ms >= t)
    }

    /// Focus `index` (wrapping) and pause auto-rotation; the new cooldown
    /// replaces any pending one.
    pub fn select(&mut self, index: usize, now_ms: f64) {
        if self.items.is_empty() {
            return;
        }
        self.focused = index % self.items.len();
        self.cooldown_until = Some(now_ms + self.params.cooldown_ms);
        self.next_advance_at = None;
        log::debug!("[carousel] select {}", self.focused);
    }

    pub fn next(&mut self, now_ms: f64) {
        self.select(self.focused + 1, now_ms);
    }

    pub fn previous(&mut self, now_ms: f64) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        self.select(self.focused + n - 1, now_ms);
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Advance one frame: handle the auto-advance clock and spin the ring.
    /// Returns the newly focused index when auto-advance stepped.
    pub fn tick(&mut self, now_ms: f64) -> Option<usize> {
        if self.cooldown_until.is_some_and(|t| now_ms >= t) {
            self.cooldown_until = None;
        }
        if !self.is_auto_rotating(now_ms) {
            self.next_advance_at = None;
            return None;
        }
        self.ring_yaw += self.params.spin_step;
        let Some(due) = self.next_advance_at else {
            // Resumed (or first frame): the interval starts now.
            self.next_advance_at = Some(now_ms + self.params.auto_advance_ms);
            return None;
        };
        if now_ms < due || self.items.is_empty() {
            return None;
        }
        self.focused = (self.focused + 1) % self.items.len();
        self.next_advance_at = Some(due + self.params.auto_advance_ms);
        Some(self.focused)
    }

    /// Ring-local placement of item `index`: position and yaw.
    pub fn slot(&self, index: usize) -> (Vec3, f32) {
        let n = self.items.len().max(1) as f32;
        let angle = index as f32 / n * TAU;
        let r = self.params.radius;
        (Vec3::new(angle.cos() * r, 0.0, angle.sin() * r), -angle)
    }

    pub fn poses(&self) -> Vec<CardPose> {
        let ring = Mat4::from_rotation_y(self.ring_yaw);
        let card_size = Vec3::new(CARD_SIZE[0], CARD_SIZE[1], 1.0);
        let glow_size = Vec3::new(GLOW_SIZE[0], GLOW_SIZE[1], 1.0);
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let (pos, yaw) = self.slot(i);
                let focused = i == self.focused;
                let (scale, lift) = if focused { (FOCUS_SCALE, FOCUS_LIFT) } else { (1.0, 0.0) };
                let rot = Quat::from_rotation_y(yaw);
                let card = Mat4::from_scale_rotation_translation(card_size * scale, rot, pos + Vec3::Y * lift);
                let glow_pos = pos - Vec3::Z * GLOW_DEPTH_OFFSET;
                let glow = Mat4::from_scale_rotation_translation(glow_size, rot, glow_pos);
                CardPose {
                    card: ring * card,
                    glow: ring * glow,
                    accent: hex_to_rgb(item.accent),
                    focused,
                }
            })
            .collect()
    }
}
