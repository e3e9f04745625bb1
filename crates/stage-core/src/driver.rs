//! Per-frame driver for the background scene.
//!
//! The driver owns only its run state and a frame counter. Object rotations
//! and the particle yaw are computed in closed form from the counter so long
//! sessions never drift, while the camera follows the pointer through
//! exponential smoothing (inherently stateful).

use crate::constants::*;
use crate::input::InputState;
use crate::scene::Scene;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Returned by a [`FrameSink`] when its surface went away between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("drawing surface is no longer available")]
pub struct SurfaceLost;

/// Whatever turns a mutated scene into pixels.
pub trait FrameSink {
    fn draw(&mut self, scene: &Scene) -> Result<(), SurfaceLost>;
}

#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    frames: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Stopped,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames advanced since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns true if this call changed the state.
    pub fn start(&mut self) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        log::info!("[loop] started at frame {}", self.frames);
        true
    }

    /// Returns true if this call changed the state; repeated calls are no-ops.
    pub fn stop(&mut self) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }
        self.state = LoopState::Stopped;
        log::info!("[loop] stopped after {} frames", self.frames);
        true
    }

    /// Advance the scene one frame and draw it.
    ///
    /// Returns false when the loop is stopped (nothing happens) or when the
    /// sink reported a lost surface, in which case the loop stops itself.
    pub fn frame<S: FrameSink + ?Sized>(
        &mut self,
        scene: &mut Scene,
        input: &InputState,
        now_ms: f64,
        sink: &mut S,
    ) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.frames += 1;
        advance(scene, input, self.frames, now_ms);
        match sink.draw(scene) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[loop] {e}; stopping");
                self.stop();
                false
            }
        }
    }
}

/// Per-frame rotation increment for the object at `index`.
#[inline]
pub fn rotation_step(index: usize) -> f32 {
    ROTATION_STEP + index as f32 * ROTATION_STEP_PER_INDEX
}

/// Closed-form rotation of object `index` after `frames` advances.
#[inline]
pub fn rotation_after(base: Vec3, index: usize, frames: u64) -> Vec3 {
    let turn = rotation_step(index) as f64 * frames as f64;
    Vec3::new(
        (base.x as f64 + turn) as f32,
        (base.y as f64 + turn) as f32,
        base.z,
    )
}

#[inline]
pub fn bob_offset(index: usize, now_ms: f64) -> f32 {
    (BOB_AMPLITUDE as f64 * (now_ms * BOB_RATE_PER_MS + index as f64).sin()) as f32
}

/// Camera XY target for a normalized pointer.
#[inline]
pub fn pointer_target(pointer: Vec2) -> Vec2 {
    pointer * CAMERA_POINTER_RANGE
}

/// Apply one frame of motion: objects, particles, then camera.
pub fn advance(scene: &mut Scene, input: &InputState, frame: u64, now_ms: f64) {
    for (i, obj) in scene.objects.iter_mut().enumerate() {
        obj.rotation = rotation_after(obj.base_rotation, i, frame);
        obj.position = obj.base_position + Vec3::Y * bob_offset(i, now_ms);
    }

    scene.particles.yaw = (PARTICLE_SPIN_STEP as f64 * frame as f64) as f32;

    let cam = &mut scene.camera;
    cam.eye.z = CAMERA_BASE_Z + input.scroll_y * CAMERA_SCROLL_Z;
    cam.pitch = input.scroll_y * CAMERA_SCROLL_PITCH;

    let target = pointer_target(input.pointer);
    cam.eye.x += (target.x - cam.eye.x) * CAMERA_SMOOTHING;
    cam.eye.y += (target.y - cam.eye.y) * CAMERA_SMOOTHING;
    cam.target = Vec3::ZERO;
}
