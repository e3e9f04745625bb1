//! Cursor trail particles in CSS pixel space.

use crate::constants::*;
use glam::Vec2;
use rand::prelude::*;
use std::collections::VecDeque;

/// Gradient stops used when painting a particle: (offset, rgb, alpha scale).
pub const GRADIENT_STOPS: [(f32, [u8; 3], f32); 3] = [
    (0.0, [0, 255, 255], 0.8),
    (0.5, [255, 0, 128], 0.6),
    (1.0, [0, 255, 65], 0.2),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// 1 at spawn, removed at or below 0.
    pub life: f32,
}

impl TrailParticle {
    pub fn radius(&self) -> f32 {
        self.life * TRAIL_RADIUS_PX
    }
}

pub struct CursorTrail {
    particles: VecDeque<TrailParticle>,
    rng: StdRng,
}

impl Default for CursorTrail {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl CursorTrail {
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            particles: VecDeque::with_capacity(TRAIL_MAX_PARTICLES),
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> impl Iterator<Item = &TrailParticle> {
        self.particles.iter()
    }

    /// Emit a small burst at the pointer, dropping the oldest past the cap.
    pub fn spawn(&mut self, at: Vec2) {
        for _ in 0..TRAIL_SPAWN_PER_MOVE {
            let jitter = Vec2::new(self.rng.gen::<f32>() - 0.5, self.rng.gen::<f32>() - 0.5);
            let velocity = Vec2::new(self.rng.gen::<f32>() - 0.5, self.rng.gen::<f32>() - 0.5);
            self.particles.push_back(TrailParticle {
                position: at + jitter * TRAIL_JITTER_PX,
                velocity: velocity * TRAIL_MAX_SPEED,
                life: 1.0,
            });
        }
        while self.particles.len() > TRAIL_MAX_PARTICLES {
            self.particles.pop_front();
        }
    }

    /// One animation frame of motion and decay.
    pub fn step(&mut self) {
        for p in self.particles.iter_mut() {
            p.position += p.velocity;
            p.velocity *= TRAIL_DRAG;
            p.life -= TRAIL_LIFE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail() -> CursorTrail {
        CursorTrail::with_rng(StdRng::seed_from_u64(1))
    }

    #[test]
    fn spawns_near_pointer() {
        let mut t = trail();
        t.spawn(Vec2::new(100.0, 100.0));
        assert_eq!(t.len(), TRAIL_SPAWN_PER_MOVE);
        for p in t.particles() {
            assert!((p.position - Vec2::new(100.0, 100.0)).abs().max_element() <= TRAIL_JITTER_PX / 2.0);
            assert!(p.velocity.abs().max_element() <= TRAIL_MAX_SPEED / 2.0);
        }
    }

    #[test]
    fn cap_drops_oldest() {
        let mut t = trail();
        for i in 0..100 {
            t.spawn(Vec2::new(i as f32 * 1000.0, 0.0));
        }
        assert_eq!(t.len(), TRAIL_MAX_PARTICLES);
        let first = t.particles().next().map(|p| p.position.x).unwrap_or_default();
        assert!(first > 30_000.0);
    }

    #[test]
    fn particles_die_after_fifty_frames() {
        let mut t = trail();
        t.spawn(Vec2::ZERO);
        for _ in 0..49 {
            t.step();
        }
        assert_eq!(t.len(), TRAIL_SPAWN_PER_MOVE);
        t.step();
        t.step();
        assert!(t.is_empty());
    }
}
