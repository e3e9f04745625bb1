use glam::Vec2;
use stage_core::driver::{rotation_after, rotation_step, FrameSink, RenderLoop, SurfaceLost};
use stage_core::input::InputState;
use stage_core::scene::{build_scene, Scene, SceneParams};

#[derive(Default)]
struct Recorder {
    draws: usize,
    lost_at: Option<usize>,
}

impl FrameSink for Recorder {
    fn draw(&mut self, _scene: &Scene) -> Result<(), SurfaceLost> {
        if self.lost_at == Some(self.draws) {
            return Err(SurfaceLost);
        }
        self.draws += 1;
        Ok(())
    }
}

fn scene() -> Scene {
    build_scene(&SceneParams {
        object_count: 15,
        particle_count: 100,
        seed: Some(7),
    })
}

#[test]
fn rotations_follow_closed_form_over_many_frames() {
    let mut s = scene();
    let bases: Vec<_> = s.objects.iter().map(|o| o.base_rotation).collect();
    let mut lp = RenderLoop::new();
    lp.start();
    let mut sink = Recorder::default();
    let input = InputState::default();
    let n = 600u64;
    for f in 0..n {
        assert!(lp.frame(&mut s, &input, f as f64 * 16.0, &mut sink));
    }
    assert_eq!(lp.frames(), n);
    assert_eq!(sink.draws, n as usize);
    for (i, obj) in s.objects.iter().enumerate() {
        let expected = bases[i].x + rotation_step(i) * n as f32;
        assert!((obj.rotation.x - expected).abs() < 1e-3, "object {i}");
        assert_eq!(obj.rotation, rotation_after(bases[i], i, n));
        assert_eq!(obj.rotation.z, bases[i].z);
    }
}

#[test]
fn bob_does_not_accumulate() {
    let mut s = scene();
    let base_y: Vec<_> = s.objects.iter().map(|o| o.base_position.y).collect();
    let mut lp = RenderLoop::new();
    lp.start();
    let mut sink = Recorder::default();
    for f in 0..1000 {
        lp.frame(&mut s, &InputState::default(), f as f64 * 16.0, &mut sink);
    }
    for (i, obj) in s.objects.iter().enumerate() {
        assert!((obj.position.y - base_y[i]).abs() <= 0.5 + 1e-4);
    }
}

#[test]
fn camera_eases_toward_pointer() {
    let mut s = scene();
    let mut lp = RenderLoop::new();
    lp.start();
    let mut sink = Recorder::default();
    let input = InputState {
        pointer: Vec2::new(1.0, -1.0),
        ..Default::default()
    };
    lp.frame(&mut s, &input, 0.0, &mut sink);
    let after_one = s.camera.eye.x;
    assert!(after_one > 0.0 && after_one < 5.0);
    for f in 1..400 {
        lp.frame(&mut s, &input, f as f64 * 16.0, &mut sink);
    }
    assert!((s.camera.eye.x - 5.0).abs() < 1e-2);
    assert!((s.camera.eye.y + 5.0).abs() < 1e-2);
}

#[test]
fn scroll_moves_camera_back_and_tilts() {
    let mut s = scene();
    let mut lp = RenderLoop::new();
    lp.start();
    let mut input = InputState::default();
    input.set_scroll(1000.0);
    lp.frame(&mut s, &input, 0.0, &mut Recorder::default());
    assert!((s.camera.eye.z - 60.0).abs() < 1e-4);
    assert!((s.camera.pitch - 0.1).abs() < 1e-6);
}

#[test]
fn lost_surface_stops_the_loop() {
    let mut s = scene();
    let mut lp = RenderLoop::new();
    lp.start();
    let mut sink = Recorder {
        draws: 0,
        lost_at: Some(3),
    };
    let input = InputState::default();
    let mut drawn = 0;
    while lp.frame(&mut s, &input, 0.0, &mut sink) {
        drawn += 1;
    }
    assert_eq!(drawn, 3);
    assert!(!lp.is_running());
    let frames = lp.frames();
    assert!(!lp.frame(&mut s, &input, 16.0, &mut sink));
    assert_eq!(lp.frames(), frames);
}

#[test]
fn stop_twice_and_restart() {
    let mut lp = RenderLoop::new();
    assert!(!lp.stop());
    assert!(lp.start());
    assert!(lp.stop());
    assert!(!lp.stop());
    assert!(lp.start());
    assert!(lp.is_running());
}

#[test]
fn healthy_surface_draws_until_stopped() {
    let mut s = scene();
    let mut lp = RenderLoop::new();
    lp.start();
    let mut sink = Recorder::default();
    let input = InputState::default();
    for f in 0..1000u64 {
        assert!(lp.frame(&mut s, &input, f as f64 * 16.0, &mut sink));
    }
    assert_eq!(sink.draws, 1000);

    assert!(lp.stop());
    assert!(!lp.frame(&mut s, &input, 16_000.0, &mut sink));
    assert_eq!(sink.draws, 1000);
}
