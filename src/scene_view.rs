use crate::dom::Listener;
use crate::frame::AnimationLoop;
use crate::render::GpuState;
use crate::surface::{follow_window, Surface};
use stage_core::draw::{cloud_vertices, scene_into, DrawList};
use stage_core::driver::{FrameSink, RenderLoop, SurfaceLost};
use stage_core::input::InputState;
use stage_core::scene::{build_scene, Scene, SceneParams};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Turns draw errors into the loop's "stop quietly" signal.
pub(crate) struct GpuSink<'a> {
    pub gpu: &'a mut GpuState,
    pub list: &'a mut DrawList,
    pub canvas: &'a web::HtmlCanvasElement,
}

impl GpuSink<'_> {
    pub fn present(&mut self) -> Result<(), SurfaceLost> {
        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        match self.gpu.render(self.list) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Timeout) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                Ok(())
            }
            Err(e) => {
                log::error!("render error: {:?}", e);
                Err(SurfaceLost)
            }
        }
    }
}

impl FrameSink for GpuSink<'_> {
    fn draw(&mut self, scene: &Scene) -> Result<(), SurfaceLost> {
        scene_into(scene, self.list);
        self.present()
    }
}

struct SceneState {
    scene: Scene,
    driver: RenderLoop,
    gpu: GpuState,
    list: DrawList,
    canvas: web::HtmlCanvasElement,
}

/// The full-page background: floating shapes, particles and grid.
pub struct SceneView {
    surface: Rc<Surface>,
    state: Rc<RefCell<SceneState>>,
    frame_loop: Option<AnimationLoop>,
    resize: Option<Listener>,
}

impl SceneView {
    pub async fn mount(
        container: Option<web::Element>,
        input: Rc<RefCell<InputState>>,
    ) -> anyhow::Result<Option<Self>> {
        let Some(surface) = Surface::attach(container, false) else {
            return Ok(None);
        };
        let surface = Rc::new(surface);
        let canvas = surface.canvas().clone();
        let mut gpu = GpuState::new(&canvas).await?;
        let mut scene = build_scene(&SceneParams::default());
        scene.camera.set_viewport(canvas.width(), canvas.height());
        gpu.set_cloud(&cloud_vertices(&scene));
        gpu.set_grid(&scene.grid);

        let mut driver = RenderLoop::new();
        driver.start();
        let state = Rc::new(RefCell::new(SceneState {
            scene,
            driver,
            gpu,
            list: DrawList::default(),
            canvas,
        }));

        let st = state.clone();
        let frame_loop = AnimationLoop::start("scene", move |now_ms| {
            let snapshot = *input.borrow();
            let mut guard = st.borrow_mut();
            let SceneState {
                scene,
                driver,
                gpu,
                list,
                canvas,
            } = &mut *guard;
            scene.camera.set_viewport(canvas.width(), canvas.height());
            let mut sink = GpuSink { gpu, list, canvas };
            driver.frame(scene, &snapshot, now_ms, &mut sink);
            driver.is_running()
        });

        Ok(Some(Self {
            resize: follow_window(&surface),
            surface,
            state,
            frame_loop: Some(frame_loop),
        }))
    }

    /// Stop the loop, then remove the canvas. Safe to repeat.
    pub fn unmount(&mut self) {
        self.state.borrow_mut().driver.stop();
        if let Some(mut l) = self.frame_loop.take() {
            l.stop();
        }
        self.resize = None;
        self.surface.detach();
    }
}

impl Drop for SceneView {
    fn drop(&mut self) {
        self.unmount();
    }
}
