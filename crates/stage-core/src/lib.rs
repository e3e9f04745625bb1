pub mod camera;
pub mod carousel;
pub mod color;
pub mod constants;
pub mod draw;
pub mod driver;
pub mod easing;
pub mod entrance;
pub mod input;
pub mod mesh;
pub mod modal;
pub mod reaction;
pub mod scene;
pub mod timeline;
pub mod trail;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::Camera;
pub use carousel::{CarouselController, CarouselItem, CarouselParams};
pub use driver::{FrameSink, LoopState, RenderLoop, SurfaceLost};
pub use easing::Easing;
pub use input::InputState;
pub use modal::{ModalScroll, ModalState};
pub use scene::{build, build_scene, Scene, SceneParams};
pub use timeline::{
    ElementRef, Offset, Property, Step, Target, TargetResolver, TimelineEngine, TimelineHandle,
    TimelineSpec,
};
