// VIEW: Renderer hand-off
pub mod render;

pub use render::{CameraUniform, DrawCommand, RenderFrame, TransformUniform};
