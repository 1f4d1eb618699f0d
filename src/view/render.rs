use glam::Mat4;

use crate::model::{Camera, ObjectKey, Primitive, Scene};
use crate::utils::{Color, Rect};

/// One entry of the per-frame draw list handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled screen-space rectangle, pixels from the top-left corner
    Rect { rect: Rect, color: Color },
    Object { key: ObjectKey, primitive: Primitive, world: Mat4 },
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self { view_proj: camera.view_proj().to_cols_array_2d() }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub transform: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new(world: Mat4) -> Self {
        Self { transform: world.to_cols_array_2d() }
    }
}

/// Everything the renderer needs for one frame. Scene objects come first in
/// insertion order, UI rectangles after them in the order they were declared.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub view: Mat4,
    pub projection: Mat4,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    pub fn build(camera: &Camera, scene: &Scene, ui_commands: Vec<DrawCommand>) -> Self {
        let mut commands = Vec::with_capacity(scene.len() + ui_commands.len());
        commands.extend(scene.iter().map(|(key, obj)| DrawCommand::Object {
            key,
            primitive: obj.primitive,
            world: obj.world_matrix(),
        }));
        commands.extend(ui_commands);

        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            commands,
        }
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        CameraUniform { view_proj: (self.projection * self.view).to_cols_array_2d() }
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &Mat4)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Object { key, world, .. } => Some((*key, world)),
            DrawCommand::Rect { .. } => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { rect, color } => Some((rect, color)),
            DrawCommand::Object { .. } => None,
        })
    }
}
