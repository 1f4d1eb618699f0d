use glam::{Vec2, Vec3};

/// RGBA colour, components in [0, 1]
pub type Color = [f32; 4];

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Unit cube centred on the origin
    pub const UNIT_CUBE: Self = Self::new(Vec3::splat(-0.5), Vec3::splat(0.5));

    /// Unit square on the XZ plane with zero height
    pub const UNIT_PLANE: Self = Self::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 0.0, 0.5));

    /// Inverted on at least one axis; such a box never intersects anything.
    pub fn is_inverted(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Local box scaled component-wise and moved to `position`. Rotation is not applied.
    pub fn to_world(&self, position: Vec3, scale: Vec3) -> Self {
        Self {
            min: position + self.min * scale,
            max: position + self.max * scale,
        }
    }
}

/// Screen-space rectangle, origin top-left, y grows downwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Edges are inclusive
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}
