use glam::{Mat4, Vec3};

use crate::utils::BoundingBox;

/// Arena handle into a [`Scene`](super::Scene). Objects are never removed
/// while the scene lives, so a key stays valid for the scene's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(pub(crate) usize);

impl ObjectKey {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Shapes the primitive factory can build. Mesh data lives with the renderer;
/// the core only needs bounds and physical defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Cube,
    /// Rendered as a cube until a sphere mesh exists; uses cube bounds
    Sphere,
    Plane,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Cube => "Cube",
            Primitive::Sphere => "Sphere",
            Primitive::Plane => "Plane",
        }
    }

    pub fn bounds(self) -> BoundingBox {
        match self {
            Primitive::Cube | Primitive::Sphere => BoundingBox::UNIT_CUBE,
            Primitive::Plane => BoundingBox::UNIT_PLANE,
        }
    }

    /// Planes are immovable
    pub fn mass(self) -> f32 {
        match self {
            Primitive::Plane => 0.0,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: String,
    pub primitive: Primitive,

    pub position: Vec3,
    /// Euler angles in radians, applied Z then Y then X
    pub rotation: Vec3,
    pub scale: Vec3,

    pub velocity: Vec3,
    /// Radians per second per axis
    pub angular_velocity: Vec3,
    pub is_kinematic: bool,
    pub is_grounded: bool,
    /// 0 means immovable
    pub mass: f32,
    /// Local-space, pre-scale bounds
    pub bounds: BoundingBox,
}

impl SceneObject {
    pub fn new(id: impl Into<String>, primitive: Primitive, position: Vec3) -> Self {
        let mass = primitive.mass();
        Self {
            id: id.into(),
            primitive,
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            is_kinematic: mass == 0.0,
            is_grounded: false,
            mass,
            bounds: primitive.bounds(),
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_kinematic(mut self, kinematic: bool) -> Self {
        self.is_kinematic = kinematic;
        self
    }

    /// Zero linear and angular velocity
    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    /// World-space y of the lowest point of the (unrotated) bounds
    pub fn lowest_point_y(&self) -> f32 {
        self.position.y + self.scale.y * self.bounds.min.y
    }

    /// Bounds used for picking; rotation is ignored.
    pub fn world_bounds(&self) -> BoundingBox {
        self.bounds.to_world(self.position, self.scale)
    }

    /// translate * rotZ * rotY * rotX * scale
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_scale(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planes_start_kinematic_and_immovable() {
        let plane = SceneObject::new("Plane_0", Primitive::Plane, Vec3::ZERO);
        assert!(plane.is_kinematic);
        assert_eq!(plane.mass, 0.0);

        let cube = SceneObject::new("Cube_1", Primitive::Cube, Vec3::ZERO);
        assert!(!cube.is_kinematic);
        assert_eq!(cube.mass, 1.0);
    }

    #[test]
    fn lowest_point_uses_scaled_bounds() {
        let cube = SceneObject::new("c", Primitive::Cube, Vec3::new(0.0, 3.0, 0.0))
            .with_scale(Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(cube.lowest_point_y(), 2.0);
    }

    #[test]
    fn world_matrix_places_origin_at_position() {
        let mut cube = SceneObject::new("c", Primitive::Cube, Vec3::new(1.0, 2.0, 3.0));
        cube.rotation = Vec3::new(0.3, 1.2, -0.4);
        cube.scale = Vec3::splat(2.0);
        let origin = cube.world_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - cube.position).length() < 1e-6);
    }

    #[test]
    fn rotation_order_is_z_then_y_then_x() {
        let mut obj = SceneObject::new("c", Primitive::Cube, Vec3::ZERO);
        obj.rotation = Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, std::f32::consts::FRAC_PI_2);
        // X is applied to the point first: +Y -> +Z, then Z leaves +Z alone
        let p = obj.world_matrix().transform_point3(Vec3::Y);
        assert!((p - Vec3::Z).length() < 1e-5);
    }
}
