use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::model::{Camera, ObjectKey, Scene};
use crate::utils::BoundingBox;

/// Direction components smaller than this are treated as parallel to the slab
pub const PARALLEL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub key: ObjectKey,
    pub distance: f32,
}

/// World-space ray from the camera through a cursor position (pixels, origin
/// top-left). An empty viewport yields the camera's forward ray.
pub fn cast_ray(cursor: Vec2, viewport: Vec2, camera: &Camera, projection: Mat4) -> Ray {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Ray { origin: camera.position, direction: camera.front() };
    }

    let ndc_x = (cursor.x / viewport.x) * 2.0 - 1.0;
    let ndc_y = 1.0 - (cursor.y / viewport.y) * 2.0;

    // Near plane in clip space, then back into eye space as a direction
    let clip = Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
    let eye = projection.inverse() * clip;
    let eye = Vec4::new(eye.x, eye.y, -1.0, 0.0);

    let world = camera.view_matrix().inverse() * eye;
    let direction = world.truncate().normalize_or_zero();
    if direction == Vec3::ZERO {
        return Ray { origin: camera.position, direction: camera.front() };
    }

    Ray { origin: camera.position, direction }
}

/// Slab test. Returns the entry distance along the ray, or `None` on a miss.
/// Boxes inverted on any axis never intersect.
pub fn intersect_aabb(origin: Vec3, direction: Vec3, box_min: Vec3, box_max: Vec3) -> Option<f32> {
    if BoundingBox::new(box_min, box_max).is_inverted() {
        return None;
    }

    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        let (lo, hi) = (box_min[axis], box_max[axis]);

        if d.abs() < PARALLEL_EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let mut t1 = (lo - o) / d;
        let mut t2 = (hi - o) / d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

/// Nearest object hit by `ray` closer than `max_range`, using unrotated world
/// bounds. The ground plane and `exclude` (the held object) are skipped.
pub fn pick(scene: &Scene, ray: &Ray, max_range: f32, exclude: Option<ObjectKey>) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for (key, obj) in scene.iter() {
        if scene.is_ground(key) || Some(key) == exclude {
            continue;
        }

        let bounds = obj.world_bounds();
        let Some(distance) = intersect_aabb(ray.origin, ray.direction, bounds.min, bounds.max) else {
            continue;
        };

        if distance < max_range && best.map_or(true, |b| distance < b.distance) {
            best = Some(PickHit { key, distance });
        }
    }
    best
}
