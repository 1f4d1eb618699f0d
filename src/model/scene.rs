use glam::Vec3;

use crate::error::{EngineError, Result};
use crate::model::object::{ObjectKey, Primitive, SceneObject};

/// Owns every object in insertion order. Objects are only dropped together
/// with the scene, which keeps [`ObjectKey`]s stable.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selected: Option<ObjectKey>,
    ground: Option<ObjectKey>,
    next_object_id: usize,
}

impl Scene {
    pub const GROUND_ID: &'static str = "GroundPlane";

    pub fn new() -> Self {
        Self::default()
    }

    /// Scene with a large static plane at `ground_y`
    pub fn with_ground_plane(ground_y: f32) -> Self {
        let mut scene = Self::new();
        let ground = SceneObject::new(Self::GROUND_ID, Primitive::Plane, Vec3::new(0.0, ground_y, 0.0))
            .with_scale(Vec3::new(100.0, 1.0, 100.0))
            .with_kinematic(true);
        let key = scene.push(ground);
        scene.ground = Some(key);
        tracing::info!("Created ground plane at y = {}", ground_y);
        scene
    }

    fn push(&mut self, object: SceneObject) -> ObjectKey {
        let key = ObjectKey(self.objects.len());
        self.objects.push(object);
        key
    }

    /// Adds an externally built object. IDs must be unique within the scene.
    pub fn insert(&mut self, object: SceneObject) -> Result<ObjectKey> {
        if self.find(&object.id).is_some() {
            return Err(EngineError::DuplicateObjectId(object.id));
        }
        Ok(self.push(object))
    }

    /// Builds a primitive with a fresh `<Kind>_<n>` id and selects it.
    pub fn spawn_primitive(&mut self, primitive: Primitive, position: Vec3) -> ObjectKey {
        let id = loop {
            let candidate = format!("{}_{}", primitive.name(), self.next_object_id);
            self.next_object_id += 1;
            if self.find(&candidate).is_none() {
                break candidate;
            }
        };
        tracing::info!("Created primitive: {}", id);
        let key = self.push(SceneObject::new(id, primitive, position));
        self.selected = Some(key);
        key
    }

    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key.0)
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key.0)
    }

    pub fn find(&self, id: &str) -> Option<ObjectKey> {
        self.objects.iter().position(|o| o.id == id).map(ObjectKey)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectKey(i), o))
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn selected(&self) -> Option<ObjectKey> {
        self.selected
    }

    /// Keys that don't belong to this scene clear the selection.
    pub fn select(&mut self, key: Option<ObjectKey>) {
        self.selected = key.filter(|k| k.0 < self.objects.len());
    }

    pub fn ground(&self) -> Option<ObjectKey> {
        self.ground
    }

    pub fn is_ground(&self, key: ObjectKey) -> bool {
        self.ground == Some(key)
    }
}
