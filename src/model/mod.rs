// MODEL: Scene data and camera
pub mod camera;
pub mod object;
pub mod scene;

pub use camera::Camera;
pub use object::{ObjectKey, Primitive, SceneObject};
pub use scene::Scene;
