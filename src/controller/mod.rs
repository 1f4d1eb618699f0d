// CONTROLLER: Input, simulation and the per-frame update loop
pub mod input;
pub mod physics;
pub mod camera_controller;
pub mod picking;
pub mod interaction;
pub mod frame_loop;

pub use input::{InputEvent, InputProcessor, InputState, Key, KeyBindings, MouseButton};
pub use physics::{FixedTimestep, PhysicsSystem};
pub use camera_controller::{CameraController, MoveIntent};
pub use picking::{cast_ray, intersect_aabb, pick, PickHit, Ray};
pub use interaction::{HandState, HandTool};
pub use frame_loop::{Editor, FrameStats};
