use glam::{Vec2, Vec3};

use holy_engine::config::UiSettings;
use holy_engine::controller::{HandState, InputEvent, InputState, Key, MouseButton};
use holy_engine::model::{Primitive, SceneObject};
use holy_engine::ui::{spawn_menu_layout, tools_panel_layout};
use holy_engine::view::DrawCommand;
use holy_engine::{Editor, EngineConfig};

const DT: f32 = 1.0 / 60.0;

fn approx_eq(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-3
}

fn setup() -> (Editor, InputState) {
    let config = EngineConfig::default();
    let input = InputState::new(config.window.width, config.window.height);
    (Editor::new(config).unwrap(), input)
}

fn mouse(input: &mut InputState, is_down: bool) {
    input.process_event(&InputEvent::MouseButton { button: MouseButton::Left, is_down });
}

#[test]
fn pick_carry_and_throw() {
    let (mut editor, mut input) = setup();
    // Straight ahead of the camera, which starts at (0, 2, 5) facing -Z
    let key = editor
        .scene
        .insert(SceneObject::new("crate", Primitive::Cube, Vec3::new(0.0, 2.0, 0.0)))
        .unwrap();

    mouse(&mut input, true);
    editor.update(DT, &mut input);

    assert_eq!(editor.hand.state(), HandState::Holding { key });
    let obj = editor.scene.get(key).unwrap();
    assert!(obj.is_kinematic);
    assert_eq!(obj.velocity, Vec3::ZERO);
    assert!(approx_eq(obj.position, Vec3::new(0.0, 2.0, 3.0)));

    // Carried along while the camera walks forward
    input.process_event(&InputEvent::KeyDown(Key::Char('w')));
    for _ in 0..30 {
        editor.update(DT, &mut input);
    }
    input.process_event(&InputEvent::KeyUp(Key::Char('w')));
    let expected = editor.camera.position + editor.camera.front() * 2.0;
    assert!(approx_eq(editor.scene.get(key).unwrap().position, expected));

    mouse(&mut input, false);
    editor.update(DT, &mut input);

    assert_eq!(editor.hand.state(), HandState::Idle);
    let obj = editor.scene.get(key).unwrap();
    assert!(!obj.is_kinematic);
    assert!((obj.velocity.z + 10.0).abs() < 1e-3);
    assert_eq!(obj.angular_velocity, Vec3::ZERO);

    for _ in 0..240 {
        editor.update(DT, &mut input);
    }
    let obj = editor.scene.get(key).unwrap();
    assert!(obj.is_grounded);
    assert!((obj.position.y - 0.5).abs() < 1e-5);
    assert!(obj.position.z < 0.0, "thrown forward");
}

#[test]
fn active_widget_blocks_picking() {
    let (mut editor, mut input) = setup();
    let key = editor
        .scene
        .insert(SceneObject::new("crate", Primitive::Cube, Vec3::new(0.0, 2.0, 0.0)))
        .unwrap();

    // Small window so the object list button sits under the crosshair
    input.process_event(&InputEvent::Resized { width: 300, height: 180 });
    let center = Vec2::new(150.0, 90.0);
    let layout = tools_panel_layout(&UiSettings::default(), 1);
    assert!(layout.objects[0].contains(center));

    mouse(&mut input, true);
    editor.update(DT, &mut input);
    assert!(editor.ui.is_active());
    assert_eq!(editor.hand.held(), None);

    mouse(&mut input, false);
    editor.update(DT, &mut input);
    assert!(!editor.ui.is_active());
    assert_eq!(editor.scene.selected(), Some(key));
    assert_eq!(editor.hand.held(), None);
}

#[test]
fn spawn_menu_click_holds_new_object_without_throwing_it() {
    let (mut editor, mut input) = setup();

    input.process_event(&InputEvent::KeyDown(Key::Char('e')));
    editor.update(DT, &mut input);
    input.process_event(&InputEvent::KeyUp(Key::Char('e')));
    assert!(editor.spawn_menu_open() && !editor.mouse_grabbed());

    let cube = spawn_menu_layout(&UiSettings::default(), input.viewport).cube.center();
    input.process_event(&InputEvent::CursorMoved { x: cube.x, y: cube.y });
    mouse(&mut input, true);
    editor.update(DT, &mut input);
    mouse(&mut input, false);
    editor.update(DT, &mut input);

    assert!(!editor.spawn_menu_open());
    assert!(editor.mouse_grabbed());
    let key = editor.hand.held().expect("spawned object is held");
    let obj = editor.scene.get(key).unwrap();
    assert_eq!(obj.id, "Cube_0");
    assert!(obj.is_kinematic);
    assert_eq!(obj.velocity, Vec3::ZERO);
}

#[test]
fn render_frame_lists_every_object_then_ui() {
    let (mut editor, mut input) = setup();
    editor.scene.spawn_primitive(Primitive::Cube, Vec3::new(0.0, 3.0, 0.0));
    editor.scene.spawn_primitive(Primitive::Plane, Vec3::new(2.0, 0.0, 0.0));

    let frame = editor.update(DT, &mut input);
    assert_eq!(frame.objects().count(), editor.scene.len());
    let first_rect = frame
        .commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Rect { .. }))
        .unwrap();
    assert_eq!(first_rect, editor.scene.len());
    assert_eq!(frame.view, editor.camera.view_matrix());
}

#[test]
fn release_while_rotating_keeps_spin() {
    let (mut editor, mut input) = setup();
    let key = editor.spawn_and_hold(Primitive::Cube);

    input.process_event(&InputEvent::KeyDown(Key::Char('r')));
    editor.update(DT, &mut input);
    input.process_event(&InputEvent::CursorMoved { x: 20.0, y: 0.0 });
    editor.update(DT, &mut input);

    mouse(&mut input, true);
    editor.update(DT, &mut input);
    mouse(&mut input, false);
    editor.update(DT, &mut input);

    let obj = editor.scene.get(key).unwrap();
    assert!(!obj.is_kinematic);
    assert!(obj.angular_velocity.y > 0.0);
}

#[test]
fn tap_within_one_frame_does_not_keep_object_held() {
    let (mut editor, mut input) = setup();
    let key = editor
        .scene
        .insert(SceneObject::new("crate", Primitive::Cube, Vec3::new(0.0, 2.0, 0.0)))
        .unwrap();

    mouse(&mut input, true);
    mouse(&mut input, false);
    for _ in 0..30 {
        editor.update(DT, &mut input);
    }

    assert_eq!(editor.hand.held(), None);
    assert!(!editor.scene.get(key).unwrap().is_kinematic);
}

#[test]
fn active_widget_freezes_camera() {
    let (mut editor, mut input) = setup();
    editor
        .scene
        .insert(SceneObject::new("crate", Primitive::Cube, Vec3::new(0.0, 2.0, 0.0)))
        .unwrap();
    input.process_event(&InputEvent::Resized { width: 300, height: 180 });

    mouse(&mut input, true);
    editor.update(DT, &mut input);
    assert!(editor.ui.is_active());
    let (position, yaw) = (editor.camera.position, editor.camera.yaw());

    input.process_event(&InputEvent::KeyDown(Key::Char('w')));
    input.process_event(&InputEvent::CursorMoved { x: 50.0, y: 0.0 });
    editor.update(0.5, &mut input);

    assert!(editor.ui.is_active());
    assert_eq!(editor.camera.position, position);
    assert_eq!(editor.camera.yaw(), yaw);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut config = EngineConfig::default();
    config.interaction.min_hold_distance = 6.0;
    config.interaction.max_hold_distance = 2.0;
    assert!(Editor::new(config).is_err());

    let mut config = EngineConfig::default();
    config.physics.fixed_timestep = 0.0;
    assert!(Editor::new(config).is_err());
}
