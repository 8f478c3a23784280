use cgmath::{Matrix4, SquareMatrix, Vector4};
use rtt_card::{
    Deg, ElementState, MouseButton, Vector3,
    camera::{self, Camera, Projection},
    clock::FrameClock,
    config::DemoConfig,
    data_structures::{
        object::{AlphaMode, FaceCulling, Transform},
        rect::{Rect, stripes},
    },
    input::{InputState, Key, arrow_delta},
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn should_build_identity_for_default_transform() {
    assert_eq!(Transform::default().to_matrix(), Matrix4::identity());
}

#[test]
fn should_spin_around_z() {
    let mut card = Transform::default();
    card.spin(15.0, 2.0);
    assert!(approx(card.rot.z, 30.0));

    card.rot.z = 90.0;
    let x = card.to_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert!(approx(x.x, 0.0));
    assert!(approx(x.y, 1.0));
    assert!(approx(x.z, 0.0));
}

#[test]
fn should_translate_after_rotating() {
    let card = Transform {
        pos: Vector3::new(1.0, 0.0, 2.0),
        rot: Vector3::new(0.0, 0.0, 180.0),
    };
    let p = card.to_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert!(approx(p.x, 0.0));
    assert!(approx(p.z, 2.0));
}

#[test]
fn should_map_arrows_to_ground_plane() {
    assert_eq!(arrow_delta(Key::ArrowLeft, 0.5), Vector3::new(-0.5, 0.0, 0.0));
    assert_eq!(arrow_delta(Key::ArrowRight, 0.5), Vector3::new(0.5, 0.0, 0.0));
    assert_eq!(arrow_delta(Key::ArrowUp, 0.5), Vector3::new(0.0, 0.0, 0.5));
    assert_eq!(arrow_delta(Key::ArrowDown, 0.5), Vector3::new(0.0, 0.0, -0.5));
    assert_eq!(arrow_delta(Key::Space, 0.5), Vector3::new(0.0, 0.0, 0.0));
}

#[test]
fn should_place_card_in_front_of_camera() {
    let config = DemoConfig::default();
    let cam = &config.camera;
    let camera = Camera::new(cam.position, cam.forward, cam.up);
    let projection = Projection::new(512, 512, cam.fovy, cam.znear, cam.zfar);
    let mvp = camera::mvp(&projection, &camera, Transform::default().to_matrix());

    let centre = mvp * Vector4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = centre.truncate() / centre.w;
    assert!(approx(ndc.x, 0.0));
    assert!(approx(ndc.y, 0.0));
    assert!(ndc.z > 0.0 && ndc.z < 1.0);

    // +Z is up on screen, +X is right
    let top = mvp * Vector4::new(0.0, 0.0, 0.5, 1.0);
    assert!(top.y / top.w > 0.0);
    let right = mvp * Vector4::new(0.5, 0.0, 0.0, 1.0);
    assert!(right.x / right.w > 0.0);
}

#[test]
fn should_keep_square_aspect_for_empty_framebuffer() {
    let mut projection = Projection::new(0, 0, Deg(75.0), 0.1, 10.0);
    assert_eq!(projection.aspect(), 1.0);
    projection.resize(1920, 1080);
    assert!(approx(projection.aspect(), 1920.0 / 1080.0));
}

#[test]
fn should_track_held_keys_and_buttons() {
    let mut input = InputState::default();
    input.key(Key::Space, ElementState::Pressed);
    input.button(MouseButton::Left, ElementState::Pressed);
    assert!(input.key_down(Key::Space));
    assert!(input.button_down(MouseButton::Left));
    assert!(!input.button_down(MouseButton::Right));

    input.key(Key::Space, ElementState::Released);
    assert!(!input.key_down(Key::Space));

    input.key(Key::ArrowUp, ElementState::Pressed);
    input.focus(false);
    assert!(!input.key_down(Key::ArrowUp));
    assert!(!input.button_down(MouseButton::Left));
}

#[test]
fn should_fall_back_to_binary_alpha_without_multisampling() {
    assert!(!AlphaMode::AlphaToCoverage.alpha_to_coverage(1));
    assert!(AlphaMode::AlphaToCoverage.binary_alpha(1));
    assert!(AlphaMode::AlphaToCoverage.alpha_to_coverage(4));
    assert!(!AlphaMode::AlphaToCoverage.binary_alpha(4));
    assert!(AlphaMode::Binary.binary_alpha(4));
    assert!(!AlphaMode::Opaque.binary_alpha(1));
    assert_eq!(FaceCulling::None.cull_mode(), None);
    assert_eq!(FaceCulling::default().cull_mode(), Some(wgpu::Face::Back));
}

#[test]
fn should_resolve_rects_against_bounds() {
    let bounds = Rect::from_size(800, 600);
    assert_eq!(Rect::EMPTY.resolve(bounds), Some(bounds));
    assert!(Rect::EMPTY.covers(bounds));
    assert_eq!(
        Rect::new(100, 100, 200, 200).resolve(bounds),
        Some(Rect::new(100, 100, 200, 200))
    );
    assert_eq!(
        Rect::new(700, 500, 900, 900).resolve(bounds),
        Some(Rect::new(700, 500, 800, 600))
    );
    assert_eq!(Rect::new(900, 0, 1000, 10).resolve(bounds), None);
    assert_eq!(Rect::new(0, 0, 10, 10).resolve(Rect::EMPTY), None);
    assert!(!Rect::new(0, 0, 10, 10).covers(bounds));
    assert_eq!(Rect::new(10, 20, 0, 0), Rect::new(0, 0, 10, 20));
}

#[test]
fn should_not_lay_out_zero_width_stripes() {
    assert!(stripes(Rect::from_size(512, 512), 0, [1, 2]).is_empty());
    let exact = stripes(Rect::from_size(24, 4), 12, ['a', 'b']);
    assert_eq!(
        exact,
        vec![(Rect::new(0, 0, 12, 4), 'a'), (Rect::new(12, 0, 24, 4), 'b')]
    );
}

#[test]
fn should_cap_frame_delta() {
    let mut clock = FrameClock::with_max_dt(instant::Duration::from_millis(0));
    std::thread::sleep(std::time::Duration::from_millis(5));
    assert_eq!(clock.tick(), 0.0);
    assert_eq!(clock.frames(), 1);
}
