use std::sync::Arc;

use rtt_card::{
    Deg,
    camera::Projection,
    data_structures::object::Transform,
    events::{EventHandler, SceneEvent, SharedScene, handle_event},
    input::Key,
};

const STEP: f32 = 0.1;

fn scene() -> SharedScene {
    SharedScene::new(
        Transform::default(),
        Projection::new(800, 600, Deg(75.0), 0.0001, 1000.0),
    )
}

fn press(key: Key) -> SceneEvent {
    SceneEvent::Key { key, pressed: true }
}

#[test]
fn should_move_card_on_arrow_press() {
    let scene = scene();
    handle_event(&scene, STEP, press(Key::ArrowRight));
    handle_event(&scene, STEP, press(Key::ArrowRight));
    handle_event(&scene, STEP, press(Key::ArrowUp));
    let card = *scene.card();
    assert!((card.pos.x - 0.2).abs() < 1e-6);
    assert!((card.pos.z - 0.1).abs() < 1e-6);
    assert_eq!(card.pos.y, 0.0);

    handle_event(&scene, STEP, press(Key::ArrowLeft));
    handle_event(&scene, STEP, press(Key::ArrowDown));
    handle_event(&scene, STEP, press(Key::ArrowDown));
    let card = *scene.card();
    assert!((card.pos.x - 0.1).abs() < 1e-6);
    assert!((card.pos.z + 0.1).abs() < 1e-6);
}

#[test]
fn should_pin_card_to_ground_plane() {
    let scene = scene();
    scene.card().pos.y = 3.0;
    handle_event(&scene, STEP, press(Key::ArrowLeft));
    assert_eq!(scene.card().pos.y, 0.0);
}

#[test]
fn should_move_card_on_press_and_release() {
    let scene = scene();
    handle_event(&scene, STEP, press(Key::ArrowRight));
    handle_event(
        &scene,
        STEP,
        SceneEvent::Key {
            key: Key::ArrowRight,
            pressed: false,
        },
    );
    let card = *scene.card();
    assert!((card.pos.x - 2.0 * STEP).abs() < 1e-6);
    assert_eq!(card.pos.y, 0.0);
    assert_eq!(card.pos.z, 0.0);
}

#[test]
fn should_not_move_card_on_other_keys_or_text() {
    let scene = scene();
    handle_event(&scene, STEP, press(Key::Space));
    handle_event(
        &scene,
        STEP,
        SceneEvent::Key {
            key: Key::Other,
            pressed: false,
        },
    );
    handle_event(&scene, STEP, press(Key::Other));
    handle_event(&scene, STEP, SceneEvent::Typed("a".to_string()));
    assert_eq!(*scene.card(), Transform::default());
}

#[test]
fn should_update_projection_on_resize() {
    let scene = scene();
    handle_event(
        &scene,
        STEP,
        SceneEvent::FramebufferResized {
            width: 1000,
            height: 500,
        },
    );
    assert!((scene.projection().aspect() - 2.0).abs() < 1e-6);

    handle_event(
        &scene,
        STEP,
        SceneEvent::FramebufferResized {
            width: 0,
            height: 500,
        },
    );
    assert_eq!(scene.projection().aspect(), 1.0);
}

#[tokio::test]
async fn should_drain_queued_events_before_shutdown() {
    let scene = Arc::new(scene());
    let handler = EventHandler::spawn(&tokio::runtime::Handle::current(), scene.clone(), STEP, 16);
    for _ in 0..3 {
        assert!(handler.send(press(Key::ArrowRight)));
    }
    assert!(handler.send(SceneEvent::FramebufferResized {
        width: 300,
        height: 100,
    }));
    handler.shutdown().await;

    assert!((scene.card().pos.x - 0.3).abs() < 1e-5);
    assert!((scene.projection().aspect() - 3.0).abs() < 1e-6);
}

#[tokio::test]
async fn should_drop_events_when_queue_is_full() {
    let scene = Arc::new(scene());
    // current-thread runtime: the task cannot drain until we yield
    let handler = EventHandler::spawn(&tokio::runtime::Handle::current(), scene.clone(), STEP, 1);
    assert!(handler.send(press(Key::ArrowRight)));
    assert!(!handler.send(press(Key::ArrowRight)));
    handler.shutdown().await;

    assert!((scene.card().pos.x - 0.1).abs() < 1e-6);
}
