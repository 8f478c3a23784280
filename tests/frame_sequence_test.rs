use rtt_card::{
    config::DemoConfig,
    data_structures::rect::Rect,
    render::{Command, frame_commands, replay, target_commands},
};
use wgpu::Color;

use crate::common::test_utils::{Recorder, input_with};

mod common;

#[test]
fn should_present_every_frame_regardless_of_input() {
    let config = DemoConfig::default();
    for (space, left) in [(false, false), (true, false), (false, true), (true, true)] {
        let commands = frame_commands(&config, &input_with(space, left));
        assert_eq!(commands.last(), Some(&Command::Present));
        assert_eq!(
            commands.iter().filter(|c| **c == Command::Present).count(),
            1
        );
    }
}

#[test]
fn should_clear_then_draw_without_overlays_when_idle() {
    let config = DemoConfig::default();
    let commands = frame_commands(&config, &input_with(false, false));
    assert_eq!(
        commands,
        vec![
            Command::Clear(Rect::EMPTY, Color::WHITE),
            Command::ClearDepth(Rect::EMPTY, 1.0),
            Command::Draw(Rect::EMPTY),
            Command::Present,
        ]
    );
}

#[test]
fn should_clear_red_square_while_space_is_held() {
    let config = DemoConfig::default();
    let commands = frame_commands(&config, &input_with(true, false));
    assert_eq!(commands[2], Command::Clear(Rect::new(0, 0, 100, 100), Color::RED));
    assert_eq!(commands[3], Command::Draw(Rect::EMPTY));
    assert_eq!(commands.len(), 5);
}

#[test]
fn should_clear_blue_square_while_left_button_is_held() {
    let config = DemoConfig::default();
    let commands = frame_commands(&config, &input_with(false, true));
    assert_eq!(
        commands[2],
        Command::Clear(Rect::new(100, 100, 200, 200), Color::BLUE)
    );
    assert_eq!(commands.len(), 5);
}

#[test]
fn should_clear_both_overlays_in_order() {
    let config = DemoConfig::default();
    let commands = frame_commands(&config, &input_with(true, true));
    assert_eq!(commands.len(), 6);
    assert!(matches!(commands[2], Command::Clear(_, c) if c == Color::RED));
    assert!(matches!(commands[3], Command::Clear(_, c) if c == Color::BLUE));
}

#[test]
fn should_render_once_per_replayed_frame() {
    let config = DemoConfig::default();
    let mut canvas = Recorder::new(800, 600);
    for frame in 0..3 {
        let input = input_with(frame == 1, false);
        replay(&mut canvas, &frame_commands(&config, &input)).expect("replay failed");
    }
    assert_eq!(canvas.frames().len(), 3);
    assert!(canvas.pending().is_empty());
    assert_eq!(canvas.frames()[0].len(), 3);
    assert_eq!(canvas.frames()[1].len(), 4);
    assert_eq!(canvas.frames()[2].len(), 3);
}

#[test]
fn should_propagate_render_errors() {
    let config = DemoConfig::default();
    let mut canvas = Recorder::failing(800, 600);
    let result = replay(&mut canvas, &frame_commands(&config, &input_with(false, false)));
    assert_eq!(result, Err("render failed".to_string()));
}

#[test]
fn should_paint_alternating_stripes_into_target() {
    let config = DemoConfig::default();
    let commands = target_commands(&config, Rect::from_size(512, 512));

    // 512 / 12 rounds up to 43 stripes, plus the final present
    assert_eq!(commands.len(), 44);
    assert_eq!(commands.last(), Some(&Command::Present));
    assert_eq!(commands[0], Command::Clear(Rect::new(0, 0, 12, 512), Color::RED));
    assert_eq!(commands[1], Command::Clear(Rect::new(12, 0, 24, 512), Color::BLUE));
    assert_eq!(
        commands[42],
        Command::Clear(Rect::new(504, 0, 512, 512), Color::RED)
    );
}

#[test]
fn should_only_present_an_empty_target() {
    let config = DemoConfig::default();
    let commands = target_commands(&config, Rect::EMPTY);
    assert_eq!(commands, vec![Command::Present]);
}
