#![allow(dead_code)]

use rtt_card::{
    data_structures::rect::Rect,
    render::{Canvas, Command},
};

/// Canvas that records what it was asked to do.
pub(crate) struct Recorder {
    bounds: Rect,
    pending: Vec<Command>,
    frames: Vec<Vec<Command>>,
    fail_render: bool,
}

impl Recorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            bounds: Rect::from_size(width, height),
            pending: Vec::new(),
            frames: Vec::new(),
            fail_render: false,
        }
    }

    pub fn failing(width: u32, height: u32) -> Self {
        Self {
            fail_render: true,
            ..Self::new(width, height)
        }
    }

    /// Commands of every rendered frame, without the trailing `Present`.
    pub fn frames(&self) -> &[Vec<Command>] {
        &self.frames
    }

    pub fn pending(&self) -> &[Command] {
        &self.pending
    }
}

impl Canvas for Recorder {
    type Error = String;

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn clear(&mut self, rect: Rect, colour: wgpu::Color) {
        self.pending.push(Command::Clear(rect, colour));
    }

    fn clear_depth(&mut self, rect: Rect, depth: f32) {
        self.pending.push(Command::ClearDepth(rect, depth));
    }

    fn draw(&mut self, rect: Rect) {
        self.pending.push(Command::Draw(rect));
    }

    fn render(&mut self) -> Result<(), String> {
        if self.fail_render {
            return Err("render failed".to_string());
        }
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}

pub(crate) fn input_with(space: bool, left_button: bool) -> rtt_card::input::InputState {
    use rtt_card::{ElementState, MouseButton, input::Key};

    let mut input = rtt_card::input::InputState::default();
    if space {
        input.key(Key::Space, ElementState::Pressed);
    }
    if left_button {
        input.button(MouseButton::Left, ElementState::Pressed);
    }
    input
}
