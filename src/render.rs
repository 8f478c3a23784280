//! Render commands and the canvas abstraction.
//!
//! Every frame is described as a list of [`Command`]s and replayed onto a
//! [`Canvas`]. The window and the offscreen render target are both canvases,
//! so the same sequence logic drives either of them.
//!
//! # Frame sequence
//!
//! 1. Clear the whole colour buffer and the whole depth buffer
//! 2. Clear each overlay whose trigger is currently held
//! 3. Draw the card
//! 4. Present, unconditionally

use crate::{
    config::{DemoConfig, Trigger},
    data_structures::rect::{Rect, stripes},
    input::InputState,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Clear(Rect, wgpu::Color),
    ClearDepth(Rect, f32),
    Draw(Rect),
    Present,
}

/// Something that can be cleared, drawn into and rendered.
///
/// Rectangles are in the canvas' pixel space; [`Rect::EMPTY`] means the
/// whole canvas.
pub trait Canvas {
    type Error;

    fn bounds(&self) -> Rect;
    fn clear(&mut self, rect: Rect, colour: wgpu::Color);
    fn clear_depth(&mut self, rect: Rect, depth: f32);
    fn draw(&mut self, rect: Rect);
    /// Flush everything queued so far and show / finalise the result.
    fn render(&mut self) -> Result<(), Self::Error>;
}

pub fn replay<C: Canvas>(canvas: &mut C, commands: &[Command]) -> Result<(), C::Error> {
    for command in commands {
        match *command {
            Command::Clear(rect, colour) => canvas.clear(rect, colour),
            Command::ClearDepth(rect, depth) => canvas.clear_depth(rect, depth),
            Command::Draw(rect) => canvas.draw(rect),
            Command::Present => canvas.render()?,
        }
    }
    Ok(())
}

/// Commands for one frame of the window.
pub fn frame_commands(config: &DemoConfig, input: &InputState) -> Vec<Command> {
    let mut commands = vec![
        Command::Clear(Rect::EMPTY, config.clear_colour),
        Command::ClearDepth(Rect::EMPTY, config.clear_depth),
    ];
    commands.extend(
        config
            .overlays
            .iter()
            .filter(|overlay| match overlay.trigger {
                Trigger::Key(key) => input.key_down(key),
                Trigger::Button(button) => input.button_down(button),
            })
            .map(|overlay| Command::Clear(overlay.rect, overlay.colour)),
    );
    commands.push(Command::Draw(Rect::EMPTY));
    commands.push(Command::Present);
    commands
}

/// Commands painting the stripe pattern into the render target.
pub fn target_commands(config: &DemoConfig, bounds: Rect) -> Vec<Command> {
    let target = &config.target;
    let mut commands: Vec<Command> = stripes(bounds, target.stripe_width, target.stripe_colours)
        .into_iter()
        .map(|(rect, colour)| Command::Clear(rect, colour))
        .collect();
    commands.push(Command::Present);
    commands
}
