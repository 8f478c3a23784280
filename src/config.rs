//! Demo configuration.
//!
//! Everything the demo hard-wires lives in [`DemoConfig`]. The binary runs
//! with [`DemoConfig::default`]; tests and embedders tweak fields directly.

use cgmath::Deg;
use wgpu::Color;
use winit::event::MouseButton;

use crate::{
    data_structures::{
        object::{AlphaMode, FaceCulling, ObjectState},
        rect::Rect,
        texture::Precision,
    },
    input::Key,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub position: [f32; 3],
    pub forward: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy: Deg(75.0),
            znear: 0.0001,
            zfar: 1000.0,
            position: [0.0, -2.0, 0.0],
            forward: [0.0, 1.0, 0.0],
            up: [0.0, 0.0, 1.0],
        }
    }
}

/// Offscreen target the card texture is rendered into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetConfig {
    pub size: [u32; 2],
    pub precision: Precision,
    pub stripe_width: u32,
    pub stripe_colours: [Color; 2],
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            size: [512, 512],
            precision: Precision::rgba(8, 8, 8, 0),
            stripe_width: 12,
            stripe_colours: [Color::RED, Color::BLUE],
        }
    }
}

/// Input that makes an overlay visible while held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Key(Key),
    Button(MouseButton),
}

/// A rectangle cleared to a colour while its trigger is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    pub trigger: Trigger,
    pub rect: Rect,
    pub colour: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub title: String,
    pub camera: CameraConfig,
    pub target: TargetConfig,
    pub card: ObjectState,
    pub clear_colour: Color,
    pub clear_depth: f32,
    pub overlays: Vec<Overlay>,
    /// Distance the card moves per arrow key press.
    pub move_step: f32,
    /// Card rotation about Z in degrees per second.
    pub spin_speed: f32,
    /// Capacity of the channel between the window and the event task.
    pub event_queue_capacity: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "rtt-card".to_string(),
            camera: CameraConfig::default(),
            target: TargetConfig::default(),
            card: ObjectState {
                face_culling: FaceCulling::None,
                alpha_mode: AlphaMode::AlphaToCoverage,
            },
            clear_colour: Color::WHITE,
            clear_depth: 1.0,
            overlays: vec![
                Overlay {
                    trigger: Trigger::Key(Key::Space),
                    rect: Rect::new(0, 0, 100, 100),
                    colour: Color::RED,
                },
                Overlay {
                    trigger: Trigger::Button(MouseButton::Left),
                    rect: Rect::new(100, 100, 200, 200),
                    colour: Color::BLUE,
                },
            ],
            move_step: 0.1,
            spin_speed: 15.0,
            event_queue_capacity: 256,
        }
    }
}
