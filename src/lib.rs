//! rtt-card
//!
//! A small render-to-texture demo on wgpu and winit. A 512x512 offscreen
//! target is painted with vertical stripes once, its mip chain is generated,
//! and the result is drawn as a spinning card in front of a perspective
//! camera. Arrow keys nudge the card, holding Space or the left mouse button
//! clears coloured overlay rectangles on top of the frame.
//!
//! High-level modules
//! - `camera`: camera and perspective projection
//! - `canvas`: GPU canvas that executes render commands
//! - `clock`: frame delta timing
//! - `config`: every constant of the demo in one struct
//! - `context`: device, queue, surface and render target format negotiation
//! - `data_structures`: rectangles, textures, meshes and objects
//! - `events`: background task applying window events to the scene
//! - `flow`: winit application handler and `run`
//! - `input`: polled keyboard and mouse state
//! - `pipelines`: card, clear and mipmap pipelines
//! - `render`: render commands, the `Canvas` trait and the frame sequence
//! - `scene`: render target and the per-frame loop
//!

pub mod camera;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod events;
pub mod flow;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Vector3};
pub use winit::event::{ElementState, MouseButton};
