//! Engine data structures: rectangles, textures, meshes and objects.
//!
//! - `rect` holds pixel rectangles and the stripe layout
//! - `texture` contains the GPU texture wrapper and render target negotiation
//! - `mesh` contains vertex layouts and GPU vertex buffers
//! - `object` holds transforms and per-object render state

pub mod mesh;
pub mod object;
pub mod rect;
pub mod texture;
