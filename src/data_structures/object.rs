//! Scene objects: transforms and per-object render state.
//!
//! An object here is what gets drawn by a `Draw` command: a transform, the
//! culling and alpha behaviour of its pipeline, and the uniform block the
//! shader reads.

use cgmath::{Deg, Matrix4, Vector3};

/// Position and Euler rotation (degrees) of an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub pos: Vector3<f32>,
    pub rot: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pos: Vector3::new(0.0, 0.0, 0.0),
            rot: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

impl Transform {
    /// Model matrix: translation, then rotation about Z, Y and X in that order.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.pos)
            * Matrix4::from_angle_z(Deg(self.rot.z))
            * Matrix4::from_angle_y(Deg(self.rot.y))
            * Matrix4::from_angle_x(Deg(self.rot.x))
    }

    /// Move on the ground plane; Y is pinned to zero.
    pub fn nudge(&mut self, delta: Vector3<f32>) {
        self.pos = Vector3::new(self.pos.x + delta.x, 0.0, self.pos.z + delta.z);
    }

    /// Spin about the Z axis by `deg_per_sec * dt`.
    pub fn spin(&mut self, deg_per_sec: f32, dt: f32) {
        self.rot.z += deg_per_sec * dt;
    }
}

/// Which faces the pipeline discards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaceCulling {
    #[default]
    Back,
    Front,
    None,
}

impl FaceCulling {
    pub fn cull_mode(self) -> Option<wgpu::Face> {
        match self {
            FaceCulling::Back => Some(wgpu::Face::Back),
            FaceCulling::Front => Some(wgpu::Face::Front),
            FaceCulling::None => None,
        }
    }
}

/// How an object's alpha channel is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Blend,
    /// Fragments below half opacity are discarded.
    Binary,
    /// Alpha drives the multisample coverage mask. Single-sampled targets
    /// fall back to `Binary`.
    AlphaToCoverage,
}

impl AlphaMode {
    pub fn blend_state(self) -> Option<wgpu::BlendState> {
        match self {
            AlphaMode::Blend => Some(wgpu::BlendState::ALPHA_BLENDING),
            _ => Some(wgpu::BlendState::REPLACE),
        }
    }

    pub fn alpha_to_coverage(self, sample_count: u32) -> bool {
        self == AlphaMode::AlphaToCoverage && sample_count > 1
    }

    pub fn binary_alpha(self, sample_count: u32) -> bool {
        match self {
            AlphaMode::Binary => true,
            AlphaMode::AlphaToCoverage => sample_count <= 1,
            _ => false,
        }
    }
}

/// Render state of an object that does not change after pipeline creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectState {
    pub face_culling: FaceCulling,
    pub alpha_mode: AlphaMode,
}

/// Uniform block of the card shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub mvp: [[f32; 4]; 4],
    pub binary_alpha: u32,
    // Uniforms are laid out in 16 byte blocks
    pub _padding: [u32; 3],
}

impl ObjectUniform {
    pub fn new(mvp: Matrix4<f32>, binary_alpha: bool) -> Self {
        Self {
            mvp: mvp.into(),
            binary_alpha: binary_alpha as u32,
            _padding: [0; 3],
        }
    }
}
