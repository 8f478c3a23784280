use wgpu::util::DeviceExt;

/// Vertex of a textured, unlit mesh.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl MeshVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const fn vertex(position: [f32; 3], tex_coords: [f32; 2]) -> MeshVertex {
    MeshVertex {
        position,
        tex_coords,
    }
}

/// Two triangles spanning `[-1, 1]` on X and Z in the `y = 0` plane.
///
/// The texture's top edge (`v = 0`) sits at `z = 1`, which is the top of the
/// screen for a camera looking along +Y with Z up.
pub const CARD_VERTICES: [MeshVertex; 6] = [
    vertex([-1.0, 0.0, -1.0], [0.0, 1.0]),
    vertex([1.0, 0.0, -1.0], [1.0, 1.0]),
    vertex([-1.0, 0.0, 1.0], [0.0, 0.0]),
    vertex([-1.0, 0.0, 1.0], [0.0, 0.0]),
    vertex([1.0, 0.0, -1.0], [1.0, 1.0]),
    vertex([1.0, 0.0, 1.0], [1.0, 0.0]),
];

/// Non-indexed triangle list living on the GPU.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, name: &str, vertices: &[MeshVertex]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            num_vertices: vertices.len() as u32,
        }
    }

    pub fn card(device: &wgpu::Device) -> Self {
        Self::new(device, "card", &CARD_VERTICES)
    }
}
