//! OBJ mesh loading and the mesh registry

use std::fmt;
use std::path::Path;

use slotmap::{new_key_type, SlotMap};
use wgpu::util::DeviceExt;

new_key_type! {
    /// Stable handle to a mesh in the [`MeshRegistry`]
    ///
    /// The animation core holds only keys; the registry owns the GPU
    /// resources.
    pub struct MeshKey;
}

/// Error type for mesh loading
#[derive(Debug)]
pub enum MeshError {
    /// OBJ parsing or file access failed
    Load(tobj::LoadError),
    /// The file parsed but contained no geometry
    Empty(String),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Load(err) => write!(f, "Mesh load error: {}", err),
            MeshError::Empty(path) => write!(f, "Mesh contains no geometry: {}", path),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Load(err) => Some(err),
            MeshError::Empty(_) => None,
        }
    }
}

impl From<tobj::LoadError> for MeshError {
    fn from(err: tobj::LoadError) -> Self {
        MeshError::Load(err)
    }
}

/// Vertex format shared by every mesh
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Vertex buffer layout matching the scene shader's inputs
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// One shape from an OBJ file, uploaded to the GPU
struct MeshPart {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// A multi-part mesh (OBJ files may contain several shapes)
pub struct Mesh {
    parts: Vec<MeshPart>,
    vertex_count: usize,
}

impl Mesh {
    /// Load an OBJ file and upload all of its shapes
    ///
    /// Material information in the file is ignored; the scene colors each
    /// draw through the pipeline's per-draw uniforms. Missing normals are
    /// reconstructed from face geometry.
    pub fn load_obj(device: &wgpu::Device, path: &Path) -> Result<Self, MeshError> {
        let (models, _materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)?;
        if models.is_empty() {
            return Err(MeshError::Empty(path.display().to_string()));
        }

        let mut parts = Vec::with_capacity(models.len());
        let mut vertex_count = 0;

        for model in &models {
            let mesh = &model.mesh;
            let positions: Vec<[f32; 3]> = mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            if positions.is_empty() {
                continue;
            }

            let normals = if mesh.normals.len() == mesh.positions.len() {
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| [n[0], n[1], n[2]])
                    .collect()
            } else {
                compute_normals(&positions, &mesh.indices)
            };

            let vertices: Vec<MeshVertex> = positions
                .iter()
                .zip(normals.iter())
                .map(|(&position, &normal)| MeshVertex { position, normal })
                .collect();

            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            vertex_count += vertices.len();
            parts.push(MeshPart {
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
            });
        }

        if parts.is_empty() {
            return Err(MeshError::Empty(path.display().to_string()));
        }

        log::info!(
            "Loaded mesh {} ({} parts, {} vertices)",
            path.display(),
            parts.len(),
            vertex_count
        );

        Ok(Self {
            parts,
            vertex_count,
        })
    }

    /// Total vertex count across all parts
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Issue draw calls for every part
    ///
    /// The pipeline and bind groups must already be set on the pass.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for part in &self.parts {
            render_pass.set_vertex_buffer(0, part.vertex_buffer.slice(..));
            render_pass.set_index_buffer(part.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..part.index_count, 0, 0..1);
        }
    }
}

/// Area-weighted vertex normals from triangle geometry
fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    use arachne_math::Vec3;

    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let a = Vec3::from(positions[tri[0] as usize]);
        let b = Vec3::from(positions[tri[1] as usize]);
        let c = Vec3::from(positions[tri[2] as usize]);
        // Unnormalized cross product weights by triangle area
        let face = (b - a).cross(c - a);
        for &i in tri {
            normals[i as usize] += face;
        }
    }
    normals.iter().map(|n| n.normalized().to_array()).collect()
}

/// Owns all GPU meshes and hands out stable keys
pub struct MeshRegistry {
    meshes: SlotMap<MeshKey, Mesh>,
}

impl MeshRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            meshes: SlotMap::with_key(),
        }
    }

    /// Load an OBJ file and register it
    pub fn load(&mut self, device: &wgpu::Device, path: &Path) -> Result<MeshKey, MeshError> {
        let mesh = Mesh::load_obj(device, path)?;
        Ok(self.meshes.insert(mesh))
    }

    /// Look up a mesh by key
    pub fn get(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    /// Number of registered meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl Default for MeshRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_stride() {
        let layout = MeshVertex::layout();
        assert_eq!(layout.array_stride, std::mem::size_of::<MeshVertex>() as u64);
        assert_eq!(layout.attributes.len(), 2);
    }

    #[test]
    fn test_compute_normals_flat_triangle() {
        // Counter-clockwise triangle in the XY plane faces +Z
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let indices = [0u32, 1, 2];
        let normals = compute_normals(&positions, &indices);
        for n in normals {
            assert!((n[2] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_compute_normals_unreferenced_vertex() {
        let positions = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            // Dangling vertex referenced by no face
            [5.0, 5.0, 5.0],
        ];
        let indices = [0u32, 1, 2];
        let normals = compute_normals(&positions, &indices);
        assert_eq!(normals.len(), 4);
        assert_eq!(normals[3], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mesh_error_display() {
        let err = MeshError::Empty("models/spider.obj".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("no geometry"));
        assert!(msg.contains("models/spider.obj"));
    }
}
