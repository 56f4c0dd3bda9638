#![allow(dead_code)]

use glam::Mat4;
use sprite_particles::renderer_engine::{
    BufferHandle, Color, GpuBackend, RenderError, Resolution, SpriteBatch, Texture2D,
    TextureFactory, Vertex2, VertexAttribute,
};
use std::cell::Cell;
use std::mem;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Un appel reçu par le [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCall {
    CreateVertexBuffer { handle: u32, bytes: usize },
    CreateIndexBuffer { handle: u32, indices: Vec<u32> },
    Upload { handle: u32, vertices: Vec<Vertex2> },
    BindAttribute { handle: u32, attribute: VertexAttribute },
    BindTexture(Texture2D),
    SetViewProjection(Mat4),
    DrawIndexed { handle: u32, index_count: usize },
    Release(u32),
}

/// Backend sans GPU : enregistre chaque appel, dans l'ordre.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<GpuCall>,
    next_handle: u32,
    /// Fait échouer toute allocation (simule `GL_OUT_OF_MEMORY`).
    pub fail_allocation: bool,
}

impl RecordingBackend {
    pub fn failing() -> Self {
        Self {
            fail_allocation: true,
            ..Default::default()
        }
    }

    fn allocate(&mut self, bytes: usize) -> Result<u32, RenderError> {
        if self.fail_allocation {
            return Err(RenderError::BufferAllocation {
                bytes,
                reason: "GL_OUT_OF_MEMORY".into(),
            });
        }
        self.next_handle += 1;
        Ok(self.next_handle)
    }

    /// Nombre d'indices de chaque draw call.
    pub fn draw_calls(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GpuCall::DrawIndexed { index_count, .. } => Some(*index_count),
                _ => None,
            })
            .collect()
    }

    pub fn bound_textures(&self) -> Vec<Texture2D> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GpuCall::BindTexture(texture) => Some(*texture),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<&[Vertex2]> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GpuCall::Upload { vertices, .. } => Some(vertices.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn index_buffer(&self) -> Option<&[u32]> {
        self.calls.iter().find_map(|call| match call {
            GpuCall::CreateIndexBuffer { indices, .. } => Some(indices.as_slice()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl GpuBackend for RecordingBackend {
    fn create_vertex_buffer(&mut self, byte_capacity: usize) -> Result<BufferHandle, RenderError> {
        let handle = self.allocate(byte_capacity)?;
        self.calls.push(GpuCall::CreateVertexBuffer {
            handle,
            bytes: byte_capacity,
        });
        Ok(BufferHandle(handle))
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<BufferHandle, RenderError> {
        let handle = self.allocate(mem::size_of_val(indices))?;
        self.calls.push(GpuCall::CreateIndexBuffer {
            handle,
            indices: indices.to_vec(),
        });
        Ok(BufferHandle(handle))
    }

    fn upload_vertices(&mut self, buffer: BufferHandle, bytes: &[u8]) {
        let vertices = bytes
            .chunks_exact(mem::size_of::<Vertex2>())
            .map(bytemuck::pod_read_unaligned::<Vertex2>)
            .collect();
        self.calls.push(GpuCall::Upload {
            handle: buffer.0,
            vertices,
        });
    }

    fn bind_attribute(&mut self, buffer: BufferHandle, attribute: VertexAttribute) {
        self.calls.push(GpuCall::BindAttribute {
            handle: buffer.0,
            attribute,
        });
    }

    fn bind_texture(&mut self, texture: &Texture2D) {
        self.calls.push(GpuCall::BindTexture(*texture));
    }

    fn set_view_projection(&mut self, view_projection: &Mat4) {
        self.calls.push(GpuCall::SetViewProjection(*view_projection));
    }

    fn draw_indexed(&mut self, index_buffer: BufferHandle, index_count: usize) {
        self.calls.push(GpuCall::DrawIndexed {
            handle: index_buffer.0,
            index_count,
        });
    }

    fn release_buffer(&mut self, buffer: BufferHandle) {
        self.calls.push(GpuCall::Release(buffer.0));
    }
}

/// Batch 640×480 sur un backend d'enregistrement, appels de création effacés.
pub fn recording_batch(max_quads: usize) -> SpriteBatch<RecordingBackend> {
    let mut batch = SpriteBatch::new(
        RecordingBackend::default(),
        Resolution::new(640, 480),
        max_quads,
    )
    .expect("recording backend never fails");
    batch.backend_mut().clear();
    batch
}

/// Fabrique de textures factices : ids GPU 1000, 1001… et compte les créations.
#[derive(Debug, Default)]
pub struct CountingTextureFactory {
    pub created: Cell<u32>,
}

impl TextureFactory for CountingTextureFactory {
    fn create_solid(&self, width: u32, height: u32, _color: Color) -> Texture2D {
        let n = self.created.get();
        self.created.set(n + 1);
        Texture2D::from_gpu(1000 + n, width, height)
    }
}
