use bytemuck::Pod;
use log::{debug, info};
use std::marker::PhantomData;
use std::mem;

use crate::renderer_engine::{BufferHandle, GpuBackend, RenderError, VertexAttribute};
use crate::utils::human_bytes::HumanBytes;

/// Vertex buffer en écriture seule, ré-uploadé en entier à chaque flush.
///
/// Le buffer ne garde aucune géométrie côté CPU : l'appelant fournit le
/// tableau complet à chaque `upload`. Si ce tableau dépasse la capacité
/// courante, le buffer grandit (il ne rétrécit jamais).
#[derive(Debug)]
pub struct StreamBuffer<T: Pod> {
    handle: BufferHandle,
    capacity: usize,
    _element: PhantomData<T>,
}

impl<T: Pod> StreamBuffer<T> {
    /// Alloue `capacity` éléments côté GPU.
    ///
    /// Un échec d'allocation est fatal : le renderer ne peut rien faire sans ce buffer.
    pub fn new<B: GpuBackend>(backend: &mut B, capacity: usize) -> Result<Self, RenderError> {
        let bytes = capacity * Self::element_size();
        let handle = backend.create_vertex_buffer(bytes)?;
        info!(
            "🎮 Allocating stream buffer: {} elements × {} B → {}",
            capacity,
            Self::element_size(),
            bytes.human_bytes()
        );

        Ok(Self {
            handle,
            capacity,
            _element: PhantomData,
        })
    }

    pub fn element_size() -> usize {
        mem::size_of::<T>()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn byte_capacity(&self) -> usize {
        self.capacity * Self::element_size()
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Ré-envoie tout `data` (hint "rewritten every frame").
    pub fn upload<B: GpuBackend>(&mut self, backend: &mut B, data: &[T]) {
        if data.len() > self.capacity {
            debug!(
                "Stream buffer {:?} grows {} → {} elements",
                self.handle,
                self.capacity,
                data.len()
            );
            self.capacity = data.len();
        }
        backend.upload_vertices(self.handle, bytemuck::cast_slice(data));
    }

    /// Déclare un attribut `f32` entrelacé ; le stride est la taille de `T`.
    pub fn bind_attribute<B: GpuBackend>(
        &self,
        backend: &mut B,
        slot: u32,
        component_count: i32,
        byte_offset: usize,
    ) {
        backend.bind_attribute(
            self.handle,
            VertexAttribute {
                slot,
                components: component_count,
                stride: Self::element_size(),
                offset: byte_offset,
            },
        );
    }

    pub fn release<B: GpuBackend>(self, backend: &mut B) {
        backend.release_buffer(self.handle);
    }
}
