use glam::Mat4;

use crate::renderer_engine::{Color, RenderError, Texture2D, VertexAttribute};

/// Identifiant opaque d'un buffer alloué par un [`GpuBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Interface minimale entre le batcher et l'API graphique.
///
/// Le `SpriteBatch` ne parle jamais directement à OpenGL : il passe par ce
/// trait, ce qui permet d'injecter `GlBackend` en production et un backend
/// d'enregistrement dans les tests (aucun contexte GL requis).
///
/// Toutes les méthodes sont appelées depuis le thread qui possède le contexte.
pub trait GpuBackend {
    /// Alloue un vertex buffer de `byte_capacity` octets, usage "stream"
    /// (réécrit à chaque frame).
    fn create_vertex_buffer(&mut self, byte_capacity: usize) -> Result<BufferHandle, RenderError>;

    /// Alloue et remplit une fois pour toutes l'index buffer statique.
    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<BufferHandle, RenderError>;

    /// Ré-envoie l'intégralité de `bytes` dans le buffer (pas de mise à jour partielle).
    fn upload_vertices(&mut self, buffer: BufferHandle, bytes: &[u8]);

    /// Décrit un attribut entrelacé du buffer.
    fn bind_attribute(&mut self, buffer: BufferHandle, attribute: VertexAttribute);

    /// Lie la texture sur l'unité 0.
    fn bind_texture(&mut self, texture: &Texture2D);

    /// Positionne l'uniform `MVP`.
    fn set_view_projection(&mut self, view_projection: &Mat4);

    /// Un seul draw call indexé couvrant `index_count` indices.
    fn draw_indexed(&mut self, index_buffer: BufferHandle, index_count: usize);

    /// Libère un buffer. Par défaut, ne fait rien.
    fn release_buffer(&mut self, _buffer: BufferHandle) {}
}

/// Fabrique de textures unies, utilisée par `ColorModifier`.
///
/// Séparée de [`GpuBackend`] car elle est partagée (`Rc`) entre modificateurs
/// alors que le backend appartient au `SpriteBatch`.
pub trait TextureFactory {
    fn create_solid(&self, width: u32, height: u32, color: Color) -> Texture2D;
}
