use derive_builder::Builder;
use glam::{Mat2, Mat4, Vec2};
use log::{debug, trace};

use crate::renderer_engine::{
    BufferHandle, Camera, Color, GpuBackend, OrthographicCamera, Rect, RenderError, Resolution,
    StreamBuffer, Texture2D, Vertex2,
};

/// Nombre de quads par défaut avant un flush forcé.
pub const DEFAULT_MAX_QUADS: usize = 2048;

/// Une requête de dessin : un quad texturé, transformé et teinté.
///
/// Construite soit via [`SpriteDrawBuilder`] (tous les paramètres),
/// soit via [`SpriteDraw::at`] pour le cas courant.
///
/// ```
/// use sprite_particles::renderer_engine::{Rect, SpriteDrawBuilder, Texture2D};
///
/// let sprite = SpriteDrawBuilder::default()
///     .texture(Texture2D::from_gpu(1, 64, 64))
///     .dest(Rect::new(10.0, 10.0, 64.0, 64.0))
///     .rotation(std::f32::consts::FRAC_PI_4)
///     .build()
///     .unwrap();
/// assert_eq!(sprite.depth, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct SpriteDraw {
    pub texture: Texture2D,

    /// Zone de la texture en pixels ; toute la texture si absent.
    #[builder(default, setter(strip_option))]
    pub source: Option<Rect>,

    /// Position (coin haut gauche) et taille à l'écran.
    pub dest: Rect,

    #[builder(default = "Color::ONE")]
    pub tint: Color,

    /// Multiplie la taille de `dest`.
    #[builder(default = "Vec2::ONE")]
    pub scale: Vec2,

    /// Décalage des coins, appliqué avant la rotation.
    #[builder(default)]
    pub origin: Vec2,

    #[builder(default)]
    pub depth: f32,

    /// Radians.
    #[builder(default)]
    pub rotation: f32,
}

impl SpriteDraw {
    /// Toute la texture, à sa taille native, sans rotation.
    pub fn at(texture: Texture2D, position: Vec2, tint: Color) -> Self {
        Self {
            texture,
            source: None,
            dest: Rect::from_position_size(
                position,
                Vec2::new(texture.width() as f32, texture.height() as f32),
            ),
            tint,
            scale: Vec2::ONE,
            origin: Vec2::ZERO,
            depth: 0.0,
            rotation: 0.0,
        }
    }
}

/// Compteurs d'une session `begin`/`end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub draw_calls: usize,
    pub quads: usize,
    /// Flushs provoqués par un changement de texture.
    pub texture_flushes: usize,
    /// Flushs provoqués par un buffer plein.
    pub capacity_flushes: usize,
}

/// Batcher de quads texturés.
///
/// Accumule jusqu'à `max_quads` quads partageant la même texture, puis émet
/// un seul draw call indexé. Un flush n'a lieu que sur changement de texture,
/// buffer plein, ou `end()`. L'ordre de soumission est conservé.
pub struct SpriteBatch<B: GpuBackend> {
    backend: B,

    vertex_buffer: StreamBuffer<Vertex2>,
    index_buffer: BufferHandle,
    vertices: Vec<Vertex2>,
    index_count: usize,
    max_quads: usize,

    active: bool,
    view_projection: Mat4,
    internal_camera: OrthographicCamera,
    resolution: Resolution,
    current_texture: Option<Texture2D>,

    stats: BatchStats,
}

/// Indices de `max_quads` quads : deux triangles par quad,
/// `{4i, 4i+1, 4i+2, 4i+1, 4i+3, 4i+2}`.
pub fn quad_indices(max_quads: usize) -> Vec<u32> {
    (0..max_quads as u32)
        .flat_map(|quad| {
            let i = quad * 4;
            [i, i + 1, i + 2, i + 1, i + 3, i + 2]
        })
        .collect()
}

/// Les 4 sommets (haut gauche, haut droit, bas gauche, bas droit) d'une requête.
pub fn quad_vertices(sprite: &SpriteDraw) -> [Vertex2; 4] {
    let texture = sprite.texture;
    let source = sprite.source.unwrap_or_else(|| texture.bounds());

    let tex_size = Vec2::new(texture.width().max(1) as f32, texture.height().max(1) as f32);
    let uv_min = source.position() / tex_size;
    let uv_max = (source.position() + source.size()) / tex_size;

    let size = sprite.dest.size() * sprite.scale;
    let rotation = Mat2::from_angle(sprite.rotation);
    let position = sprite.dest.position();

    let corner = |offset: Vec2, uv: Vec2| {
        let p = position + rotation * (sprite.origin + offset);
        Vertex2::new(p.extend(sprite.depth), uv, sprite.tint)
    };

    [
        corner(Vec2::ZERO, uv_min),
        corner(Vec2::new(size.x, 0.0), Vec2::new(uv_max.x, uv_min.y)),
        corner(Vec2::new(0.0, size.y), Vec2::new(uv_min.x, uv_max.y)),
        corner(size, uv_max),
    ]
}

impl<B: GpuBackend> SpriteBatch<B> {
    pub fn new(mut backend: B, resolution: Resolution, max_quads: usize) -> Result<Self, RenderError> {
        let max_quads = max_quads.max(1);

        let vertex_buffer = StreamBuffer::new(&mut backend, max_quads * 4)?;
        let index_buffer = backend.create_index_buffer(&quad_indices(max_quads))?;
        let internal_camera = OrthographicCamera::from_resolution(resolution);

        debug!(
            "SpriteBatch ready: {} quads max, {}x{}",
            max_quads, resolution.width, resolution.height
        );

        Ok(Self {
            backend,
            vertex_buffer,
            index_buffer,
            vertices: Vec::with_capacity(max_quads * 4),
            index_count: 0,
            max_quads,
            active: false,
            view_projection: internal_camera.view_projection(),
            internal_camera,
            resolution,
            current_texture: None,
            stats: BatchStats::default(),
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn max_quads(&self) -> usize {
        self.max_quads
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn begin(&mut self, camera: &impl Camera) -> Result<(), RenderError> {
        self.begin_with(camera.view_projection())
    }

    /// `begin` avec la caméra orthographique interne (résolution du batch).
    pub fn begin_default(&mut self) -> Result<(), RenderError> {
        self.begin_with(self.internal_camera.view_projection())
    }

    fn begin_with(&mut self, view_projection: Mat4) -> Result<(), RenderError> {
        if self.active {
            return Err(RenderError::BatchAlreadyActive);
        }
        self.active = true;
        self.vertices.clear();
        self.index_count = 0;
        self.view_projection = view_projection;
        self.stats = BatchStats::default();
        Ok(())
    }

    pub fn end(&mut self) -> Result<(), RenderError> {
        if !self.active {
            return Err(RenderError::BatchNotActive("end"));
        }
        self.flush();
        self.active = false;
        trace!("SpriteBatch session closed: {:?}", self.stats);
        Ok(())
    }

    /// Ouvre une session seulement si aucune n'est active.
    /// Retourne `true` si la session a été ouverte par cet appel.
    pub fn try_begin(&mut self, camera: &impl Camera) -> bool {
        !self.active && self.begin(camera).is_ok()
    }

    pub fn try_begin_default(&mut self) -> bool {
        !self.active && self.begin_default().is_ok()
    }

    /// Ferme la session si elle est active. Retourne `true` si elle l'était.
    pub fn try_end(&mut self) -> bool {
        self.active && self.end().is_ok()
    }

    pub fn draw(&mut self, sprite: &SpriteDraw) -> Result<(), RenderError> {
        if !self.active {
            return Err(RenderError::BatchNotActive("draw with"));
        }

        // Une texture par draw call : tout changement force le flush du lot courant
        if let Some(current) = self.current_texture {
            if current.id() != sprite.texture.id() && self.flush() {
                self.stats.texture_flushes += 1;
            }
        }
        self.current_texture = Some(sprite.texture);

        if self.vertices.len() + 4 > self.max_quads * 4 && self.flush() {
            self.stats.capacity_flushes += 1;
        }

        self.vertices.extend_from_slice(&quad_vertices(sprite));
        self.index_count += 6;
        self.stats.quads += 1;
        Ok(())
    }

    /// Upload + un draw call. Retourne `false` si le lot était vide.
    fn flush(&mut self) -> bool {
        if self.index_count == 0 {
            return false;
        }
        let Some(texture) = self.current_texture else {
            return false;
        };

        self.vertex_buffer.upload(&mut self.backend, &self.vertices);
        for attribute in Vertex2::attributes() {
            self.vertex_buffer.bind_attribute(
                &mut self.backend,
                attribute.slot,
                attribute.components,
                attribute.offset,
            );
        }
        self.backend.bind_texture(&texture);
        self.backend.set_view_projection(&self.view_projection);
        self.backend.draw_indexed(self.index_buffer, self.index_count);

        // la texture reste liée : pas de rebind si le prochain quad la partage
        self.vertices.clear();
        self.index_count = 0;
        self.stats.draw_calls += 1;
        true
    }

    /// Libère les buffers GPU et rend le backend.
    pub fn close(mut self) -> B {
        self.backend.release_buffer(self.index_buffer);
        self.vertex_buffer.release(&mut self.backend);
        debug!("SpriteBatch closed.");
        self.backend
    }
}
