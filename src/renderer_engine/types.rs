use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use memoffset::offset_of;
use std::mem;

/// Couleur RGBA flottante.
pub type Color = glam::Vec4;

/// Sommet envoyé au GPU par le `SpriteBatch`.
///
/// Le layout est un contrat avec le vertex shader du batch
/// (cf. `shader::SPRITE_VERTEX_SHADER`) : le modifier implique de modifier
/// les deux côtés.
///
/// # Attributs GPU
///
/// | Location | Type   | Champ       | Offset |
/// |:--------:|:-------|:------------|:------:|
/// | `0`      | `vec3` | `position`  | 0      |
/// | `1`      | `vec2` | `tex_coord` | 12     |
/// | `2`      | `vec4` | `color`     | 20     |
///
/// **Stride total** : `9 × f32 = 36 octets`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex2 {
    /// Position écran (x, y) et profondeur (z).
    pub position: [f32; 3],

    /// Coordonnées de texture normalisées.
    pub tex_coord: [f32; 2],

    /// Teinte multipliée par le texel.
    pub color: [f32; 4],
}

impl Vertex2 {
    pub const POSITION_SLOT: u32 = 0;
    pub const TEX_COORD_SLOT: u32 = 1;
    pub const COLOR_SLOT: u32 = 2;

    pub fn new(position: Vec3, tex_coord: Vec2, color: Color) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: tex_coord.to_array(),
            color: color.to_array(),
        }
    }

    /// Les trois attributs entrelacés, dans l'ordre des locations du shader.
    pub fn attributes() -> [VertexAttribute; 3] {
        let stride = mem::size_of::<Self>();
        [
            VertexAttribute {
                slot: Self::POSITION_SLOT,
                components: 3,
                stride,
                offset: offset_of!(Self, position),
            },
            VertexAttribute {
                slot: Self::TEX_COORD_SLOT,
                components: 2,
                stride,
                offset: offset_of!(Self, tex_coord),
            },
            VertexAttribute {
                slot: Self::COLOR_SLOT,
                components: 4,
                stride,
                offset: offset_of!(Self, color),
            },
        ]
    }
}

/// Description d'un attribut `f32` entrelacé dans un vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub slot: u32,
    pub components: i32,
    pub stride: usize,
    pub offset: usize,
}

/// Rectangle en pixels (origine en haut à gauche).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Taille de la zone de rendu, en pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Vrai si le point (x, y) est dans `[0, width) × [0, height)`. Le z est ignoré.
    pub fn contains(&self, position: Vec3) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x < self.width as f32
            && position.y < self.height as f32
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_shader_contract() {
        assert_eq!(mem::size_of::<Vertex2>(), 36);

        let [pos, tex, col] = Vertex2::attributes();
        assert_eq!((pos.slot, pos.components, pos.offset), (0, 3, 0));
        assert_eq!((tex.slot, tex.components, tex.offset), (1, 2, 12));
        assert_eq!((col.slot, col.components, col.offset), (2, 4, 20));
        assert!([pos, tex, col].iter().all(|a| a.stride == 36));
    }

    #[test]
    fn test_vertex_casts_to_bytes() {
        let v = Vertex2::new(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.5, 0.25), Color::ONE);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 36);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.5, 0.25, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_resolution_contains_is_half_open() {
        let res = Resolution::new(640, 480);
        assert!(res.contains(Vec3::new(320.0, 240.0, 0.0)));
        assert!(res.contains(Vec3::new(0.0, 0.0, 0.0)));
        assert!(!res.contains(Vec3::new(-5.0, 10.0, 0.0)));
        assert!(!res.contains(Vec3::new(640.0, 10.0, 0.0)));
        assert!(!res.contains(Vec3::new(10.0, 480.0, 0.0)));
        // z n'intervient pas
        assert!(res.contains(Vec3::new(10.0, 10.0, -100.0)));
    }

    #[test]
    fn test_rect_accessors() {
        let r = Rect::from_position_size(Vec2::new(4.0, 8.0), Vec2::new(16.0, 32.0));
        assert_eq!(r, Rect::new(4.0, 8.0, 16.0, 32.0));
        assert_eq!(r.position(), Vec2::new(4.0, 8.0));
        assert_eq!(r.size(), Vec2::new(16.0, 32.0));
    }
}
