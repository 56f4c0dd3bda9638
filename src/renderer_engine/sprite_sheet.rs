use glam::Vec2;

use crate::renderer_engine::{Color, Rect, SpriteDraw, Texture2D};

/// Découpage d'une texture en tuiles de taille fixe, indexées ligne par ligne.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    texture: Texture2D,
    tile_width: u32,
    tile_height: u32,
    tiles_x: u32,
    tiles_y: u32,
}

impl SpriteSheet {
    pub fn new(texture: Texture2D, tile_width: u32, tile_height: u32) -> Self {
        let tile_width = tile_width.max(1);
        let tile_height = tile_height.max(1);
        Self {
            texture,
            tile_width,
            tile_height,
            tiles_x: texture.width() / tile_width,
            tiles_y: texture.height() / tile_height,
        }
    }

    pub fn square(texture: Texture2D, tile_size: u32) -> Self {
        Self::new(texture, tile_size, tile_size)
    }

    pub fn texture(&self) -> Texture2D {
        self.texture
    }

    pub fn tile_size(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    pub fn len(&self) -> usize {
        (self.tiles_x * self.tiles_y) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rectangle source (en pixels) de la tuile `(x, y)`.
    pub fn tile_at(&self, x: u32, y: u32) -> Option<Rect> {
        if x >= self.tiles_x || y >= self.tiles_y {
            return None;
        }
        Some(Rect::new(
            (x * self.tile_width) as f32,
            (y * self.tile_height) as f32,
            self.tile_width as f32,
            self.tile_height as f32,
        ))
    }

    /// Tuile d'indice `index` (x = index % tiles_x, y = index / tiles_x).
    pub fn tile(&self, index: usize) -> Option<Rect> {
        if self.tiles_x == 0 {
            return None;
        }
        let tiles_x = self.tiles_x as usize;
        self.tile_at((index % tiles_x) as u32, (index / tiles_x) as u32)
    }

    /// Requête de dessin d'une tuile à sa taille native.
    pub fn sprite(&self, index: usize, position: Vec2, tint: Color) -> Option<SpriteDraw> {
        let source = self.tile(index)?;
        Some(SpriteDraw {
            source: Some(source),
            dest: Rect::from_position_size(position, source.size()),
            ..SpriteDraw::at(self.texture, position, tint)
        })
    }
}
