use crate::renderer_engine::Rect;

/// Identité d'une texture.
///
/// Les deux textures 1×1 par défaut sont des variantes dédiées : elles n'ont
/// pas de nom GL tant que le backend ne les a pas créées (à la demande).
/// L'ordre (`Ord`) sert au tri des particules par texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureId {
    /// 1×1 totalement transparente (texture par défaut d'une particule).
    Transparent,
    /// 1×1 blanche opaque.
    Dot,
    /// Texture GL (nom retourné par `glGenTextures`).
    Gpu(u32),
}

/// Handle léger vers une texture GPU. Ne possède pas la ressource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture2D {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture2D {
    pub const fn transparent() -> Self {
        Self {
            id: TextureId::Transparent,
            width: 1,
            height: 1,
        }
    }

    pub const fn dot() -> Self {
        Self {
            id: TextureId::Dot,
            width: 1,
            height: 1,
        }
    }

    pub const fn from_gpu(name: u32, width: u32, height: u32) -> Self {
        Self {
            id: TextureId::Gpu(name),
            width,
            height,
        }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rectangle couvrant toute la texture.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Nom GL, absent pour les textures par défaut.
    pub fn gpu_name(&self) -> Option<u32> {
        match self.id {
            TextureId::Gpu(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self.id, TextureId::Gpu(_))
    }
}

impl Default for Texture2D {
    fn default() -> Self {
        Self::transparent()
    }
}
