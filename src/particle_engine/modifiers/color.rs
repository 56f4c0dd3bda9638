use std::rc::Rc;

use crate::particle_engine::{ModifierContext, Particle, ParticleModifier};
use crate::renderer_engine::{Color, Texture2D, TextureFactory};

/// Donne aux particules une texture unie `width × height` de couleur `color`.
///
/// La texture est créée au premier spawn puis partagée par toutes les particules.
pub struct ColorModifier {
    width: u32,
    height: u32,
    color: Color,
    factory: Rc<dyn TextureFactory>,
    texture: Option<Texture2D>,
}

impl ColorModifier {
    pub fn new(width: u32, height: u32, color: Color, factory: Rc<dyn TextureFactory>) -> Self {
        Self {
            width,
            height,
            color,
            factory,
            texture: None,
        }
    }

    /// Texture créée, si un spawn a déjà eu lieu.
    pub fn texture(&self) -> Option<Texture2D> {
        self.texture
    }
}

impl ParticleModifier for ColorModifier {
    fn name(&self) -> &str {
        "color"
    }

    fn on_spawn(&mut self, _ctx: &mut ModifierContext, particle: &mut Particle) {
        let (factory, width, height, color) = (&self.factory, self.width, self.height, self.color);
        particle.texture = *self
            .texture
            .get_or_insert_with(|| factory.create_solid(width, height, color));
    }
}
