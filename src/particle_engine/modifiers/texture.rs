use rand::seq::IndexedRandom;

use crate::particle_engine::{ModifierContext, Particle, ParticleModifier};
use crate::renderer_engine::Texture2D;

/// Texture tirée au hasard parmi une liste. Liste vide : la particule garde la sienne.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureModifier {
    pub textures: Vec<Texture2D>,
    /// Re-tire la texture à chaque tick (effet scintillant).
    pub always_randomize: bool,
}

impl TextureModifier {
    pub fn new(textures: Vec<Texture2D>) -> Self {
        Self {
            textures,
            always_randomize: false,
        }
    }

    pub fn always_randomized(mut self) -> Self {
        self.always_randomize = true;
        self
    }

    fn pick(&self, ctx: &mut ModifierContext, particle: &mut Particle) {
        if let Some(texture) = self.textures.choose(&mut *ctx.rng) {
            particle.texture = *texture;
        }
    }
}

impl ParticleModifier for TextureModifier {
    fn name(&self) -> &str {
        "texture"
    }

    fn on_spawn(&mut self, ctx: &mut ModifierContext, particle: &mut Particle) {
        self.pick(ctx, particle);
    }

    fn on_update(&mut self, ctx: &mut ModifierContext, particle: &mut Particle) {
        if self.always_randomize {
            self.pick(ctx, particle);
        }
    }
}
