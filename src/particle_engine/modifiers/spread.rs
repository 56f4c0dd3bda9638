use glam::Vec3;
use rand::Rng;

use crate::particle_engine::{ModifierContext, Particle, ParticleModifier};

/// Décale la position de spawn sur x et/ou y, d'une distance aléatoire
/// dans `[min, max]` et de signe aléatoire par axe.
///
/// Tirages, dans l'ordre : signe x (si activé), signe y (si activé), distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadModifier {
    pub x: bool,
    pub y: bool,
    pub min: f32,
    pub max: f32,
}

impl SpreadModifier {
    pub fn new(x: bool, y: bool, min: f32, max: f32) -> Self {
        Self { x, y, min, max }
    }

    pub fn both(max: f32) -> Self {
        Self::new(true, true, 0.0, max)
    }
}

impl Default for SpreadModifier {
    fn default() -> Self {
        Self::both(50.0)
    }
}

impl ParticleModifier for SpreadModifier {
    fn name(&self) -> &str {
        "spread"
    }

    fn on_spawn(&mut self, ctx: &mut ModifierContext, particle: &mut Particle) {
        if !self.x && !self.y {
            return;
        }
        let mut sign = |enabled: bool| match enabled {
            true if ctx.rng.random::<bool>() => 1.0,
            true => -1.0,
            false => 0.0,
        };
        let direction = Vec3::new(sign(self.x), sign(self.y), 0.0);
        let distance = self.min + (self.max - self.min) * ctx.rng.random::<f32>();
        particle.position += direction * distance;
    }
}
