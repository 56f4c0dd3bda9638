use glam::Vec3;

use crate::particle_engine::{ModifierContext, Particle, ParticleModifier};

/// Déplacement à vitesse constante (`particle.speed`) dans une direction fixe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionModifier {
    direction: Vec3,
}

impl DirectionModifier {
    /// Chaque composante est ramenée dans `[-1, 1]`, puis le vecteur est normalisé
    /// (le vecteur nul reste nul).
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.clamp(Vec3::NEG_ONE, Vec3::ONE).normalize_or_zero(),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        *self = Self::new(direction);
    }
}

impl ParticleModifier for DirectionModifier {
    fn name(&self) -> &str {
        "direction"
    }

    fn on_update(&mut self, ctx: &mut ModifierContext, particle: &mut Particle) {
        particle.position += self.direction * particle.speed * ctx.dt();
    }
}
