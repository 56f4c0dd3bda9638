use rand::Rng;

use crate::particle_engine::{ModifierContext, Particle, ParticleModifier};

/// Fondu linéaire de l'alpha ; la particule meurt quand elle devient invisible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaModifier {
    /// Alpha perdu par seconde. `<= 0` : pas de fondu.
    pub slope: f32,
    pub initial_value: f32,
    pub randomize_initial: bool,
}

impl Default for AlphaModifier {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl AlphaModifier {
    pub fn new(slope: f32) -> Self {
        Self {
            slope,
            initial_value: 1.0,
            randomize_initial: false,
        }
    }

    pub fn with_initial_value(mut self, initial_value: f32) -> Self {
        self.initial_value = initial_value;
        self
    }

    /// Alpha initial tiré uniformément dans `[0, 1)` à chaque spawn.
    pub fn randomized(mut self) -> Self {
        self.randomize_initial = true;
        self
    }
}

impl ParticleModifier for AlphaModifier {
    fn name(&self) -> &str {
        "alpha"
    }

    fn on_spawn(&mut self, ctx: &mut ModifierContext, particle: &mut Particle) {
        let initial = if self.randomize_initial {
            ctx.rng.random::<f32>()
        } else {
            self.initial_value
        };
        particle.tint.w = initial.clamp(0.0, 1.0);
    }

    fn on_update(&mut self, ctx: &mut ModifierContext, particle: &mut Particle) {
        if self.slope <= 0.0 {
            return;
        }
        particle.tint.w = (particle.tint.w - self.slope * ctx.dt()).clamp(0.0, 1.0);
        if particle.tint.w < f32::EPSILON {
            particle.kill();
        }
    }
}
