use rand::Rng;

use crate::particle_engine::{ModifierContext, Particle, ParticleModifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeMode {
    /// `lifetime += uniform(min, max)`
    RandomAdd,
    /// `lifetime *= uniform(min, max)`
    RandomMultiply,
}

/// Variation aléatoire de la durée de vie au spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifetimeModifier {
    pub mode: LifetimeMode,
    pub min: f32,
    pub max: f32,
}

impl LifetimeModifier {
    pub fn new(mode: LifetimeMode, min: f32, max: f32) -> Self {
        Self { mode, min, max }
    }

    pub fn random_add() -> Self {
        Self::new(LifetimeMode::RandomAdd, 0.0, 1.0)
    }

    pub fn random_multiply() -> Self {
        Self::new(LifetimeMode::RandomMultiply, 0.5, 1.5)
    }

    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

impl ParticleModifier for LifetimeModifier {
    fn name(&self) -> &str {
        "lifetime"
    }

    fn on_spawn(&mut self, ctx: &mut ModifierContext, particle: &mut Particle) {
        // intervalle inversé ou vide : pas de tirage
        let factor = if self.min < self.max {
            ctx.rng.random_range(self.min..=self.max)
        } else {
            self.min
        };
        particle.lifetime = match self.mode {
            LifetimeMode::RandomAdd => particle.lifetime + factor,
            LifetimeMode::RandomMultiply => particle.lifetime * factor,
        }
        .max(0.0);
    }
}
