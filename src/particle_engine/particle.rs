use glam::Vec3;

use crate::renderer_engine::{Color, Texture2D};

/// Une particule : état pur, muté par l'émetteur et ses modificateurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// x, y en pixels écran ; z sert de profondeur au dessin.
    pub position: Vec3,
    pub texture: Texture2D,
    pub tint: Color,
    /// Pixels par seconde.
    pub speed: f32,
    /// Secondes.
    pub lifetime: f32,
    /// Secondes.
    pub age: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            texture: Texture2D::transparent(),
            tint: Color::ONE,
            speed: 0.0,
            lifetime: 0.0,
            age: 0.0,
        }
    }
}

impl Particle {
    pub fn spawned(position: Vec3, speed: f32, lifetime: f32) -> Self {
        Self {
            position,
            speed,
            lifetime,
            ..Default::default()
        }
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }

    /// Marque la particule comme expirée ; elle sera retirée au prochain `update`.
    pub fn kill(&mut self) {
        self.age = self.age.max(self.lifetime);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_particle() {
        let p = Particle::default();
        assert_eq!(p.texture, Texture2D::transparent());
        assert_eq!(p.tint, Color::ONE);
        // durée de vie nulle : déjà expirée
        assert!(!p.is_alive());
    }

    #[test]
    fn test_kill_expires_particle() {
        let mut p = Particle::spawned(Vec3::new(1.0, 2.0, 0.0), 10.0, 2.0);
        assert!(p.is_alive());
        p.age = 0.5;
        p.kill();
        assert!(!p.is_alive());
        assert_eq!(p.age, 2.0);
    }
}
