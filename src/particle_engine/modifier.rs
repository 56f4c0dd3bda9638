use glam::Vec3;
use rand::rngs::StdRng;

use crate::particle_engine::{GameTime, Particle};

/// Instantané en lecture seule de l'émetteur qui invoque un modificateur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterState {
    pub position: Vec3,
    /// Particules par seconde.
    pub amount: f32,
    pub speed: f32,
    pub lifetime: f32,
    pub running: bool,
    /// Secondes depuis le dernier `start()`.
    pub duration: f32,
    /// Secondes depuis la création.
    pub total_duration: f32,
    pub particle_count: usize,
}

/// Ce que reçoit chaque hook : le temps, l'émetteur appelant et son générateur aléatoire.
///
/// Le générateur est celui de l'émetteur : tous les modificateurs d'une chaîne
/// consomment la même séquence, dans l'ordre de la chaîne.
pub struct ModifierContext<'a> {
    pub time: &'a GameTime,
    pub emitter: &'a EmitterState,
    pub rng: &'a mut StdRng,
}

impl ModifierContext<'_> {
    /// Delta du tick, en secondes.
    pub fn dt(&self) -> f32 {
        self.time.delta_secs()
    }
}

/// Transformation composable d'une particule.
///
/// `on_spawn` est appelé une fois, juste après la création de la particule ;
/// `on_update` à chaque tick, après le vieillissement. Les deux ne font rien
/// par défaut. L'ordre de la chaîne compte.
pub trait ParticleModifier {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn on_spawn(&mut self, _ctx: &mut ModifierContext, _particle: &mut Particle) {}

    fn on_update(&mut self, _ctx: &mut ModifierContext, _particle: &mut Particle) {}
}
