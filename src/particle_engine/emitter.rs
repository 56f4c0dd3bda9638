use generational_arena::{Arena, Index};
use glam::Vec3;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::particle_engine::{
    EmitterConfig, EmitterState, GameTime, ModifierContext, Particle, ParticleModifier,
};
use crate::renderer_engine::{GpuBackend, RenderError, SpriteBatch, SpriteDraw};

/// Référence vers un modificateur installé sur un émetteur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifierHandle(Index);

/// Émetteur de particules.
///
/// Possède ses particules, sa chaîne de modificateurs et son générateur
/// aléatoire. Le taux d'émission est continu (`amount` particules/seconde) :
/// un accumulateur fractionnaire convertit ce taux en spawns discrets.
pub struct ParticleEmitter {
    position: Vec3,
    amount: f32,
    speed: f32,
    lifetime: f32,

    running: bool,
    accumulator: f32,
    duration: f32,
    total_duration: f32,
    time_limit: Option<f32>,

    particles: Vec<Particle>,
    modifiers: Arena<Box<dyn ParticleModifier>>,
    modifier_order: Vec<Index>, // ordre d'application de la chaîne
    rng: StdRng,

    sort_interval: Duration,
    last_sort: Option<Duration>,
    freeze_when_stopped: bool,
    spawned_total: u64,
}

impl ParticleEmitter {
    pub fn new(position: Vec3) -> Self {
        Self::from_config(&EmitterConfig::default(), position)
    }

    pub fn from_config(config: &EmitterConfig, position: Vec3) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            position,
            amount: config.amount,
            speed: config.speed,
            lifetime: config.lifetime,
            running: false,
            accumulator: 0.0,
            duration: 0.0,
            total_duration: 0.0,
            time_limit: None,
            particles: Vec::new(),
            modifiers: Arena::new(),
            modifier_order: Vec::new(),
            rng,
            sort_interval: Duration::from_millis(config.sort_interval_ms),
            last_sort: None,
            freeze_when_stopped: config.freeze_when_stopped,
            spawned_total: 0,
        }
    }

    /// Remplace le générateur par un générateur déterministe.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_amount(&mut self, amount: f32) -> &mut Self {
        self.amount = amount;
        self
    }

    pub fn set_speed(&mut self, speed: f32) -> &mut Self {
        self.speed = speed;
        self
    }

    pub fn set_lifetime(&mut self, lifetime: f32) -> &mut Self {
        self.lifetime = lifetime;
        self
    }

    pub fn set_sort_interval(&mut self, interval: Duration) -> &mut Self {
        self.sort_interval = interval;
        self
    }

    pub fn start(&mut self) -> &mut Self {
        self.duration = 0.0;
        self.running = true;
        debug!("Emitter started at {:?}", self.position);
        self
    }

    pub fn stop(&mut self) -> &mut Self {
        self.running = false;
        self
    }

    /// Arrêt automatique `seconds` après le dernier `start()`. Négatif : désarme.
    pub fn stop_after(&mut self, seconds: f32) -> &mut Self {
        self.time_limit = (seconds >= 0.0).then_some(seconds);
        self
    }

    pub fn add_modifier(&mut self, modifier: Box<dyn ParticleModifier>) -> ModifierHandle {
        trace!("Adding modifier '{}'", modifier.name());
        let index = self.modifiers.insert(modifier);
        self.modifier_order.push(index);
        ModifierHandle(index)
    }

    pub fn remove_modifier(&mut self, handle: ModifierHandle) -> Option<Box<dyn ParticleModifier>> {
        let modifier = self.modifiers.remove(handle.0)?;
        self.modifier_order.retain(|&index| index != handle.0);
        Some(modifier)
    }

    pub fn modifier_count(&self) -> usize {
        self.modifier_order.len()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Secondes depuis le dernier `start()`.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Secondes de simulation (en marche) depuis la création.
    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    /// Nombre de particules émises depuis la création.
    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Particules vivantes (`age < lifetime`).
    pub fn live_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn particle_count(&self) -> usize {
        self.live_particles().count()
    }

    pub fn state(&self) -> EmitterState {
        EmitterState {
            position: self.position,
            amount: self.amount,
            speed: self.speed,
            lifetime: self.lifetime,
            running: self.running,
            duration: self.duration,
            total_duration: self.total_duration,
            particle_count: self.particle_count(),
        }
    }

    /// Avance la simulation d'un tick.
    ///
    /// Les particules expirées au tick précédent sont retirées en premier, que
    /// l'émetteur tourne ou non. Un émetteur arrêté continue de faire vieillir
    /// ses particules (elles s'éteignent) mais n'en émet plus, sauf avec
    /// `freeze_when_stopped` où tout est figé.
    pub fn update(&mut self, time: &GameTime) {
        let dt = time.delta_secs();

        self.particles.retain(Particle::is_alive);

        if !self.running && self.freeze_when_stopped {
            return;
        }

        let state = self.state();
        let mut ctx = ModifierContext {
            time,
            emitter: &state,
            rng: &mut self.rng,
        };

        for particle in self.particles.iter_mut() {
            particle.age += dt;
            for &index in &self.modifier_order {
                if let Some(modifier) = self.modifiers.get_mut(index) {
                    modifier.on_update(&mut ctx, particle);
                }
            }
        }

        if !self.running {
            return;
        }

        self.accumulator += self.amount.max(0.0) * dt;
        let mut spawned = 0;
        while self.accumulator >= 1.0 {
            let mut particle = Particle::spawned(self.position, self.speed, self.lifetime);
            for &index in &self.modifier_order {
                if let Some(modifier) = self.modifiers.get_mut(index) {
                    modifier.on_spawn(&mut ctx, &mut particle);
                }
            }
            self.particles.push(particle);
            self.accumulator -= 1.0;
            spawned += 1;
        }
        self.spawned_total += spawned;

        if spawned > 0 && self.sort_due(time.total) {
            // ordre décroissant d'identité : regroupe les textures pour le batch
            self.particles
                .sort_unstable_by(|a, b| b.texture.id().cmp(&a.texture.id()));
            self.last_sort = Some(time.total);
        }

        self.duration += dt;
        self.total_duration += dt;

        if let Some(limit) = self.time_limit {
            if self.duration >= limit {
                debug!("Emitter auto-stop after {:.3}s", self.duration);
                self.stop();
            }
        }
    }

    fn sort_due(&self, now: Duration) -> bool {
        match self.last_sort {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.sort_interval,
        }
    }

    /// Soumet une quad par particule vivante et visible.
    ///
    /// Ouvre une session sur le batch (caméra interne) si aucune n'est ouverte,
    /// et ne ferme que celle qu'il a ouverte. Retourne le nombre de quads soumises.
    pub fn draw<B: GpuBackend>(&self, batch: &mut SpriteBatch<B>) -> Result<usize, RenderError> {
        let opened = batch.try_begin_default();
        let resolution = batch.resolution();

        let mut submitted = 0;
        for particle in self.live_particles() {
            if !resolution.contains(particle.position) {
                continue;
            }
            let sprite = SpriteDraw {
                depth: particle.position.z,
                ..SpriteDraw::at(particle.texture, particle.position.truncate(), particle.tint)
            };
            batch.draw(&sprite)?;
            submitted += 1;
        }

        if opened {
            batch.end()?;
        }
        Ok(submitted)
    }
}

// ==================================
// Helpers pour tests
// ==================================
#[cfg(any(test, feature = "test_helpers"))]
pub trait ParticleEmitterTestHelpers {
    fn accumulator(&self) -> f32;
    /// Particules stockées, y compris celles expirées pas encore retirées.
    fn stored_particle_count(&self) -> usize;
    fn inject_particle(&mut self, particle: Particle);
    fn particles(&self) -> &[Particle];
}

#[cfg(any(test, feature = "test_helpers"))]
impl ParticleEmitterTestHelpers for ParticleEmitter {
    fn accumulator(&self) -> f32 {
        self.accumulator
    }

    fn stored_particle_count(&self) -> usize {
        self.particles.len()
    }

    fn inject_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(dt: f32) -> GameTime {
        GameTime::from_secs(dt, 0.0)
    }

    #[test]
    fn test_accumulator_stays_below_one() {
        let mut emitter = ParticleEmitter::new(Vec3::ZERO).with_seed(1);
        emitter.set_amount(37.0).start();
        for _ in 0..100 {
            emitter.update(&tick(0.013));
            assert!((0.0..1.0).contains(&emitter.accumulator()));
        }
    }

    #[test]
    fn test_negative_amount_never_spawns() {
        let mut emitter = ParticleEmitter::new(Vec3::ZERO);
        emitter.set_amount(-100.0).start();
        emitter.update(&tick(1.0));
        assert_eq!(emitter.accumulator(), 0.0);
        assert_eq!(emitter.spawned_total(), 0);
    }

    #[test]
    fn test_remove_modifier_returns_it_once() {
        let mut emitter = ParticleEmitter::new(Vec3::ZERO);
        let a = emitter.add_modifier(Box::new(crate::particle_engine::AlphaModifier::default()));
        let b = emitter.add_modifier(Box::new(crate::particle_engine::SpreadModifier::default()));
        assert_eq!(emitter.modifier_count(), 2);

        let removed = emitter.remove_modifier(a).unwrap();
        assert_eq!(removed.name(), "alpha");
        assert!(emitter.remove_modifier(a).is_none());
        assert_eq!(emitter.modifier_count(), 1);
        assert!(emitter.remove_modifier(b).is_some());
    }

    #[test]
    fn test_stop_after_negative_disarms() {
        let mut emitter = ParticleEmitter::new(Vec3::ZERO);
        emitter.stop_after(0.5).stop_after(-1.0).start();
        for _ in 0..10 {
            emitter.update(&tick(0.1));
        }
        assert!(emitter.is_running());
        assert!((emitter.duration() - 1.0).abs() < 1e-4);
    }
}
