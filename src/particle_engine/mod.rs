pub mod types;
pub use self::types::GameTime;

pub mod particle;
pub use self::particle::Particle;

pub mod modifier;
pub use self::modifier::{EmitterState, ModifierContext, ParticleModifier};

pub mod modifiers;
pub use self::modifiers::{
    AlphaModifier, ColorModifier, DirectionModifier, LifetimeMode, LifetimeModifier,
    SpreadModifier, TextureModifier,
};

pub mod config;
pub use self::config::EmitterConfig;

pub mod emitter;
pub use self::emitter::{ModifierHandle, ParticleEmitter};

#[cfg(any(test, feature = "test_helpers"))]
pub use self::emitter::ParticleEmitterTestHelpers;
