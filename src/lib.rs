// Renderer engine : batching de quads texturés
pub mod renderer_engine;
pub use renderer_engine::{GpuBackend, RenderError, SpriteBatch, SpriteDraw, Texture2D};

// Particle engine : émetteurs et modificateurs
pub mod particle_engine;
pub use particle_engine::{GameTime, Particle, ParticleEmitter, ParticleModifier};

// Utilities
pub mod utils;
