//! Modificateurs fournis avec le moteur.

mod alpha;
mod color;
mod direction;
mod lifetime;
mod spread;
mod texture;

pub use self::alpha::AlphaModifier;
pub use self::color::ColorModifier;
pub use self::direction::DirectionModifier;
pub use self::lifetime::{LifetimeMode, LifetimeModifier};
pub use self::spread::SpreadModifier;
pub use self::texture::TextureModifier;
