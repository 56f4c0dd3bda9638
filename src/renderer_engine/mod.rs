pub mod r#trait;
pub use r#trait::{BufferHandle, GpuBackend, TextureFactory};

pub mod error;
pub use self::error::RenderError;

pub mod types;
pub use self::types::{Color, Rect, Resolution, Vertex2, VertexAttribute};

pub mod texture;
pub use self::texture::{Texture2D, TextureId};

pub mod camera;
pub use self::camera::{Camera, OrthographicCamera};

pub mod stream_buffer;
pub use self::stream_buffer::StreamBuffer;

pub mod sprite_batch;
pub use self::sprite_batch::{BatchStats, SpriteBatch, SpriteDraw, SpriteDrawBuilder};

pub mod sprite_sheet;
pub use self::sprite_sheet::SpriteSheet;

pub mod config;
pub use self::config::RendererConfig;

pub mod gl_backend;
pub use self::gl_backend::{GlBackend, GlTextureFactory};

pub mod shader;
pub mod tools;
