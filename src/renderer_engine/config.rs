use serde::{Deserialize, Serialize};

use crate::renderer_engine::sprite_batch::DEFAULT_MAX_QUADS;
use crate::renderer_engine::Resolution;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RendererConfig {
    /// Quads par draw call avant flush forcé.
    pub max_quads: usize,
    pub clear_color: [f32; 4],
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_quads: DEFAULT_MAX_QUADS,
            clear_color: [0.05, 0.05, 0.08, 1.0],
            window_width: 1024,
            window_height: 800,
            title: "Sprite Particles".to_string(),
        }
    }
}

impl RendererConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("renderer.toml");
        let path = path.to_str().unwrap();

        let config = RendererConfig {
            max_quads: 64,
            title: "test".into(),
            ..Default::default()
        };
        config.save_to_file(path).unwrap();

        assert_eq!(RendererConfig::from_file(path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("renderer.toml");
        std::fs::write(&path, "max_quads = 16\n").unwrap();

        let config = RendererConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.max_quads, 16);
        assert_eq!(config.resolution(), Resolution::new(1024, 800));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(RendererConfig::from_file("does/not/exist.toml").is_err());
        assert_eq!(
            RendererConfig::from_file("does/not/exist.toml").unwrap_or_default(),
            RendererConfig::default()
        );
    }
}
