use serde::{Deserialize, Serialize};

/// Paramètres par défaut d'un `ParticleEmitter`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EmitterConfig {
    /// Particules émises par seconde.
    pub amount: f32,
    /// Pixels par seconde.
    pub speed: f32,
    /// Secondes.
    pub lifetime: f32,
    /// Intervalle minimal (temps de simulation) entre deux tris par texture.
    pub sort_interval_ms: u64,
    /// Si vrai, un émetteur arrêté ne fait plus vieillir ses particules.
    pub freeze_when_stopped: bool,
    /// Graine du générateur aléatoire ; aléatoire si absente.
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            amount: 50.0,
            speed: 1000.0,
            lifetime: 1.0,
            sort_interval_ms: 5,
            freeze_when_stopped: false,
            seed: None,
        }
    }
}

impl EmitterConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_with_partial_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emitter.toml");
        std::fs::write(&path, "amount = 200.0\nseed = 42\n").unwrap();

        let config = EmitterConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.amount, 200.0);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.lifetime, 1.0);
        assert!(!config.freeze_when_stopped);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emitter.toml");
        std::fs::write(&path, "amount = \"lots\"\n").unwrap();
        assert!(EmitterConfig::from_file(path.to_str().unwrap()).is_err());
    }
}
