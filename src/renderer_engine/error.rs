use thiserror::Error;

/// Erreurs du renderer.
///
/// Les violations d'état (`BatchAlreadyActive`, `BatchNotActive`) sont des
/// erreurs de l'appelant : elles sont remontées telles quelles, jamais corrigées
/// silencieusement. `BufferAllocation` est fatale pour la session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("cannot begin an active SpriteBatch")]
    BatchAlreadyActive,

    #[error("cannot {0} an inactive SpriteBatch")]
    BatchNotActive(&'static str),

    #[error("GPU buffer allocation failed ({bytes} bytes): {reason}")]
    BufferAllocation { bytes: usize, reason: String },

    #[error("shader program error: {0}")]
    Shader(String),

    #[error("failed to load texture '{path}': {reason}")]
    TextureLoad { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_errors_name_the_operation() {
        assert_eq!(
            RenderError::BatchNotActive("end").to_string(),
            "cannot end an inactive SpriteBatch"
        );
        assert_eq!(
            RenderError::BatchNotActive("draw with").to_string(),
            "cannot draw with an inactive SpriteBatch"
        );
    }

    #[test]
    fn test_allocation_error_reports_size() {
        let err = RenderError::BufferAllocation {
            bytes: 294_912,
            reason: "GL_OUT_OF_MEMORY".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("294912 bytes"), "{msg}");
        assert!(msg.contains("GL_OUT_OF_MEMORY"), "{msg}");
    }
}
