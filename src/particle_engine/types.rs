use std::time::Duration;

/// Temps de simulation fourni à chaque tick par la boucle de jeu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameTime {
    /// Temps écoulé depuis le tick précédent.
    pub delta: Duration,
    /// Temps écoulé depuis le début de la simulation.
    pub total: Duration,
}

impl GameTime {
    pub fn new(delta: Duration, total: Duration) -> Self {
        Self { delta, total }
    }

    pub fn from_secs(delta: f32, total: f32) -> Self {
        Self::new(
            Duration::from_secs_f32(delta.max(0.0)),
            Duration::from_secs_f32(total.max(0.0)),
        )
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn total_secs(&self) -> f32 {
        self.total.as_secs_f32()
    }

    /// Tick suivant : `total` avance de `delta`.
    pub fn advance(&self, delta: Duration) -> Self {
        Self::new(delta, self.total + delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates_total() {
        let dt = Duration::from_millis(16);
        let t = (0..10).fold(GameTime::default(), |t, _| t.advance(dt));
        assert_eq!(t.total, Duration::from_millis(160));
        assert_eq!(t.delta, dt);
    }

    #[test]
    fn test_negative_seconds_are_clamped() {
        let t = GameTime::from_secs(-1.0, 2.5);
        assert_eq!(t.delta, Duration::ZERO);
        assert!((t.total_secs() - 2.5).abs() < 1e-6);
    }
}
