use lumen_math::Color;
use serde::{Deserialize, Serialize};

/// Which factor of the per-light product is accumulated.
///
/// Everything but `Combined` is a debug view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    /// Lambert cosine only.
    ObservedArea,
    /// Incoming radiance only.
    Radiance,
    /// BRDF value only.
    Brdf,
    /// `radiance · brdf · cosine`.
    #[default]
    Combined,
}

impl LightingMode {
    pub fn cycle(self) -> Self {
        match self {
            LightingMode::ObservedArea => LightingMode::Radiance,
            LightingMode::Radiance => LightingMode::Brdf,
            LightingMode::Brdf => LightingMode::Combined,
            LightingMode::Combined => LightingMode::ObservedArea,
        }
    }

    /// One light's contribution under this mode.
    pub fn combine(self, cosine: f32, radiance: Color, brdf: Color) -> Color {
        match self {
            LightingMode::ObservedArea => Color::splat(cosine),
            LightingMode::Radiance => radiance,
            LightingMode::Brdf => brdf,
            LightingMode::Combined => radiance * brdf * cosine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_mode() {
        let mut mode = LightingMode::default();
        assert_eq!(mode, LightingMode::Combined);
        let mut seen = Vec::new();
        for _ in 0..4 {
            mode = mode.cycle();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![
                LightingMode::ObservedArea,
                LightingMode::Radiance,
                LightingMode::Brdf,
                LightingMode::Combined
            ]
        );
    }

    #[test]
    fn test_combine() {
        let radiance = Color::new(2.0, 2.0, 2.0);
        let brdf = Color::new(0.5, 0.25, 0.0);
        assert_eq!(LightingMode::ObservedArea.combine(0.5, radiance, brdf), Color::splat(0.5));
        assert_eq!(LightingMode::Radiance.combine(0.5, radiance, brdf), radiance);
        assert_eq!(LightingMode::Brdf.combine(0.5, radiance, brdf), brdf);
        assert_eq!(
            LightingMode::Combined.combine(0.5, radiance, brdf),
            Color::new(0.5, 0.25, 0.0)
        );
    }
}
