//! Qualitative tsunami risk grading from a finished profile.
//!
//! Risk bands and damage estimates use two separate height ladders
//! (0.5/2/5 m and 1/3/6 m). They are intentionally not merged.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::{max_abs, wave_energy};
use crate::wave::WaveParameters;

/// Ordered risk bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Band for a peak wave height in meters
    pub fn from_height(max_height: f64) -> Self {
        if max_height < 0.5 {
            RiskLevel::Low
        } else if max_height < 2.0 {
            RiskLevel::Moderate
        } else if max_height < 5.0 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of [`assess_risk`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub max_height: f64,
    pub energy: f64,
    pub potential_damage: String,
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "risk_level: {}", self.risk_level)?;
        writeln!(f, "max_height: {}", self.max_height)?;
        writeln!(f, "energy: {}", self.energy)?;
        writeln!(f, "potential_damage: {}", self.potential_damage)
    }
}

/// Grade a profile. Height and energy are recomputed from the samples.
///
/// `_params` is accepted so callers can pass the evaluation inputs alongside
/// the profile; the grading currently depends on the profile alone.
pub fn assess_risk(eta: &[f64], _params: &WaveParameters) -> RiskAssessment {
    let max_height = max_abs(eta);
    let energy = wave_energy(eta);

    RiskAssessment {
        risk_level: RiskLevel::from_height(max_height),
        max_height,
        energy,
        potential_damage: estimate_damage(max_height, energy).to_string(),
    }
}

/// Damage estimate keyed on height only; `energy` does not affect the result
pub fn estimate_damage(height: f64, _energy: f64) -> &'static str {
    if height < 1.0 {
        "Light damage to coastal structures"
    } else if height < 3.0 {
        "Significant damage to coastal structures, flooding of low-lying areas"
    } else if height < 6.0 {
        "Severe structural damage, deep inland flooding"
    } else {
        "Total loss of coastal infrastructure"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(height: f64) -> RiskAssessment {
        assess_risk(&[0.0, -height, height / 2.0], &WaveParameters::default())
    }

    #[test]
    fn test_risk_boundaries() {
        assert_eq!(assess(0.49999).risk_level, RiskLevel::Low);
        assert_eq!(assess(0.5).risk_level, RiskLevel::Moderate);
        assert_eq!(assess(1.99).risk_level, RiskLevel::Moderate);
        assert_eq!(assess(2.0).risk_level, RiskLevel::High);
        assert_eq!(assess(4.999).risk_level, RiskLevel::High);
        assert_eq!(assess(5.0).risk_level, RiskLevel::VeryHigh);
    }

    #[test]
    fn test_damage_ladder_is_separate() {
        // 0.5 m is already Moderate risk but still light damage
        let moderate = assess(0.5);
        assert_eq!(moderate.potential_damage, estimate_damage(0.5, 0.0));
        assert_eq!(moderate.potential_damage, "Light damage to coastal structures");

        assert_eq!(estimate_damage(0.999, 0.0), estimate_damage(0.0, 0.0));
        assert_ne!(estimate_damage(1.0, 0.0), estimate_damage(0.999, 0.0));
        assert_eq!(estimate_damage(2.5, 0.0), estimate_damage(1.0, 0.0));
        assert_ne!(estimate_damage(3.0, 0.0), estimate_damage(2.999, 0.0));
        assert_eq!(estimate_damage(5.5, 0.0), estimate_damage(3.0, 0.0));
        assert_eq!(estimate_damage(6.0, 0.0), "Total loss of coastal infrastructure");
    }

    #[test]
    fn test_damage_ignores_energy() {
        assert_eq!(estimate_damage(2.0, 0.0), estimate_damage(2.0, 1.0e12));
    }

    #[test]
    fn test_assessment_recomputes_energy() {
        let eta = [1.0, -1.0];
        let risk = assess_risk(&eta, &WaveParameters::default());
        assert_eq!(risk.max_height, 1.0);
        assert!((risk.energy - 0.5 * 1025.0 * 9.81).abs() < 1e-9);
    }

    #[test]
    fn test_nan_sample_gives_nan_height() {
        let risk = assess_risk(&[0.2, f64::NAN, 7.0], &WaveParameters::default());
        assert!(risk.max_height.is_nan());
        assert!(risk.energy.is_nan());
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::High < RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::VeryHigh.to_string(), "Very High");
    }
}
