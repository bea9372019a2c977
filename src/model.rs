use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze, WaveAnalysis};
use crate::effects::{apply_corrections, CorrectionContext, EffectToggles};
use crate::wave::{angular_frequency, wavenumber, WaveParameters};

/// Fixed, evenly spaced sample coordinates over `[0, domain_size]`
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    domain_size: f64,
    dx: f64,
    x: Vec<f64>,
}

impl SpatialGrid {
    pub fn new(domain_size: f64, nx: usize) -> Self {
        // Both endpoints are sampled, but dx is domain/nx
        let x = match nx {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => {
                let step = domain_size / (nx - 1) as f64;
                (0..nx).map(|i| i as f64 * step).collect()
            }
        };

        Self {
            domain_size,
            dx: domain_size / nx as f64,
            x,
        }
    }

    pub fn domain_size(&self) -> f64 {
        self.domain_size
    }

    /// Nominal spacing used for spectrum bins
    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.x
    }
}

/// One evaluated time sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveFrame {
    pub time: f64,
    pub profile: Vec<f64>,
    pub analysis: WaveAnalysis,
}

/// Closed-form wave profile calculator over a fixed grid
#[derive(Debug, Clone)]
pub struct WaveProfileCalculator {
    grid: SpatialGrid,
}

impl Default for WaveProfileCalculator {
    fn default() -> Self {
        Self::new(1000.0, 1000)
    }
}

impl WaveProfileCalculator {
    /// Create a calculator over `[0, domain_size]` with `nx` samples
    pub fn new(domain_size: f64, nx: usize) -> Self {
        Self {
            grid: SpatialGrid::new(domain_size, nx),
        }
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Evaluate the surface elevation at time `t` and analyse it.
    ///
    /// Every call is independent: nothing is cached between evaluations.
    /// Out-of-domain parameters (zero wavelength, non-positive depth) are not
    /// rejected and show up as NaN/Inf in the result.
    pub fn evaluate(&self, params: &WaveParameters, t: f64, toggles: &EffectToggles) -> (Vec<f64>, WaveAnalysis) {
        let k = wavenumber(params.wavelength);
        let omega = angular_frequency(k, params.depth);

        let mut eta = self.base_profile(params.amplitude, k, omega, t);

        let ctx = CorrectionContext {
            x: self.grid.coordinates(),
            domain_size: self.grid.domain_size(),
            k,
            omega,
            t,
            params,
        };
        apply_corrections(&mut eta, toggles, &ctx);

        debug!(
            "Evaluated profile at t={:.3}s: k={:.5}, omega={:.5}, effects={}",
            t, k, omega, toggles
        );

        let analysis = self.analyze(&eta, k, omega, params);
        (eta, analysis)
    }

    /// Statistics of a profile sampled on this calculator's grid
    pub fn analyze(&self, eta: &[f64], k: f64, omega: f64, params: &WaveParameters) -> WaveAnalysis {
        analyze(eta, k, omega, params, self.grid.dx())
    }

    /// Evaluate many independent time samples in parallel, preserving input order
    pub fn evaluate_frames(&self, params: &WaveParameters, toggles: &EffectToggles, times: &[f64]) -> Vec<WaveFrame> {
        times
            .par_iter()
            .map(|&time| {
                let (profile, analysis) = self.evaluate(params, time, toggles);
                WaveFrame { time, profile, analysis }
            })
            .collect()
    }

    fn base_profile(&self, amplitude: f64, k: f64, omega: f64, t: f64) -> Vec<f64> {
        self.grid
            .coordinates()
            .iter()
            .map(|&x| amplitude * f64::cos(k * x - omega * t))
            .collect()
    }
}
