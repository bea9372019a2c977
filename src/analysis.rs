use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::wave::{WaveParameters, GRAVITY, SEAWATER_DENSITY};

/// Power spectrum of a profile with its FFT frequency bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySpectrum {
    pub frequencies: Vec<f64>, // Spatial frequency of each bin (1/m)
    pub power: Vec<f64>,       // |FFT(eta)|² per bin
}

impl EnergySpectrum {
    /// Compute |FFT(eta)|² with bins from sample spacing `d`
    pub fn from_profile(eta: &[f64], d: f64) -> Self {
        let n = eta.len();
        let mut buffer: Vec<Complex64> = eta.iter().map(|&value| Complex64::new(value, 0.0)).collect();

        if n > 0 {
            let mut planner = FftPlanner::<f64>::new();
            let fft = planner.plan_fft_forward(n);
            fft.process(&mut buffer);
        }

        Self {
            frequencies: fft_frequencies(n, d),
            power: buffer.iter().map(|c| c.norm_sqr()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.power.len()
    }

    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// Positive-frequency half with the DC bin dropped (bins 1 .. n/2)
    pub fn one_sided(&self) -> Vec<(f64, f64)> {
        let half = self.len() / 2;
        (1..half)
            .map(|i| (self.frequencies[i], self.power[i]))
            .collect()
    }

    /// Dominant positive-frequency bin
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.one_sided()
            .into_iter()
            .fold(None, |best: Option<(f64, f64)>, bin| match best {
                Some(current) if current.1 >= bin.1 => Some(current),
                _ => Some(bin),
            })
    }
}

/// Sample frequencies in standard FFT order: 0, 1, ..., then the negative half
pub fn fft_frequencies(n: usize, d: f64) -> Vec<f64> {
    let scale = 1.0 / (n as f64 * d);
    let positive = (n + 1) / 2; // bins 0 .. ceil(n/2)

    (0..n)
        .map(|i| {
            if i < positive {
                i as f64 * scale
            } else {
                -((n - i) as f64) * scale
            }
        })
        .collect()
}

/// Derived statistics of a wave profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveAnalysis {
    pub energy: f64,          // Mean energy density (J/m²)
    pub momentum_flux: f64,   // Same formula as energy; kept as its own quantity
    pub phase_velocity: f64,  // ω/k (m/s)
    pub group_velocity: f64,  // Energy propagation speed (m/s)
    pub max_amplitude: f64,   // max |eta| (m)
    pub rms_amplitude: f64,   // sqrt(mean(eta²)) (m)
    pub mean_wavelength: f64, // 2π/k (m)
    pub period: f64,          // 2π/ω (s)
    pub energy_spectrum: EnergySpectrum,
}

/// Compute every statistic of a final profile.
///
/// `dx` only affects the spectrum's frequency bins.
pub fn analyze(eta: &[f64], k: f64, omega: f64, params: &WaveParameters, dx: f64) -> WaveAnalysis {
    let mean_sq = mean_square(eta);
    let kh2 = 2.0 * k * params.depth;
    let phase_velocity = omega / k;

    WaveAnalysis {
        energy: wave_energy(eta),
        momentum_flux: SEAWATER_DENSITY * GRAVITY * mean_sq / 2.0,
        phase_velocity,
        group_velocity: 0.5 * phase_velocity * (1.0 + kh2 / f64::sinh(kh2)),
        max_amplitude: max_abs(eta),
        rms_amplitude: mean_sq.sqrt(),
        mean_wavelength: 2.0 * PI / k,
        period: 2.0 * PI / omega,
        energy_spectrum: EnergySpectrum::from_profile(eta, dx),
    }
}

/// Potential energy density 0.5·ρ·g·mean(eta²)
pub fn wave_energy(eta: &[f64]) -> f64 {
    0.5 * SEAWATER_DENSITY * GRAVITY * mean_square(eta)
}

/// Mean of squares; NaN for an empty profile
pub fn mean_square(eta: &[f64]) -> f64 {
    eta.iter().map(|value| value * value).sum::<f64>() / eta.len() as f64
}

/// Largest absolute elevation; NaN for an empty profile
pub fn max_abs(eta: &[f64]) -> f64 {
    eta.iter()
        .map(|value| value.abs())
        .reduce(nan_max)
        .unwrap_or(f64::NAN)
}

/// `f64::max` that returns NaN when either side is NaN
pub fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// `f64::min` that returns NaN when either side is NaN
pub fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

impl fmt::Display for WaveAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "energy: {}", self.energy)?;
        writeln!(f, "momentum_flux: {}", self.momentum_flux)?;
        writeln!(f, "phase_velocity: {}", self.phase_velocity)?;
        writeln!(f, "group_velocity: {}", self.group_velocity)?;
        writeln!(f, "max_amplitude: {}", self.max_amplitude)?;
        writeln!(f, "rms_amplitude: {}", self.rms_amplitude)?;
        writeln!(f, "mean_wavelength: {}", self.mean_wavelength)?;
        writeln!(f, "period: {}", self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_frequencies_even_and_odd() {
        assert_eq!(fft_frequencies(4, 0.5), vec![0.0, 0.5, -1.0, -0.5]);
        assert_eq!(fft_frequencies(5, 1.0), vec![0.0, 0.2, 0.4, -0.4, -0.2]);
        assert!(fft_frequencies(0, 1.0).is_empty());
    }

    #[test]
    fn test_spectrum_of_constant_is_dc_only() {
        let eta = vec![2.0; 8];
        let spectrum = EnergySpectrum::from_profile(&eta, 1.0);

        // DC bin = (sum)^2 = 16^2
        assert!((spectrum.power[0] - 256.0).abs() < 1e-9);
        for &p in &spectrum.power[1..] {
            assert!(p.abs() < 1e-9);
        }
    }

    #[test]
    fn test_spectrum_peak_finds_harmonic() {
        let n = 256;
        let eta: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 8.0 * i as f64 / n as f64).cos())
            .collect();
        let spectrum = EnergySpectrum::from_profile(&eta, 1.0);

        let (freq, power) = spectrum.peak().expect("non-empty spectrum");
        assert!((freq - 8.0 / n as f64).abs() < 1e-12);
        // |FFT| of a unit cosine at an exact bin is n/2
        assert!((power - (n as f64 / 2.0).powi(2)).abs() < 1e-6);
        assert_eq!(spectrum.one_sided().len(), n / 2 - 1);
    }

    #[test]
    fn test_energy_and_momentum_flux_match() {
        let params = WaveParameters::default();
        let eta = vec![1.0, -1.0, 0.5, -0.5];
        let k = params.wavenumber();
        let analysis = analyze(&eta, k, params.angular_frequency(), &params, 1.0);

        let expected = 0.5 * SEAWATER_DENSITY * GRAVITY * (1.0 + 1.0 + 0.25 + 0.25) / 4.0;
        assert!((analysis.energy - expected).abs() < 1e-9);
        assert_eq!(analysis.energy, analysis.momentum_flux);
        assert_eq!(analysis.max_amplitude, 1.0);
    }

    #[test]
    fn test_velocities_deep_water() {
        // Deep water: group velocity is half the phase velocity
        let params = WaveParameters::new(1.0, 100.0, 1000.0);
        let k = params.wavenumber();
        let omega = params.angular_frequency();
        let analysis = analyze(&[1.0], k, omega, &params, 1.0);

        assert!((analysis.phase_velocity - omega / k).abs() < 1e-12);
        assert!((analysis.group_velocity - 0.5 * analysis.phase_velocity).abs() < 1e-9);
        assert!((analysis.mean_wavelength - 100.0).abs() < 1e-9);
        assert!((analysis.period - 2.0 * PI / omega).abs() < 1e-12);
    }

    #[test]
    fn test_empty_profile_statistics_are_nan() {
        assert!(mean_square(&[]).is_nan());
        assert!(max_abs(&[]).is_nan());
        assert!(EnergySpectrum::from_profile(&[], 1.0).is_empty());
    }

    #[test]
    fn test_max_abs_propagates_nan() {
        assert!(max_abs(&[1.0, f64::NAN, -3.0]).is_nan());
        assert!(max_abs(&[f64::NAN, 2.0]).is_nan());
        assert_eq!(max_abs(&[1.0, f64::NEG_INFINITY]), f64::INFINITY);
        assert_eq!(max_abs(&[0.5, -2.5, 1.0]), 2.5);
    }

    #[test]
    fn test_nan_sample_poisons_max_amplitude() {
        let params = WaveParameters::default();
        let eta = [0.25, f64::NAN, -0.75, 0.5];
        let analysis = analyze(&eta, params.wavenumber(), params.angular_frequency(), &params, 1.0);

        assert!(analysis.max_amplitude.is_nan());
        assert!(analysis.rms_amplitude.is_nan());
    }

    #[test]
    fn test_report_lists_fields() {
        let params = WaveParameters::default();
        let analysis = analyze(&[0.5, -0.5], params.wavenumber(), params.angular_frequency(), &params, 1.0);
        let report = analysis.to_string();

        assert!(report.starts_with("energy: "));
        assert!(report.contains("group_velocity: "));
        assert!(report.contains("period: "));
        assert!(!report.contains("energy_spectrum"));
    }
}
