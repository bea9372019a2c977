use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Seawater density (kg/m³)
pub const SEAWATER_DENSITY: f64 = 1025.0;

/// Physical parameters of a single wave evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParameters {
    pub amplitude: f64,       // Wave amplitude (m)
    pub wavelength: f64,      // Wavelength (m)
    pub depth: f64,           // Water depth (m)
    pub bottom_friction: f64, // Bottom friction decay coefficient (1/s)
    pub coriolis_param: f64,  // Coriolis parameter f (rad/s)
    pub wind_speed: f64,      // Wind speed (m/s)
    pub wind_direction: f64,  // Wind direction (radians)
}

impl WaveParameters {
    /// Create parameters with the default friction, Coriolis and wind settings
    pub fn new(amplitude: f64, wavelength: f64, depth: f64) -> Self {
        Self {
            amplitude,
            wavelength,
            depth,
            bottom_friction: 0.001,
            coriolis_param: 0.0001,
            wind_speed: 0.0,
            wind_direction: 0.0,
        }
    }

    pub fn with_bottom_friction(mut self, bottom_friction: f64) -> Self {
        self.bottom_friction = bottom_friction;
        self
    }

    pub fn with_coriolis(mut self, coriolis_param: f64) -> Self {
        self.coriolis_param = coriolis_param;
        self
    }

    pub fn with_wind(mut self, wind_speed: f64, wind_direction: f64) -> Self {
        self.wind_speed = wind_speed;
        self.wind_direction = wind_direction;
        self
    }

    /// Wavenumber k = 2π/λ
    pub fn wavenumber(&self) -> f64 {
        wavenumber(self.wavelength)
    }

    /// Angular frequency from the linear dispersion relation
    pub fn angular_frequency(&self) -> f64 {
        angular_frequency(self.wavenumber(), self.depth)
    }

    /// Check that the parameters are inside the physical domain.
    ///
    /// The calculator itself never calls this: out-of-domain values simply
    /// propagate as NaN/Inf through the formulas.
    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            ("amplitude", self.amplitude),
            ("wavelength", self.wavelength),
            ("depth", self.depth),
        ];

        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be a positive finite number, got: {}", name, value));
            }
        }

        let optional = [
            ("bottom_friction", self.bottom_friction),
            ("coriolis_param", self.coriolis_param),
            ("wind_speed", self.wind_speed),
            ("wind_direction", self.wind_direction),
        ];

        for (name, value) in optional {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got: {}", name, value));
            }
        }

        Ok(())
    }
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self::new(1.0, 100.0, 1000.0)
    }
}

/// Wavenumber for a given wavelength
pub fn wavenumber(wavelength: f64) -> f64 {
    2.0 * PI / wavelength
}

/// Linear (Airy) dispersion relation: ω² = g·k·tanh(k·h)
pub fn angular_frequency(k: f64, depth: f64) -> f64 {
    f64::sqrt(GRAVITY * k * f64::tanh(k * depth))
}
