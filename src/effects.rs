//! Optional physical corrections applied on top of the base sinusoid.
//!
//! Each correction is a pure transform of the running profile. They are
//! always applied in the order of [`Effect::ALL`], whatever order the
//! toggles were given in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::wave::WaveParameters;

/// A correction term that can be switched on for an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Nonlinear,
    Dispersion,
    BottomFriction,
    Coriolis,
    Wind,
}

impl Effect {
    /// Every effect, in application order
    pub const ALL: [Effect; 5] = [
        Effect::Nonlinear,
        Effect::Dispersion,
        Effect::BottomFriction,
        Effect::Coriolis,
        Effect::Wind,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Effect::Nonlinear => "nonlinear",
            Effect::Dispersion => "dispersion",
            Effect::BottomFriction => "bottom_friction",
            Effect::Coriolis => "coriolis",
            Effect::Wind => "wind",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Effect::Nonlinear => "Second and third order Stokes harmonics",
            Effect::Dispersion => "Finite-depth dispersion amplitude factor",
            Effect::BottomFriction => "Exponential decay from bottom friction",
            Effect::Coriolis => "Amplitude modulation from Earth's rotation",
            Effect::Wind => "Wind-driven surface set-up across the domain",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Apply this correction to the running profile in place
    pub fn apply(&self, eta: &mut [f64], ctx: &CorrectionContext<'_>) {
        match self {
            Effect::Nonlinear => add_nonlinear(eta, ctx),
            Effect::Dispersion => scale(eta, dispersion_factor(ctx.k, ctx.params.depth)),
            Effect::BottomFriction => scale(eta, friction_decay(ctx.params.bottom_friction, ctx.t)),
            Effect::Coriolis => scale(eta, coriolis_modulation(ctx.params.coriolis_param, ctx.t)),
            Effect::Wind => add_wind(eta, ctx),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Effect::ALL
            .into_iter()
            .find(|effect| effect.name() == key)
            .ok_or_else(|| {
                format!(
                    "Unknown effect: {} (expected one of nonlinear, dispersion, bottom_friction, coriolis, wind)",
                    s
                )
            })
    }
}

/// Which corrections are enabled; anything not set is disabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectToggles {
    enabled: [bool; 5],
}

impl EffectToggles {
    /// All corrections disabled
    pub fn none() -> Self {
        Self::default()
    }

    /// All corrections enabled
    pub fn all() -> Self {
        Self { enabled: [true; 5] }
    }

    pub fn with(mut self, effect: Effect) -> Self {
        self.set(effect, true);
        self
    }

    pub fn set(&mut self, effect: Effect, enabled: bool) {
        self.enabled[effect.index()] = enabled;
    }

    pub fn is_enabled(&self, effect: Effect) -> bool {
        self.enabled[effect.index()]
    }

    /// Enabled effects in application order
    pub fn enabled(&self) -> impl Iterator<Item = Effect> + '_ {
        Effect::ALL.into_iter().filter(|effect| self.is_enabled(*effect))
    }

    /// Build from a name -> flag mapping. Unknown names are rejected.
    pub fn from_map(map: &HashMap<String, bool>) -> Result<Self, String> {
        let mut toggles = Self::none();
        for (name, &enabled) in map {
            toggles.set(name.parse()?, enabled);
        }
        Ok(toggles)
    }

    /// Name -> flag mapping covering every effect
    pub fn to_map(&self) -> HashMap<String, bool> {
        Effect::ALL
            .into_iter()
            .map(|effect| (effect.name().to_string(), self.is_enabled(effect)))
            .collect()
    }
}

impl FromIterator<Effect> for EffectToggles {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), |toggles, effect| toggles.with(effect))
    }
}

/// Comma separated effect names, e.g. `nonlinear,wind`. `none` and `all` are accepted.
impl FromStr for EffectToggles {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => return Ok(Self::none()),
            "all" => return Ok(Self::all()),
            _ => {}
        }

        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse::<Effect>)
            .collect()
    }
}

impl fmt::Display for EffectToggles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.enabled().map(|effect| effect.name()).collect();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join(","))
        }
    }
}

impl Serialize for EffectToggles {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: std::collections::BTreeMap<&str, bool> = Effect::ALL
            .into_iter()
            .map(|effect| (effect.name(), self.is_enabled(effect)))
            .collect();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EffectToggles {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = HashMap::<String, bool>::deserialize(deserializer)?;
        Self::from_map(&map).map_err(serde::de::Error::custom)
    }
}

/// Everything a correction needs besides the profile itself
#[derive(Debug, Clone, Copy)]
pub struct CorrectionContext<'a> {
    pub x: &'a [f64],
    pub domain_size: f64,
    pub k: f64,
    pub omega: f64,
    pub t: f64,
    pub params: &'a WaveParameters,
}

/// Run every enabled correction over the profile, in fixed order
pub fn apply_corrections(eta: &mut [f64], toggles: &EffectToggles, ctx: &CorrectionContext<'_>) {
    for effect in toggles.enabled() {
        effect.apply(eta, ctx);
    }
}

/// Finite-depth amplitude factor sqrt(tanh(β)/β), β = k·h
pub fn dispersion_factor(k: f64, depth: f64) -> f64 {
    let beta = k * depth;
    f64::sqrt(f64::tanh(beta) / beta)
}

/// Uniform time-decay envelope exp(-c·t)
pub fn friction_decay(coefficient: f64, t: f64) -> f64 {
    f64::exp(-coefficient * t)
}

/// Amplitude modulation cos(f·t)
pub fn coriolis_modulation(coriolis_param: f64, t: f64) -> f64 {
    f64::cos(coriolis_param * t)
}

fn scale(eta: &mut [f64], factor: f64) {
    eta.iter_mut().for_each(|value| *value *= factor);
}

fn add_nonlinear(eta: &mut [f64], ctx: &CorrectionContext<'_>) {
    let a = ctx.params.amplitude;
    let second = 0.5 * ctx.k * a.powi(2);
    let third = 3.0 / 8.0 * ctx.k.powi(2) * a.powi(3);

    for (value, &x) in eta.iter_mut().zip(ctx.x) {
        // Harmonics follow the base phase, not the running profile
        let phase = ctx.k * x - ctx.omega * ctx.t;
        *value += second * f64::cos(2.0 * phase) + third * f64::cos(3.0 * phase);
    }
}

fn add_wind(eta: &mut [f64], ctx: &CorrectionContext<'_>) {
    // Empirical wind coefficient
    let wind_factor = 0.0015 * ctx.params.wind_speed;
    let along_domain = wind_factor * f64::cos(ctx.params.wind_direction);

    for (value, &x) in eta.iter_mut().zip(ctx.x) {
        *value += along_domain * f64::sin(2.0 * PI * x / ctx.domain_size);
    }
}
