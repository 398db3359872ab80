//! User-tunable particle parameters and the named presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Initial particle speed range and direction in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityRange {
    pub min: f64,
    pub max: f64,
    pub angle: f64,
}

/// Particle scale at birth and at death.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub start: f64,
    pub end: f64,
}

/// How many particles are emitted per burst, and how often.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionRate {
    /// Inclusive range of particles per burst
    pub particles: [u32; 2],
    /// Inclusive range of seconds between bursts
    pub time: [f64; 2],
}

/// Every parameter of the display that a user can change.
///
/// Serialized with camelCase keys; missing keys take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticleSettings {
    /// The r(θ) formula, stored as typed
    pub formula: String,
    pub size: f64,
    /// θ advance per frame
    pub draw_speed: f64,
    pub x_drift: f64,
    pub y_drift: f64,
    pub drift_delay: f64,
    /// Particle lifetime in seconds
    pub lifespan: f64,
    pub damping: f64,
    pub particle_velocity: f64,
    pub hue_min: f64,
    pub hue_max: f64,
    pub velocity: VelocityRange,
    pub scale: ScaleRange,
    pub emission_rate: EmissionRate,
    pub emitter_rate_num_particles: u32,
    pub emitter_rate_time: f64,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            formula: "200*sin(2*theta)".to_string(),
            size: 4.0,
            draw_speed: 0.03,
            x_drift: 1.0,
            y_drift: 1.0,
            drift_delay: 0.1,
            lifespan: 5.0,
            damping: 0.0001,
            particle_velocity: 0.2,
            hue_min: 0.0,
            hue_max: 360.0,
            velocity: VelocityRange {
                min: 0.5,
                max: 1.0,
                angle: 90.0,
            },
            scale: ScaleRange {
                start: 1.0,
                end: 0.1,
            },
            emission_rate: EmissionRate {
                particles: [20, 22],
                time: [0.01, 0.03],
            },
            emitter_rate_num_particles: 13,
            emitter_rate_time: 0.01,
        }
    }
}

/// A parameter that fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be within 0..=360, got {value}")]
    HueOutOfRange { field: &'static str, value: f64 },

    #[error("{field} has its minimum above its maximum")]
    InvertedRange { field: &'static str },

    #[error("formula must not be empty")]
    EmptyFormula,
}

fn finite(field: &'static str, value: f64) -> Result<f64, SettingsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SettingsError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Negative { field, value })
    }
}

fn hue(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if (0.0..=360.0).contains(&finite(field, value)?) {
        Ok(())
    } else {
        Err(SettingsError::HueOutOfRange { field, value })
    }
}

fn ordered<T: PartialOrd>(field: &'static str, min: T, max: T) -> Result<(), SettingsError> {
    if min <= max {
        Ok(())
    } else {
        Err(SettingsError::InvertedRange { field })
    }
}

impl ParticleSettings {
    /// Check every parameter, reporting the first that is out of range.
    ///
    /// The formula is only checked for being non-empty; whether it compiles
    /// is decided when an emitter activates it.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.formula.trim().is_empty() {
            return Err(SettingsError::EmptyFormula);
        }
        positive("size", self.size)?;
        finite("drawSpeed", self.draw_speed)?;
        finite("xDrift", self.x_drift)?;
        finite("yDrift", self.y_drift)?;
        non_negative("driftDelay", self.drift_delay)?;
        positive("lifespan", self.lifespan)?;
        non_negative("damping", self.damping)?;
        non_negative("particleVelocity", self.particle_velocity)?;

        hue("hueMin", self.hue_min)?;
        hue("hueMax", self.hue_max)?;
        ordered("hue", self.hue_min, self.hue_max)?;

        non_negative("velocity.min", self.velocity.min)?;
        non_negative("velocity.max", self.velocity.max)?;
        finite("velocity.angle", self.velocity.angle)?;
        ordered("velocity", self.velocity.min, self.velocity.max)?;

        non_negative("scale.start", self.scale.start)?;
        non_negative("scale.end", self.scale.end)?;

        let [fewest, most] = self.emission_rate.particles;
        ordered("emissionRate.particles", fewest, most)?;
        let [shortest, longest] = self.emission_rate.time;
        positive("emissionRate.time", shortest)?;
        positive("emissionRate.time", longest)?;
        ordered("emissionRate.time", shortest, longest)?;

        positive("emitterRateTime", self.emitter_rate_time)?;
        Ok(())
    }

    /// Settings for a named preset.
    pub fn preset(preset: Preset) -> Self {
        preset.settings()
    }
}

/// Named starting points for the parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Gentle,
    Chaotic,
    Rainbow,
    BlueGreen,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Gentle,
        Preset::Chaotic,
        Preset::Rainbow,
        Preset::BlueGreen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Gentle => "gentle",
            Preset::Chaotic => "chaotic",
            Preset::Rainbow => "rainbow",
            Preset::BlueGreen => "blueGreen",
        }
    }

    /// The defaults with this preset's overrides applied.
    pub fn settings(self) -> ParticleSettings {
        let defaults = ParticleSettings::default();
        match self {
            Preset::Gentle => ParticleSettings {
                x_drift: 2.0,
                y_drift: 2.0,
                velocity: VelocityRange {
                    min: 0.3,
                    max: 0.6,
                    angle: 90.0,
                },
                ..defaults
            },
            Preset::Chaotic => ParticleSettings {
                x_drift: 20.0,
                y_drift: 20.0,
                velocity: VelocityRange {
                    min: 2.0,
                    max: 4.0,
                    angle: 90.0,
                },
                ..defaults
            },
            Preset::Rainbow => ParticleSettings {
                hue_min: 0.0,
                hue_max: 360.0,
                ..defaults
            },
            Preset::BlueGreen => ParticleSettings {
                hue_min: 120.0,
                hue_max: 240.0,
                ..defaults
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset \"{0}\" (expected one of: gentle, chaotic, rainbow, blueGreen)")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    /// Case-insensitive; `blue-green` and `blue_green` are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().to_ascii_lowercase() == key)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
