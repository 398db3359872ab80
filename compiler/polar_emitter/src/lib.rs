//! Emitter path driver and particle settings for polar-curve displays.
//!
//! An [`EmitterPath`] walks θ forward one step per frame, evaluates the
//! active formula to get r(θ), and converts the result to a point around
//! the emitter origin. [`ParticleSettings`] carries the user-tunable
//! parameters and can be saved to and loaded from JSON files.

pub mod path;
pub mod persistence;
pub mod settings;

pub use path::{EmitterPath, PathPoint, DEFAULT_RADIUS, DEFAULT_ORIGIN, DEFAULT_SPEED};
pub use persistence::{load_settings, save_settings, PersistenceError};
pub use settings::{ParticleSettings, Preset, SettingsError};
