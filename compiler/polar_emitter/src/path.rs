//! Drives an emitter along the curve r(θ).

use std::sync::Arc;

use polar::{compile, CompileError, CompiledExpression};
use serde::Serialize;

use crate::settings::ParticleSettings;

/// Constant radius of the formula active before the user supplies one.
pub const DEFAULT_RADIUS: f64 = 5.0;
/// θ advance per step.
pub const DEFAULT_SPEED: f64 = 0.025;
/// Center of a 600×600 canvas.
pub const DEFAULT_ORIGIN: (f64, f64) = (300.0, 300.0);

/// Where the emitter sits after one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPoint {
    /// θ the radius was evaluated at
    pub theta: f64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    /// Direction new particles are rotated to, in radians
    pub emission_angle: f64,
}

/// The emitter's position state along a polar curve.
///
/// A formula that fails to compile never replaces the active one.
#[derive(Debug, Clone)]
pub struct EmitterPath {
    formula: Arc<CompiledExpression>,
    theta: f64,
    speed: f64,
    origin: (f64, f64),
    emission_angle: f64,
}

impl Default for EmitterPath {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl EmitterPath {
    pub fn new(origin: (f64, f64)) -> Self {
        Self {
            formula: Arc::new(CompiledExpression::constant(DEFAULT_RADIUS)),
            theta: 0.0,
            speed: DEFAULT_SPEED,
            origin,
            emission_angle: 0.0,
        }
    }

    /// Compile `source` and make it the active formula.
    ///
    /// On failure the previous formula stays active and the error is
    /// returned.
    pub fn set_formula(&mut self, source: &str) -> Result<(), CompileError> {
        match compile(source) {
            Ok(compiled) => {
                log::debug!("activating formula {:?}", compiled.source());
                self.formula = Arc::new(compiled);
                Ok(())
            }
            Err(error) => {
                log::warn!(
                    "rejected formula {:?} ({error}); keeping {:?}",
                    source,
                    self.formula.source()
                );
                Err(error)
            }
        }
    }

    /// Activate an already compiled formula.
    pub fn set_compiled(&mut self, formula: Arc<CompiledExpression>) {
        self.formula = formula;
    }

    pub fn formula(&self) -> &CompiledExpression {
        &self.formula
    }

    /// A shared handle to the active formula.
    pub fn formula_handle(&self) -> Arc<CompiledExpression> {
        Arc::clone(&self.formula)
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    pub fn emission_angle(&self) -> f64 {
        self.emission_angle
    }

    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin = (x, y);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Back to θ = 0, keeping formula, speed and origin.
    pub fn reset(&mut self) {
        self.theta = 0.0;
        self.emission_angle = 0.0;
    }

    /// Evaluate r at the current θ, move there, then advance θ.
    ///
    /// The emission angle follows the advanced θ, negated.
    pub fn step(&mut self) -> PathPoint {
        let theta = self.theta;
        let radius = self.formula.evaluate(theta);
        let (origin_x, origin_y) = self.origin;
        let x = radius * theta.cos() + origin_x;
        let y = radius * theta.sin() + origin_y;

        self.theta += self.speed;
        self.emission_angle = -self.theta;

        PathPoint {
            theta,
            radius,
            x,
            y,
            emission_angle: self.emission_angle,
        }
    }

    /// Take `steps` consecutive steps.
    pub fn sample(&mut self, steps: usize) -> Vec<PathPoint> {
        (0..steps).map(|_| self.step()).collect()
    }

    /// Use `settings.draw_speed` as the θ step and activate its formula.
    ///
    /// The speed is applied even when the formula does not compile.
    pub fn apply_settings(&mut self, settings: &ParticleSettings) -> Result<(), CompileError> {
        self.set_speed(settings.draw_speed);
        self.set_formula(&settings.formula)
    }
}
