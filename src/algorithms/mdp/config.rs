//! Configuration for the value-iteration planner.

use std::str::FromStr;

use super::error::ConfigError;

/// Stopping controls of value iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Weight γ of future rewards, strictly inside (0, 1).
    pub discount_factor: f64,
    /// Convergence tolerance ε on the largest per-city value change.
    pub epsilon: f64,
    /// Hard cap on Bellman sweeps.
    pub max_iterations: usize,
}

impl PlannerConfig {
    pub const DISCOUNT_FACTOR_KEY: &'static str = "discount-factor";
    pub const EPSILON_KEY: &'static str = "epsilon";
    pub const MAX_ITERATIONS_KEY: &'static str = "max-iterations";

    pub fn new(discount_factor: f64, epsilon: f64) -> Self {
        Self {
            discount_factor,
            epsilon,
            ..Self::default()
        }
    }

    /// Reads a config from agent properties, starting from the defaults.
    ///
    /// Recognised keys are `discount-factor`, `epsilon` and `max-iterations`;
    /// anything else is ignored. The result is not validated.
    pub fn from_properties<'a, I>(properties: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in properties {
            match key {
                Self::DISCOUNT_FACTOR_KEY => config.discount_factor = parse(key, value)?,
                Self::EPSILON_KEY => config.epsilon = parse(key, value)?,
                Self::MAX_ITERATIONS_KEY => config.max_iterations = parse(key, value)?,
                _ => {}
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Also rejects NaN.
        if !(self.discount_factor > 0.0 && self.discount_factor < 1.0) {
            return Err(ConfigError::InvalidDiscountFactor(self.discount_factor));
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            discount_factor: 0.95,
            epsilon: 1e-6,
            max_iterations: 5_000,
        }
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidProperty {
            key: key.to_string(),
            value: value.to_string(),
        })
}
