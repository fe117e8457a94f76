//! Confidence value object (0.0-1.0 scale).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ValidationError;

/// A model score between 0 and 1 inclusive.
///
/// Displays as a percentage with two decimals, which is how the bot
/// reports certainty to users (`0.95` renders as `95.00%`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// No confidence.
    pub const ZERO: Self = Self(0.0);

    /// Full confidence.
    pub const CERTAIN: Self = Self(1.0);

    /// Creates a Confidence, clamping to the valid range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a Confidence, returning error if out of range or not a number.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("confidence", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw score.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the score on a 0-100 scale.
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Confidence::try_new(value).map_err(serde::de::Error::custom)
    }
}
