use featquant_math::{validate_max_quantile, TargetType};
use ndarray::{ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

use crate::{FittedQuantizer, QuantizerError};

/// Band elements are clamped to before scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipRange {
    /// `±bound`, the value the scale was derived from. Scaled output never
    /// exceeds the target range.
    #[default]
    Bound,
    /// `±target_range()`, the output type's own maximum. Values between the
    /// bound and the target range overflow after scaling and rely on the
    /// saturating cast.
    TargetRange,
}

/// Quantizer configuration. Immutable once built; fitting reads it and never
/// writes back.
///
/// Deserializes from e.g. `{"max_value": 10.0, "target_type": "int8"}`;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuantizerConfig {
    max_quantile: f64,
    max_value: Option<f64>,
    target_type: TargetType,
    clip: ClipRange,
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self {
            max_quantile: Self::DEFAULT_MAX_QUANTILE,
            max_value: None,
            target_type: TargetType::default(),
            clip: ClipRange::default(),
        }
    }
}

impl QuantizerConfig {
    pub const DEFAULT_MAX_QUANTILE: f64 = 0.01;

    pub fn new(target_type: TargetType) -> Self {
        Self {
            target_type,
            ..Self::default()
        }
    }

    /// Tail fraction dropped on each side when estimating the bound from data.
    pub fn with_max_quantile(mut self, max_quantile: f64) -> Self {
        self.max_quantile = max_quantile;
        self
    }

    /// Explicit symmetric bound. Disables quantile estimation.
    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn with_clip(mut self, clip: ClipRange) -> Self {
        self.clip = clip;
        self
    }

    pub fn max_quantile(&self) -> f64 {
        self.max_quantile
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    pub fn target_type(&self) -> TargetType {
        self.target_type
    }

    pub fn clip(&self) -> ClipRange {
        self.clip
    }

    /// Maximum representable magnitude of the target type.
    pub fn target_range(&self) -> f64 {
        self.target_type.max_magnitude()
    }

    /// Rejects a `max_quantile` outside `[0, 0.5)`.
    ///
    /// The explicit bound is checked at fit time, where it is resolved.
    pub fn validate(&self) -> Result<(), QuantizerError> {
        validate_max_quantile(self.max_quantile)?;
        Ok(())
    }

    /// Learns the scale from `x`, pooled over every element regardless of shape.
    pub fn fit<A, S, D>(&self, x: &ArrayBase<S, D>) -> Result<FittedQuantizer, QuantizerError>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        FittedQuantizer::fit(self.clone(), x)
    }
}
