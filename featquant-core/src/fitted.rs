use featquant_math::{clip_scale_cast, collect_finite, symmetric_bound, unscale, TargetElement, TargetType};
use log::debug;
use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::{ClipRange, QuantizedArray, QuantizerConfig, QuantizerError};

/// A quantizer whose scale has been learned.
///
/// Holds `scale = target_range / bound` with `bound > 0`. Immutable, so a
/// fitted value can be shared across threads for concurrent transforms.
/// Re-fitting produces a new value rather than mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedQuantizer {
    config: QuantizerConfig,
    bound: f64,
    scale: f64,
}

impl FittedQuantizer {
    /// Resolves the bound (explicit `max_value`, else the two-sided quantile
    /// estimate over all of `x`) and derives the scale from it.
    pub fn fit<A, S, D>(config: QuantizerConfig, x: &ArrayBase<S, D>) -> Result<Self, QuantizerError>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        config.validate()?;
        let target_max = config.target_range();
        let bound = resolve_bound(&config, x)?;

        let scale = target_max / bound;
        if !(bound.is_finite() && bound > 0.0 && scale.is_finite()) {
            return Err(QuantizerError::InvalidBound(bound));
        }

        debug!(
            "Fitted {} quantizer: bound {} -> scale {} (step {})",
            config.target_type(),
            bound,
            scale,
            1.0 / scale
        );
        Ok(Self { config, bound, scale })
    }

    pub fn config(&self) -> &QuantizerConfig {
        &self.config
    }

    pub fn target_type(&self) -> TargetType {
        self.config.target_type()
    }

    pub fn target_range(&self) -> f64 {
        self.config.target_range()
    }

    /// Multiplier from original units into target units.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Symmetric bound the scale was derived from.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Width of one quantization step in original units.
    pub fn step_size(&self) -> f64 {
        1.0 / self.scale
    }

    /// Half-width of the band inputs are clipped to before scaling.
    pub fn clip_band(&self) -> f64 {
        match self.config.clip() {
            ClipRange::Bound => self.bound,
            ClipRange::TargetRange => self.target_range(),
        }
    }

    /// Clips, scales and casts `x` into the configured target type.
    /// The output has exactly the shape of `x`.
    pub fn transform<A, S, D>(&self, x: &ArrayBase<S, D>) -> QuantizedArray<D>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        match self.target_type() {
            TargetType::Int8 => QuantizedArray::Int8(self.cast(x)),
            TargetType::Int16 => QuantizedArray::Int16(self.cast(x)),
            TargetType::Int32 => QuantizedArray::Int32(self.cast(x)),
            TargetType::Float16 => QuantizedArray::Float16(self.cast(x)),
            TargetType::Float32 => QuantizedArray::Float32(self.cast(x)),
        }
    }

    /// Like [`transform`](Self::transform) but returns the concrete element
    /// type. Fails if `T` is not the configured target type.
    pub fn transform_as<T, A, S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<T, D>, QuantizerError>
    where
        T: TargetElement,
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        if T::TARGET != self.target_type() {
            return Err(QuantizerError::TypeMismatch {
                requested: T::TARGET,
                configured: self.target_type(),
            });
        }
        Ok(self.cast(x))
    }

    /// Forward transform with a label array passed through untouched.
    pub fn transform_with_targets<A, S, D, Y>(&self, x: &ArrayBase<S, D>, y: Y) -> (QuantizedArray<D>, Y)
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        (self.transform(x), y)
    }

    /// Approximate inverse: widen to `f64` and divide by the scale.
    ///
    /// Accepts any numeric element type, not only the configured target. Lossy:
    /// clipping and the final cast are not undone.
    pub fn inverse_transform<A, S, D>(&self, x: &ArrayBase<S, D>) -> Array<f64, D>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        unscale(x, self.scale)
    }

    pub fn inverse_transform_quantized<D: Dimension>(&self, x: &QuantizedArray<D>) -> Array<f64, D> {
        x.unscale(self.scale)
    }

    /// Inverse transform with a label array passed through untouched.
    pub fn inverse_transform_with_targets<A, S, D, Y>(&self, x: &ArrayBase<S, D>, y: Y) -> (Array<f64, D>, Y)
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        (self.inverse_transform(x), y)
    }

    fn cast<T, A, S, D>(&self, x: &ArrayBase<S, D>) -> Array<T, D>
    where
        T: TargetElement,
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let band = self.clip_band();
        let (out, clipped) = clip_scale_cast(x, band, self.scale);
        if clipped > 0 {
            debug!("Clipped {} of {} values to ±{}", clipped, x.len(), band);
        }
        out
    }
}

fn resolve_bound<A, S, D>(config: &QuantizerConfig, x: &ArrayBase<S, D>) -> Result<f64, QuantizerError>
where
    A: Copy + Into<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    if let Some(max_value) = config.max_value() {
        debug!("Using explicit bound {}", max_value);
        return Ok(max_value);
    }

    let mut pooled = collect_finite(x.iter())?;
    let tails = symmetric_bound(&mut pooled, config.max_quantile())?;
    debug!(
        "Estimated bound from {} values: q{} = {}, q{} = {} -> {}",
        pooled.len(),
        config.max_quantile(),
        tails.low,
        1.0 - config.max_quantile(),
        tails.high,
        tails.largest()
    );
    Ok(tails.largest())
}

/// Fits `config` on `x`. Equivalent to [`QuantizerConfig::fit`].
pub fn fit<A, S, D>(config: &QuantizerConfig, x: &ArrayBase<S, D>) -> Result<FittedQuantizer, QuantizerError>
where
    A: Copy + Into<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    config.fit(x)
}
