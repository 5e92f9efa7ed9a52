use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::{FittedQuantizer, QuantizedArray, QuantizerConfig, QuantizerError};

/// Pipeline-stage wrapper over the typed fit/transform API.
///
/// Starts unfitted. [`fit`](Self::fit) replaces any previous scale;
/// transforms before a successful fit return [`QuantizerError::NotFitted`].
/// `fit` takes `&mut self`, so a stage cannot be re-fitted while it is
/// shared for transforms.
#[derive(Debug, Clone, Default)]
pub struct Quantizer {
    config: QuantizerConfig,
    fitted: Option<FittedQuantizer>,
}

impl Quantizer {
    pub fn new(config: QuantizerConfig) -> Self {
        Self { config, fitted: None }
    }

    pub fn config(&self) -> &QuantizerConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn fitted(&self) -> Result<&FittedQuantizer, QuantizerError> {
        self.fitted.as_ref().ok_or(QuantizerError::NotFitted)
    }

    pub fn into_fitted(self) -> Result<FittedQuantizer, QuantizerError> {
        self.fitted.ok_or(QuantizerError::NotFitted)
    }

    /// Learned scale, if fitted.
    pub fn scale(&self) -> Option<f64> {
        self.fitted.as_ref().map(FittedQuantizer::scale)
    }

    /// Fits on `x`, discarding any previous fit. A failed fit leaves the
    /// stage unfitted.
    pub fn fit<A, S, D>(&mut self, x: &ArrayBase<S, D>) -> Result<&mut Self, QuantizerError>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        self.fitted = None;
        self.fitted = Some(self.config.fit(x)?);
        Ok(self)
    }

    pub fn transform<A, S, D>(&self, x: &ArrayBase<S, D>) -> Result<QuantizedArray<D>, QuantizerError>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        Ok(self.fitted()?.transform(x))
    }

    pub fn transform_with_targets<A, S, D, Y>(
        &self,
        x: &ArrayBase<S, D>,
        y: Y,
    ) -> Result<(QuantizedArray<D>, Y), QuantizerError>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        Ok(self.fitted()?.transform_with_targets(x, y))
    }

    pub fn inverse_transform<A, S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, QuantizerError>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        Ok(self.fitted()?.inverse_transform(x))
    }

    pub fn inverse_transform_quantized<D: Dimension>(
        &self,
        x: &QuantizedArray<D>,
    ) -> Result<Array<f64, D>, QuantizerError> {
        Ok(self.fitted()?.inverse_transform_quantized(x))
    }

    pub fn inverse_transform_with_targets<A, S, D, Y>(
        &self,
        x: &ArrayBase<S, D>,
        y: Y,
    ) -> Result<(Array<f64, D>, Y), QuantizerError>
    where
        A: Copy + Into<f64>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        Ok(self.fitted()?.inverse_transform_with_targets(x, y))
    }
}

impl From<FittedQuantizer> for Quantizer {
    fn from(fitted: FittedQuantizer) -> Self {
        Self {
            config: fitted.config().clone(),
            fitted: Some(fitted),
        }
    }
}
