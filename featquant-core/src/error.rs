use featquant_math::{NumericError, TargetType};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantizerError {
    #[error("Numeric error: {0}")]
    Numeric(#[from] NumericError),
    #[error("Bound {0} must be positive and finite")]
    InvalidBound(f64),
    #[error("Quantizer is not fitted; call fit before transform or inverse_transform")]
    NotFitted,
    #[error("Requested {requested} output but the quantizer targets {configured}")]
    TypeMismatch {
        requested: TargetType,
        configured: TargetType,
    },
}
