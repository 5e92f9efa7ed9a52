use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    #[error("Unsupported target type `{0}` (expected int8, int16, int32, float16 or float32)")]
    UnsupportedType(String),
    #[error("Cannot estimate a quantile from an empty input")]
    EmptyInput,
    #[error("Non-finite value at flat index {index}")]
    NonFiniteInput { index: usize },
    #[error("Quantile {0} outside the valid range")]
    InvalidQuantile(f64),
}
