//! # featquant-core
//!
//! Global linear feature quantization: learn one scale factor for a whole
//! feature matrix, then map floats into a narrow fixed-width type and back.
//!
//! - [`QuantizerConfig`]: `max_quantile`, `max_value`, `target_type`, `clip`
//! - [`FittedQuantizer`]: produced by [`QuantizerConfig::fit`]; the only type
//!   with `transform` / `inverse_transform`
//! - [`Quantizer`]: fit-then-use pipeline stage over the two, reporting
//!   [`QuantizerError::NotFitted`] when used too early
//! - [`QuantizedArray`]: forward output, one variant per target type
//!
//! # Example
//! ```
//! use featquant_core::{QuantizerConfig, TargetType};
//! use ndarray::array;
//!
//! let x = array![[0.5, -1.25], [2.0, 0.0]];
//! let fitted = QuantizerConfig::new(TargetType::Int16)
//!     .with_max_value(10.0)
//!     .fit(&x)
//!     .unwrap();
//!
//! let q = fitted.transform(&x);
//! assert_eq!(q.target_type(), TargetType::Int16);
//! assert_eq!(q.shape(), &[2, 2]);
//!
//! let back = fitted.inverse_transform_quantized(&q);
//! assert!((back[[1, 0]] - 2.0).abs() < 1e-3);
//! ```

pub mod config;
pub mod error;
pub mod fitted;
pub mod quantized;
pub mod quantizer;

pub use config::{ClipRange, QuantizerConfig};
pub use error::QuantizerError;
pub use featquant_math::{NumericError, TargetElement, TargetType};
pub use fitted::{fit, FittedQuantizer};
pub use quantized::{QuantizedArray, QuantizedElement};
pub use quantizer::Quantizer;
