//! # featquant
//!
//! Feature quantizer for constrained-precision runtimes: one global scale
//! factor maps a float feature matrix into `int8` / `int16` / `int32` /
//! `float16` / `float32`, with an approximate inverse.
//!
//! Crates:
//! - [`math`] (`featquant-math`): target-type table, quantiles, clip/scale/cast kernels
//! - [`quantizer`] (`featquant-core`): configuration, fitting, transforms
//!
//! The common types are re-exported at the top level.

pub use featquant_core as quantizer;
pub use featquant_math as math;

pub use featquant_core::{
    fit, ClipRange, FittedQuantizer, NumericError, QuantizedArray, QuantizedElement, Quantizer,
    QuantizerConfig, QuantizerError, TargetElement, TargetType,
};
