//! # featquant-math
//!
//! Numeric primitives for the featquant feature quantizer.
//!
//! - [`TargetType`]: closed set of fixed-width output representations, each with
//!   its maximum representable magnitude
//! - [`TargetElement`]: ties a Rust element type (`i8`, `i16`, `i32`, `f16`, `f32`)
//!   to its [`TargetType`] and pins the cast semantics
//! - [`quantile`] / [`symmetric_bound`]: robust tail estimation over a pooled
//!   population of values
//! - [`clip_scale_cast`] / [`unscale`]: the elementwise forward and inverse kernels
//!
//! All kernels are shape-generic over `ndarray` arrays.

pub mod error;
pub mod ops;
pub mod quantile;
pub mod target;

pub use error::NumericError;
pub use ops::{clip_scale_cast, unscale};
pub use quantile::{collect_finite, quantile, symmetric_bound, validate_max_quantile, SymmetricBound};
pub use target::{TargetElement, TargetType};
