use std::fmt;
use std::str::FromStr;

use half::f16;
use serde::{Deserialize, Serialize};

use crate::NumericError;

/// Fixed-width numeric representation a quantizer writes into.
///
/// Parsed from the usual dtype spellings (`"int16"`, `"i2"`, `"float16"`, ...);
/// anything else, including unsigned and 64-bit types, is rejected with
/// [`NumericError::UnsupportedType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetType {
    Int8,
    #[default]
    Int16,
    Int32,
    Float16,
    Float32,
}

impl TargetType {
    pub const ALL: [TargetType; 5] = [
        TargetType::Int8,
        TargetType::Int16,
        TargetType::Int32,
        TargetType::Float16,
        TargetType::Float32,
    ];

    /// Largest positive value representable in this type.
    ///
    /// Integers report their `MAX`; floats report their largest finite value.
    pub const fn max_magnitude(self) -> f64 {
        match self {
            TargetType::Int8 => i8::MAX as f64,
            TargetType::Int16 => i16::MAX as f64,
            TargetType::Int32 => i32::MAX as f64,
            // f16::MAX, written out so the table stays const
            TargetType::Float16 => 65504.0,
            TargetType::Float32 => f32::MAX as f64,
        }
    }

    pub const fn is_integer(self) -> bool {
        matches!(self, TargetType::Int8 | TargetType::Int16 | TargetType::Int32)
    }

    pub const fn bits(self) -> u32 {
        match self {
            TargetType::Int8 => 8,
            TargetType::Int16 | TargetType::Float16 => 16,
            TargetType::Int32 | TargetType::Float32 => 32,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TargetType::Int8 => "int8",
            TargetType::Int16 => "int16",
            TargetType::Int32 => "int32",
            TargetType::Float16 => "float16",
            TargetType::Float32 => "float32",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetType {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int8" | "i1" => Ok(TargetType::Int8),
            "int16" | "i2" => Ok(TargetType::Int16),
            "int32" | "i4" => Ok(TargetType::Int32),
            "float16" | "f2" | "half" => Ok(TargetType::Float16),
            "float32" | "f4" | "single" => Ok(TargetType::Float32),
            _ => Err(NumericError::UnsupportedType(s.to_string())),
        }
    }
}

impl TryFrom<String> for TargetType {
    type Error = NumericError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetType> for String {
    fn from(value: TargetType) -> Self {
        value.name().to_string()
    }
}

/// Element type of a quantized array.
///
/// `from_scaled` is the final cast of the forward transform:
/// - integers truncate toward zero, saturate at the type limits, NaN becomes 0
/// - `f16` rounds to nearest-even, overflowing to ±inf
/// - `f32` rounds to nearest, overflowing to ±inf
pub trait TargetElement: Copy + Into<f64> + fmt::Debug + PartialEq + Send + Sync + 'static {
    const TARGET: TargetType;

    fn from_scaled(value: f64) -> Self;
}

impl TargetElement for i8 {
    const TARGET: TargetType = TargetType::Int8;

    #[inline]
    fn from_scaled(value: f64) -> Self {
        value as i8
    }
}

impl TargetElement for i16 {
    const TARGET: TargetType = TargetType::Int16;

    #[inline]
    fn from_scaled(value: f64) -> Self {
        value as i16
    }
}

impl TargetElement for i32 {
    const TARGET: TargetType = TargetType::Int32;

    #[inline]
    fn from_scaled(value: f64) -> Self {
        value as i32
    }
}

impl TargetElement for f16 {
    const TARGET: TargetType = TargetType::Float16;

    #[inline]
    fn from_scaled(value: f64) -> Self {
        f16::from_f64(value)
    }
}

impl TargetElement for f32 {
    const TARGET: TargetType = TargetType::Float32;

    #[inline]
    fn from_scaled(value: f64) -> Self {
        value as f32
    }
}
