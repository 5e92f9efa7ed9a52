use featquant_math::{unscale, TargetElement, TargetType};
use half::f16;
use ndarray::{Array, Dimension};

/// Output of a forward transform, one variant per [`TargetType`].
#[derive(Debug, Clone, PartialEq)]
pub enum QuantizedArray<D: Dimension> {
    Int8(Array<i8, D>),
    Int16(Array<i16, D>),
    Int32(Array<i32, D>),
    Float16(Array<f16, D>),
    Float32(Array<f32, D>),
}

impl<D: Dimension> QuantizedArray<D> {
    pub fn target_type(&self) -> TargetType {
        match self {
            QuantizedArray::Int8(_) => TargetType::Int8,
            QuantizedArray::Int16(_) => TargetType::Int16,
            QuantizedArray::Int32(_) => TargetType::Int32,
            QuantizedArray::Float16(_) => TargetType::Float16,
            QuantizedArray::Float32(_) => TargetType::Float32,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            QuantizedArray::Int8(a) => a.shape(),
            QuantizedArray::Int16(a) => a.shape(),
            QuantizedArray::Int32(a) => a.shape(),
            QuantizedArray::Float16(a) => a.shape(),
            QuantizedArray::Float32(a) => a.shape(),
        }
    }

    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the payload if its element type is `T`.
    pub fn as_array<T: QuantizedElement>(&self) -> Option<&Array<T, D>> {
        T::peek(self)
    }

    /// Takes the payload if its element type is `T`, otherwise hands `self` back.
    pub fn into_array<T: QuantizedElement>(self) -> Result<Array<T, D>, Self> {
        T::take(self)
    }

    /// Divides every element by `scale`, widening to `f64`.
    pub(crate) fn unscale(&self, scale: f64) -> Array<f64, D> {
        match self {
            QuantizedArray::Int8(a) => unscale(a, scale),
            QuantizedArray::Int16(a) => unscale(a, scale),
            QuantizedArray::Int32(a) => unscale(a, scale),
            QuantizedArray::Float16(a) => unscale(a, scale),
            QuantizedArray::Float32(a) => unscale(a, scale),
        }
    }
}

/// Element types that have a [`QuantizedArray`] variant.
pub trait QuantizedElement: TargetElement {
    fn wrap<D: Dimension>(array: Array<Self, D>) -> QuantizedArray<D>;
    fn peek<D: Dimension>(quantized: &QuantizedArray<D>) -> Option<&Array<Self, D>>;
    fn take<D: Dimension>(quantized: QuantizedArray<D>) -> Result<Array<Self, D>, QuantizedArray<D>>;
}

macro_rules! quantized_element {
    ($ty:ty, $variant:ident) => {
        impl QuantizedElement for $ty {
            fn wrap<D: Dimension>(array: Array<Self, D>) -> QuantizedArray<D> {
                QuantizedArray::$variant(array)
            }

            fn peek<D: Dimension>(quantized: &QuantizedArray<D>) -> Option<&Array<Self, D>> {
                match quantized {
                    QuantizedArray::$variant(a) => Some(a),
                    _ => None,
                }
            }

            fn take<D: Dimension>(quantized: QuantizedArray<D>) -> Result<Array<Self, D>, QuantizedArray<D>> {
                match quantized {
                    QuantizedArray::$variant(a) => Ok(a),
                    other => Err(other),
                }
            }
        }
    };
}

quantized_element!(i8, Int8);
quantized_element!(i16, Int16);
quantized_element!(i32, Int32);
quantized_element!(f16, Float16);
quantized_element!(f32, Float32);
