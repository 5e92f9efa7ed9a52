use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::TargetElement;

/// Forward kernel: clip each element to `[-band, band]`, multiply by `scale`,
/// cast to `T`.
///
/// Returns the cast array (same shape as `input`) and the number of elements
/// that were clipped. NaN is neither clipped nor counted; it reaches the cast
/// unchanged.
pub fn clip_scale_cast<A, S, D, T>(input: &ArrayBase<S, D>, band: f64, scale: f64) -> (Array<T, D>, usize)
where
    A: Copy + Into<f64>,
    S: Data<Elem = A>,
    D: Dimension,
    T: TargetElement,
{
    let mut clipped = 0usize;
    let out = input.mapv(|value| {
        let value: f64 = value.into();
        let bounded = if value > band {
            clipped += 1;
            band
        } else if value < -band {
            clipped += 1;
            -band
        } else {
            value
        };
        T::from_scaled(bounded * scale)
    });
    (out, clipped)
}

/// Inverse kernel: widen to `f64` and divide by `scale`.
pub fn unscale<A, S, D>(input: &ArrayBase<S, D>, scale: f64) -> Array<f64, D>
where
    A: Copy + Into<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    input.mapv(|value| value.into() / scale)
}
