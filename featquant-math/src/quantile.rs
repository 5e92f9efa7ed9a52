use std::cmp::Ordering;

use crate::NumericError;

/// Pools `values` into an owned `f64` buffer, rejecting NaN and infinities.
pub fn collect_finite<'a, A, I>(values: I) -> Result<Vec<f64>, NumericError>
where
    A: Copy + Into<f64> + 'a,
    I: IntoIterator<Item = &'a A>,
{
    let iter = values.into_iter();
    let mut pooled = Vec::with_capacity(iter.size_hint().0);
    for (index, &value) in iter.enumerate() {
        let value: f64 = value.into();
        if !value.is_finite() {
            return Err(NumericError::NonFiniteInput { index });
        }
        pooled.push(value);
    }
    Ok(pooled)
}

/// Empirical quantile with linear interpolation between closest ranks.
///
/// With `n` values sorted ascending, the rank is `h = (n - 1) * q` and the
/// result interpolates between `x[floor(h)]` and `x[floor(h) + 1]`.
/// `q = 0` is the minimum and `q = 1` the maximum.
///
/// `values` is reordered in place (selection, not a full sort); its multiset
/// is unchanged, so several quantiles can be taken from the same buffer.
pub fn quantile(values: &mut [f64], q: f64) -> Result<f64, NumericError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(NumericError::InvalidQuantile(q));
    }
    if values.is_empty() {
        return Err(NumericError::EmptyInput);
    }

    let rank = (values.len() - 1) as f64 * q;
    let lo = (rank.floor() as usize).min(values.len() - 1);
    let frac = rank - lo as f64;

    let (_, nth, upper) = values.select_nth_unstable_by(lo, total_order);
    let below = *nth;
    if frac == 0.0 || upper.is_empty() {
        return Ok(below);
    }

    // Everything right of the pivot is >= it, so the next rank is their minimum.
    let above = upper.iter().copied().fold(f64::INFINITY, f64::min);
    Ok(below + frac * (above - below))
}

fn total_order(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Checks a tail fraction lies in `[0, 0.5)`.
pub fn validate_max_quantile(max_quantile: f64) -> Result<f64, NumericError> {
    if (0.0..0.5).contains(&max_quantile) {
        Ok(max_quantile)
    } else {
        Err(NumericError::InvalidQuantile(max_quantile))
    }
}

/// Two-sided tail estimate of a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricBound {
    /// Value at the `max_quantile` rank
    pub low: f64,
    /// Value at the `1 - max_quantile` rank
    pub high: f64,
}

impl SymmetricBound {
    /// Magnitude covering both tails: `max(high, -low)`.
    pub fn largest(&self) -> f64 {
        self.high.max(-self.low)
    }
}

/// Estimates the robust symmetric bound of `values`, discarding the most
/// extreme `max_quantile` fraction on each tail.
pub fn symmetric_bound(values: &mut [f64], max_quantile: f64) -> Result<SymmetricBound, NumericError> {
    let max_quantile = validate_max_quantile(max_quantile)?;
    let low = quantile(values, max_quantile)?;
    let high = quantile(values, 1.0 - max_quantile)?;
    Ok(SymmetricBound { low, high })
}
