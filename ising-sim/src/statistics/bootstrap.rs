use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

use super::stats::variance;
use crate::error::StatsError;

/// Fill `out` with `samples.len()` values drawn uniformly with replacement.
///
/// Indices cover the whole range `0..=len-1`.
fn resample_into(samples: &[f64], out: &mut Vec<f64>, rng: &mut Xoshiro256StarStar) {
    let n = samples.len();
    out.clear();
    out.extend((0..n).map(|_| samples[rng.gen_range(0..n)]));
}

/// Bootstrap standard error of `derive_fn` over `samples`.
///
/// Builds `num_resamples` resamples of the same length, applies `derive_fn`
/// to each, and returns the square root of the population variance of the
/// derived values. `derive_fn` must be parameterised the same way as the point
/// estimate it accompanies.
pub fn bootstrap_error<F>(
    samples: &[f64],
    derive_fn: F,
    num_resamples: usize,
    rng: &mut Xoshiro256StarStar,
) -> Result<f64, StatsError>
where
    F: Fn(&[f64]) -> Result<f64, StatsError>,
{
    if samples.is_empty() {
        return Err(StatsError::EmptySamples);
    }
    if num_resamples == 0 {
        return Err(StatsError::NoResamples);
    }

    let mut buf = Vec::with_capacity(samples.len());
    let mut derived = Vec::with_capacity(num_resamples);
    for _ in 0..num_resamples {
        resample_into(samples, &mut buf, rng);
        derived.push(derive_fn(&buf)?);
    }

    Ok(variance(&derived)?.sqrt())
}
