//! Linear-interpolation resampling over the sample index axis.
//!
//! Speed and pitch stages stretch or squeeze a chunk by reading it at
//! evenly spaced fractional positions from the first to the last sample:
//!
//! ```text
//! pos[j] = j × (len - 1) / (new_len - 1)
//! y[j]   = x[⌊pos⌋] + frac(pos) × (x[⌊pos⌋ + 1] - x[⌊pos⌋])
//! ```
//!
//! No anti-aliasing filter is applied. Large ratios alias; that is part of the
//! sound of these stages.

use crate::error::StageError;

/// Resample `input` to exactly `new_len` samples into `out`.
pub fn resample_into(input: &[f32], new_len: usize, out: &mut Vec<f32>) {
    out.clear();
    if input.is_empty() || new_len == 0 {
        out.resize(new_len, 0.0);
        return;
    }
    let last = (input.len() - 1) as f64;
    let step = if new_len > 1 {
        last / (new_len - 1) as f64
    } else {
        0.0
    };
    out.extend((0..new_len).map(|j| {
        let pos = j as f64 * step;
        let index = (pos.floor() as usize).min(input.len() - 1);
        let frac = (pos - index as f64) as f32;
        match input.get(index + 1) {
            Some(&next) => input[index] + frac * (next - input[index]),
            None => input[index],
        }
    }));
}

/// Length after playing `len` samples back at `ratio` times the speed.
pub fn scaled_len(len: usize, ratio: f32, name: &'static str) -> Result<usize, StageError> {
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(StageError::InvalidParameter { name, value: ratio });
    }
    let new_len = (len as f64 / ratio as f64) as usize;
    if new_len == 0 {
        return Err(StageError::DegenerateLength { len });
    }
    Ok(new_len)
}

/// One-dimensional piecewise-linear interpolation.
///
/// `xp` must be non-decreasing. Queries left of `xp[0]` return `fp[0]`, queries
/// right of the last point return the last `fp`. Repeated abscissae are
/// allowed; the rightmost of a run wins.
pub fn interp(x: f32, xp: &[f32], fp: &[f32]) -> f32 {
    debug_assert_eq!(xp.len(), fp.len());
    let n = xp.len().min(fp.len());
    if n == 0 {
        return 0.0;
    }
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    // First index with xp > x; x >= xp[0] guarantees hi >= 1
    let hi = xp[..n].partition_point(|&v| v <= x);
    let lo = hi - 1;
    let span = xp[hi] - xp[lo];
    fp[lo] + (x - xp[lo]) * (fp[hi] - fp[lo]) / span
}
