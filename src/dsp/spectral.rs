//! Frequency-domain stages: formant shift and spectral-mask shelves.

/*
Real-input spectra
==================

A chunk of N real samples has a Hermitian spectrum: bin N-k is the complex
conjugate of bin k. Only bins 0..=N/2 carry information, so every stage here
works on that HALF spectrum and the inverse rebuilds the mirrored half before
transforming back.

    bin k  ↔  frequency k × sample_rate / N        (0 ..= Nyquist)

The inverse discards the imaginary part of the DC bin (and of the Nyquist bin
for even N), then divides by N so forward → inverse is the identity.


Formant shift
-------------

The spectral envelope is moved by remapping the frequency axis:

    shifted[k] = clamp(freq[k] × shift, 0, Nyquist)
    |Y|[k]     = interp(freq[k], shifted, |X|)
    ∠Y[k]      = interp(freq[k], shifted, ∠X)

Magnitude and phase are interpolated independently. shift > 1 moves
formants up (smaller vocal tract), shift < 1 moves them down.


Shelves
-------

Not true shelving biquads. They are hard spectral masks:

    low shelf:   bins with freq <  200 Hz  × gain
    high shelf:  bins with freq > 3000 Hz  × gain

The hard edge rings a little in the time domain. Replacing it with a
proper shelf would change how every preset sounds, so it stays.
*/

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::resample::interp;
use crate::error::StageError;

/// Frequency below which the low shelf applies.
pub const LOW_SHELF_HZ: f32 = 200.0;
/// Frequency above which the high shelf applies.
pub const HIGH_SHELF_HZ: f32 = 3000.0;

/// Reusable forward/inverse transform for real chunks.
///
/// Plans are cached by the planner, so alternating chunk lengths (after a
/// speed change) only pay the planning cost once per length.
pub struct SpectralTransform {
    planner: FftPlanner<f32>,
    /// Full complex scratch for the transform itself
    scratch: Vec<Complex<f32>>,
    /// Bins 0..=N/2 of the last analyzed chunk
    half: Vec<Complex<f32>>,
    /// Per-bin working storage for formant remapping
    freqs: Vec<f32>,
    shifted: Vec<f32>,
    magnitude: Vec<f32>,
    phase: Vec<f32>,
    len: usize,
}

impl SpectralTransform {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            scratch: Vec::new(),
            half: Vec::new(),
            freqs: Vec::new(),
            shifted: Vec::new(),
            magnitude: Vec::new(),
            phase: Vec::new(),
            len: 0,
        }
    }

    /// Half spectrum of the last analyzed chunk.
    pub fn bins(&self) -> &[Complex<f32>] {
        &self.half
    }

    /// Forward transform of `input` into the half spectrum.
    pub fn analyze(&mut self, input: &[f32]) -> Result<(), StageError> {
        let n = input.len();
        if n < 2 {
            return Err(StageError::DegenerateLength { len: n });
        }
        let fft: Arc<dyn Fft<f32>> = self.planner.plan_fft_forward(n);

        self.scratch.clear();
        self.scratch
            .extend(input.iter().map(|&x| Complex::new(x, 0.0)));
        fft.process(&mut self.scratch);

        self.half.clear();
        self.half.extend_from_slice(&self.scratch[..n / 2 + 1]);
        self.len = n;
        Ok(())
    }

    /// Inverse transform of the half spectrum back into `output`.
    ///
    /// `output` must be as long as the chunk last passed to [`Self::analyze`].
    pub fn synthesize(&mut self, output: &mut [f32]) {
        let n = self.len;
        debug_assert_eq!(output.len(), n);
        let ifft = self.planner.plan_fft_inverse(n);

        // DC (and Nyquist for even N) must be real
        self.half[0].im = 0.0;
        if n % 2 == 0 {
            self.half[n / 2].im = 0.0;
        }

        self.scratch.clear();
        self.scratch.extend_from_slice(&self.half);
        for k in self.half.len()..n {
            self.scratch.push(self.half[n - k].conj());
        }
        ifft.process(&mut self.scratch);

        let scale = 1.0 / n as f32;
        for (out, bin) in output.iter_mut().zip(self.scratch.iter()) {
            *out = bin.re * scale;
        }
    }

    /// Frequency in Hz of half-spectrum bin `k`.
    #[inline]
    pub fn bin_hz(&self, k: usize, sample_rate: f32) -> f32 {
        k as f32 * sample_rate / self.len as f32
    }

    /// Multiply every bin for which `select(freq_hz)` holds by `gain`.
    pub fn scale_bins(&mut self, sample_rate: f32, gain: f32, select: impl Fn(f32) -> bool) {
        for k in 0..self.half.len() {
            if select(self.bin_hz(k, sample_rate)) {
                self.half[k] *= gain;
            }
        }
    }

    /// Remap magnitude and phase along a frequency axis scaled by `shift`.
    pub fn shift_formants(&mut self, sample_rate: f32, shift: f32) {
        let nyquist = sample_rate / 2.0;
        let bins = self.half.len();

        self.freqs.clear();
        self.freqs.extend((0..bins).map(|k| k as f32 * sample_rate / self.len as f32));
        self.shifted.clear();
        self.shifted
            .extend(self.freqs.iter().map(|&f| (f * shift).clamp(0.0, nyquist)));
        self.magnitude.clear();
        self.magnitude.extend(self.half.iter().map(|c| c.norm()));
        self.phase.clear();
        self.phase.extend(self.half.iter().map(|c| c.arg()));

        for k in 0..bins {
            let f = self.freqs[k];
            let magnitude = interp(f, &self.shifted, &self.magnitude);
            let phase = interp(f, &self.shifted, &self.phase);
            self.half[k] = Complex::from_polar(magnitude, phase);
        }
    }
}

impl Default for SpectralTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// Shift formants of `buffer` in place.
pub fn formant_shift(
    transform: &mut SpectralTransform,
    buffer: &mut [f32],
    shift: f32,
    sample_rate: f32,
) -> Result<(), StageError> {
    if !(shift.is_finite() && shift > 0.0) {
        return Err(StageError::InvalidParameter {
            name: "formant_shift",
            value: shift,
        });
    }
    transform.analyze(buffer)?;
    transform.shift_formants(sample_rate, shift);
    transform.synthesize(buffer);
    Ok(())
}

/// Multiply all content below [`LOW_SHELF_HZ`] by `gain`.
pub fn low_shelf(
    transform: &mut SpectralTransform,
    buffer: &mut [f32],
    gain: f32,
    sample_rate: f32,
) -> Result<(), StageError> {
    transform.analyze(buffer)?;
    transform.scale_bins(sample_rate, gain, |f| f < LOW_SHELF_HZ);
    transform.synthesize(buffer);
    Ok(())
}

/// Multiply all content above [`HIGH_SHELF_HZ`] by `gain`.
pub fn high_shelf(
    transform: &mut SpectralTransform,
    buffer: &mut [f32],
    gain: f32,
    sample_rate: f32,
) -> Result<(), StageError> {
    transform.analyze(buffer)?;
    transform.scale_bins(sample_rate, gain, |f| f > HIGH_SHELF_HZ);
    transform.synthesize(buffer);
    Ok(())
}
