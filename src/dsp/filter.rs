use biquad::{Biquad, Coefficients, DirectForm2Transposed, ToHertz, Type, Q_BUTTERWORTH_F32};

use crate::error::StageError;

/*
| stage    | response  | passes       | rejects      |
| -------- | --------- | ------------ | ------------ |
| low-cut  | high-pass | above cutoff | below cutoff |
| high-cut | low-pass  | below cutoff | above cutoff |

Both are a single 2nd-order Butterworth section (Q = 1/√2), run in
transposed direct form II. The section's two state words carry over from one
chunk to the next so the filter output stays continuous at chunk
boundaries; only a cutoff change recomputes the coefficients, and it does so
without clearing that state.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    /// High-pass: removes rumble below the cutoff.
    LowCut,
    /// Low-pass: removes hiss above the cutoff.
    HighCut,
}

impl CutKind {
    fn response(self) -> Type<f32> {
        match self {
            CutKind::LowCut => Type::HighPass,
            CutKind::HighCut => Type::LowPass,
        }
    }

    fn param_name(self) -> &'static str {
        match self {
            CutKind::LowCut => "low_cut_hz",
            CutKind::HighCut => "high_cut_hz",
        }
    }
}

/// Streaming Butterworth cut filter with state that outlives a chunk.
pub struct CutFilter {
    kind: CutKind,
    sample_rate: f32,
    cutoff_hz: Option<f32>,
    section: Option<DirectForm2Transposed<f32>>,
}

impl CutFilter {
    pub fn new(kind: CutKind, sample_rate: f32) -> Self {
        Self {
            kind,
            sample_rate,
            cutoff_hz: None,
            section: None,
        }
    }

    pub fn low_cut(sample_rate: f32) -> Self {
        Self::new(CutKind::LowCut, sample_rate)
    }

    pub fn high_cut(sample_rate: f32) -> Self {
        Self::new(CutKind::HighCut, sample_rate)
    }

    pub fn cutoff_hz(&self) -> Option<f32> {
        self.cutoff_hz
    }

    /// Drop the filter section; the next `render` starts from zero state.
    pub fn reset(&mut self) {
        self.section = None;
    }

    fn design(&self, cutoff_hz: f32) -> Result<Coefficients<f32>, StageError> {
        if !(cutoff_hz.is_finite() && cutoff_hz > 0.0) {
            return Err(StageError::InvalidParameter {
                name: self.kind.param_name(),
                value: cutoff_hz,
            });
        }
        Coefficients::<f32>::from_params(
            self.kind.response(),
            self.sample_rate.hz(),
            cutoff_hz.hz(),
            Q_BUTTERWORTH_F32,
        )
        .map_err(|e| StageError::Filter(format!("{:?} at {} Hz", e, cutoff_hz)))
    }

    /// Filter `buffer` in place at `cutoff_hz`.
    pub fn render(&mut self, buffer: &mut [f32], cutoff_hz: f32) -> Result<(), StageError> {
        if self.cutoff_hz != Some(cutoff_hz) || self.section.is_none() {
            let coeffs = self.design(cutoff_hz)?;
            match self.section.as_mut() {
                Some(section) => section.update_coefficients(coeffs),
                None => self.section = Some(DirectForm2Transposed::<f32>::new(coeffs)),
            }
            self.cutoff_hz = Some(cutoff_hz);
        }

        if let Some(section) = self.section.as_mut() {
            for sample in buffer.iter_mut() {
                *sample = section.run(*sample);
            }
        }
        Ok(())
    }
}
