//! Benchmarks for individual effect stages.

mod filter;
mod modulation;
mod resample;
mod reverb;
mod spectral;

pub use filter::bench_filter;
pub use modulation::bench_modulation;
pub use resample::bench_resample;
pub use reverb::bench_reverb;
pub use spectral::bench_spectral;
