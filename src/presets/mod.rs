//! Factory presets.
//!
//! Each preset is a plain [`Preset`] value. Use these as starting points for
//! your own voices, or study them to see how the stages combine.
//!
//! # Example
//!
//! ```
//! use voxshift::{presets, VoiceProcessor};
//!
//! let processor = VoiceProcessor::new(44_100, 1024);
//! processor.set_preset(presets::robot());
//!
//! for preset in presets::all() {
//!     println!("{}", preset.name);
//! }
//! ```

mod broadcast;
mod character;
mod pitch;
mod space;

pub use broadcast::{megaphone, radio};
pub use character::{alien, ghost, monster, robot};
pub use pitch::{chipmunk, deep};
pub use space::cave;

use crate::voice::Preset;

/// Every stage disabled. Processing still renormalizes and clips.
pub fn normal() -> Preset {
    Preset::new("Normal")
}

/// All factory presets, in display order.
pub fn all() -> Vec<Preset> {
    vec![
        normal(),
        chipmunk(),
        deep(),
        robot(),
        radio(),
        monster(),
        alien(),
        cave(),
        ghost(),
        megaphone(),
    ]
}

/// Look up a factory preset by name, ignoring case.
pub fn by_name(name: &str) -> Option<Preset> {
    all().into_iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::VoiceProcessor;

    #[test]
    fn test_names_are_unique() {
        let presets = all();
        for (i, a) in presets.iter().enumerate() {
            for b in &presets[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
        assert_eq!(presets.len(), 10);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("robot").map(|p| p.name), Some("Robot".to_string()));
        assert!(by_name("kazoo").is_none());
    }

    #[test]
    fn test_cutoffs_below_nyquist() {
        let nyquist = crate::DEFAULT_SAMPLE_RATE as f32 / 2.0;
        for preset in all() {
            for hz in [preset.low_cut_hz, preset.high_cut_hz].into_iter().flatten() {
                assert!(hz > 0.0 && hz < nyquist, "{}: {hz}", preset.name);
            }
        }
    }

    #[test]
    fn test_every_preset_runs_clean() {
        let input: Vec<f32> = (0..1024)
            .map(|i| 0.8 * (i as f32 * 0.07).sin())
            .collect();

        for preset in all() {
            let name = preset.name.clone();
            let mut processor = VoiceProcessor::new(44_100, 1024);
            processor.set_preset(preset);

            let mut chunk = input.clone();
            let report = processor.process_in_place(&mut chunk);
            assert!(report.is_clean(), "{name}: {report:?}");
            assert_eq!(chunk.len(), 1024);
            assert!(chunk.iter().all(|s| (-1.0..=1.0).contains(s)), "{name}");
        }
    }
}
