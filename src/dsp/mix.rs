//! Wet/dry crossfading.

/*
Wet/Dry Mixing
==============

Most stages in the voice chain compute a processed ("wet") version of the
chunk and blend it with the original ("dry") signal by an `amount` in
[0.0, 1.0]:

    output = dry × (1.0 - amount) + wet × amount

    amount = 0.0  →  100% dry (stage is a no-op)
    amount = 1.0  →  100% wet

This is a LINEAR crossfade: the weights always sum to 1.0, so a stage never
adds level on its own. (Equal-power crossfades keep perceived loudness
constant in the middle of a fade, but change the sound at amount = 1.0
endpoints not at all, and nothing here sweeps `amount` while audio plays.)

Reverb is the exception: it blends with fixed 0.3 scaling, see
`dsp/reverb.rs`.
*/

/// Linear crossfade of two samples.
#[inline]
pub fn crossfade(dry: f32, wet: f32, amount: f32) -> f32 {
    dry * (1.0 - amount) + wet * amount
}

/// Crossfade every sample of `buffer` with `wet(sample)` in place.
#[inline]
pub fn blend_in_place(buffer: &mut [f32], amount: f32, mut wet: impl FnMut(usize, f32) -> f32) {
    for (i, sample) in buffer.iter_mut().enumerate() {
        *sample = crossfade(*sample, wet(i, *sample), amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossfade_endpoints() {
        assert_eq!(crossfade(0.2, 0.8, 0.0), 0.2);
        assert_eq!(crossfade(0.2, 0.8, 1.0), 0.8);
    }

    #[test]
    fn test_crossfade_midpoint() {
        assert!((crossfade(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_blend_in_place_uses_index() {
        let mut buffer = vec![1.0; 4];
        blend_in_place(&mut buffer, 1.0, |i, x| x * i as f32);
        assert_eq!(buffer, vec![0.0, 1.0, 2.0, 3.0]);
    }
}
