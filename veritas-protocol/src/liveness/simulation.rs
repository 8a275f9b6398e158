// Seeded pixel-response simulators.
//
// Stand-ins for the external capture pipeline, used by the demo binary and
// the scenario tests: one produces the immediate, noisy reflectance of live
// skin, the other the low-pass response of camera auto-correction or a
// rendered mask. The caller supplies the RNG seed, so a simulated capture
// replays bit-identically.

use crate::data_structures::PixelSample;
use crate::liveness::challenge::{StrobeChallenge, StrobeFrame};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SAMPLE_RATE_MS: f64 = 10.0;
const LEAD_IN_MS: f64 = 50.0;
const TAIL_MS: f64 = 200.0;

// Spike shape of a live response: +0.4 intensity at the flash, gone in 20ms,
// then a slower decay over the next 80ms.
const SPIKE_GAIN: f64 = 0.4;
const SPIKE_DECAY_MS: f64 = 20.0;
const TAIL_DECAY_MS: f64 = 80.0;

fn active_frame<'a>(challenge: &'a StrobeChallenge, t: f64) -> Option<&'a StrobeFrame> {
    challenge
        .frames
        .iter()
        .find(|f| f.timestamp_ms <= t && t <= f.timestamp_ms + challenge.flash_duration_ms)
}

fn channel_response(intensity: f64, frame: Option<&StrobeFrame>) -> (f64, f64, f64) {
    match frame {
        Some(frame) => (
            (intensity * f64::from(frame.color.r) / 255.0).min(1.0),
            (intensity * f64::from(frame.color.g) / 255.0).min(1.0),
            (intensity * f64::from(frame.color.b) / 255.0).min(1.0),
        ),
        None => (intensity, intensity, intensity),
    }
}

// Simulate the pixel response of a human face: immediate spikes at each
// flash with pore-level noise on both intensity and variance.
pub fn simulate_human_pixel_response(
    challenge: &StrobeChallenge,
    base_intensity: f64,
    noise_level: f64,
    seed: u64,
) -> Vec<PixelSample> {
    let mut samples = Vec::new();
    if challenge.frames.is_empty() {
        return samples;
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let start_time = challenge.frames[0].timestamp_ms - LEAD_IN_MS;
    let end_time = challenge.frames[challenge.frames.len() - 1].timestamp_ms + TAIL_MS;

    let mut t = start_time;
    while t <= end_time {
        let frame = active_frame(challenge, t);
        let mut intensity = base_intensity;
        if let Some(frame) = frame {
            let since_flash = t - frame.timestamp_ms;
            if since_flash <= SPIKE_DECAY_MS {
                let spike_factor = 1.0 - since_flash / SPIKE_DECAY_MS;
                intensity = base_intensity + SPIKE_GAIN * spike_factor;
            } else {
                let decay_factor = (1.0 - (since_flash - SPIKE_DECAY_MS) / TAIL_DECAY_MS).max(0.0);
                intensity = base_intensity + SPIKE_GAIN * decay_factor;
            }
        }

        intensity = (intensity + rng.gen_range(-noise_level..=noise_level)).clamp(0.0, 1.0);
        let (r, g, b) = channel_response(intensity, frame);
        // Live skin has texture: the variance channel stays well above zero.
        let variance = rng.gen_range(noise_level * 0.5..=noise_level * 1.5);

        samples.push(PixelSample { timestamp_ms: t, intensity, r, g, b, variance });
        t += SAMPLE_RATE_MS;
    }

    samples
}

// Simulate the pixel response of a deepfake mask or aggressive camera
// auto-correction: the intensity eases toward its target instead of jumping,
// and the variance channel is nearly flat.
pub fn simulate_deepfake_pixel_response(
    challenge: &StrobeChallenge,
    base_intensity: f64,
    smoothing_factor: f64,
    seed: u64,
) -> Vec<PixelSample> {
    let mut samples = Vec::new();
    if challenge.frames.is_empty() {
        return samples;
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let start_time = challenge.frames[0].timestamp_ms - LEAD_IN_MS;
    let end_time = challenge.frames[challenge.frames.len() - 1].timestamp_ms + TAIL_MS;

    let mut current_intensity = base_intensity;
    let mut t = start_time;
    while t <= end_time {
        let frame = active_frame(challenge, t);
        let target_intensity = match frame {
            Some(frame) => {
                let since_flash = t - frame.timestamp_ms;
                base_intensity + 0.3 * (1.0 - since_flash / challenge.flash_duration_ms)
            }
            None => base_intensity,
        };

        // Low-pass step toward the target; never an immediate jump.
        current_intensity += (target_intensity - current_intensity) * smoothing_factor;

        let (r, g, b) = channel_response(current_intensity, frame);
        // Uniform reflection: almost no pore-level noise.
        let variance = rng.gen_range(0.0..=0.01);

        samples.push(PixelSample {
            timestamp_ms: t,
            intensity: current_intensity,
            r,
            g,
            b,
            variance,
        });
        t += SAMPLE_RATE_MS;
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liveness::challenge::StrobeChallenge;

    #[test]
    fn human_simulation_is_reproducible_per_seed() {
        let challenge = StrobeChallenge::with_defaults(0.0);
        let a = simulate_human_pixel_response(&challenge, 0.5, 0.1, 42);
        let b = simulate_human_pixel_response(&challenge, 0.5, 0.1, 42);
        let c = simulate_human_pixel_response(&challenge, 0.5, 0.1, 43);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn deepfake_simulation_is_reproducible_per_seed() {
        let challenge = StrobeChallenge::with_defaults(0.0);
        let a = simulate_deepfake_pixel_response(&challenge, 0.5, 0.05, 7);
        let b = simulate_deepfake_pixel_response(&challenge, 0.5, 0.05, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn samples_cover_lead_in_to_tail_at_fixed_cadence() {
        let challenge = StrobeChallenge::with_defaults(0.0);
        let samples = simulate_human_pixel_response(&challenge, 0.5, 0.1, 1);

        // -50ms .. 2900ms inclusive at 10ms cadence.
        assert_eq!(samples.len(), 296);
        assert_eq!(samples[0].timestamp_ms, -50.0);
        assert_eq!(samples[samples.len() - 1].timestamp_ms, 2900.0);
        for pair in samples.windows(2) {
            assert_eq!(pair[1].timestamp_ms - pair[0].timestamp_ms, 10.0);
        }
    }

    #[test]
    fn simulated_values_stay_in_range() {
        let challenge = StrobeChallenge::with_defaults(0.0);
        for sample in simulate_human_pixel_response(&challenge, 0.5, 0.1, 5) {
            assert!((0.0..=1.0).contains(&sample.intensity));
            assert!((0.0..=1.0).contains(&sample.r));
            assert!((0.0..=1.0).contains(&sample.g));
            assert!((0.0..=1.0).contains(&sample.b));
            assert!(sample.variance >= 0.0);
        }
    }

    #[test]
    fn deepfake_variance_channel_is_nearly_flat() {
        let challenge = StrobeChallenge::with_defaults(0.0);
        for sample in simulate_deepfake_pixel_response(&challenge, 0.5, 0.05, 5) {
            assert!(sample.variance <= 0.01);
        }
    }

    #[test]
    fn empty_challenge_yields_no_samples() {
        let challenge = StrobeChallenge {
            flash_duration_ms: 100.0,
            interval_ms: 200.0,
            frames: Vec::new(),
        };
        assert!(simulate_human_pixel_response(&challenge, 0.5, 0.1, 1).is_empty());
        assert!(simulate_deepfake_pixel_response(&challenge, 0.5, 0.05, 1).is_empty());
    }
}
