// Strobe challenge generation.
//
// A challenge is an ordered sequence of color flashes with millisecond
// timestamps. Frame i flashes palette[i] at start + i * (duration + interval).
// Generation is a pure function of its inputs: identical arguments always
// produce an identical challenge, so a recorded session can be replayed.

use crate::config::{SystemConfig, DEFAULT_CHALLENGE_PALETTE};
use crate::data_structures::RgbColor;
use crate::error::VerificationError;
use serde::{Deserialize, Serialize};

// One stimulus flash within a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrobeFrame {
    pub color: RgbColor,
    pub timestamp_ms: f64,
    pub frame_index: usize,
}

// A generated challenge: the flash sequence plus the timing it was built
// with. The timing fields are carried so the verifier and the simulators
// agree on the flash windows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrobeChallenge {
    pub flash_duration_ms: f64,
    pub interval_ms: f64,
    pub frames: Vec<StrobeFrame>,
}

impl StrobeChallenge {
    // Canonical challenge: 10 frames, 100ms flashes, 200ms apart, default
    // palette.
    pub fn with_defaults(start_time_ms: f64) -> Self {
        let config = SystemConfig::default();
        generate_challenge(
            start_time_ms,
            config.flash_duration_ms,
            config.flash_interval_ms,
            &DEFAULT_CHALLENGE_PALETTE,
            config.challenge_frame_count,
        )
        .expect("canonical challenge parameters are valid")
    }

    // Timestamp of the moment the last flash window closes.
    pub fn end_time_ms(&self) -> f64 {
        match self.frames.last() {
            Some(frame) => frame.timestamp_ms + self.flash_duration_ms,
            None => 0.0,
        }
    }
}

pub fn generate_challenge(
    start_time_ms: f64,
    flash_duration_ms: f64,
    interval_ms: f64,
    palette: &[RgbColor],
    frame_count: usize,
) -> Result<StrobeChallenge, VerificationError> {
    if frame_count == 0 {
        return Err(VerificationError::InvalidConfiguration(
            "challenge frame count must be positive".to_string(),
        ));
    }
    if palette.len() < frame_count {
        return Err(VerificationError::InvalidConfiguration(format!(
            "palette has {} colors, challenge needs {}",
            palette.len(),
            frame_count
        )));
    }
    if !flash_duration_ms.is_finite() || flash_duration_ms <= 0.0 {
        return Err(VerificationError::InvalidConfiguration(format!(
            "flash duration must be positive, got {}ms",
            flash_duration_ms
        )));
    }
    if !interval_ms.is_finite() || interval_ms < 0.0 {
        return Err(VerificationError::InvalidConfiguration(format!(
            "flash interval must be non-negative, got {}ms",
            interval_ms
        )));
    }

    let mut frames = Vec::with_capacity(frame_count);
    let mut current_time = start_time_ms;
    for (i, color) in palette.iter().take(frame_count).enumerate() {
        frames.push(StrobeFrame {
            color: *color,
            timestamp_ms: current_time,
            frame_index: i,
        });
        current_time += flash_duration_ms + interval_ms;
    }

    Ok(StrobeChallenge {
        flash_duration_ms,
        interval_ms,
        frames,
    })
}
