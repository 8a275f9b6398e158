// Light-Bounce liveness verification.
//
// Live skin answers a color flash with an immediate, noisy reflectance spike
// (pore-level texture scatters the light). Camera auto-correction and
// rendered masks answer with a gradual, uniform transition. The verifier
// measures both signatures per flash and aggregates them into a status.

use crate::config::SystemConfig;
use crate::data_structures::{LivenessStatus, PixelSample};
use crate::error::VerificationError;
use crate::forensics::types::LivenessSummary;
use crate::liveness::challenge::StrobeChallenge;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

// Decision cut points, as fractions of the challenge frame count.
const HUMAN_SPIKE_RATIO: f64 = 0.7;
const SPOOF_SMOOTHING_RATIO: f64 = 0.6;
const SPECULARITY_SPIKE_GUARD: f64 = 0.5;

// Per-frame audit record. Frames lacking a baseline or a response window are
// skipped during analysis and do not appear here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub frame_index: usize,
    pub baseline_intensity: f64,
    pub first_response_delta: f64,
    pub response_latency_ms: f64,
    pub immediate_spike: bool,
    pub smoothed_transition: bool,
    pub specularity: f64,
}

// Classifier output, including the frame-level trail for audit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LivenessReport {
    pub status: LivenessStatus,
    pub confidence: f64,
    pub immediate_spikes: usize,
    pub smoothed_transitions: usize,
    pub specularity_score: f64,
    pub spike_ratio: f64,
    pub smoothing_ratio: f64,
    pub total_frames: usize,
    pub evaluated_frames: usize,
    pub frames: Vec<FrameAnalysis>,
    pub diagnostic: Option<String>,
}

impl LivenessReport {
    // The payload slice consumed by the forensic correlation layer.
    pub fn summary(&self) -> LivenessSummary {
        LivenessSummary {
            status: self.status,
            confidence: self.confidence,
            spike_ratio: self.spike_ratio,
            smoothing_ratio: self.smoothing_ratio,
            specularity_score: self.specularity_score,
        }
    }

    fn no_data(total_frames: usize) -> Self {
        LivenessReport {
            status: LivenessStatus::Uncertain,
            confidence: 0.0,
            immediate_spikes: 0,
            smoothed_transitions: 0,
            specularity_score: 0.0,
            spike_ratio: 0.0,
            smoothing_ratio: 0.0,
            total_frames,
            evaluated_frames: 0,
            frames: Vec::new(),
            diagnostic: Some("no pixel samples provided".to_string()),
        }
    }
}

pub struct LivenessVerifier {
    pub spike_threshold: f64,
    pub smoothing_threshold: f64,
    pub specularity_threshold: f64,
    pub response_window_ms: f64,
    pub baseline_window_ms: f64,
    pub spike_latency_ms: f64,
}

impl LivenessVerifier {
    pub fn new(config: &SystemConfig) -> Self {
        LivenessVerifier {
            spike_threshold: config.spike_threshold,
            smoothing_threshold: config.smoothing_threshold,
            specularity_threshold: config.specularity_threshold,
            response_window_ms: config.response_window_ms,
            baseline_window_ms: config.baseline_window_ms,
            spike_latency_ms: config.spike_latency_ms,
        }
    }

    // Classify the recorded pixel responses against the presented challenge.
    //
    // A frame-less challenge is a programming error upstream and fails fast.
    // An empty sample set is an expected field condition and yields an
    // UNCERTAIN report with a diagnostic instead.
    pub fn verify_liveness(
        &self,
        challenge: &StrobeChallenge,
        samples: &[PixelSample],
    ) -> Result<LivenessReport, VerificationError> {
        if challenge.frames.is_empty() {
            return Err(VerificationError::EmptyChallenge);
        }

        let total_frames = challenge.frames.len();
        if samples.is_empty() {
            warn!("liveness verification requested with no pixel samples");
            return Ok(LivenessReport::no_data(total_frames));
        }

        let mut sorted: Vec<PixelSample> = samples.to_vec();
        sorted.sort_by(|a, b| a.timestamp_ms.total_cmp(&b.timestamp_ms));

        let mut immediate_spikes = 0usize;
        let mut smoothed_transitions = 0usize;
        let mut frames: Vec<FrameAnalysis> = Vec::new();

        for frame in &challenge.frames {
            let frame_start = frame.timestamp_ms;
            let frame_end = frame_start + self.response_window_ms;

            let baseline: Vec<&PixelSample> = sorted
                .iter()
                .filter(|s| {
                    s.timestamp_ms >= frame_start - self.baseline_window_ms
                        && s.timestamp_ms < frame_start
                })
                .collect();
            let response: Vec<&PixelSample> = sorted
                .iter()
                .filter(|s| s.timestamp_ms >= frame_start && s.timestamp_ms <= frame_end)
                .collect();

            if baseline.is_empty() || response.is_empty() {
                debug!(
                    "frame {} skipped: {} baseline / {} response samples",
                    frame.frame_index,
                    baseline.len(),
                    response.len()
                );
                continue;
            }

            let baseline_intensities: Vec<f64> = baseline.iter().map(|s| s.intensity).collect();
            let baseline_intensity = mean(&baseline_intensities);

            // Immediate-spike test: the earliest response must jump past the
            // baseline within the spike latency window.
            let first = response[0];
            let first_response_delta = (first.intensity - baseline_intensity).abs();
            let response_latency_ms = first.timestamp_ms - frame_start;
            let immediate_spike = first_response_delta >= self.spike_threshold
                && response_latency_ms <= self.spike_latency_ms;
            if immediate_spike {
                immediate_spikes += 1;
            }

            // Smoothed-transition test: a mean step change below the
            // smoothing threshold is too gradual for a reflectance event.
            let intensities: Vec<f64> = response.iter().map(|s| s.intensity).collect();
            let smoothed_transition = self.is_smoothed_transition(&intensities);
            if smoothed_transition {
                smoothed_transitions += 1;
            }

            let reported: Vec<f64> = response.iter().map(|s| s.variance).collect();
            let specularity = variance(&intensities).max(mean(&reported));

            frames.push(FrameAnalysis {
                frame_index: frame.frame_index,
                baseline_intensity,
                first_response_delta,
                response_latency_ms,
                immediate_spike,
                smoothed_transition,
                specularity,
            });
        }

        let evaluated_frames = frames.len();
        let spike_ratio = immediate_spikes as f64 / total_frames as f64;
        let smoothing_ratio = smoothed_transitions as f64 / total_frames as f64;
        let specularities: Vec<f64> = frames.iter().map(|f| f.specularity).collect();
        let specularity_score = mean(&specularities);

        let (status, confidence) = self.classify(spike_ratio, smoothing_ratio, specularity_score);
        debug!(
            "liveness decision: {} (confidence {:.3}, spikes {}/{}, smoothed {}/{}, specularity {:.4})",
            status, confidence, immediate_spikes, total_frames, smoothed_transitions, total_frames,
            specularity_score
        );

        Ok(LivenessReport {
            status,
            confidence,
            immediate_spikes,
            smoothed_transitions,
            specularity_score,
            spike_ratio,
            smoothing_ratio,
            total_frames,
            evaluated_frames,
            frames,
            diagnostic: None,
        })
    }

    // Priority order matters: spikes are the most direct evidence of a live
    // subject and override a low specularity reading.
    fn classify(&self, spike_ratio: f64, smoothing_ratio: f64, specularity: f64) -> (LivenessStatus, f64) {
        if spike_ratio > HUMAN_SPIKE_RATIO {
            (LivenessStatus::Human, spike_ratio)
        } else if smoothing_ratio > SPOOF_SMOOTHING_RATIO {
            (LivenessStatus::Spoof, smoothing_ratio)
        } else if specularity < self.specularity_threshold && spike_ratio < SPECULARITY_SPIKE_GUARD {
            let confidence = (1.0 - specularity / self.specularity_threshold).clamp(0.0, 1.0);
            (LivenessStatus::Spoof, confidence)
        } else {
            (LivenessStatus::Uncertain, spike_ratio.max(1.0 - smoothing_ratio))
        }
    }

    fn is_smoothed_transition(&self, intensities: &[f64]) -> bool {
        if intensities.len() < 3 {
            return false;
        }
        let total: f64 = intensities.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
        let mean_change = total / (intensities.len() - 1) as f64;
        mean_change < self.smoothing_threshold
    }
}

impl Default for LivenessVerifier {
    fn default() -> Self {
        LivenessVerifier::new(&SystemConfig::default())
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// Population variance; fewer than two values carry no spread information.
fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}
