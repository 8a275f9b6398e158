use crate::data_structures::RgbColor;

#[derive(Clone, Debug)]
pub struct SystemConfig {
    // Strobe challenge
    pub challenge_frame_count: usize,
    pub flash_duration_ms: f64,
    pub flash_interval_ms: f64,

    // Liveness classification
    pub spike_threshold: f64,       // Minimum intensity change for an immediate spike
    pub smoothing_threshold: f64,   // Maximum mean change rate for a smoothed transition
    pub specularity_threshold: f64, // Minimum variance for pore-level noise
    pub response_window_ms: f64,    // Window after each flash to look for a response
    pub baseline_window_ms: f64,    // Window before each flash for the baseline
    pub spike_latency_ms: f64,      // A spike must land within this many ms of the flash
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            // Challenge
            challenge_frame_count: 10,
            flash_duration_ms: 100.0,
            flash_interval_ms: 200.0,

            // Liveness
            spike_threshold: 0.3,
            smoothing_threshold: 0.1,
            specularity_threshold: 0.05,
            response_window_ms: 50.0,
            baseline_window_ms: 50.0,
            spike_latency_ms: 20.0,
        }
    }
}

// Default palette: 10 high-contrast colors chosen for maximal inter-frame
// pixel contrast.
pub const DEFAULT_CHALLENGE_PALETTE: [RgbColor; 10] = [
    RgbColor::new(255, 0, 0),     // Red
    RgbColor::new(0, 255, 0),     // Green
    RgbColor::new(0, 0, 255),     // Blue
    RgbColor::new(255, 255, 0),   // Yellow
    RgbColor::new(255, 0, 255),   // Magenta
    RgbColor::new(0, 255, 255),   // Cyan
    RgbColor::new(255, 255, 255), // White
    RgbColor::new(0, 0, 0),       // Black
    RgbColor::new(255, 128, 0),   // Orange
    RgbColor::new(128, 0, 255),   // Purple
];
