// Liveness module entry point: active Light-Bounce verification.
//
// A strobe challenge of high-contrast color flashes is presented to the
// subject by the capture pipeline; the verifier classifies the recorded
// pixel reflectance as live skin or a synthetic surface.

pub mod challenge;
pub mod simulation;
pub mod verifier;

// Re-export key types
pub use challenge::{generate_challenge, StrobeChallenge, StrobeFrame};
pub use verifier::{FrameAnalysis, LivenessReport, LivenessVerifier};
