// Error taxonomy for the verification core.
//
// Only malformed challenge configuration fails fast: it indicates a
// programming error upstream. Missing or partial sensor data is an expected
// field condition and degrades (UNCERTAIN status, skipped frames, defaulted
// layer summaries) instead of surfacing here.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("invalid challenge configuration: {0}")]
    InvalidConfiguration(String),

    #[error("strobe challenge has no generated frames")]
    EmptyChallenge,
}
