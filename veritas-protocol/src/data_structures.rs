// Shared primitive types and canonical enumerations.
//
// Status and risk values arrive from the collaborating services as strings;
// they are parsed exactly once here into closed enumerations, and no
// downstream code branches on the string representation again.

use serde::{Deserialize, Serialize};
use std::fmt;

// One RGB stimulus color, full-range 0-255 per component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        RgbColor { r, g, b }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

// One observed pixel measurement from the capture pipeline. Intensity and
// channel values are normalized to [0, 1]; variance is the capture side's
// local-variance estimate for the sampled region (pore-level noise).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelSample {
    pub timestamp_ms: f64,
    pub intensity: f64,
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub variance: f64,
}

// Outcome of the optical liveness classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LivenessStatus {
    Human,
    Spoof,
    // Catch-all: absent or unrecognized status strings degrade here.
    #[default]
    #[serde(other)]
    Uncertain,
}

impl fmt::Display for LivenessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LivenessStatus::Human => "human",
            LivenessStatus::Spoof => "spoof",
            LivenessStatus::Uncertain => "uncertain",
        };
        write!(f, "{}", s)
    }
}

// Risk grade reported by the external synchrony engine. Input is expected in
// canonical lowercase; anything else degrades to Unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncRiskLevel {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for SyncRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncRiskLevel::Low => "low",
            SyncRiskLevel::Medium => "medium",
            SyncRiskLevel::High => "high",
            SyncRiskLevel::Critical => "critical",
            SyncRiskLevel::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

// Final classification of an investigation. Severity order, for
// documentation only: Verified < Inconclusive < Suspicious < Manipulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VeritasVerdict {
    Verified,
    Inconclusive,
    Suspicious,
    Manipulated,
}

impl fmt::Display for VeritasVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VeritasVerdict::Verified => "VERIFIED",
            VeritasVerdict::Inconclusive => "INCONCLUSIVE",
            VeritasVerdict::Suspicious => "SUSPICIOUS",
            VeritasVerdict::Manipulated => "MANIPULATED",
        };
        write!(f, "{}", s)
    }
}
