// Interchange types for the forensic correlation layer.
//
// Field names follow the cross-service contract: the ledger and sync engine
// collaborators produce these records and the Veritas Certificate embeds
// them verbatim in its evidence trail. Every field defaults, so a partial
// payload deserializes instead of being rejected.

use crate::data_structures::{LivenessStatus, SyncRiskLevel, VeritasVerdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Hash-integrity result from the ledger collaborator. Opaque here: the core
// never computes or compares hashes itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    #[serde(default)]
    pub verified: bool,
    #[serde(default = "unknown_status")]
    pub status: String,
}

// An absent ledger slot means no entry exists for the media; "hash_not_found"
// is the canonical no-entry status and keeps the dispositive mismatch rule
// from firing on missing data.
impl Default for LedgerSummary {
    fn default() -> Self {
        LedgerSummary {
            verified: false,
            status: "hash_not_found".to_string(),
        }
    }
}

fn unknown_status() -> String {
    "unknown".to_string()
}

// Synchrony metrics from the phoneme-viseme sync engine.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSummary {
    pub overall_risk_level: SyncRiskLevel,
    pub overall_risk_score: f64,
    pub mismatch_count: u32,
    pub max_delta_ms: f64,
    pub network_jitter_ms: f64,
}

// Liveness slice of the payload, produced by LivenessReport::summary().
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessSummary {
    pub status: LivenessStatus,
    pub confidence: f64,
    pub spike_ratio: f64,
    pub smoothing_ratio: f64,
    pub specularity_score: f64,
}

// The three sensing layer slots. A missing slot is defaulted at analysis
// time, never rejected.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorData {
    pub ledger: Option<LedgerSummary>,
    pub sync_engine: Option<SyncSummary>,
    pub liveness: Option<LivenessSummary>,
}

// Aggregate input to the correlation engine. The timestamp is the capture
// time supplied by the caller, never read from the wall clock here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvestigationPayload {
    #[serde(default)]
    pub investigation_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub sensor_data: SensorData,
}

// A detected cross-layer pattern. Correlations explain the verdict; they
// never determine it on their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationType {
    JitterMitigation,
    MultiLayerFailure,
    SophisticatedSpoof,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    #[serde(rename = "type")]
    pub correlation_type: CorrelationType,
    pub description: String,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

// Raw-metrics snapshot embedded in every analysis for audit, even when no
// correlation fired.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawAnalysis {
    pub ledger_status: String,
    pub sync_risk_level: SyncRiskLevel,
    pub liveness_status: LivenessStatus,
    pub network_jitter_ms: f64,
    pub sync_max_delta_ms: f64,
    pub sync_mitigated: bool,
}

// Output of the correlation engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForensicAnalysis {
    pub verdict: VeritasVerdict,
    pub confidence: f64,
    pub reasoning: String,
    pub correlations: Vec<Correlation>,
    pub raw_analysis: RawAnalysis,
}
