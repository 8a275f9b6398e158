// Shared helpers for unit and scenario tests.

use crate::data_structures::{LivenessStatus, SyncRiskLevel};
use crate::forensics::types::{
    InvestigationPayload, LedgerSummary, LivenessSummary, SensorData, SyncSummary,
};
use chrono::{DateTime, TimeZone, Utc};

// Fixed capture timestamp so generated certificates are comparable.
pub fn test_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn verified_ledger() -> LedgerSummary {
    LedgerSummary {
        verified: true,
        status: "integrity_confirmed".to_string(),
    }
}

pub fn mismatched_ledger() -> LedgerSummary {
    LedgerSummary {
        verified: false,
        status: "hash_mismatch".to_string(),
    }
}

pub fn sync_summary(
    risk: SyncRiskLevel,
    score: f64,
    mismatches: u32,
    max_delta_ms: f64,
    jitter_ms: f64,
) -> SyncSummary {
    SyncSummary {
        overall_risk_level: risk,
        overall_risk_score: score,
        mismatch_count: mismatches,
        max_delta_ms,
        network_jitter_ms: jitter_ms,
    }
}

pub fn liveness_summary(status: LivenessStatus, confidence: f64) -> LivenessSummary {
    LivenessSummary {
        status,
        confidence,
        spike_ratio: 0.0,
        smoothing_ratio: 0.0,
        specularity_score: 0.0,
    }
}

pub fn payload_with(
    ledger: Option<LedgerSummary>,
    sync: Option<SyncSummary>,
    liveness: Option<LivenessSummary>,
    investigation_id: Option<&str>,
) -> InvestigationPayload {
    InvestigationPayload {
        investigation_id: investigation_id.map(str::to_string),
        timestamp: test_timestamp(),
        sensor_data: SensorData {
            ledger,
            sync_engine: sync,
            liveness,
        },
    }
}
