// Forensic correlation engine.
//
// A priority-ordered decision matrix fuses the three layer summaries into a
// verdict: rules are evaluated strictly top to bottom and the first match
// wins. The matrix below is the versioned rule table that replaces the
// original narrative-model prompt; changing any constant is a rule-table
// revision, not a tuning knob.

use crate::data_structures::{LivenessStatus, SyncRiskLevel, VeritasVerdict};
use crate::forensics::types::{
    Correlation, CorrelationType, ForensicAnalysis, InvestigationPayload, LedgerSummary,
    LivenessSummary, RawAnalysis, SyncSummary,
};
use log::{debug, warn};

pub const DECISION_RULES_VERSION: &str = "v1";

// Ledger status marking "no entry exists" rather than a failed comparison.
const LEDGER_NO_ENTRY: &str = "hash_not_found";

// Verdict confidences, per rule.
const LEDGER_MISMATCH_CONFIDENCE: f64 = 0.95;
const MULTI_FAILURE_BASE_CONFIDENCE: f64 = 0.85;
const MULTI_FAILURE_STEP: f64 = 0.05;
const SYNC_GAP_CONFIDENCE: f64 = 0.75;
const LIVENESS_FAIL_CONFIDENCE: f64 = 0.70;
const SINGLE_FAILURE_CONFIDENCE: f64 = 0.65;
const TECHNICAL_NOISE_CONFIDENCE: f64 = 0.60;
const ALL_LAYERS_CONFIDENCE: f64 = 0.95;
const TWO_LAYERS_CONFIDENCE: f64 = 0.85;
const MIXED_SIGNALS_CONFIDENCE: f64 = 0.50;

// Sync failure and mitigation thresholds (milliseconds).
const SYNC_CRITICAL_DELTA_MS: f64 = 200.0;
const SYNC_SUSPECT_DELTA_MS: f64 = 100.0;
const JITTER_MITIGATION_MS: f64 = 50.0;
const JITTER_NOISE_MS: f64 = 30.0;

// Technical-noise bands and the sync-pass score for spoof correlation.
const NOISE_RISK_BAND: (f64, f64) = (0.3, 0.5);
const NOISE_SMOOTHING_BAND: (f64, f64) = (0.3, 0.6);
const SPOOF_SYNC_PASS_SCORE: f64 = 0.4;

#[derive(Clone, Copy, Debug, Default)]
pub struct ForensicInvestigator;

impl ForensicInvestigator {
    pub fn new() -> Self {
        ForensicInvestigator
    }

    // Analyze an investigation payload and fix a verdict. Missing layer
    // summaries are defaulted, never rejected: the engine always answers.
    pub fn analyze(&self, payload: &InvestigationPayload) -> ForensicAnalysis {
        let sensor = &payload.sensor_data;
        if sensor.ledger.is_none() {
            warn!("payload has no ledger summary; treating media as having no ledger entry");
        }
        if sensor.sync_engine.is_none() {
            warn!("payload has no sync summary; treating sync risk as unknown");
        }
        if sensor.liveness.is_none() {
            warn!("payload has no liveness summary; treating liveness as uncertain");
        }

        let ledger = sensor.ledger.clone().unwrap_or_default();
        let sync = sensor.sync_engine.clone().unwrap_or_default();
        let liveness = sensor.liveness.clone().unwrap_or_default();

        let (verdict, confidence, reasoning, sync_mitigated) =
            self.apply_decision_matrix(&ledger, &sync, &liveness);
        let correlations = self.identify_correlations(&ledger, &sync, &liveness);

        debug!(
            "verdict {} (confidence {:.2}, {} correlation(s), rules {})",
            verdict,
            confidence,
            correlations.len(),
            DECISION_RULES_VERSION
        );

        ForensicAnalysis {
            verdict,
            confidence,
            reasoning,
            correlations,
            raw_analysis: RawAnalysis {
                ledger_status: ledger.status.clone(),
                sync_risk_level: sync.overall_risk_level,
                liveness_status: liveness.status,
                network_jitter_ms: sync.network_jitter_ms,
                sync_max_delta_ms: sync.max_delta_ms,
                sync_mitigated,
            },
        }
    }

    fn apply_decision_matrix(
        &self,
        ledger: &LedgerSummary,
        sync: &SyncSummary,
        liveness: &LivenessSummary,
    ) -> (VeritasVerdict, f64, String, bool) {
        // An explicit ledger mismatch is dispositive proof of tampering and
        // pre-empts every other signal.
        if !ledger.verified && ledger.status != LEDGER_NO_ENTRY {
            return (
                VeritasVerdict::Manipulated,
                LEDGER_MISMATCH_CONFIDENCE,
                format!(
                    "CRITICAL: Ledger hash mismatch detected (status: {}). This indicates \
                     tampering with the original media file. The immutable ledger entry \
                     does not match the current file hash.",
                    ledger.status
                ),
                false,
            );
        }

        let mut failures = 0usize;
        let mut failure_details: Vec<String> = Vec::new();

        let mut sync_failed = matches!(
            sync.overall_risk_level,
            SyncRiskLevel::High | SyncRiskLevel::Critical
        ) || sync.max_delta_ms > SYNC_CRITICAL_DELTA_MS
            || (sync.mismatch_count > 0 && sync.max_delta_ms > SYNC_SUSPECT_DELTA_MS);

        // High network jitter is indistinguishable from innocent sync drift
        // and is credited as such.
        let mut sync_mitigated = false;
        if sync_failed && sync.network_jitter_ms > JITTER_MITIGATION_MS {
            sync_failed = false;
            sync_mitigated = true;
            failure_details.push(format!(
                "Sync issues mitigated by high network jitter ({:.1}ms)",
                sync.network_jitter_ms
            ));
        } else if sync_failed {
            failures += 1;
            failure_details.push(format!(
                "Sync Engine detected {} mismatch(es) with max delta {:.1}ms",
                sync.mismatch_count, sync.max_delta_ms
            ));
        }

        let liveness_failed = liveness.status == LivenessStatus::Spoof;
        if liveness_failed {
            failures += 1;
            failure_details.push(format!(
                "Liveness detection failed: {} (confidence: {:.2})",
                liveness.status, liveness.confidence
            ));
        }

        if failures >= 2 {
            let confidence =
                (MULTI_FAILURE_BASE_CONFIDENCE + failures as f64 * MULTI_FAILURE_STEP).min(1.0);
            return (
                VeritasVerdict::Manipulated,
                confidence,
                format!(
                    "MANIPULATED: Multiple security layers failed. {} failure(s): {}",
                    failure_details.len(),
                    failure_details.join("; ")
                ),
                sync_mitigated,
            );
        }

        if failures == 1 {
            if sync_failed && sync.max_delta_ms > SYNC_CRITICAL_DELTA_MS {
                return (
                    VeritasVerdict::Suspicious,
                    SYNC_GAP_CONFIDENCE,
                    format!(
                        "SUSPICIOUS: Significant sync gap detected ({:.1}ms). This exceeds \
                         normal thresholds and indicates possible manipulation.",
                        sync.max_delta_ms
                    ),
                    sync_mitigated,
                );
            }
            if liveness_failed {
                return (
                    VeritasVerdict::Suspicious,
                    LIVENESS_FAIL_CONFIDENCE,
                    "SUSPICIOUS: Liveness detection failed (Light-Bounce physics test). \
                     Possible deepfake or camera auto-correction detected."
                        .to_string(),
                    sync_mitigated,
                );
            }
            return (
                VeritasVerdict::Suspicious,
                SINGLE_FAILURE_CONFIDENCE,
                format!(
                    "SUSPICIOUS: Security layer failure detected. {}",
                    failure_details.first().cloned().unwrap_or_default()
                ),
                sync_mitigated,
            );
        }

        // No outright failure: look for technical noise that keeps the
        // evidence from being conclusive either way.
        let risk_score_borderline = sync.overall_risk_score > NOISE_RISK_BAND.0
            && sync.overall_risk_score < NOISE_RISK_BAND.1;
        let smoothing_borderline = liveness.smoothing_ratio > NOISE_SMOOTHING_BAND.0
            && liveness.smoothing_ratio < NOISE_SMOOTHING_BAND.1;
        let technical_noise =
            sync.network_jitter_ms > JITTER_NOISE_MS || risk_score_borderline || smoothing_borderline;

        if technical_noise {
            let mut noise_reasons = Vec::new();
            if sync.network_jitter_ms > JITTER_NOISE_MS {
                noise_reasons.push(format!(
                    "high network jitter ({:.1}ms)",
                    sync.network_jitter_ms
                ));
            }
            if smoothing_borderline {
                noise_reasons.push(format!(
                    "camera smoothing detected (ratio: {:.2})",
                    liveness.smoothing_ratio
                ));
            }
            if risk_score_borderline {
                noise_reasons.push(format!(
                    "borderline sync risk score ({:.2})",
                    sync.overall_risk_score
                ));
            }
            return (
                VeritasVerdict::Inconclusive,
                TECHNICAL_NOISE_CONFIDENCE,
                format!(
                    "INCONCLUSIVE: Technical noise detected ({}), but no clear evidence of \
                     manipulation. Results may be affected by network conditions or camera \
                     processing.",
                    noise_reasons.join(", ")
                ),
                sync_mitigated,
            );
        }

        let sync_pass = matches!(
            sync.overall_risk_level,
            SyncRiskLevel::Low | SyncRiskLevel::Medium
        );
        if ledger.verified && sync_pass && liveness.status == LivenessStatus::Human {
            return (
                VeritasVerdict::Verified,
                ALL_LAYERS_CONFIDENCE,
                "VERIFIED: All security layers passed. Ledger hash verified, sync analysis \
                 normal, and liveness detection confirmed human response to Light-Bounce \
                 challenge."
                    .to_string(),
                sync_mitigated,
            );
        }

        // A brand-new file has no ledger entry yet; sync and liveness alone
        // can still verify it, at reduced confidence.
        if sync.overall_risk_level == SyncRiskLevel::Low
            && liveness.status == LivenessStatus::Human
        {
            return (
                VeritasVerdict::Verified,
                TWO_LAYERS_CONFIDENCE,
                "VERIFIED: Sync and Liveness layers passed. No evidence of manipulation \
                 detected."
                    .to_string(),
                sync_mitigated,
            );
        }

        (
            VeritasVerdict::Inconclusive,
            MIXED_SIGNALS_CONFIDENCE,
            "INCONCLUSIVE: Mixed signals detected. Unable to definitively verify or reject \
             the media."
                .to_string(),
            sync_mitigated,
        )
    }

    // Cross-layer patterns recorded alongside the verdict. Purely
    // explanatory: any subset may fire without changing the outcome above.
    fn identify_correlations(
        &self,
        ledger: &LedgerSummary,
        sync: &SyncSummary,
        liveness: &LivenessSummary,
    ) -> Vec<Correlation> {
        let mut correlations = Vec::new();

        if sync.max_delta_ms > JITTER_MITIGATION_MS && sync.network_jitter_ms > JITTER_MITIGATION_MS
        {
            correlations.push(Correlation {
                correlation_type: CorrelationType::JitterMitigation,
                description: "Sync issues mitigated by high network jitter".to_string(),
                impact: "lowers_risk".to_string(),
                severity: None,
            });
        }

        let ledger_mismatched = !ledger.verified && ledger.status != LEDGER_NO_ENTRY;
        if ledger_mismatched && liveness.status == LivenessStatus::Spoof {
            correlations.push(Correlation {
                correlation_type: CorrelationType::MultiLayerFailure,
                description: "Liveness failure combined with ledger mismatch".to_string(),
                impact: "escalates_to_critical".to_string(),
                severity: Some("critical".to_string()),
            });
        }

        if liveness.status == LivenessStatus::Spoof
            && sync.overall_risk_score < SPOOF_SYNC_PASS_SCORE
        {
            correlations.push(Correlation {
                correlation_type: CorrelationType::SophisticatedSpoof,
                description: "Liveness failed but sync passed - possible high-quality deepfake"
                    .to_string(),
                impact: "suspicious".to_string(),
                severity: None,
            });
        }

        correlations
    }
}
