// Scenario C: everything fails at once - ledger mismatch, high sync risk,
// spoofed liveness.
// Expected: MANIPULATED with high confidence and the multi_layer_failure
// correlation.

use veritas_protocol::data_structures::{LivenessStatus, SyncRiskLevel, VeritasVerdict};
use veritas_protocol::forensics::reporter::generate_veritas_report;
use veritas_protocol::forensics::types::{CorrelationType, LivenessSummary};
use veritas_protocol::test_utils::{mismatched_ledger, payload_with, sync_summary};

#[test]
fn multi_layer_failure_is_manipulated_with_high_confidence() {
    let liveness = LivenessSummary {
        status: LivenessStatus::Spoof,
        confidence: 0.9,
        spike_ratio: 0.1,
        smoothing_ratio: 0.9,
        specularity_score: 0.01,
    };
    let payload = payload_with(
        Some(mismatched_ledger()),
        Some(sync_summary(SyncRiskLevel::High, 0.8, 8, 150.0, 5.0)),
        Some(liveness),
        Some("TEST-MANIPULATED"),
    );

    let cert = generate_veritas_report(&payload).veritas_certificate;

    assert_eq!(cert.verdict, VeritasVerdict::Manipulated);
    assert!(cert.confidence_score > 0.8);
    let correlation = cert
        .correlations
        .iter()
        .find(|c| c.correlation_type == CorrelationType::MultiLayerFailure)
        .expect("multi_layer_failure correlation should fire");
    assert_eq!(correlation.severity.as_deref(), Some("critical"));
    assert!(cert.narrative_summary.contains("Ledger hash mismatch"));
}
