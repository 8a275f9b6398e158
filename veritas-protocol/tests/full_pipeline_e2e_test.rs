// Full pipeline end-to-end: generate a challenge, simulate the capture,
// classify the response, correlate the layers, and emit a certificate.

use veritas_protocol::config::SystemConfig;
use veritas_protocol::data_structures::{LivenessStatus, SyncRiskLevel, VeritasVerdict};
use veritas_protocol::forensics::reporter::{gather_sensor_data, generate_veritas_report};
use veritas_protocol::forensics::types::CorrelationType;
use veritas_protocol::liveness::challenge::StrobeChallenge;
use veritas_protocol::liveness::simulation::{
    simulate_deepfake_pixel_response, simulate_human_pixel_response,
};
use veritas_protocol::liveness::verifier::LivenessVerifier;
use veritas_protocol::test_utils::{sync_summary, test_timestamp, verified_ledger};

#[test]
fn live_subject_verifies_end_to_end() {
    let challenge = StrobeChallenge::with_defaults(0.0);
    // Modest noise keeps every simulated spike above the detection
    // threshold while preserving pore-level texture.
    let samples = simulate_human_pixel_response(&challenge, 0.5, 0.05, 7);

    let verifier = LivenessVerifier::new(&SystemConfig::default());
    let report = verifier.verify_liveness(&challenge, &samples).unwrap();
    assert_eq!(report.status, LivenessStatus::Human);
    assert!(report.spike_ratio > 0.7);

    let payload = gather_sensor_data(
        Some(verified_ledger()),
        Some(sync_summary(SyncRiskLevel::Low, 0.1, 0, 10.0, 5.0)),
        Some(report.summary()),
        Some("INV-E2E-HUMAN".to_string()),
        test_timestamp(),
    );
    let cert = generate_veritas_report(&payload).veritas_certificate;

    assert_eq!(cert.verdict, VeritasVerdict::Verified);
    assert_eq!(cert.confidence_score, 0.95);
    assert_eq!(cert.evidence_trail.liveness.status, LivenessStatus::Human);
}

#[test]
fn deepfake_subject_is_flagged_end_to_end() {
    let challenge = StrobeChallenge::with_defaults(0.0);
    let samples = simulate_deepfake_pixel_response(&challenge, 0.5, 0.05, 7);

    let verifier = LivenessVerifier::new(&SystemConfig::default());
    let report = verifier.verify_liveness(&challenge, &samples).unwrap();
    assert_eq!(report.status, LivenessStatus::Spoof);
    assert!(report.smoothing_ratio > 0.6 || report.specularity_score < 0.05);

    // The forged capture still syncs cleanly: the classic high-quality
    // deepfake profile.
    let payload = gather_sensor_data(
        Some(verified_ledger()),
        Some(sync_summary(SyncRiskLevel::Low, 0.15, 0, 25.0, 10.0)),
        Some(report.summary()),
        Some("INV-E2E-DEEPFAKE".to_string()),
        test_timestamp(),
    );
    let cert = generate_veritas_report(&payload).veritas_certificate;

    assert!(matches!(
        cert.verdict,
        VeritasVerdict::Suspicious | VeritasVerdict::Manipulated
    ));
    assert!(cert
        .correlations
        .iter()
        .any(|c| c.correlation_type == CorrelationType::SophisticatedSpoof));
}

#[test]
fn certificate_wire_shape_matches_the_contract() {
    let challenge = StrobeChallenge::with_defaults(0.0);
    let samples = simulate_deepfake_pixel_response(&challenge, 0.5, 0.05, 11);
    let report = LivenessVerifier::new(&SystemConfig::default())
        .verify_liveness(&challenge, &samples)
        .unwrap();

    let payload = gather_sensor_data(
        Some(verified_ledger()),
        Some(sync_summary(SyncRiskLevel::Low, 0.15, 0, 25.0, 10.0)),
        Some(report.summary()),
        Some("INV-E2E-WIRE".to_string()),
        test_timestamp(),
    );
    let value = serde_json::to_value(generate_veritas_report(&payload)).unwrap();
    let cert = &value["veritas_certificate"];

    assert_eq!(cert["certificate_id"], "INV-E2E-WIRE");
    assert_eq!(cert["evidence_trail"]["liveness"]["status"], "spoof");
    assert_eq!(cert["evidence_trail"]["ledger"]["verified"], true);
    assert_eq!(
        cert["evidence_trail"]["sync_engine"]["overall_risk_level"],
        "low"
    );
    assert!(cert["confidence_score"].as_f64().unwrap() > 0.0);
    assert!(cert["narrative_summary"]
        .as_str()
        .unwrap()
        .contains("FORENSIC ANALYSIS SUMMARY"));
}

#[test]
fn replayed_capture_produces_an_identical_certificate() {
    let challenge = StrobeChallenge::with_defaults(0.0);
    let run = || {
        let samples = simulate_human_pixel_response(&challenge, 0.5, 0.05, 99);
        let report = LivenessVerifier::new(&SystemConfig::default())
            .verify_liveness(&challenge, &samples)
            .unwrap();
        let payload = gather_sensor_data(
            Some(verified_ledger()),
            Some(sync_summary(SyncRiskLevel::Low, 0.1, 0, 10.0, 5.0)),
            Some(report.summary()),
            Some("INV-E2E-REPLAY".to_string()),
            test_timestamp(),
        );
        serde_json::to_string(&generate_veritas_report(&payload)).unwrap()
    };

    assert_eq!(run(), run());
}
