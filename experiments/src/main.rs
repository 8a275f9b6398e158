// Demo driver: runs the simulated verification pipeline end to end for a
// live subject and a deepfake mask, printing both Veritas Certificates.
//
// The simulators stand in for the capture pipeline; the ledger and sync
// summaries are canned values a deployment would receive from those
// collaborating services.

use chrono::Utc;
use veritas_protocol::config::SystemConfig;
use veritas_protocol::data_structures::{LivenessStatus, SyncRiskLevel};
use veritas_protocol::forensics::reporter::{gather_sensor_data, generate_veritas_report};
use veritas_protocol::forensics::types::{LedgerSummary, SyncSummary};
use veritas_protocol::liveness::challenge::StrobeChallenge;
use veritas_protocol::liveness::simulation::{
    simulate_deepfake_pixel_response, simulate_human_pixel_response,
};
use veritas_protocol::liveness::verifier::LivenessVerifier;

fn clean_sync_summary() -> SyncSummary {
    SyncSummary {
        overall_risk_level: SyncRiskLevel::Low,
        overall_risk_score: 0.15,
        mismatch_count: 0,
        max_delta_ms: 25.0,
        network_jitter_ms: 10.0,
    }
}

fn verified_ledger() -> LedgerSummary {
    LedgerSummary {
        verified: true,
        status: "integrity_confirmed".to_string(),
    }
}

fn main() {
    env_logger::init();

    let config = SystemConfig::default();
    let challenge = StrobeChallenge::with_defaults(0.0);
    log::info!(
        "generated strobe challenge: {} frames over {:.0}ms",
        challenge.frames.len(),
        challenge.end_time_ms()
    );

    let verifier = LivenessVerifier::new(&config);
    let subjects = [
        (
            "live subject",
            "INV-DEMO-HUMAN",
            simulate_human_pixel_response(&challenge, 0.5, 0.05, 42),
        ),
        (
            "deepfake mask",
            "INV-DEMO-DEEPFAKE",
            simulate_deepfake_pixel_response(&challenge, 0.5, 0.05, 42),
        ),
    ];

    for (label, investigation_id, samples) in subjects {
        let report = match verifier.verify_liveness(&challenge, &samples) {
            Ok(report) => report,
            Err(err) => {
                log::error!("liveness verification failed for {}: {}", label, err);
                continue;
            }
        };
        log::info!(
            "{}: liveness {} (spikes {}/{}, smoothed {}/{})",
            label,
            report.status,
            report.immediate_spikes,
            report.total_frames,
            report.smoothed_transitions,
            report.total_frames
        );
        if report.status == LivenessStatus::Uncertain {
            log::warn!("{}: liveness inconclusive, expect a weaker verdict", label);
        }

        let payload = gather_sensor_data(
            Some(verified_ledger()),
            Some(clean_sync_summary()),
            Some(report.summary()),
            Some(investigation_id.to_string()),
            Utc::now(),
        );
        let certificate = generate_veritas_report(&payload);

        println!("=== {} ===", label);
        match serde_json::to_string_pretty(&certificate) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("failed to serialize certificate: {}", err),
        }
    }
}
