// Forensic fusion module entry point.
//
// Correlates the three sensing layers (ledger, sync engine, liveness) into a
// single verdict and assembles the Veritas Certificate.

pub mod investigator;
pub mod reporter;
pub mod types;

// Re-export key types
pub use investigator::ForensicInvestigator;
pub use reporter::{gather_sensor_data, generate_veritas_report, VeritasCertificate, VeritasReport};
pub use types::{
    Correlation, CorrelationType, ForensicAnalysis, InvestigationPayload, LedgerSummary,
    LivenessSummary, SensorData, SyncSummary,
};
