//! Aggregated patient file.

use serde::{Deserialize, Serialize};

use super::{Meeting, Patient, Payment, Transfer};

/// Everything recorded for one patient, each list in its display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientFile {
    pub patient: Patient,
    pub meetings: Vec<Meeting>,
    pub transfers: Vec<Transfer>,
    pub payments: Vec<Payment>,
    pub total_paid: i64,
}

impl PatientFile {
    /// Serialize for printing or handing to the UI.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
