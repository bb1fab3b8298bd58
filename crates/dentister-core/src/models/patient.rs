//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Treatment classification of a patient that has not been classified yet.
pub const TREAT_TYPE_NONE: &str = "none";

/// Doctor tag given to patients created without one.
pub const DEFAULT_DOCTOR: &str = "0";

/// Store-generated row identifier.
pub type PatientId = i64;

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Row ID (0 until inserted)
    pub id: PatientId,
    /// Patient name
    pub name: String,
    /// Doctor tag; several single-character codes may be concatenated ("01")
    pub doctor: String,
    /// Local phone number as typed by the receptionist
    pub phone_num: String,
    /// Day the record was created
    pub creation_date: NaiveDate,
    /// Treatment classification, [`TREAT_TYPE_NONE`] until set
    pub treat_type: String,
    /// Whether the patient is currently in a transfer
    pub transfer_state: bool,
}

impl Patient {
    /// Create an unsaved patient dated today.
    pub fn new(name: String, doctor: String, phone_num: String) -> Self {
        Self {
            id: 0,
            name,
            doctor,
            phone_num,
            creation_date: chrono::Local::now().date_naive(),
            treat_type: TREAT_TYPE_NONE.to_string(),
            transfer_state: false,
        }
    }

    /// Check if a treatment classification has been recorded.
    pub fn is_classified(&self) -> bool {
        self.treat_type != TREAT_TYPE_NONE
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: &PatientUpdate) {
        if let Some(name) = non_empty(&update.name) {
            self.name = name.to_string();
        }
        if let Some(doctor) = non_empty(&update.doctor) {
            self.doctor = doctor.to_string();
        }
        if let Some(phone_num) = non_empty(&update.phone_num) {
            self.phone_num = phone_num.to_string();
        }
        if let Some(treat_type) = non_empty(&update.treat_type) {
            self.treat_type = treat_type.to_string();
        }
        if let Some(transfer_state) = update.transfer_state {
            self.transfer_state = transfer_state;
        }
    }
}

/// Fields supplied by the receptionist when registering a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub doctor: String,
    pub phone_num: String,
}

/// Partial patient update.
///
/// `None` and blank strings both mean "leave unchanged"; a text field can never
/// be cleared through an edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub doctor: Option<String>,
    pub phone_num: Option<String>,
    pub treat_type: Option<String>,
    pub transfer_state: Option<bool>,
}

/// Returns the trimmed value only when it is present and not blank.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
