//! UI session context and list filters.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::patient::PatientId;

/// Filter value the UI sends to mean "all doctors".
pub const DOCTOR_FILTER_ANY: &str = "any";

/// Doctor filter applied to patient-owned lists.
///
/// A patient matches [`DoctorFilter::Code`] when their doctor tag contains the
/// code as a substring, so a patient tagged `"01"` shows up under `"0"` and `"1"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DoctorFilter {
    #[default]
    Any,
    Code(String),
}

impl DoctorFilter {
    /// Parse the UI's filter string; `"any"` and blank disable filtering.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(DOCTOR_FILTER_ANY) {
            DoctorFilter::Any
        } else {
            DoctorFilter::Code(value.to_string())
        }
    }

    /// SQL parameter: NULL disables the `instr` check.
    pub(crate) fn as_param(&self) -> Option<&str> {
        match self {
            DoctorFilter::Any => None,
            DoctorFilter::Code(code) => Some(code),
        }
    }
}

impl fmt::Display for DoctorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorFilter::Any => f.write_str(DOCTOR_FILTER_ANY),
            DoctorFilter::Code(code) => f.write_str(code),
        }
    }
}

/// Navigation state owned by the UI and passed into every call that needs it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionContext {
    pub current_patient: Option<PatientId>,
    pub doctor_filter: DoctorFilter,
}

impl SessionContext {
    pub fn new(current_patient: Option<PatientId>, doctor_filter: DoctorFilter) -> Self {
        Self {
            current_patient,
            doctor_filter,
        }
    }
}
