//! Inter-clinic transfer models.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patient::{non_empty, PatientId};

pub type TransferId = i64;

/// Referral of a patient to or from another clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transfer {
    pub id: TransferId,
    pub patient_id: PatientId,
    /// `true` for incoming, `false` for outgoing
    pub transfer_type: bool,
    pub date: NaiveDate,
    pub clinic_name: Option<String>,
}

impl Transfer {
    /// List order: newest date first, then newest record first.
    pub fn list_order(a: &Transfer, b: &Transfer) -> Ordering {
        (b.date, b.id).cmp(&(a.date, a.id))
    }

    pub fn direction(&self) -> &'static str {
        if self.transfer_type {
            "incoming"
        } else {
            "outgoing"
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: &TransferUpdate) {
        if let Some(transfer_type) = update.transfer_type {
            self.transfer_type = transfer_type;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(clinic_name) = non_empty(&update.clinic_name) {
            self.clinic_name = Some(clinic_name.to_string());
        }
    }
}

/// Fields for recording a transfer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransfer {
    pub transfer_type: bool,
    pub date: NaiveDate,
    pub clinic_name: Option<String>,
    /// Treatment classification to give the patient if they have none yet
    pub treat_type: Option<String>,
}

impl NewTransfer {
    pub fn new(transfer_type: bool, date: NaiveDate) -> Self {
        Self {
            transfer_type,
            date,
            clinic_name: None,
            treat_type: None,
        }
    }

    pub(crate) fn to_transfer(&self, patient_id: PatientId) -> Transfer {
        Transfer {
            id: 0,
            patient_id,
            transfer_type: self.transfer_type,
            date: self.date,
            clinic_name: non_empty(&self.clinic_name).map(str::to_string),
        }
    }
}

/// Partial transfer update; an empty clinic name means "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransferUpdate {
    pub transfer_type: Option<bool>,
    pub date: Option<NaiveDate>,
    pub clinic_name: Option<String>,
}

/// A transfer joined with the owning patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferEntry {
    pub transfer: Transfer,
    pub patient_name: String,
    pub phone_num: String,
    pub doctor: String,
    pub treat_type: String,
}
