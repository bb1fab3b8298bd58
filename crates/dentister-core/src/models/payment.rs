//! Payment models.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patient::PatientId;

pub type PaymentId = i64;

/// Money received from a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub patient_id: PatientId,
    /// Amount in whole currency units
    pub amount: i64,
    pub date: NaiveDate,
}

impl Payment {
    /// List order: newest date first, then newest record first.
    pub fn list_order(a: &Payment, b: &Payment) -> Ordering {
        (b.date, b.id).cmp(&(a.date, a.id))
    }

    pub fn apply(&mut self, update: &PaymentUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPayment {
    pub amount: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentUpdate {
    pub amount: Option<i64>,
    pub date: Option<NaiveDate>,
}

/// A payment joined with the owning patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentEntry {
    pub payment: Payment,
    pub patient_name: String,
    pub doctor: String,
}
