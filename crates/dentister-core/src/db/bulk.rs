//! Bulk deletion by date.

use chrono::NaiveDate;
use rusqlite::params;

use super::{Database, DbResult};

/// Which records to delete in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkDelete {
    /// Every meeting on the date.
    Meetings { date: NaiveDate },
    /// Every transfer of one direction on the date.
    Transfers { date: NaiveDate, transfer_type: bool },
    /// Every payment on the date.
    Payments { date: NaiveDate },
}

impl BulkDelete {
    pub fn kind(&self) -> &'static str {
        match self {
            BulkDelete::Meetings { .. } => "meetings",
            BulkDelete::Transfers { .. } => "transfers",
            BulkDelete::Payments { .. } => "payments",
        }
    }

    pub fn date(&self) -> NaiveDate {
        match *self {
            BulkDelete::Meetings { date }
            | BulkDelete::Transfers { date, .. }
            | BulkDelete::Payments { date } => date,
        }
    }
}

impl Database {
    /// Delete all matching records in one transaction, returning how many went.
    pub fn delete_bulk(&mut self, target: BulkDelete) -> DbResult<usize> {
        let tx = self.transaction()?;
        let deleted = match target {
            BulkDelete::Meetings { date } => {
                tx.execute("DELETE FROM meetings WHERE date = ?", params![date])?
            }
            BulkDelete::Transfers {
                date,
                transfer_type,
            } => tx.execute(
                "DELETE FROM transfers WHERE date = ?1 AND transfer_type = ?2",
                params![date, transfer_type],
            )?,
            BulkDelete::Payments { date } => {
                tx.execute("DELETE FROM payments WHERE date = ?", params![date])?
            }
        };
        tx.commit()?;

        tracing::info!(kind = target.kind(), date = %target.date(), deleted, "Bulk delete");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DoctorFilter, MeetingType, NewMeeting, NewPatient, NewPayment, NewTransfer};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_patient(NewPatient {
            name: "Ali".into(),
            doctor: "0".into(),
            phone_num: "07700000001".into(),
        })
        .unwrap();
        db
    }

    #[test]
    fn test_bulk_transfers_respects_type() {
        let mut db = setup_db();
        let day = date("2024-02-01");
        db.create_transfer(1, NewTransfer::new(true, day)).unwrap();
        db.create_transfer(1, NewTransfer::new(true, day)).unwrap();
        let kept = db.create_transfer(1, NewTransfer::new(false, day)).unwrap();
        let other_day = db
            .create_transfer(1, NewTransfer::new(true, date("2024-02-02")))
            .unwrap();

        let deleted = db
            .delete_bulk(BulkDelete::Transfers {
                date: day,
                transfer_type: true,
            })
            .unwrap();
        assert_eq!(deleted, 2);

        let mut remaining: Vec<_> = db
            .list_transfers(None, &DoctorFilter::Any)
            .unwrap()
            .into_iter()
            .map(|e| e.transfer.id)
            .collect();
        remaining.sort();
        assert_eq!(remaining, vec![kept, other_day]);
    }

    #[test]
    fn test_bulk_meetings_and_payments() {
        let mut db = setup_db();
        let day = date("2024-01-10");
        db.create_meeting(1, NewMeeting::new(MeetingType::General, day, true)).unwrap();
        db.create_meeting(1, NewMeeting::new(MeetingType::Implant, day, false)).unwrap();
        db.create_meeting(1, NewMeeting::new(MeetingType::General, date("2024-01-11"), true))
            .unwrap();
        db.create_payment(1, NewPayment { amount: 5, date: day }).unwrap();

        assert_eq!(db.delete_bulk(BulkDelete::Meetings { date: day }).unwrap(), 2);
        assert_eq!(db.list_patient_meetings(1).unwrap().len(), 1);

        assert_eq!(db.delete_bulk(BulkDelete::Payments { date: day }).unwrap(), 1);
        assert_eq!(db.delete_bulk(BulkDelete::Payments { date: day }).unwrap(), 0);
    }
}
