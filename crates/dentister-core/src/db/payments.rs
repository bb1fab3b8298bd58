//! Payment database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::patients::require_patient;
use super::{Database, DbError, DbResult};
use crate::models::{
    DoctorFilter, NewPayment, PatientId, Payment, PaymentEntry, PaymentId, PaymentUpdate,
};

const PAYMENT_COLUMNS: &str = "y.id, y.patient_id, y.amount, y.date";

impl Database {
    /// Insert a payment row as-is. The patient must exist.
    pub fn insert_payment(&self, payment: &Payment) -> DbResult<PaymentId> {
        insert_payment(&self.conn, payment)
    }

    /// Record a payment from an existing patient.
    pub fn create_payment(&mut self, patient_id: PatientId, new: NewPayment) -> DbResult<PaymentId> {
        let tx = self.transaction()?;
        require_patient(&tx, patient_id)?;
        let id = insert_payment(
            &tx,
            &Payment {
                id: 0,
                patient_id,
                amount: new.amount,
                date: new.date,
            },
        )?;
        tx.commit()?;
        tracing::debug!(patient_id, payment_id = id, amount = new.amount, "Created payment");
        Ok(id)
    }

    /// Get a payment by ID.
    pub fn get_payment(&self, id: PaymentId) -> DbResult<Option<Payment>> {
        fetch_payment(&self.conn, id)
    }

    /// List payments with their patients, newest first.
    pub fn list_payments(&self, filter: &DoctorFilter) -> DbResult<Vec<PaymentEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}, p.name, p.doctor
            FROM payments y
            JOIN patients p ON p.id = y.patient_id
            WHERE (?1 IS NULL OR instr(p.doctor, ?1) > 0)
            ORDER BY y.date DESC, y.id DESC
            "#
        ))?;

        let rows = stmt.query_map([filter.as_param()], |row| {
            Ok(PaymentEntry {
                payment: payment_from_row(row)?,
                patient_name: row.get(4)?,
                doctor: row.get(5)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List a patient's payments, newest first.
    pub fn list_patient_payments(&self, patient_id: PatientId) -> DbResult<Vec<Payment>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments y
            WHERE y.patient_id = ?
            ORDER BY y.date DESC, y.id DESC
            "#
        ))?;

        let rows = stmt.query_map([patient_id], payment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Sum of everything a patient has paid.
    pub fn total_paid(&self, patient_id: PatientId) -> DbResult<i64> {
        require_patient(&self.conn, patient_id)?;
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE patient_id = ?",
            [patient_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Update the supplied fields of a payment.
    pub fn edit_payment(&mut self, id: PaymentId, update: &PaymentUpdate) -> DbResult<()> {
        let tx = self.transaction()?;
        let mut payment = fetch_payment(&tx, id)?
            .ok_or_else(|| DbError::NotFound(format!("payment {}", id)))?;
        payment.apply(update);
        tx.execute(
            "UPDATE payments SET amount = ?2, date = ?3 WHERE id = ?1",
            params![payment.id, payment.amount, payment.date],
        )?;
        tx.commit()?;
        tracing::debug!(payment_id = id, "Edited payment");
        Ok(())
    }

    /// Delete a payment.
    pub fn delete_payment(&self, id: PaymentId) -> DbResult<()> {
        let rows_affected = self.conn.execute("DELETE FROM payments WHERE id = ?", [id])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("payment {}", id)));
        }
        tracing::debug!(payment_id = id, "Deleted payment");
        Ok(())
    }
}

fn insert_payment(conn: &Connection, payment: &Payment) -> DbResult<PaymentId> {
    conn.execute(
        "INSERT INTO payments (patient_id, amount, date) VALUES (?1, ?2, ?3)",
        params![payment.patient_id, payment.amount, payment.date],
    )?;
    Ok(conn.last_insert_rowid())
}

fn fetch_payment(conn: &Connection, id: PaymentId) -> DbResult<Option<Payment>> {
    conn.query_row(
        &format!("SELECT {PAYMENT_COLUMNS} FROM payments y WHERE y.id = ?"),
        [id],
        payment_from_row,
    )
    .optional()
    .map_err(Into::into)
}

fn payment_from_row(row: &Row<'_>) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPatient;

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

    fn pay(amount: i64, date: &str) -> NewPayment {
        NewPayment {
            amount,
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn test_create_and_total() {
        let mut db = setup_db();
        db.create_payment(1, pay(25_000, "2024-01-10")).unwrap();
        db.create_payment(1, pay(75_000, "2024-01-20")).unwrap();

        assert_eq!(db.total_paid(1).unwrap(), 100_000);
        assert!(matches!(db.total_paid(2), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_total_without_payments_is_zero() {
        let db = setup_db();
        assert_eq!(db.total_paid(1).unwrap(), 0);
    }

    #[test]
    fn test_create_payment_for_missing_patient() {
        let mut db = setup_db();
        let err = db.create_payment(3, pay(10, "2024-01-10")).unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn test_list_order() {
        let mut db = setup_db();
        let a = db.create_payment(1, pay(1, "2024-01-10")).unwrap();
        let b = db.create_payment(1, pay(2, "2024-01-20")).unwrap();
        let c = db.create_payment(1, pay(3, "2024-01-10")).unwrap();

        let ids: Vec<_> = db.list_patient_payments(1).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b, c, a]);

        let entries = db.list_payments(&DoctorFilter::Any).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].patient_name, "Ali");
        assert!(db.list_payments(&DoctorFilter::parse("5")).unwrap().is_empty());
    }

    #[test]
    fn test_edit_and_delete_payment() {
        let mut db = setup_db();
        let id = db.create_payment(1, pay(10, "2024-01-10")).unwrap();

        db.edit_payment(
            id,
            &PaymentUpdate {
                amount: Some(15),
                ..Default::default()
            },
        )
        .unwrap();
        let payment = db.get_payment(id).unwrap().unwrap();
        assert_eq!(payment.amount, 15);
        assert_eq!(payment.date.to_string(), "2024-01-10");

        db.delete_payment(id).unwrap();
        assert!(db.get_payment(id).unwrap().is_none());
        assert!(matches!(
            db.edit_payment(id, &PaymentUpdate::default()),
            Err(DbError::NotFound(_))
        ));
    }
}
