//! Transfer database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::patients::require_patient;
use super::{Database, DbError, DbResult};
use crate::models::{
    DoctorFilter, NewTransfer, PatientId, Transfer, TransferEntry, TransferId,
    TransferUpdate,
};

const TRANSFER_COLUMNS: &str = "t.id, t.patient_id, t.transfer_type, t.date, t.clinic_name";

impl Database {
    /// Insert a transfer row as-is. The patient must exist.
    pub fn insert_transfer(&self, transfer: &Transfer) -> DbResult<TransferId> {
        insert_transfer(&self.conn, transfer)
    }

    /// Record a transfer for an existing patient.
    ///
    /// A patient still classified as "none" takes the supplied treatment type;
    /// an existing classification is left alone.
    pub fn create_transfer(
        &mut self,
        patient_id: PatientId,
        new: NewTransfer,
    ) -> DbResult<TransferId> {
        let tx = self.transaction()?;
        let patient = require_patient(&tx, patient_id)?;
        let id = insert_transfer(&tx, &new.to_transfer(patient_id))?;

        if let Some(treat_type) = new.treat_type.as_deref().filter(|t| !t.is_empty()) {
            if !patient.is_classified() {
                tx.execute(
                    "UPDATE patients SET treat_type = ?2 WHERE id = ?1",
                    params![patient_id, treat_type],
                )?;
                tracing::debug!(patient_id, treat_type, "Classified patient from transfer");
            }
        }

        tx.commit()?;
        tracing::debug!(patient_id, transfer_id = id, "Created transfer");
        Ok(id)
    }

    /// Get a transfer by ID.
    pub fn get_transfer(&self, id: TransferId) -> DbResult<Option<Transfer>> {
        fetch_transfer(&self.conn, id)
    }

    /// List transfers with their patients, newest first.
    ///
    /// `transfer_type` of `None` returns both directions.
    pub fn list_transfers(
        &self,
        transfer_type: Option<bool>,
        filter: &DoctorFilter,
    ) -> DbResult<Vec<TransferEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {TRANSFER_COLUMNS}, p.name, p.phone_num, p.doctor, p.treat_type
            FROM transfers t
            JOIN patients p ON p.id = t.patient_id
            WHERE (?1 IS NULL OR t.transfer_type = ?1)
              AND (?2 IS NULL OR instr(p.doctor, ?2) > 0)
            ORDER BY t.date DESC, t.id DESC
            "#
        ))?;

        let rows = stmt.query_map(params![transfer_type, filter.as_param()], |row| {
            Ok(TransferEntry {
                transfer: transfer_from_row(row)?,
                patient_name: row.get(5)?,
                phone_num: row.get(6)?,
                doctor: row.get(7)?,
                treat_type: row.get(8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List a patient's transfers, newest first.
    pub fn list_patient_transfers(&self, patient_id: PatientId) -> DbResult<Vec<Transfer>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {TRANSFER_COLUMNS}
            FROM transfers t
            WHERE t.patient_id = ?
            ORDER BY t.date DESC, t.id DESC
            "#
        ))?;

        let rows = stmt.query_map([patient_id], transfer_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Update the supplied fields of a transfer.
    pub fn edit_transfer(&mut self, id: TransferId, update: &TransferUpdate) -> DbResult<()> {
        let tx = self.transaction()?;
        let mut transfer = fetch_transfer(&tx, id)?
            .ok_or_else(|| DbError::NotFound(format!("transfer {}", id)))?;
        transfer.apply(update);
        tx.execute(
            r#"
            UPDATE transfers SET
                transfer_type = ?2,
                date = ?3,
                clinic_name = ?4
            WHERE id = ?1
            "#,
            params![
                transfer.id,
                transfer.transfer_type,
                transfer.date,
                transfer.clinic_name,
            ],
        )?;
        tx.commit()?;
        tracing::debug!(transfer_id = id, "Edited transfer");
        Ok(())
    }

    /// Delete a transfer.
    pub fn delete_transfer(&self, id: TransferId) -> DbResult<()> {
        let rows_affected = self.conn.execute("DELETE FROM transfers WHERE id = ?", [id])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("transfer {}", id)));
        }
        tracing::debug!(transfer_id = id, "Deleted transfer");
        Ok(())
    }
}

fn insert_transfer(conn: &Connection, transfer: &Transfer) -> DbResult<TransferId> {
    conn.execute(
        r#"
        INSERT INTO transfers (patient_id, transfer_type, date, clinic_name)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            transfer.patient_id,
            transfer.transfer_type,
            transfer.date,
            transfer.clinic_name,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn fetch_transfer(conn: &Connection, id: TransferId) -> DbResult<Option<Transfer>> {
    conn.query_row(
        &format!("SELECT {TRANSFER_COLUMNS} FROM transfers t WHERE t.id = ?"),
        [id],
        transfer_from_row,
    )
    .optional()
    .map_err(Into::into)
}

fn transfer_from_row(row: &Row<'_>) -> rusqlite::Result<Transfer> {
    Ok(Transfer {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        transfer_type: row.get(2)?,
        date: row.get(3)?,
        clinic_name: row.get(4)?,
    })
}
