//! Patient database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{DoctorFilter, NewPatient, Patient, PatientFile, PatientId, PatientUpdate, DEFAULT_DOCTOR};

const PATIENT_COLUMNS: &str =
    "id, name, doctor, phone_num, creation_date, treat_type, transfer_state";

impl Database {
    /// Insert a patient row as-is, without validation. Returns the new ID.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<PatientId> {
        self.conn.execute(
            r#"
            INSERT INTO patients (
                name, doctor, phone_num, creation_date, treat_type, transfer_state
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                patient.name,
                patient.doctor,
                patient.phone_num,
                patient.creation_date,
                patient.treat_type,
                patient.transfer_state,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Register a new patient dated today.
    pub fn create_patient(&self, new: NewPatient) -> DbResult<PatientId> {
        let name = new.name.trim();
        let phone_num = new.phone_num.trim();
        if name.is_empty() {
            return Err(DbError::Validation("Patient name is required".into()));
        }
        if phone_num.is_empty() {
            return Err(DbError::Validation("Patient phone number is required".into()));
        }
        let doctor = match new.doctor.trim() {
            "" => DEFAULT_DOCTOR,
            doctor => doctor,
        };

        let patient = Patient::new(name.to_string(), doctor.to_string(), phone_num.to_string());
        let id = self.insert_patient(&patient)?;
        tracing::info!(patient_id = id, doctor = %patient.doctor, "Created patient");
        Ok(id)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: PatientId) -> DbResult<Option<Patient>> {
        fetch_patient(&self.conn, id)
    }

    /// Get a patient by ID, failing when it does not exist.
    pub fn require_patient(&self, id: PatientId) -> DbResult<Patient> {
        require_patient(&self.conn, id)
    }

    /// List patients, newest first, optionally restricted to one doctor code.
    pub fn list_patients(&self, filter: &DoctorFilter) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {PATIENT_COLUMNS}
            FROM patients
            WHERE (?1 IS NULL OR instr(doctor, ?1) > 0)
            ORDER BY creation_date DESC, id DESC
            "#
        ))?;

        let rows = stmt.query_map([filter.as_param()], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Update the supplied fields of a patient.
    pub fn edit_patient(&mut self, id: PatientId, update: &PatientUpdate) -> DbResult<()> {
        let tx = self.transaction()?;
        let mut patient = require_patient(&tx, id)?;
        patient.apply(update);
        tx.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                doctor = ?3,
                phone_num = ?4,
                treat_type = ?5,
                transfer_state = ?6
            WHERE id = ?1
            "#,
            params![
                patient.id,
                patient.name,
                patient.doctor,
                patient.phone_num,
                patient.treat_type,
                patient.transfer_state,
            ],
        )?;
        tx.commit()?;
        tracing::debug!(patient_id = id, "Edited patient");
        Ok(())
    }

    /// Delete a patient together with their meetings, transfers and payments.
    pub fn delete_patient(&mut self, id: PatientId) -> DbResult<()> {
        let tx = self.transaction()?;
        require_patient(&tx, id)?;

        let meetings = tx.execute("DELETE FROM meetings WHERE patient_id = ?", [id])?;
        let transfers = tx.execute("DELETE FROM transfers WHERE patient_id = ?", [id])?;
        let payments = tx.execute("DELETE FROM payments WHERE patient_id = ?", [id])?;
        tx.execute("DELETE FROM patients WHERE id = ?", [id])?;
        tx.commit()?;

        tracing::info!(patient_id = id, meetings, transfers, payments, "Deleted patient");
        Ok(())
    }

    /// Load a patient with all of their records.
    pub fn patient_file(&self, id: PatientId) -> DbResult<PatientFile> {
        let patient = self.require_patient(id)?;
        Ok(PatientFile {
            meetings: self.list_patient_meetings(id)?,
            transfers: self.list_patient_transfers(id)?,
            payments: self.list_patient_payments(id)?,
            total_paid: self.total_paid(id)?,
            patient,
        })
    }
}

pub(super) fn fetch_patient(conn: &Connection, id: PatientId) -> DbResult<Option<Patient>> {
    conn.query_row(
        &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?"),
        [id],
        patient_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub(super) fn require_patient(conn: &Connection, id: PatientId) -> DbResult<Patient> {
    fetch_patient(conn, id)?.ok_or_else(|| DbError::NotFound(format!("patient {}", id)))
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        doctor: row.get(2)?,
        phone_num: row.get(3)?,
        creation_date: row.get(4)?,
        treat_type: row.get(5)?,
        transfer_state: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TREAT_TYPE_NONE;
    use chrono::NaiveDate;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn new_patient(name: &str, doctor: &str, phone: &str) -> NewPatient {
        NewPatient {
            name: name.into(),
            doctor: doctor.into(),
            phone_num: phone.into(),
        }
    }

    fn dated(name: &str, doctor: &str, date: &str) -> Patient {
        let mut patient = Patient::new(name.into(), doctor.into(), "077".into());
        patient.creation_date = date.parse().unwrap();
        patient
    }

    #[test]
    fn test_create_and_get() {
        let db = setup_db();

        let id = db
            .create_patient(new_patient("Ali", "0", "07700000001"))
            .unwrap();
        assert_eq!(id, 1);

        let patient = db.get_patient(id).unwrap().unwrap();
        assert_eq!(patient.name, "Ali");
        assert_eq!(patient.doctor, "0");
        assert_eq!(patient.phone_num, "07700000001");
        assert_eq!(patient.creation_date, chrono::Local::now().date_naive());
        assert_eq!(patient.treat_type, TREAT_TYPE_NONE);
        assert!(!patient.transfer_state);
    }

    #[test]
    fn test_create_requires_name_and_phone() {
        let db = setup_db();

        let err = db.create_patient(new_patient("", "0", "077")).unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = db.create_patient(new_patient("Ali", "0", "   ")).unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        assert!(db.list_patients(&DoctorFilter::Any).unwrap().is_empty());
    }

    #[test]
    fn test_create_defaults_doctor() {
        let db = setup_db();
        let id = db.create_patient(new_patient("Ali", "", "077")).unwrap();
        assert_eq!(db.require_patient(id).unwrap().doctor, DEFAULT_DOCTOR);
    }

    #[test]
    fn test_get_missing_patient() {
        let db = setup_db();
        assert!(db.get_patient(5).unwrap().is_none());
        assert!(matches!(db.require_patient(5), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_list_newest_first() {
        let db = setup_db();
        db.insert_patient(&dated("Old", "0", "2023-05-01")).unwrap();
        db.insert_patient(&dated("New", "0", "2024-05-01")).unwrap();
        db.insert_patient(&dated("Same day, later", "0", "2024-05-01")).unwrap();

        let names: Vec<_> = db
            .list_patients(&DoctorFilter::Any)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Same day, later", "New", "Old"]);
    }

    #[test]
    fn test_list_filters_by_doctor_substring() {
        let db = setup_db();
        db.insert_patient(&dated("A", "0", "2024-01-01")).unwrap();
        db.insert_patient(&dated("B", "01", "2024-01-02")).unwrap();
        db.insert_patient(&dated("C", "12", "2024-01-03")).unwrap();

        let names = |filter: &str| -> Vec<String> {
            db.list_patients(&DoctorFilter::parse(filter))
                .unwrap()
                .into_iter()
                .map(|p| p.name)
                .collect()
        };
        assert_eq!(names("0"), vec!["B", "A"]);
        assert_eq!(names("1"), vec!["C", "B"]);
        assert_eq!(names("2"), vec!["C"]);
        assert_eq!(names("any"), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_edit_partial() {
        let mut db = setup_db();
        let id = db.create_patient(new_patient("Ali", "0", "07700000001")).unwrap();

        db.edit_patient(
            id,
            &PatientUpdate {
                name: Some(String::new()),
                doctor: Some("01".into()),
                treat_type: Some("braces".into()),
                transfer_state: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        let patient = db.require_patient(id).unwrap();
        assert_eq!(patient.name, "Ali");
        assert_eq!(patient.phone_num, "07700000001");
        assert_eq!(patient.doctor, "01");
        assert_eq!(patient.treat_type, "braces");
        assert!(patient.transfer_state);
    }

    #[test]
    fn test_edit_blank_required_fields_is_noop() {
        let mut db = setup_db();
        let id = db.create_patient(new_patient("Ali", "1", "07700000001")).unwrap();

        db.edit_patient(
            id,
            &PatientUpdate {
                name: Some("   ".into()),
                doctor: Some("  ".into()),
                phone_num: Some(" ".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let patient = db.require_patient(id).unwrap();
        assert_eq!(patient.name, "Ali");
        assert_eq!(patient.doctor, "1");
        assert_eq!(patient.phone_num, "07700000001");

        db.edit_patient(
            id,
            &PatientUpdate {
                name: Some("  Ali Hassan ".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(db.require_patient(id).unwrap().name, "Ali Hassan");
    }

    #[test]
    fn test_edit_missing_patient() {
        let mut db = setup_db();
        let err = db.edit_patient(9, &PatientUpdate::default()).unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn test_delete_patient() {
        let mut db = setup_db();
        let id = db.create_patient(new_patient("Ali", "0", "077")).unwrap();

        db.delete_patient(id).unwrap();
        assert!(db.get_patient(id).unwrap().is_none());
        assert!(matches!(db.delete_patient(id), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_patient_file_for_new_patient() {
        let db = setup_db();
        let id = db.create_patient(new_patient("Ali", "0", "077")).unwrap();

        let file = db.patient_file(id).unwrap();
        assert_eq!(file.patient.id, id);
        assert!(file.meetings.is_empty());
        assert!(file.transfers.is_empty());
        assert!(file.payments.is_empty());
        assert_eq!(file.total_paid, 0);
    }

    #[test]
    fn test_dates_stored_as_iso_text() {
        let db = setup_db();
        db.insert_patient(&dated("Ali", "0", "2024-01-10")).unwrap();
        let raw: String = db
            .conn()
            .query_row("SELECT creation_date FROM patients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(raw, "2024-01-10");
        assert_eq!(
            db.require_patient(1).unwrap().creation_date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }
}
