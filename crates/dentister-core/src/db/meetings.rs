//! Meeting database operations.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::patients::require_patient;
use super::{Database, DbError, DbResult};
use crate::models::{
    DoctorFilter, Meeting, MeetingEntry, MeetingId, MeetingType, MeetingUpdate, NewMeeting,
    PatientId,
};

const MEETING_COLUMNS: &str =
    "m.id, m.patient_id, m.meeting_type, m.meeting_type_2, m.info, m.date, m.time";

const ENTRY_COLUMNS: &str = "m.id, m.patient_id, m.meeting_type, m.meeting_type_2, m.info, m.date, m.time, \
     p.name, p.phone_num, p.doctor";

impl Database {
    /// Insert a meeting row as-is. The patient must exist.
    pub fn insert_meeting(&self, meeting: &Meeting) -> DbResult<MeetingId> {
        insert_meeting(&self.conn, meeting)
    }

    /// Book a meeting for an existing patient.
    pub fn create_meeting(&mut self, patient_id: PatientId, new: NewMeeting) -> DbResult<MeetingId> {
        let tx = self.transaction()?;
        require_patient(&tx, patient_id)?;
        let id = insert_meeting(&tx, &new.into_meeting(patient_id))?;
        tx.commit()?;
        tracing::debug!(patient_id, meeting_id = id, "Created meeting");
        Ok(id)
    }

    /// Get a meeting by ID.
    pub fn get_meeting(&self, id: MeetingId) -> DbResult<Option<Meeting>> {
        fetch_meeting(&self.conn, id)
    }

    /// List meetings of one type with their patients, newest first.
    pub fn list_meetings(
        &self,
        meeting_type: MeetingType,
        filter: &DoctorFilter,
    ) -> DbResult<Vec<MeetingEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM meetings m
            JOIN patients p ON p.id = m.patient_id
            WHERE m.meeting_type = ?1
              AND (?2 IS NULL OR instr(p.doctor, ?2) > 0)
            ORDER BY m.date DESC, m.time DESC, m.id DESC
            "#
        ))?;

        let rows = stmt.query_map(params![meeting_type.as_str(), filter.as_param()], entry_row)?;
        collect_entries(rows)
    }

    /// List every meeting on one day with their patients.
    pub fn list_meetings_on(
        &self,
        date: NaiveDate,
        filter: &DoctorFilter,
    ) -> DbResult<Vec<MeetingEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM meetings m
            JOIN patients p ON p.id = m.patient_id
            WHERE m.date = ?1
              AND (?2 IS NULL OR instr(p.doctor, ?2) > 0)
            ORDER BY m.date DESC, m.time DESC, m.id DESC
            "#
        ))?;

        let rows = stmt.query_map(params![date, filter.as_param()], entry_row)?;
        collect_entries(rows)
    }

    /// List a patient's meetings, newest first.
    pub fn list_patient_meetings(&self, patient_id: PatientId) -> DbResult<Vec<Meeting>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {MEETING_COLUMNS}
            FROM meetings m
            WHERE m.patient_id = ?
            ORDER BY m.date DESC, m.time DESC, m.id DESC
            "#
        ))?;

        let rows = stmt.query_map([patient_id], meeting_row)?;

        let mut meetings = Vec::new();
        for row in rows {
            meetings.push(row?.try_into()?);
        }
        Ok(meetings)
    }

    /// Update the supplied fields of a meeting.
    pub fn edit_meeting(&mut self, id: MeetingId, update: &MeetingUpdate) -> DbResult<()> {
        let tx = self.transaction()?;
        let mut meeting = fetch_meeting(&tx, id)?
            .ok_or_else(|| DbError::NotFound(format!("meeting {}", id)))?;
        meeting.apply(update);
        tx.execute(
            r#"
            UPDATE meetings SET
                meeting_type = ?2,
                meeting_type_2 = ?3,
                info = ?4,
                date = ?5,
                time = ?6
            WHERE id = ?1
            "#,
            params![
                meeting.id,
                meeting.meeting_type.as_str(),
                meeting.meeting_type_2,
                meeting.info,
                meeting.date,
                meeting.time,
            ],
        )?;
        tx.commit()?;
        tracing::debug!(meeting_id = id, "Edited meeting");
        Ok(())
    }

    /// Delete a meeting.
    pub fn delete_meeting(&self, id: MeetingId) -> DbResult<()> {
        let rows_affected = self.conn.execute("DELETE FROM meetings WHERE id = ?", [id])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("meeting {}", id)));
        }
        tracing::debug!(meeting_id = id, "Deleted meeting");
        Ok(())
    }
}

fn insert_meeting(conn: &Connection, meeting: &Meeting) -> DbResult<MeetingId> {
    conn.execute(
        r#"
        INSERT INTO meetings (
            patient_id, meeting_type, meeting_type_2, info, date, time
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            meeting.patient_id,
            meeting.meeting_type.as_str(),
            meeting.meeting_type_2,
            meeting.info,
            meeting.date,
            meeting.time,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn fetch_meeting(conn: &Connection, id: MeetingId) -> DbResult<Option<Meeting>> {
    conn.query_row(
        &format!("SELECT {MEETING_COLUMNS} FROM meetings m WHERE m.id = ?"),
        [id],
        meeting_row,
    )
    .optional()?
    .map(|row| row.try_into())
    .transpose()
}

/// Intermediate row struct for database mapping.
struct MeetingRow {
    id: MeetingId,
    patient_id: PatientId,
    meeting_type: String,
    meeting_type_2: String,
    info: Option<String>,
    date: NaiveDate,
    time: bool,
}

fn meeting_row(row: &Row<'_>) -> rusqlite::Result<MeetingRow> {
    Ok(MeetingRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        meeting_type: row.get(2)?,
        meeting_type_2: row.get(3)?,
        info: row.get(4)?,
        date: row.get(5)?,
        time: row.get(6)?,
    })
}

fn entry_row(row: &Row<'_>) -> rusqlite::Result<(MeetingRow, String, String, String)> {
    Ok((meeting_row(row)?, row.get(7)?, row.get(8)?, row.get(9)?))
}

fn collect_entries(
    rows: impl Iterator<Item = rusqlite::Result<(MeetingRow, String, String, String)>>,
) -> DbResult<Vec<MeetingEntry>> {
    let mut entries = Vec::new();
    for row in rows {
        let (meeting, patient_name, phone_num, doctor) = row?;
        entries.push(MeetingEntry {
            meeting: meeting.try_into()?,
            patient_name,
            phone_num,
            doctor,
        });
    }
    Ok(entries)
}

impl TryFrom<MeetingRow> for Meeting {
    type Error = DbError;

    fn try_from(row: MeetingRow) -> Result<Self, Self::Error> {
        let meeting_type = row.meeting_type.parse().map_err(DbError::Integrity)?;

        Ok(Meeting {
            id: row.id,
            patient_id: row.patient_id,
            meeting_type,
            meeting_type_2: row.meeting_type_2,
            info: row.info,
            date: row.date,
            time: row.time,
        })
    }
}
