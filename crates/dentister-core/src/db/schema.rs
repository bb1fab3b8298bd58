//! SQLite schema definition.

/// Complete database schema for the clinic records store.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    doctor TEXT NOT NULL DEFAULT '0',             -- concatenated doctor codes, e.g. '01'
    phone_num TEXT NOT NULL,
    creation_date TEXT NOT NULL,                  -- YYYY-MM-DD
    treat_type TEXT NOT NULL DEFAULT 'none',
    transfer_state INTEGER NOT NULL DEFAULT 0 CHECK (transfer_state IN (0, 1))
);

CREATE INDEX IF NOT EXISTS idx_patients_creation_date ON patients(creation_date);
CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Meetings
-- ============================================================================

CREATE TABLE IF NOT EXISTS meetings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    meeting_type TEXT NOT NULL DEFAULT 'general'
        CHECK (meeting_type IN ('general', 'implant', 'braces')),
    meeting_type_2 TEXT NOT NULL DEFAULT 'none',
    info TEXT,
    date TEXT NOT NULL,                           -- YYYY-MM-DD
    time INTEGER NOT NULL CHECK (time IN (0, 1))  -- 1 = first slot
);

CREATE INDEX IF NOT EXISTS idx_meetings_patient ON meetings(patient_id);
CREATE INDEX IF NOT EXISTS idx_meetings_type_date ON meetings(meeting_type, date);

-- ============================================================================
-- Transfers
-- ============================================================================

CREATE TABLE IF NOT EXISTS transfers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    transfer_type INTEGER NOT NULL CHECK (transfer_type IN (0, 1)),  -- 1 = incoming
    date TEXT NOT NULL,
    clinic_name TEXT
);

CREATE INDEX IF NOT EXISTS idx_transfers_patient ON transfers(patient_id);
CREATE INDEX IF NOT EXISTS idx_transfers_date ON transfers(date, transfer_type);

-- ============================================================================
-- Payments
-- ============================================================================

CREATE TABLE IF NOT EXISTS payments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    amount INTEGER NOT NULL,
    date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_payments_patient ON payments(patient_id);
CREATE INDEX IF NOT EXISTS idx_payments_date ON payments(date);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn setup_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_is_rerunnable() {
        let conn = setup_conn();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_patient_defaults() {
        let conn = setup_conn();
        conn.execute(
            "INSERT INTO patients (name, phone_num, creation_date) VALUES ('Ali', '077', '2024-01-01')",
            [],
        )
        .unwrap();

        let (doctor, treat_type, transfer_state): (String, String, bool) = conn
            .query_row(
                "SELECT doctor, treat_type, transfer_state FROM patients WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(doctor, "0");
        assert_eq!(treat_type, "none");
        assert!(!transfer_state);
    }

    #[test]
    fn test_orphan_meeting_rejected() {
        let conn = setup_conn();
        let result = conn.execute(
            "INSERT INTO meetings (patient_id, date, time) VALUES (42, '2024-01-10', 1)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_meeting_type_rejected() {
        let conn = setup_conn();
        conn.execute(
            "INSERT INTO patients (name, phone_num, creation_date) VALUES ('Ali', '077', '2024-01-01')",
            [],
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO meetings (patient_id, meeting_type, date, time) VALUES (1, 'cleaning', '2024-01-10', 1)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cascade_delete() {
        let conn = setup_conn();
        conn.execute_batch(
            r#"
            INSERT INTO patients (name, phone_num, creation_date) VALUES ('Ali', '077', '2024-01-01');
            INSERT INTO meetings (patient_id, date, time) VALUES (1, '2024-01-10', 1);
            INSERT INTO transfers (patient_id, transfer_type, date) VALUES (1, 1, '2024-01-10');
            INSERT INTO payments (patient_id, amount, date) VALUES (1, 50000, '2024-01-10');
            DELETE FROM patients WHERE id = 1;
            "#,
        )
        .unwrap();

        for table in ["meetings", "transfers", "payments"] {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 0, "{} should be empty after cascade", table);
        }
    }
}
