//! Dentister Core Library
//!
//! Local patient records for a single dental clinic: patients, their meetings
//! (appointments), inter-clinic transfers and payments.
//!
//! # Architecture
//!
//! ```text
//!        Desktop UI (embedded browser view)
//!                     │  plain records, SessionContext
//!                     ▼
//!      ┌──────────────────────────────────┐
//!      │   DentisterCore (FFI bridge)     │──── Dialer (adb)
//!      └───────────────┬──────────────────┘
//!                      │
//!      ┌───────────────▼──────────────────┐
//!      │  Database: repository methods    │◄─── seed_demo
//!      │  one transaction per call        │
//!      └───────────────┬──────────────────┘
//!                      ▼
//!        SQLite: patients ─┬─ meetings
//!                          ├─ transfers
//!                          └─ payments   (ON DELETE CASCADE)
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite storage and the repository operations
//! - [`models`]: Domain types (Patient, Meeting, Transfer, Payment, SessionContext)
//! - [`search`]: Fuzzy patient search
//! - [`seed`]: Demo data generator
//! - [`dialer`]: Phone dialing collaborator
//! - [`config`]: TOML configuration

pub mod config;
pub mod db;
pub mod dialer;
pub mod models;
pub mod search;
pub mod seed;

// Re-export commonly used types
pub use config::Config;
pub use db::{BulkDelete, Database, DbError, DbResult};
pub use dialer::{AdbDialer, Dialer};
pub use models::{
    DoctorFilter, Meeting, MeetingEntry, MeetingType, MeetingUpdate, NewMeeting, NewPatient,
    NewPayment, NewTransfer, Patient, PatientFile, PatientUpdate, Payment, PaymentEntry,
    PaymentUpdate, SessionContext, Transfer, TransferEntry, TransferUpdate,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum DentisterError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Dial error: {0}")]
    DialError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<DbError> for DentisterError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Validation(msg) => DentisterError::InvalidInput(msg),
            DbError::NotFound(msg) => DentisterError::NotFound(msg),
            DbError::Integrity(msg) => DentisterError::Integrity(msg),
            DbError::Sqlite(e) => DentisterError::DatabaseError(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for DentisterError {
    fn from(e: serde_json::Error) -> Self {
        DentisterError::SerializationError(e.to_string())
    }
}

impl From<dialer::DialError> for DentisterError {
    fn from(e: dialer::DialError) -> Self {
        DentisterError::DialError(e.to_string())
    }
}

impl From<config::ConfigError> for DentisterError {
    fn from(e: config::ConfigError) -> Self {
        DentisterError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DentisterError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DentisterError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<DentisterCore>, DentisterError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(DentisterCore::new(
        db,
        Arc::new(AdbDialer::new(config::DialerConfig::default())),
    )))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<DentisterCore>, DentisterError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(DentisterCore::new(
        db,
        Arc::new(AdbDialer::new(config::DialerConfig::default())),
    )))
}

/// Open the database named by the config file (default location when `None`).
#[uniffi::export]
pub fn open_configured_database(
    config_path: Option<String>,
) -> Result<Arc<DentisterCore>, DentisterError> {
    let config = Config::load(config_path.as_deref().map(std::path::Path::new))?;
    let db_path = config.database_path()?;
    config::ensure_db_dir(&db_path)?;
    let db = Database::open(&db_path)?;
    Ok(Arc::new(DentisterCore::new(
        db,
        Arc::new(AdbDialer::new(config.dialer)),
    )))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct DentisterCore {
    db: Arc<Mutex<Database>>,
    dialer: Arc<dyn Dialer>,
}

impl DentisterCore {
    /// Wrap an open database with a dialer.
    pub fn new(db: Database, dialer: Arc<dyn Dialer>) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            dialer,
        }
    }
}

#[uniffi::export]
impl DentisterCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient; returns the new ID.
    pub fn create_patient(&self, patient: FfiNewPatient) -> Result<i64, DentisterError> {
        let db = self.db.lock()?;
        Ok(db.create_patient(patient.into())?)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: i64) -> Result<Option<FfiPatient>, DentisterError> {
        let db = self.db.lock()?;
        Ok(db.get_patient(id)?.map(Into::into))
    }

    /// List patients visible under the session's doctor filter.
    pub fn list_patients(&self, session: FfiSession) -> Result<Vec<FfiPatient>, DentisterError> {
        let session: SessionContext = session.into();
        let db = self.db.lock()?;
        let patients = db.list_patients(&session.doctor_filter)?;
        Ok(patients.into_iter().map(Into::into).collect())
    }

    /// Search patients by name or phone number.
    pub fn search_patients(
        &self,
        query: String,
        session: FfiSession,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, DentisterError> {
        let session: SessionContext = session.into();
        let db = self.db.lock()?;
        let patients = db.search_patients(&query, &session.doctor_filter, limit as usize)?;
        Ok(patients.into_iter().map(Into::into).collect())
    }

    /// Update the supplied patient fields; empty strings leave a field unchanged.
    pub fn edit_patient(&self, id: i64, update: FfiPatientUpdate) -> Result<(), DentisterError> {
        let mut db = self.db.lock()?;
        db.edit_patient(id, &update.into())?;
        Ok(())
    }

    /// Delete a patient and everything recorded for them.
    pub fn delete_patient(&self, id: i64) -> Result<(), DentisterError> {
        let mut db = self.db.lock()?;
        db.delete_patient(id)?;
        Ok(())
    }

    /// Full record of one patient.
    pub fn patient_file(&self, id: i64) -> Result<FfiPatientFile, DentisterError> {
        let db = self.db.lock()?;
        Ok(db.patient_file(id)?.into())
    }

    /// Full record of the session's current patient, if one is selected.
    pub fn current_patient(
        &self,
        session: FfiSession,
    ) -> Result<Option<FfiPatientFile>, DentisterError> {
        let session: SessionContext = session.into();
        match session.current_patient {
            Some(id) => self.patient_file(id).map(Some),
            None => Ok(None),
        }
    }

    /// Patient file as pretty JSON.
    pub fn export_patient_json(&self, id: i64) -> Result<String, DentisterError> {
        let db = self.db.lock()?;
        Ok(db.patient_file(id)?.to_json()?)
    }

    // =========================================================================
    // Meeting Operations
    // =========================================================================

    /// Book a meeting for a patient; returns the new ID.
    pub fn create_meeting(
        &self,
        patient_id: i64,
        meeting: FfiNewMeeting,
    ) -> Result<i64, DentisterError> {
        let meeting = meeting.try_into()?;
        let mut db = self.db.lock()?;
        Ok(db.create_meeting(patient_id, meeting)?)
    }

    /// Get a meeting by ID.
    pub fn get_meeting(&self, id: i64) -> Result<Option<FfiMeeting>, DentisterError> {
        let db = self.db.lock()?;
        Ok(db.get_meeting(id)?.map(Into::into))
    }

    /// List meetings of one type ("general", "implant", "braces").
    pub fn list_meetings(
        &self,
        meeting_type: String,
        session: FfiSession,
    ) -> Result<Vec<FfiMeetingEntry>, DentisterError> {
        let meeting_type = parse_meeting_type(&meeting_type)?;
        let session: SessionContext = session.into();
        let db = self.db.lock()?;
        let entries = db.list_meetings(meeting_type, &session.doctor_filter)?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    /// List all meetings on one day.
    pub fn list_meetings_on(
        &self,
        date: String,
        session: FfiSession,
    ) -> Result<Vec<FfiMeetingEntry>, DentisterError> {
        let date = parse_date(&date)?;
        let session: SessionContext = session.into();
        let db = self.db.lock()?;
        let entries = db.list_meetings_on(date, &session.doctor_filter)?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    /// Update the supplied meeting fields.
    pub fn edit_meeting(&self, id: i64, update: FfiMeetingUpdate) -> Result<(), DentisterError> {
        let update = update.try_into()?;
        let mut db = self.db.lock()?;
        db.edit_meeting(id, &update)?;
        Ok(())
    }

    /// Delete a meeting.
    pub fn delete_meeting(&self, id: i64) -> Result<(), DentisterError> {
        let db = self.db.lock()?;
        db.delete_meeting(id)?;
        Ok(())
    }

    // =========================================================================
    // Transfer Operations
    // =========================================================================

    /// Record a transfer; returns the new ID.
    pub fn create_transfer(
        &self,
        patient_id: i64,
        transfer: FfiNewTransfer,
    ) -> Result<i64, DentisterError> {
        let transfer = transfer.try_into()?;
        let mut db = self.db.lock()?;
        Ok(db.create_transfer(patient_id, transfer)?)
    }

    /// Get a transfer by ID.
    pub fn get_transfer(&self, id: i64) -> Result<Option<FfiTransfer>, DentisterError> {
        let db = self.db.lock()?;
        Ok(db.get_transfer(id)?.map(Into::into))
    }

    /// List transfers, optionally of one direction (true = incoming).
    pub fn list_transfers(
        &self,
        transfer_type: Option<bool>,
        session: FfiSession,
    ) -> Result<Vec<FfiTransferEntry>, DentisterError> {
        let session: SessionContext = session.into();
        let db = self.db.lock()?;
        let entries = db.list_transfers(transfer_type, &session.doctor_filter)?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    /// Update the supplied transfer fields.
    pub fn edit_transfer(&self, id: i64, update: FfiTransferUpdate) -> Result<(), DentisterError> {
        let update = update.try_into()?;
        let mut db = self.db.lock()?;
        db.edit_transfer(id, &update)?;
        Ok(())
    }

    /// Delete a transfer.
    pub fn delete_transfer(&self, id: i64) -> Result<(), DentisterError> {
        let db = self.db.lock()?;
        db.delete_transfer(id)?;
        Ok(())
    }

    // =========================================================================
    // Payment Operations
    // =========================================================================

    /// Record a payment; returns the new ID.
    pub fn create_payment(
        &self,
        patient_id: i64,
        payment: FfiNewPayment,
    ) -> Result<i64, DentisterError> {
        let payment = NewPayment {
            amount: payment.amount,
            date: parse_date(&payment.date)?,
        };
        let mut db = self.db.lock()?;
        Ok(db.create_payment(patient_id, payment)?)
    }

    /// List payments under the session's doctor filter.
    pub fn list_payments(
        &self,
        session: FfiSession,
    ) -> Result<Vec<FfiPaymentEntry>, DentisterError> {
        let session: SessionContext = session.into();
        let db = self.db.lock()?;
        let entries = db.list_payments(&session.doctor_filter)?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    /// Sum of a patient's payments.
    pub fn total_paid(&self, patient_id: i64) -> Result<i64, DentisterError> {
        let db = self.db.lock()?;
        Ok(db.total_paid(patient_id)?)
    }

    /// Update the supplied payment fields.
    pub fn edit_payment(&self, id: i64, update: FfiPaymentUpdate) -> Result<(), DentisterError> {
        let update = PaymentUpdate {
            amount: update.amount,
            date: parse_optional_date(update.date.as_deref())?,
        };
        let mut db = self.db.lock()?;
        db.edit_payment(id, &update)?;
        Ok(())
    }

    /// Delete a payment.
    pub fn delete_payment(&self, id: i64) -> Result<(), DentisterError> {
        let db = self.db.lock()?;
        db.delete_payment(id)?;
        Ok(())
    }

    // =========================================================================
    // Bulk, Demo and Device Operations
    // =========================================================================

    /// Delete all "meetings", "transfers" or "payments" on a date.
    ///
    /// Transfers also need `transfer_type`; it is ignored for other kinds.
    pub fn delete_bulk(
        &self,
        kind: String,
        date: String,
        transfer_type: Option<bool>,
    ) -> Result<u32, DentisterError> {
        let date = parse_date(&date)?;
        let target = match kind.trim().to_lowercase().as_str() {
            "meeting" | "meetings" => BulkDelete::Meetings { date },
            "payment" | "payments" => BulkDelete::Payments { date },
            "transfer" | "transfers" => BulkDelete::Transfers {
                date,
                transfer_type: transfer_type.ok_or_else(|| {
                    DentisterError::InvalidInput("transfer_type is required for transfers".into())
                })?,
            },
            other => {
                return Err(DentisterError::InvalidInput(format!(
                    "Unknown record kind: {}",
                    other
                )))
            }
        };
        let mut db = self.db.lock()?;
        Ok(db.delete_bulk(target)? as u32)
    }

    /// Fill the store with demo data.
    pub fn seed_demo(&self, clear: bool, patients: u32) -> Result<FfiSeedReport, DentisterError> {
        let options = seed::SeedOptions {
            clear,
            patients: patients as usize,
            ..Default::default()
        };
        let mut db = self.db.lock()?;
        let report = seed::seed_demo(&mut db, &options, &mut rand::thread_rng())?;
        Ok(report.into())
    }

    /// Call a phone number through the configured dialer.
    pub fn call_number(&self, phone_num: String) -> Result<(), DentisterError> {
        self.dialer.dial(&phone_num)?;
        Ok(())
    }
}

// =========================================================================
// Input parsing
// =========================================================================

fn parse_date(value: &str) -> Result<NaiveDate, DentisterError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| DentisterError::InvalidInput(format!("Invalid date '{}': {}", value, e)))
}

/// Absent or empty means "no change".
fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, DentisterError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

fn parse_meeting_type(value: &str) -> Result<MeetingType, DentisterError> {
    value.parse().map_err(DentisterError::InvalidInput)
}

// =========================================================================
// FFI Types
// =========================================================================

/// UI session state passed into list calls.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiSession {
    pub current_patient_id: Option<i64>,
    /// Doctor code, or "any"
    pub doctor_filter: String,
}

impl From<FfiSession> for SessionContext {
    fn from(session: FfiSession) -> Self {
        SessionContext::new(
            session.current_patient_id,
            DoctorFilter::parse(&session.doctor_filter),
        )
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: i64,
    pub name: String,
    pub doctor: String,
    pub phone_num: String,
    pub creation_date: String,
    pub treat_type: String,
    pub transfer_state: bool,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            doctor: patient.doctor,
            phone_num: patient.phone_num,
            creation_date: patient.creation_date.to_string(),
            treat_type: patient.treat_type,
            transfer_state: patient.transfer_state,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub name: String,
    pub doctor: String,
    pub phone_num: String,
}

impl From<FfiNewPatient> for NewPatient {
    fn from(patient: FfiNewPatient) -> Self {
        NewPatient {
            name: patient.name,
            doctor: patient.doctor,
            phone_num: patient.phone_num,
        }
    }
}

#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiPatientUpdate {
    pub name: Option<String>,
    pub doctor: Option<String>,
    pub phone_num: Option<String>,
    pub treat_type: Option<String>,
    pub transfer_state: Option<bool>,
}

impl From<FfiPatientUpdate> for PatientUpdate {
    fn from(update: FfiPatientUpdate) -> Self {
        PatientUpdate {
            name: update.name,
            doctor: update.doctor,
            phone_num: update.phone_num,
            treat_type: update.treat_type,
            transfer_state: update.transfer_state,
        }
    }
}

/// FFI-safe meeting.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMeeting {
    pub id: i64,
    pub patient_id: i64,
    pub meeting_type: String,
    pub meeting_type_2: String,
    pub info: Option<String>,
    pub date: String,
    pub time: bool,
}

impl From<Meeting> for FfiMeeting {
    fn from(meeting: Meeting) -> Self {
        Self {
            id: meeting.id,
            patient_id: meeting.patient_id,
            meeting_type: meeting.meeting_type.to_string(),
            meeting_type_2: meeting.meeting_type_2,
            info: meeting.info,
            date: meeting.date.to_string(),
            time: meeting.time,
        }
    }
}

/// Meeting with the owning patient's contact details.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMeetingEntry {
    pub meeting: FfiMeeting,
    pub patient_name: String,
    pub phone_num: String,
    pub doctor: String,
}

impl From<MeetingEntry> for FfiMeetingEntry {
    fn from(entry: MeetingEntry) -> Self {
        Self {
            meeting: entry.meeting.into(),
            patient_name: entry.patient_name,
            phone_num: entry.phone_num,
            doctor: entry.doctor,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewMeeting {
    pub meeting_type: String,
    pub meeting_type_2: Option<String>,
    pub info: Option<String>,
    pub date: String,
    pub time: bool,
}

impl TryFrom<FfiNewMeeting> for NewMeeting {
    type Error = DentisterError;

    fn try_from(meeting: FfiNewMeeting) -> Result<Self, Self::Error> {
        let meeting_type = match meeting.meeting_type.trim() {
            "" => MeetingType::default(),
            value => parse_meeting_type(value)?,
        };
        Ok(NewMeeting {
            meeting_type,
            meeting_type_2: meeting.meeting_type_2,
            info: meeting.info,
            date: parse_date(&meeting.date)?,
            time: meeting.time,
        })
    }
}

#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiMeetingUpdate {
    pub meeting_type: Option<String>,
    pub meeting_type_2: Option<String>,
    pub info: Option<String>,
    pub date: Option<String>,
    pub time: Option<bool>,
}

impl TryFrom<FfiMeetingUpdate> for MeetingUpdate {
    type Error = DentisterError;

    fn try_from(update: FfiMeetingUpdate) -> Result<Self, Self::Error> {
        let meeting_type = match update.meeting_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_meeting_type(value)?),
        };
        Ok(MeetingUpdate {
            meeting_type,
            meeting_type_2: update.meeting_type_2,
            info: update.info,
            date: parse_optional_date(update.date.as_deref())?,
            time: update.time,
        })
    }
}

/// FFI-safe transfer.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTransfer {
    pub id: i64,
    pub patient_id: i64,
    /// true = incoming
    pub transfer_type: bool,
    pub date: String,
    pub clinic_name: Option<String>,
}

impl From<Transfer> for FfiTransfer {
    fn from(transfer: Transfer) -> Self {
        Self {
            id: transfer.id,
            patient_id: transfer.patient_id,
            transfer_type: transfer.transfer_type,
            date: transfer.date.to_string(),
            clinic_name: transfer.clinic_name,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTransferEntry {
    pub transfer: FfiTransfer,
    pub patient_name: String,
    pub phone_num: String,
    pub doctor: String,
    pub treat_type: String,
}

impl From<TransferEntry> for FfiTransferEntry {
    fn from(entry: TransferEntry) -> Self {
        Self {
            transfer: entry.transfer.into(),
            patient_name: entry.patient_name,
            phone_num: entry.phone_num,
            doctor: entry.doctor,
            treat_type: entry.treat_type,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewTransfer {
    pub transfer_type: bool,
    pub date: String,
    pub clinic_name: Option<String>,
    /// Applied to the patient only while they are still unclassified
    pub treat_type: Option<String>,
}

impl TryFrom<FfiNewTransfer> for NewTransfer {
    type Error = DentisterError;

    fn try_from(transfer: FfiNewTransfer) -> Result<Self, Self::Error> {
        Ok(NewTransfer {
            transfer_type: transfer.transfer_type,
            date: parse_date(&transfer.date)?,
            clinic_name: transfer.clinic_name,
            treat_type: transfer.treat_type,
        })
    }
}

#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiTransferUpdate {
    pub transfer_type: Option<bool>,
    pub date: Option<String>,
    pub clinic_name: Option<String>,
}

impl TryFrom<FfiTransferUpdate> for TransferUpdate {
    type Error = DentisterError;

    fn try_from(update: FfiTransferUpdate) -> Result<Self, Self::Error> {
        Ok(TransferUpdate {
            transfer_type: update.transfer_type,
            date: parse_optional_date(update.date.as_deref())?,
            clinic_name: update.clinic_name,
        })
    }
}

/// FFI-safe payment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPayment {
    pub id: i64,
    pub patient_id: i64,
    pub amount: i64,
    pub date: String,
}

impl From<Payment> for FfiPayment {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            patient_id: payment.patient_id,
            amount: payment.amount,
            date: payment.date.to_string(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPaymentEntry {
    pub payment: FfiPayment,
    pub patient_name: String,
    pub doctor: String,
}

impl From<PaymentEntry> for FfiPaymentEntry {
    fn from(entry: PaymentEntry) -> Self {
        Self {
            payment: entry.payment.into(),
            patient_name: entry.patient_name,
            doctor: entry.doctor,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPayment {
    pub amount: i64,
    pub date: String,
}

#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiPaymentUpdate {
    pub amount: Option<i64>,
    pub date: Option<String>,
}

/// FFI-safe patient file.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientFile {
    pub patient: FfiPatient,
    pub meetings: Vec<FfiMeeting>,
    pub transfers: Vec<FfiTransfer>,
    pub payments: Vec<FfiPayment>,
    pub total_paid: i64,
}

impl From<PatientFile> for FfiPatientFile {
    fn from(file: PatientFile) -> Self {
        Self {
            patient: file.patient.into(),
            meetings: file.meetings.into_iter().map(Into::into).collect(),
            transfers: file.transfers.into_iter().map(Into::into).collect(),
            payments: file.payments.into_iter().map(Into::into).collect(),
            total_paid: file.total_paid,
        }
    }
}

/// FFI-safe seeding summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSeedReport {
    pub patients: u32,
    pub meetings: u32,
    pub transfers: u32,
    pub payments: u32,
}

impl From<seed::SeedReport> for FfiSeedReport {
    fn from(report: seed::SeedReport) -> Self {
        Self {
            patients: report.patients as u32,
            meetings: report.meetings as u32,
            transfers: report.transfers as u32,
            payments: report.payments as u32,
        }
    }
}
