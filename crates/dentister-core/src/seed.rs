//! Demo data generator.
//!
//! Writes straight through the raw insert primitives, so rows skip the
//! validation that receptionist input goes through.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::db::{Database, DbError, DbResult};
use crate::models::{
    Meeting, MeetingType, Patient, Payment, Transfer, MEETING_TYPE_2_NONE, TREAT_TYPE_NONE,
};

const FIRST_NAMES: &[&str] = &[
    "علي", "محمد", "حسين", "زينب", "فاطمة", "مريم", "أحمد", "سارة", "نور", "حيدر", "رقية", "مصطفى",
];
const FAMILY_NAMES: &[&str] = &[
    "الجبوري", "العبيدي", "الربيعي", "التميمي", "الخفاجي", "الموسوي", "الزبيدي", "الساعدي",
];
const DOCTOR_TAGS: &[&str] = &["0", "1", "2", "01", "12"];
const TREAT_TYPES: &[&str] = &[TREAT_TYPE_NONE, "زراعة", "تقويم", "حشوة", "تنظيف"];
const MEETING_TYPE_2: &[&str] = &[MEETING_TYPE_2_NONE, "مراجعة", "استشارة", "قلع"];
const MEETING_INFO: &[&str] = &["", "يحتاج أشعة", "متابعة بعد الزراعة", "ألم في الفك"];
const CLINICS: &[&str] = &["عيادة النور", "عيادة الشفاء", "مركز بغداد التخصصي", ""];
const PHONE_PREFIXES: &[&str] = &["077", "078", "075"];

/// Upper bound for `days_back` and `days_ahead` (about a century).
pub const MAX_SPAN_DAYS: i64 = 36_500;

/// What to generate.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedOptions {
    /// Wipe all four tables first
    pub clear: bool,
    pub patients: usize,
    pub max_meetings: usize,
    pub max_transfers: usize,
    pub max_payments: usize,
    /// Creation dates fall within this many days before `today`
    pub days_back: i64,
    /// Meetings are spread over this many days after `today`
    pub days_ahead: i64,
    pub today: NaiveDate,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            clear: true,
            patients: 40,
            max_meetings: 4,
            max_transfers: 1,
            max_payments: 3,
            days_back: 90,
            days_ahead: 30,
            today: chrono::Local::now().date_naive(),
        }
    }
}

impl SeedOptions {
    /// Reject day spans that are negative or absurdly long.
    pub fn validate(&self) -> DbResult<()> {
        for (field, days) in [("days_back", self.days_back), ("days_ahead", self.days_ahead)] {
            if !(0..=MAX_SPAN_DAYS).contains(&days) {
                return Err(DbError::Validation(format!(
                    "{} must be between 0 and {}, got {}",
                    field, MAX_SPAN_DAYS, days
                )));
            }
        }
        Ok(())
    }
}

/// Counts of generated rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub patients: usize,
    pub meetings: usize,
    pub transfers: usize,
    pub payments: usize,
}

/// Fill the database with demo rows in a single transaction.
pub fn seed_demo<R: Rng>(db: &mut Database, options: &SeedOptions, rng: &mut R) -> DbResult<SeedReport> {
    options.validate()?;
    let tx = db.conn().unchecked_transaction()?;
    if options.clear {
        db.clear_tables()?;
    }

    let mut report = SeedReport::default();
    for _ in 0..options.patients {
        let treat_type = pick(rng, TREAT_TYPES);
        let patient = Patient {
            id: 0,
            name: format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, FAMILY_NAMES)),
            doctor: pick(rng, DOCTOR_TAGS).to_string(),
            phone_num: random_phone(rng),
            creation_date: offset(options.today, -rng.gen_range(0..=options.days_back))?,
            treat_type: treat_type.to_string(),
            transfer_state: treat_type != TREAT_TYPE_NONE && rng.gen_bool(0.3),
        };
        let patient_id = db.insert_patient(&patient)?;
        report.patients += 1;

        for _ in 0..rng.gen_range(0..=options.max_meetings) {
            let info = pick(rng, MEETING_INFO);
            db.insert_meeting(&Meeting {
                id: 0,
                patient_id,
                meeting_type: MeetingType::ALL[rng.gen_range(0..MeetingType::ALL.len())],
                meeting_type_2: pick(rng, MEETING_TYPE_2).to_string(),
                info: (!info.is_empty()).then(|| info.to_string()),
                date: offset(options.today, rng.gen_range(-options.days_back..=options.days_ahead))?,
                time: rng.gen_bool(0.5),
            })?;
            report.meetings += 1;
        }

        for _ in 0..rng.gen_range(0..=options.max_transfers) {
            let clinic = pick(rng, CLINICS);
            db.insert_transfer(&Transfer {
                id: 0,
                patient_id,
                transfer_type: rng.gen_bool(0.5),
                date: offset(patient.creation_date, rng.gen_range(0..=14))?,
                clinic_name: (!clinic.is_empty()).then(|| clinic.to_string()),
            })?;
            report.transfers += 1;
        }

        for _ in 0..rng.gen_range(0..=options.max_payments) {
            db.insert_payment(&Payment {
                id: 0,
                patient_id,
                amount: rng.gen_range(5..=100) * 5_000,
                date: offset(patient.creation_date, rng.gen_range(0..=60))?,
            })?;
            report.payments += 1;
        }
    }

    tx.commit()?;
    tracing::info!(
        patients = report.patients,
        meetings = report.meetings,
        transfers = report.transfers,
        payments = report.payments,
        "Seeded demo data"
    );
    Ok(report)
}

fn pick<R: Rng>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items[rng.gen_range(0..items.len())]
}

fn random_phone<R: Rng>(rng: &mut R) -> String {
    format!("{}{:08}", pick(rng, PHONE_PREFIXES), rng.gen_range(0..100_000_000u32))
}

fn offset(date: NaiveDate, days: i64) -> DbResult<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| DbError::Validation(format!("{} {:+} days is out of range", date, days)))
}
