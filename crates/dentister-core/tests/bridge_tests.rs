//! Presentation bridge tests: the records the UI sends and receives.

use std::sync::{Arc, Mutex};

use dentister_core::db::Database;
use dentister_core::dialer::{DialError, Dialer};
use dentister_core::{
    open_database_in_memory, DentisterCore, DentisterError, FfiMeetingUpdate, FfiNewMeeting,
    FfiNewPatient, FfiNewPayment, FfiNewTransfer, FfiPatientUpdate, FfiSession,
};

#[derive(Default)]
struct RecordingDialer {
    calls: Mutex<Vec<String>>,
}

impl Dialer for RecordingDialer {
    fn dial(&self, phone_num: &str) -> Result<(), DialError> {
        if phone_num.trim().is_empty() {
            return Err(DialError::EmptyNumber);
        }
        self.calls.lock().unwrap().push(phone_num.to_string());
        Ok(())
    }
}

fn any_doctor() -> FfiSession {
    FfiSession {
        current_patient_id: None,
        doctor_filter: "any".to_string(),
    }
}

fn add_patient(core: &DentisterCore, name: &str, doctor: &str) -> i64 {
    core.create_patient(FfiNewPatient {
        name: name.to_string(),
        doctor: doctor.to_string(),
        phone_num: "07700000001".to_string(),
    })
    .unwrap()
}

fn meeting(meeting_type: &str, date: &str, time: bool) -> FfiNewMeeting {
    FfiNewMeeting {
        meeting_type: meeting_type.to_string(),
        meeting_type_2: None,
        info: None,
        date: date.to_string(),
        time,
    }
}

#[test]
fn test_patient_round_trip() {
    let core = open_database_in_memory().unwrap();
    let id = add_patient(&core, "Ali", "");

    let patient = core.get_patient(id).unwrap().unwrap();
    assert_eq!(patient.name, "Ali");
    assert_eq!(patient.doctor, "0");
    assert_eq!(patient.treat_type, "none");
    assert_eq!(patient.creation_date.len(), 10);

    core.edit_patient(
        id,
        FfiPatientUpdate {
            name: Some(String::new()),
            treat_type: Some("تقويم".to_string()),
            transfer_state: Some(true),
            ..Default::default()
        },
    )
    .unwrap();

    let patient = core.get_patient(id).unwrap().unwrap();
    assert_eq!(patient.name, "Ali");
    assert_eq!(patient.treat_type, "تقويم");
    assert!(patient.transfer_state);
}

#[test]
fn test_session_doctor_filter() {
    let core = open_database_in_memory().unwrap();
    add_patient(&core, "Ali", "1");
    add_patient(&core, "Sara", "2");

    let session = FfiSession {
        current_patient_id: None,
        doctor_filter: "2".to_string(),
    };
    let patients = core.list_patients(session).unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].name, "Sara");

    assert_eq!(core.list_patients(any_doctor()).unwrap().len(), 2);
}

#[test]
fn test_current_patient_file() {
    let core = open_database_in_memory().unwrap();
    let id = add_patient(&core, "Ali", "0");
    core.create_meeting(id, meeting("implant", "2024-01-10", true))
        .unwrap();
    core.create_payment(
        id,
        FfiNewPayment {
            amount: 75_000,
            date: "2024-01-10".to_string(),
        },
    )
    .unwrap();

    assert!(core.current_patient(any_doctor()).unwrap().is_none());

    let session = FfiSession {
        current_patient_id: Some(id),
        ..any_doctor()
    };
    let file = core.current_patient(session).unwrap().unwrap();
    assert_eq!(file.patient.id, id);
    assert_eq!(file.meetings.len(), 1);
    assert_eq!(file.meetings[0].meeting_type, "implant");
    assert_eq!(file.meetings[0].meeting_type_2, "none");
    assert_eq!(file.total_paid, 75_000);

    let json = core.export_patient_json(id).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_paid"], 75_000);
    assert_eq!(value["patient"]["name"], "Ali");
}

#[test]
fn test_meeting_lists_and_edits() {
    let core = open_database_in_memory().unwrap();
    let id = add_patient(&core, "Ali", "0");

    let late = core
        .create_meeting(id, meeting("general", "2024-01-10", false))
        .unwrap();
    let early = core
        .create_meeting(id, meeting("general", "2024-01-10", true))
        .unwrap();

    let listed = core.list_meetings("general".to_string(), any_doctor()).unwrap();
    let ids: Vec<i64> = listed.iter().map(|e| e.meeting.id).collect();
    assert_eq!(ids, vec![early, late]);
    assert_eq!(listed[0].patient_name, "Ali");

    core.edit_meeting(
        late,
        FfiMeetingUpdate {
            meeting_type: Some("braces".to_string()),
            date: Some(String::new()),
            ..Default::default()
        },
    )
    .unwrap();

    let moved = core.get_meeting(late).unwrap().unwrap();
    assert_eq!(moved.meeting_type, "braces");
    assert_eq!(moved.date, "2024-01-10");

    let day = core
        .list_meetings_on("2024-01-10".to_string(), any_doctor())
        .unwrap();
    assert_eq!(day.len(), 2);
}

#[test]
fn test_invalid_input_is_rejected() {
    let core = open_database_in_memory().unwrap();
    let id = add_patient(&core, "Ali", "0");

    assert!(matches!(
        core.create_meeting(id, meeting("general", "10/01/2024", true)),
        Err(DentisterError::InvalidInput(_))
    ));
    assert!(matches!(
        core.list_meetings("surgery".to_string(), any_doctor()),
        Err(DentisterError::InvalidInput(_))
    ));
    assert!(matches!(
        core.create_patient(FfiNewPatient {
            name: "  ".to_string(),
            doctor: "0".to_string(),
            phone_num: "0770".to_string(),
        }),
        Err(DentisterError::InvalidInput(_))
    ));
    assert!(matches!(
        core.delete_bulk("transfers".to_string(), "2024-01-10".to_string(), None),
        Err(DentisterError::InvalidInput(_))
    ));
    assert!(matches!(
        core.delete_bulk("patients".to_string(), "2024-01-10".to_string(), None),
        Err(DentisterError::InvalidInput(_))
    ));
}

#[test]
fn test_missing_records_are_not_found() {
    let core = open_database_in_memory().unwrap();

    assert!(core.get_patient(42).unwrap().is_none());
    assert!(matches!(core.patient_file(42), Err(DentisterError::NotFound(_))));
    assert!(matches!(core.delete_patient(42), Err(DentisterError::NotFound(_))));
    assert!(matches!(core.delete_meeting(42), Err(DentisterError::NotFound(_))));
    assert!(matches!(
        core.create_transfer(
            42,
            FfiNewTransfer {
                transfer_type: true,
                date: "2024-01-10".to_string(),
                clinic_name: None,
                treat_type: None,
            }
        ),
        Err(DentisterError::NotFound(_))
    ));
}

#[test]
fn test_transfers_and_bulk_delete() {
    let core = open_database_in_memory().unwrap();
    let id = add_patient(&core, "Ali", "0");

    for incoming in [true, true, false] {
        core.create_transfer(
            id,
            FfiNewTransfer {
                transfer_type: incoming,
                date: "2024-02-01".to_string(),
                clinic_name: Some("عيادة النور".to_string()),
                treat_type: Some("زراعة".to_string()),
            },
        )
        .unwrap();
    }
    assert_eq!(core.get_patient(id).unwrap().unwrap().treat_type, "زراعة");

    let incoming = core.list_transfers(Some(true), any_doctor()).unwrap();
    assert_eq!(incoming.len(), 2);
    assert_eq!(incoming[0].treat_type, "زراعة");

    let deleted = core
        .delete_bulk("transfers".to_string(), "2024-02-01".to_string(), Some(true))
        .unwrap();
    assert_eq!(deleted, 2);

    let left = core.list_transfers(None, any_doctor()).unwrap();
    assert_eq!(left.len(), 1);
    assert!(!left[0].transfer.transfer_type);
}

#[test]
fn test_delete_patient_cascades() {
    let core = open_database_in_memory().unwrap();
    let id = add_patient(&core, "Ali", "0");
    core.create_meeting(id, meeting("", "2024-03-01", true))
        .unwrap();
    core.create_payment(
        id,
        FfiNewPayment {
            amount: 10_000,
            date: "2024-03-01".to_string(),
        },
    )
    .unwrap();

    core.delete_patient(id).unwrap();

    assert!(core.list_meetings("general".to_string(), any_doctor()).unwrap().is_empty());
    assert!(core.list_payments(any_doctor()).unwrap().is_empty());
}

#[test]
fn test_seed_demo_through_bridge() {
    let core = open_database_in_memory().unwrap();
    let report = core.seed_demo(true, 15).unwrap();
    assert_eq!(report.patients, 15);
    assert_eq!(core.list_patients(any_doctor()).unwrap().len(), 15);

    let report = core.seed_demo(true, 5).unwrap();
    assert_eq!(report.patients, 5);
    assert_eq!(core.list_patients(any_doctor()).unwrap().len(), 5);
}

#[test]
fn test_call_number_uses_dialer() {
    let dialer = Arc::new(RecordingDialer::default());
    let core = DentisterCore::new(Database::open_in_memory().unwrap(), dialer.clone());

    core.call_number("07700000001".to_string()).unwrap();
    assert!(matches!(
        core.call_number(String::new()),
        Err(DentisterError::DialError(_))
    ));
    assert_eq!(*dialer.calls.lock().unwrap(), vec!["07700000001".to_string()]);
}
