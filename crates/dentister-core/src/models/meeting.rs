//! Meeting (appointment) models.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patient::{non_empty, PatientId};

/// Secondary classification given to meetings created without one.
pub const MEETING_TYPE_2_NONE: &str = "none";

pub type MeetingId = i64;

/// Primary meeting classification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MeetingType {
    #[default]
    General,
    Implant,
    Braces,
}

impl MeetingType {
    pub const ALL: [MeetingType; 3] = [MeetingType::General, MeetingType::Implant, MeetingType::Braces];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::General => "general",
            MeetingType::Implant => "implant",
            MeetingType::Braces => "braces",
        }
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(MeetingType::General),
            "implant" => Ok(MeetingType::Implant),
            "braces" => Ok(MeetingType::Braces),
            _ => Err(format!(
                "Unknown meeting type: '{}'. Must be one of: general, implant, braces",
                s
            )),
        }
    }
}

/// A scheduled appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meeting {
    pub id: MeetingId,
    pub patient_id: PatientId,
    pub meeting_type: MeetingType,
    /// Free-form secondary classification
    pub meeting_type_2: String,
    pub info: Option<String>,
    pub date: NaiveDate,
    /// Coarse time of day: `true` is the first slot, `false` the second
    pub time: bool,
}

impl Meeting {
    /// List order: newest date first, first slot before second, newest record first.
    pub fn list_order(a: &Meeting, b: &Meeting) -> Ordering {
        (b.date, b.time, b.id).cmp(&(a.date, a.time, a.id))
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: &MeetingUpdate) {
        if let Some(meeting_type) = update.meeting_type {
            self.meeting_type = meeting_type;
        }
        if let Some(meeting_type_2) = non_empty(&update.meeting_type_2) {
            self.meeting_type_2 = meeting_type_2.to_string();
        }
        if let Some(info) = non_empty(&update.info) {
            self.info = Some(info.to_string());
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(time) = update.time {
            self.time = time;
        }
    }
}

/// Fields for booking a meeting under an existing patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMeeting {
    pub meeting_type: MeetingType,
    pub meeting_type_2: Option<String>,
    pub info: Option<String>,
    pub date: NaiveDate,
    pub time: bool,
}

impl NewMeeting {
    pub fn new(meeting_type: MeetingType, date: NaiveDate, time: bool) -> Self {
        Self {
            meeting_type,
            meeting_type_2: None,
            info: None,
            date,
            time,
        }
    }

    pub(crate) fn into_meeting(self, patient_id: PatientId) -> Meeting {
        Meeting {
            id: 0,
            patient_id,
            meeting_type: self.meeting_type,
            meeting_type_2: non_empty(&self.meeting_type_2)
                .unwrap_or(MEETING_TYPE_2_NONE)
                .to_string(),
            info: non_empty(&self.info).map(str::to_string),
            date: self.date,
            time: self.time,
        }
    }
}

/// Partial meeting update; empty strings mean "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeetingUpdate {
    pub meeting_type: Option<MeetingType>,
    pub meeting_type_2: Option<String>,
    pub info: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<bool>,
}

/// A meeting joined with the owning patient, as shown in list screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetingEntry {
    pub meeting: Meeting,
    pub patient_name: String,
    pub phone_num: String,
    pub doctor: String,
}
