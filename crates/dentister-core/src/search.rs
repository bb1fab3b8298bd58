//! Patient search for the reception desk.
//!
//! Names are typed in a hurry and often misspelled, so a query that is not a
//! plain substring of the name or phone number falls back to fuzzy matching
//! against the full name and each of its parts.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::db::{Database, DbResult};
use crate::models::{DoctorFilter, Patient};

/// Minimum similarity for a fuzzy name match.
const MIN_SCORE: f64 = 0.75;

/// A search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientMatch {
    pub patient: Patient,
    pub score: f64,
}

/// Patient search over the store.
pub struct PatientSearch<'a> {
    db: &'a Database,
}

impl<'a> PatientSearch<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Best matches first; ties keep the patient list order (newest first).
    pub fn search(
        &self,
        query: &str,
        filter: &DoctorFilter,
        limit: usize,
    ) -> DbResult<Vec<PatientMatch>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut matches: Vec<PatientMatch> = self
            .db
            .list_patients(filter)?
            .into_iter()
            .filter_map(|patient| {
                let score = score_patient(&patient, &query);
                (score >= MIN_SCORE).then_some(PatientMatch { patient, score })
            })
            .collect();

        // Stable sort keeps list order among equal scores
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(limit);
        Ok(matches)
    }
}

impl Database {
    /// Search patients by name or phone number.
    pub fn search_patients(
        &self,
        query: &str,
        filter: &DoctorFilter,
        limit: usize,
    ) -> DbResult<Vec<Patient>> {
        Ok(PatientSearch::new(self)
            .search(query, filter, limit)?
            .into_iter()
            .map(|m| m.patient)
            .collect())
    }
}

/// Score a patient against a lowercase query.
fn score_patient(patient: &Patient, query: &str) -> f64 {
    let name = patient.name.to_lowercase();
    if name.contains(query) || patient.phone_num.contains(query) {
        return 1.0;
    }

    std::iter::once(name.as_str())
        .chain(name.split_whitespace())
        .map(|candidate| fuzzy_match(query, candidate))
        .fold(0.0, f64::max)
}

fn fuzzy_match(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}
