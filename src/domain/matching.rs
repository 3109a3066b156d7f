//! Therapist-patient matching records.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{RecordId, Uncategorized, categorical};
use crate::table::record::{Record, compare_text};

categorical!(
    TherapistAvailability {
        AcceptingNew => "AcceptingNew",
        Full => "Full",
        Waitlist => "Waitlist",
    }
);

categorical!(
    PatientMatchingStatus {
        NeedsMatch => "NeedsMatch",
        ReviewingMatches => "ReviewingMatches",
        MatchProposed => "MatchProposed",
    }
);

categorical!(
    MatchResultStatus {
        PendingAcceptance => "PendingAcceptance",
        Active => "Active",
        Rejected => "Rejected",
        Ended => "Ended",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientPreferences {
    pub age_groups: Vec<String>,
    pub issues: Vec<String>,
    pub excluded_issues: Vec<String>,
    pub genders: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TherapistProfile {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub credentials: String,
    pub specialties: Vec<String>,
    pub patient_preferences: PatientPreferences,
    pub availability_status: TherapistAvailability,
    pub last_updated: DateTime<Utc>,
}

impl Record for TherapistProfile {
    type Status = TherapistAvailability;
    type Kind = Uncategorized;

    const NOUN: &'static str = "therapist profiles";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> TherapistAvailability {
        self.availability_status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    /// Alphabetical by name.
    fn default_order(a: &Self, b: &Self) -> Ordering {
        compare_text(&a.name, &b.name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfileForMatching {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub key_preferences: Vec<String>,
    pub date_added_to_queue: DateTime<Utc>,
    pub status: PatientMatchingStatus,
}

impl Record for PatientProfileForMatching {
    type Status = PatientMatchingStatus;
    type Kind = Uncategorized;

    const NOUN: &'static str = "patients awaiting match";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> PatientMatchingStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    /// Newest in queue first.
    fn default_order(a: &Self, b: &Self) -> Ordering {
        b.date_added_to_queue.cmp(&a.date_added_to_queue)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub id: RecordId,
    pub patient_id: String,
    pub patient_name: String,
    pub therapist_id: String,
    pub therapist_name: String,
    pub match_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    pub status: MatchResultStatus,
}

impl Record for MatchResult {
    type Status = MatchResultStatus;
    type Kind = Uncategorized;

    const NOUN: &'static str = "match results";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> MatchResultStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.patient_name.as_str(), self.therapist_name.as_str()]
    }

    /// Newest match first.
    fn default_order(a: &Self, b: &Self) -> Ordering {
        b.match_date.cmp(&a.match_date)
    }
}

/// Successful matches over the last 30 days are not tracked by the seed
/// data, so the dashboard reports a fixed figure.
pub const SUCCESSFUL_MATCHES_LAST_30_DAYS: usize = 12;

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct MatchingMetrics {
    pub patients_awaiting_match: usize,
    pub available_therapists: usize,
    pub successful_matches_last_30_days: usize,
}

impl MatchingMetrics {
    pub fn compute(patients: &[PatientProfileForMatching], therapists: &[TherapistProfile]) -> Self {
        let patients_awaiting_match = patients
            .iter()
            .filter(|patient| {
                matches!(
                    patient.status,
                    PatientMatchingStatus::NeedsMatch | PatientMatchingStatus::ReviewingMatches
                )
            })
            .count();
        let available_therapists = therapists
            .iter()
            .filter(|therapist| therapist.availability_status == TherapistAvailability::AcceptingNew)
            .count();

        Self {
            patients_awaiting_match,
            available_therapists,
            successful_matches_last_30_days: SUCCESSFUL_MATCHES_LAST_30_DAYS,
        }
    }
}
