use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, Percent, RecordId, Uncategorized, categorical};
use crate::table::record::{Creatable, Record};

categorical!(
    /// Where a patient is in the onboarding funnel.
    OnboardingStatus {
        InProgress => "In Progress",
        Completed => "Completed",
        Stalled => "Stalled",
        Abandoned => "Abandoned",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingPatient {
    pub id: RecordId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub status: OnboardingStatus,
    pub progress: Percent,
    pub start_date: DateTime<Utc>,
    pub last_activity_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_completion_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Record for OnboardingPatient {
    type Status = OnboardingStatus;
    type Kind = Uncategorized;

    const NOUN: &'static str = "onboarding patients";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> OnboardingStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    /// Most recent activity first.
    fn default_order(a: &Self, b: &Self) -> Ordering {
        b.last_activity_date.cmp(&a.last_activity_date)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewOnboardingPatient {
    pub name: String,
    pub email: Email,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl Creatable for OnboardingPatient {
    type Draft = NewOnboardingPatient;

    fn from_draft(id: RecordId, draft: NewOnboardingPatient, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            avatar: None,
            status: OnboardingStatus::InProgress,
            progress: Percent::default(),
            start_date: now,
            last_activity_date: now,
            estimated_completion_date: None,
            assigned_to: draft.assigned_to,
            notes: draft.notes,
            tags: draft.tags,
        }
    }
}
