use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, Percent, RecordId, categorical};
use crate::table::record::{Creatable, Record};

categorical!(
    /// Care status of a client/patient.
    ClientStatus {
        Active => "Active",
        Pending => "Pending",
        AtRisk => "At Risk",
        OnHold => "On Hold",
        Completed => "Completed",
    }
);

categorical!(
    /// Insurance verification state.
    InsuranceStatus {
        Verified => "Verified",
        Pending => "Pending",
        Failed => "Failed",
    }
);

categorical!(
    ProviderType {
        FamilySupport => "Family Support",
        TherapyGroup => "Therapy Group",
        MedicalCare => "Medical Care",
        Specialist => "Specialist",
    }
);

categorical!(
    PatientType {
        Patient => "Patient",
        Client => "Client",
        Family => "Family",
        Group => "Group",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub days: u32,
    pub average_days: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub status: InsuranceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    pub patient_type: PatientType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty_focus: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub status: ClientStatus,
    /// Onboarding completion.
    pub completion: Percent,
    pub timeline: Timeline,
    pub insurance: Insurance,
    pub provider: Provider,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Record for Client {
    type Status = ClientStatus;
    type Kind = ProviderType;

    const NOUN: &'static str = "clients";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> ClientStatus {
        self.status
    }

    fn kind(&self) -> Option<ProviderType> {
        Some(self.provider.provider_type)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    /// Most recently updated first.
    fn default_order(a: &Self, b: &Self) -> Ordering {
        b.last_updated.cmp(&a.last_updated)
    }
}

/// Validated payload for adding a client.
#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub email: Email,
    pub status: ClientStatus,
    pub insurance: Insurance,
    pub provider: Provider,
    pub tags: Vec<String>,
}

impl Creatable for Client {
    type Draft = NewClient;

    fn from_draft(id: RecordId, draft: NewClient, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            avatar: None,
            status: draft.status,
            completion: Percent::default(),
            timeline: Timeline {
                days: 30,
                average_days: 45,
            },
            insurance: draft.insurance,
            provider: draft.provider,
            last_updated: now,
            tags: draft.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_gets_default_timeline() {
        let now = Utc::now();
        let client = Client::from_draft(
            RecordId::new("abc1234").unwrap(),
            NewClient {
                name: "Ava Martin".into(),
                email: Email::new("ava.martin@example.com").unwrap(),
                status: ClientStatus::Active,
                insurance: Insurance {
                    status: InsuranceStatus::Pending,
                    verification_date: None,
                },
                provider: Provider {
                    provider_type: ProviderType::FamilySupport,
                    patient_type: PatientType::Client,
                    specialty_focus: None,
                },
                tags: vec![],
            },
            now,
        );

        assert_eq!(client.completion.get(), 0);
        assert_eq!(client.timeline, Timeline { days: 30, average_days: 45 });
        assert_eq!(client.last_updated, now);
    }

    #[test]
    fn provider_type_is_addressable_by_dotted_path() {
        let json = serde_json::json!({
            "id": "1",
            "name": "Emma Johnson",
            "email": "emma.johnson@example.com",
            "status": "Active",
            "completion": 75,
            "timeline": { "days": 12, "averageDays": 15 },
            "insurance": { "status": "Verified" },
            "provider": { "type": "Family Support", "patientType": "Client" },
            "lastUpdated": "2025-04-02T09:15:00Z"
        });
        let client: Client = serde_json::from_value(json).unwrap();

        assert_eq!(
            client.sort_value("provider.type"),
            Some(crate::table::record::SortValue::Text("Family Support".into()))
        );
        assert_eq!(client.sort_value("insurance.verificationDate"), None);
    }
}
