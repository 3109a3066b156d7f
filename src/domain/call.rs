use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{RecordId, categorical};
use crate::table::record::{Creatable, Record};

categorical!(
    /// Purpose of an outbound AI call.
    CallType {
        Intake => "Intake",
        EligibilityAndBenefits => "Eligibility & Benefits",
        Reminder => "Reminder",
        FollowUp => "Follow-up",
    }
);

categorical!(
    /// Lifecycle state of a call.
    CallStatus {
        Completed => "Completed",
        Scheduled => "Scheduled",
        InProgress => "In Progress",
        Failed => "Failed",
        Canceled => "Canceled",
    }
);

categorical!(
    /// Bucketed sentiment of the client during the call.
    SentimentCategory {
        Positive => "Positive",
        Neutral => "Neutral",
        Negative => "Negative",
    }
);

impl SentimentCategory {
    /// Closing sentence appended to call notes in the detail view.
    pub fn insight(self) -> &'static str {
        match self {
            SentimentCategory::Positive => "optimism and engagement throughout the call.",
            SentimentCategory::Neutral => "factual and straightforward communication style.",
            SentimentCategory::Negative => "some concerns that may need follow-up attention.",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub id: RecordId,
    pub client_name: String,
    pub client_id: String,
    pub call_type: CallType,
    pub date_time: DateTime<Utc>,
    /// Duration in seconds.
    pub duration: u32,
    pub status: CallStatus,
    /// Score from 0 to 1.
    pub sentiment_score: f64,
    pub sentiment_category: SentimentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for CallRecord {
    type Status = CallStatus;
    type Kind = CallType;

    const NOUN: &'static str = "calls";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> CallStatus {
        self.status
    }

    fn kind(&self) -> Option<CallType> {
        Some(self.call_type)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.client_name.as_str()]
    }

    /// Newest call first.
    fn default_order(a: &Self, b: &Self) -> Ordering {
        b.date_time.cmp(&a.date_time)
    }
}

/// Request to place a new AI call.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCall {
    pub client_id: RecordId,
    pub client_name: String,
    pub call_type: CallType,
}

impl Creatable for CallRecord {
    type Draft = NewCall;

    const ID_PREFIX: Option<&'static str> = Some("call");
    const ID_LEN: usize = 6;

    fn from_draft(id: RecordId, draft: NewCall, now: DateTime<Utc>) -> Self {
        Self {
            id,
            client_name: draft.client_name,
            client_id: draft.client_id.into(),
            call_type: draft.call_type,
            date_time: now,
            duration: 0,
            status: CallStatus::Scheduled,
            sentiment_score: 0.5,
            sentiment_category: SentimentCategory::Neutral,
            recording_url: None,
            notes: None,
            agent_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Call record with the expanded notes shown in the detail view.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CallDetails {
    pub record: CallRecord,
    pub notes: String,
}

impl CallDetails {
    pub fn from_record(record: CallRecord) -> Self {
        let notes = match &record.notes {
            Some(notes) => format!(
                "{notes}\n\nAdditional AI-generated insights: Client tone of voice indicated {}",
                record.sentiment_category.insight()
            ),
            None => "No notes available for this call.".to_string(),
        };
        Self { record, notes }
    }
}

/// Outcome of asking the dialer to place a call.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CallInitiation {
    pub success: bool,
    pub message: String,
    pub call_id: Option<RecordId>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// Aggregates shown above the calls table.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct CallStats {
    pub total: usize,
    pub completed_today: usize,
    pub scheduled: usize,
    pub sentiment: SentimentBreakdown,
}

impl CallStats {
    pub fn compute(calls: &[CallRecord], today: chrono::NaiveDate) -> Self {
        let mut stats = CallStats {
            total: calls.len(),
            ..CallStats::default()
        };

        for call in calls {
            match call.status {
                CallStatus::Completed if call.date_time.date_naive() == today => {
                    stats.completed_today += 1
                }
                CallStatus::Scheduled => stats.scheduled += 1,
                _ => {}
            }
            match call.sentiment_category {
                SentimentCategory::Positive => stats.sentiment.positive += 1,
                SentimentCategory::Neutral => stats.sentiment.neutral += 1,
                SentimentCategory::Negative => stats.sentiment.negative += 1,
            }
        }

        stats
    }
}

/// Formats seconds as `M:SS`.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
