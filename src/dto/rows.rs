//! Table columns and cell text for each record type.

use chrono::Utc;

use crate::domain::call::{CallRecord, format_duration};
use crate::domain::client::Client;
use crate::domain::landing_page::LandingPage;
use crate::domain::matching::{MatchResult, PatientProfileForMatching, TherapistProfile};
use crate::domain::onboarding::OnboardingPatient;
use crate::dto::{format_date, format_date_time, format_rate};
use crate::table::view::{Column, RowRenderer};

impl RowRenderer for CallRecord {
    const COLUMNS: &'static [Column] = &[
        Column::sortable("clientName", "Client"),
        Column::sortable("status", "Status"),
        Column::sortable("dateTime", "Date & Time"),
        Column::sortable("duration", "Duration"),
        Column::sortable("sentimentScore", "Sentiment"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            format!("{} ({})", self.client_name, self.call_type),
            self.status.to_string(),
            format_date_time(&self.date_time),
            format_duration(self.duration),
            self.sentiment_label(),
        ]
    }

    fn headline(&self) -> String {
        self.client_name.clone()
    }

    fn summary(&self) -> String {
        format!("{} · {}", self.call_type, self.status)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Date", format_date_time(&self.date_time)),
            ("Duration", format_duration(self.duration)),
            ("Sentiment", self.sentiment_label()),
        ]
    }
}

impl CallRecord {
    /// `Positive (82%)`.
    pub fn sentiment_label(&self) -> String {
        format!(
            "{} ({:.0}%)",
            self.sentiment_category,
            self.sentiment_score * 100.0
        )
    }
}

impl RowRenderer for Client {
    const COLUMNS: &'static [Column] = &[
        Column::sortable("name", "Name"),
        Column::sortable("status", "Status"),
        Column::sortable("completion", "Completion"),
        Column::sortable("timeline.days", "Timeline"),
        Column::sortable("insurance.status", "Insurance"),
        Column::sortable("provider.type", "Provider"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            format!("{} <{}>", self.name, self.email),
            self.status.to_string(),
            self.completion.to_string(),
            format!(
                "{} days (avg {})",
                self.timeline.days, self.timeline.average_days
            ),
            self.insurance.status.to_string(),
            self.provider.provider_type.to_string(),
        ]
    }

    fn headline(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> String {
        format!("{} · {} complete", self.status, self.completion)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = vec![
            ("Email", self.email.to_string()),
            (
                "Timeline",
                format!(
                    "{} days (avg {})",
                    self.timeline.days, self.timeline.average_days
                ),
            ),
            ("Insurance", self.insurance.status.to_string()),
            ("Provider", self.provider.provider_type.to_string()),
            ("Patient type", self.provider.patient_type.to_string()),
        ];
        if let Some(date) = &self.insurance.verification_date {
            details.push(("Verified on", format_date(date)));
        }
        if let Some(focus) = &self.provider.specialty_focus {
            details.push(("Specialty", focus.clone()));
        }
        details
    }
}

impl OnboardingPatient {
    pub fn days_in_process(&self) -> i64 {
        (Utc::now() - self.start_date).num_days().max(0)
    }
}

impl RowRenderer for OnboardingPatient {
    const COLUMNS: &'static [Column] = &[
        Column::sortable("name", "Patient"),
        Column::sortable("status", "Status"),
        Column::sortable("progress", "Progress"),
        Column::sortable("startDate", "Days in Process"),
        Column::sortable("lastActivityDate", "Last Activity"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            format!("{} <{}>", self.name, self.email),
            self.status.to_string(),
            self.progress.to_string(),
            format!("{} days", self.days_in_process()),
            format_date(&self.last_activity_date),
        ]
    }

    fn headline(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> String {
        format!("{} · {}", self.status, self.progress)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = vec![
            ("Email", self.email.to_string()),
            ("Started", format_date(&self.start_date)),
            ("Last activity", format_date(&self.last_activity_date)),
        ];
        if let Some(assigned_to) = &self.assigned_to {
            details.push(("Assigned to", assigned_to.clone()));
        }
        if !self.tags.is_empty() {
            details.push(("Tags", self.tags.join(", ")));
        }
        if let Some(notes) = &self.notes {
            details.push(("Notes", notes.clone()));
        }
        details
    }
}

impl RowRenderer for LandingPage {
    const COLUMNS: &'static [Column] = &[
        Column::sortable("name", "Landing Page & Source"),
        Column::sortable("status", "Status"),
        Column::sortable("performance.viewsLast30Days", "Performance (Last 30d)"),
        Column::sortable("performance.conversionRate", "Conversion"),
        Column::fixed("url", "URL"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            format!("{} ({})", self.name, self.referral_source_or_campaign),
            self.status.to_string(),
            format!(
                "{} views / {} submissions",
                self.performance.views_last_30_days, self.performance.submissions_last_30_days
            ),
            format_rate(self.performance.conversion_rate),
            self.url.clone(),
        ]
    }

    fn headline(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> String {
        format!("{} · {}", self.referral_source_or_campaign, self.status)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = vec![
            ("Views (30d)", self.performance.views_last_30_days.to_string()),
            (
                "Submissions (30d)",
                self.performance.submissions_last_30_days.to_string(),
            ),
            ("Conversion", format_rate(self.performance.conversion_rate)),
            ("URL", self.url.clone()),
            ("Created", format_date(&self.created_at)),
        ];
        if let Some(description) = &self.description {
            details.push(("Description", description.clone()));
        }
        details
    }
}

impl RowRenderer for TherapistProfile {
    const COLUMNS: &'static [Column] = &[
        Column::sortable("name", "Therapist"),
        Column::sortable("credentials", "Credentials"),
        Column::fixed("specialties", "Specialties"),
        Column::sortable("availabilityStatus", "Availability"),
        Column::sortable("lastUpdated", "Last Updated"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.credentials.clone(),
            self.specialties.join(", "),
            self.availability_status.to_string(),
            format_date(&self.last_updated),
        ]
    }

    fn headline(&self) -> String {
        format!("{}, {}", self.name, self.credentials)
    }

    fn summary(&self) -> String {
        self.availability_status.to_string()
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let preferences = &self.patient_preferences;
        vec![
            ("Specialties", self.specialties.join(", ")),
            ("Age groups", preferences.age_groups.join(", ")),
            ("Issues", preferences.issues.join(", ")),
            ("Languages", preferences.languages.join(", ")),
        ]
    }
}

impl RowRenderer for PatientProfileForMatching {
    const COLUMNS: &'static [Column] = &[
        Column::sortable("name", "Patient"),
        Column::fixed("keyPreferences", "Key Preferences"),
        Column::sortable("dateAddedToQueue", "In Queue Since"),
        Column::sortable("status", "Status"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.key_preferences.join(", "),
            format_date(&self.date_added_to_queue),
            self.status.to_string(),
        ]
    }

    fn headline(&self) -> String {
        self.name.clone()
    }

    fn summary(&self) -> String {
        self.status.to_string()
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Preferences", self.key_preferences.join(", ")),
            ("In queue since", format_date(&self.date_added_to_queue)),
        ]
    }
}

impl RowRenderer for MatchResult {
    const COLUMNS: &'static [Column] = &[
        Column::sortable("patientName", "Patient"),
        Column::sortable("therapistName", "Therapist"),
        Column::sortable("matchDate", "Match Date"),
        Column::sortable("matchScore", "Score"),
        Column::sortable("status", "Status"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.patient_name.clone(),
            self.therapist_name.clone(),
            format_date(&self.match_date),
            self.score_label(),
            self.status.to_string(),
        ]
    }

    fn headline(&self) -> String {
        format!("{} → {}", self.patient_name, self.therapist_name)
    }

    fn summary(&self) -> String {
        self.status.to_string()
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Matched on", format_date(&self.match_date)),
            ("Score", self.score_label()),
        ]
    }
}

impl MatchResult {
    fn score_label(&self) -> String {
        self.match_score
            .map(|score| format!("{:.0}%", score * 100.0))
            .unwrap_or_else(|| "n/a".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::seed;
    use crate::table::record::Record;

    fn assert_cells_match_columns<R: RowRenderer>(records: &[R]) {
        for record in records {
            assert_eq!(record.cells().len(), R::COLUMNS.len());
        }
    }

    #[test]
    fn every_row_has_one_cell_per_column() {
        assert_cells_match_columns(&seed::calls().unwrap());
        assert_cells_match_columns(&seed::clients().unwrap());
        assert_cells_match_columns(&seed::onboarding_patients().unwrap());
        assert_cells_match_columns(&seed::landing_pages().unwrap());
        assert_cells_match_columns(&seed::therapists().unwrap());
        assert_cells_match_columns(&seed::patients_for_matching().unwrap());
        assert_cells_match_columns(&seed::match_results().unwrap());
    }

    #[test]
    fn sortable_columns_resolve_on_seed_records() {
        let calls = seed::calls().unwrap();
        for column in CallRecord::COLUMNS.iter().filter(|column| column.sortable) {
            assert!(calls[0].sort_value(column.key).is_some(), "{}", column.key);
        }
    }

    #[test]
    fn call_cells_are_formatted() {
        let calls = seed::calls().unwrap();
        let first = &calls[0];
        assert_eq!(first.cells()[0], "Emma Johnson (Intake)");
        assert_eq!(first.cells()[3], "7:00");
        assert_eq!(first.cells()[4], "Positive (82%)");
    }
}
