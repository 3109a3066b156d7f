use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{RecordId, Uncategorized, categorical};
use crate::table::record::Record;

categorical!(
    LandingPageStatus {
        Active => "Active",
        Inactive => "Inactive",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub views_last_30_days: u64,
    pub submissions_last_30_days: u64,
    pub total_views: u64,
    pub total_submissions: u64,
    pub conversion_rate: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    pub id: RecordId,
    pub name: String,
    pub referral_source_or_campaign: String,
    pub url: String,
    pub status: LandingPageStatus,
    pub created_at: DateTime<Utc>,
    pub performance: PerformanceMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Record for LandingPage {
    type Status = LandingPageStatus;
    type Kind = Uncategorized;

    const NOUN: &'static str = "landing pages";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> LandingPageStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.referral_source_or_campaign.as_str(),
        ]
    }

    /// Newest page first.
    fn default_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

/// Aggregated landing page statistics.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct LandingPageStats {
    pub total_active_pages: usize,
    pub total_views_last_30_days: u64,
    pub total_submissions_last_30_days: u64,
    pub overall_conversion_rate: f64,
}

impl LandingPageStats {
    pub fn compute(pages: &[LandingPage]) -> Self {
        let total_active_pages = pages
            .iter()
            .filter(|page| page.status == LandingPageStatus::Active)
            .count();
        let total_views_last_30_days = pages
            .iter()
            .map(|page| page.performance.views_last_30_days)
            .sum::<u64>();
        let total_submissions_last_30_days = pages
            .iter()
            .map(|page| page.performance.submissions_last_30_days)
            .sum::<u64>();

        let overall_conversion_rate = if total_views_last_30_days > 0 {
            total_submissions_last_30_days as f64 / total_views_last_30_days as f64
        } else {
            0.0
        };

        Self {
            total_active_pages,
            total_views_last_30_days,
            total_submissions_last_30_days,
            overall_conversion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_with_no_views_have_zero_conversion() {
        let stats = LandingPageStats::compute(&[]);
        assert_eq!(stats, LandingPageStats::default());
    }
}
