use crate::domain::landing_page::{LandingPage, LandingPageStats};
use crate::repository::RecordReader;
use crate::services::{ServiceError, ServiceResult};
use crate::table::filter::ListQuery;

/// Totals over every landing page, regardless of table filters.
pub fn landing_page_stats<Repo>(repo: &Repo) -> ServiceResult<LandingPageStats>
where
    Repo: RecordReader<LandingPage> + ?Sized,
{
    let pages = repo.list_records(&ListQuery::new()).map_err(|err| {
        log::error!("Failed to compute landing page stats: {err}");
        ServiceError::from(err)
    })?;
    Ok(LandingPageStats::compute(&pages))
}
