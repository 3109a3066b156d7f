use crate::domain::matching::{MatchingMetrics, PatientProfileForMatching, TherapistProfile};
use crate::repository::RecordReader;
use crate::services::{ServiceError, ServiceResult};
use crate::table::filter::ListQuery;

/// Tabs of the matching page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingTab {
    #[default]
    Patients,
    Therapists,
    Matches,
}

pub fn matching_metrics<P, T>(patients: &P, therapists: &T) -> ServiceResult<MatchingMetrics>
where
    P: RecordReader<PatientProfileForMatching> + ?Sized,
    T: RecordReader<TherapistProfile> + ?Sized,
{
    let patients = patients.list_records(&ListQuery::new()).map_err(|err| {
        log::error!("Failed to load patients for matching metrics: {err}");
        ServiceError::from(err)
    })?;
    let therapists = therapists.list_records(&ListQuery::new()).map_err(|err| {
        log::error!("Failed to load therapists for matching metrics: {err}");
        ServiceError::from(err)
    })?;

    Ok(MatchingMetrics::compute(&patients, &therapists))
}
