//! Datasets bundled with the binary.
//!
//! Each file under `data/` is a JSON array of records in their wire format.

use serde::de::DeserializeOwned;

use crate::domain::call::CallRecord;
use crate::domain::client::Client;
use crate::domain::landing_page::LandingPage;
use crate::domain::matching::{MatchResult, PatientProfileForMatching, TherapistProfile};
use crate::domain::onboarding::OnboardingPatient;
use crate::repository::errors::RepositoryResult;

const CALLS: &str = include_str!("../../data/calls.json");
const CLIENTS: &str = include_str!("../../data/clients.json");
const ONBOARDING: &str = include_str!("../../data/onboarding.json");
const LANDING_PAGES: &str = include_str!("../../data/landing_pages.json");
const THERAPISTS: &str = include_str!("../../data/therapists.json");
const PATIENTS: &str = include_str!("../../data/patients.json");
const MATCHES: &str = include_str!("../../data/matches.json");

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> RepositoryResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|err| {
        log::error!("Failed to parse {name} dataset: {err}");
        err.into()
    })
}

pub fn calls() -> RepositoryResult<Vec<CallRecord>> {
    parse("calls", CALLS)
}

pub fn clients() -> RepositoryResult<Vec<Client>> {
    parse("clients", CLIENTS)
}

pub fn onboarding_patients() -> RepositoryResult<Vec<OnboardingPatient>> {
    parse("onboarding", ONBOARDING)
}

pub fn landing_pages() -> RepositoryResult<Vec<LandingPage>> {
    parse("landing pages", LANDING_PAGES)
}

pub fn therapists() -> RepositoryResult<Vec<TherapistProfile>> {
    parse("therapists", THERAPISTS)
}

pub fn patients_for_matching() -> RepositoryResult<Vec<PatientProfileForMatching>> {
    parse("patients", PATIENTS)
}

pub fn match_results() -> RepositoryResult<Vec<MatchResult>> {
    parse("matches", MATCHES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_datasets_parse() {
        assert_eq!(calls().unwrap().len(), 15);
        assert_eq!(clients().unwrap().len(), 6);
        assert_eq!(onboarding_patients().unwrap().len(), 18);
        assert_eq!(landing_pages().unwrap().len(), 8);
        assert_eq!(therapists().unwrap().len(), 8);
        assert_eq!(patients_for_matching().unwrap().len(), 8);
        assert_eq!(match_results().unwrap().len(), 8);
    }
}
