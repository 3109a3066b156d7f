use std::fmt::Debug;

use yuna_dashboard::domain::call::{CallRecord, CallStatus};
use yuna_dashboard::domain::client::{Client, ClientStatus, ProviderType};
use yuna_dashboard::domain::matching::MatchResult;
use yuna_dashboard::domain::onboarding::{NewOnboardingPatient, OnboardingPatient};
use yuna_dashboard::domain::types::{Email, RecordId};
use yuna_dashboard::repository::{InMemoryRepository, RecordReader, RecordWriter, seed};
use yuna_dashboard::table::filter::ListQuery;
use yuna_dashboard::table::record::Record;
use yuna_dashboard::table::sort::{SortDirection, SortState, sort_records};

fn ids<'a, R: Record>(records: impl IntoIterator<Item = &'a R>) -> Vec<String> {
    records
        .into_iter()
        .map(|record| record.id().as_str().to_string())
        .collect()
}

/// Listing the whole dataset returns each record once, in default order.
fn assert_default_order<R: Record + PartialEq + Debug>(records: Vec<R>) {
    let total = records.len();
    let repo = InMemoryRepository::new(records);

    let listed = repo.list_records(&ListQuery::new()).unwrap();

    assert_eq!(listed.len(), total, "{}", R::NOUN);
    assert!(
        listed
            .windows(2)
            .all(|pair| R::default_order(&pair[0], &pair[1]).is_le()),
        "{} out of default order",
        R::NOUN
    );
}

#[test]
fn every_dataset_lists_in_default_order() {
    assert_default_order(seed::calls().unwrap());
    assert_default_order(seed::clients().unwrap());
    assert_default_order(seed::onboarding_patients().unwrap());
    assert_default_order(seed::landing_pages().unwrap());
    assert_default_order(seed::therapists().unwrap());
    assert_default_order(seed::patients_for_matching().unwrap());
    assert_default_order(seed::match_results().unwrap());
}

#[test]
fn search_returns_exactly_the_matching_records() {
    let calls = seed::calls().unwrap();
    let repo = InMemoryRepository::new(calls.clone());

    for term in ["emma", "EMMA", "son", "zzz"] {
        let expected = calls
            .iter()
            .filter(|call| call.client_name.to_lowercase().contains(&term.to_lowercase()))
            .count();

        let listed = repo.list_records(&ListQuery::new().search(term)).unwrap();

        assert_eq!(listed.len(), expected, "term {term}");
        assert!(
            listed
                .iter()
                .all(|call| call.client_name.to_lowercase().contains(&term.to_lowercase()))
        );
    }
}

#[test]
fn blank_search_is_no_filter() {
    let repo = InMemoryRepository::new(seed::calls().unwrap());

    let all = repo.list_records(&ListQuery::new()).unwrap();
    let blank = repo.list_records(&ListQuery::new().search("   ")).unwrap();

    assert_eq!(ids(&all), ids(&blank));
}

#[test]
fn filters_combine() {
    let clients = seed::clients().unwrap();
    let repo = InMemoryRepository::new(clients.clone());

    let query = ListQuery::<Client>::new()
        .status(ClientStatus::Active)
        .kind(ProviderType::TherapyGroup);
    let listed = repo.list_records(&query).unwrap();

    let expected = clients
        .iter()
        .filter(|client| {
            client.status == ClientStatus::Active
                && client.provider.provider_type == ProviderType::TherapyGroup
        })
        .count();
    assert_eq!(listed.len(), expected);
}

#[test]
fn status_filter_keeps_only_that_status() {
    let repo = InMemoryRepository::new(seed::calls().unwrap());

    let completed = repo
        .list_records(&ListQuery::new().status(CallStatus::Completed))
        .unwrap();

    assert!(!completed.is_empty());
    assert!(
        completed
            .iter()
            .all(|call| call.status == CallStatus::Completed)
    );
}

#[test]
fn created_patient_is_not_persisted() {
    let repo = InMemoryRepository::new(seed::onboarding_patients().unwrap());
    let before = repo.list_records(&ListQuery::new()).unwrap().len();

    let created: OnboardingPatient = repo
        .create_record(NewOnboardingPatient {
            name: "Grace Hall".into(),
            email: Email::new("grace.hall@example.com").unwrap(),
            assigned_to: None,
            notes: None,
            tags: Vec::new(),
        })
        .unwrap();

    assert_eq!(created.name, "Grace Hall");
    assert!(repo.get_record(&created.id).unwrap().is_none());
    assert_eq!(repo.list_records(&ListQuery::new()).unwrap().len(), before);
}

#[test]
fn unknown_id_is_none() {
    let repo = InMemoryRepository::new(seed::match_results().unwrap());
    let id = RecordId::new("no-such-match").unwrap();

    let found: Option<MatchResult> = repo.get_record(&id).unwrap();

    assert!(found.is_none());
}

#[test]
fn sorting_the_same_column_twice_reverses_distinct_keys() {
    let repo = InMemoryRepository::new(seed::calls().unwrap());
    let calls = repo.list_records(&ListQuery::new()).unwrap();

    let mut sort = SortState::default();
    sort.toggle("dateTime");
    let ascending = ids(sort_records(&calls, &sort));
    sort.toggle("dateTime");
    let mut descending = ids(sort_records(&calls, &sort));

    descending.reverse();
    assert_eq!(ascending, descending);
}

#[test]
fn missing_values_sort_first_ascending_and_last_descending() {
    let repo = InMemoryRepository::new(seed::match_results().unwrap());
    let matches: Vec<MatchResult> = repo.list_records(&ListQuery::new()).unwrap();
    assert!(matches.iter().any(|result| result.match_score.is_none()));

    let ascending = sort_records(
        &matches,
        &SortState::by("matchScore", SortDirection::Ascending),
    );
    assert!(ascending[0].match_score.is_none());

    let descending = sort_records(
        &matches,
        &SortState::by("matchScore", SortDirection::Descending),
    );
    assert!(descending[descending.len() - 1].match_score.is_none());
}

#[test]
fn nested_field_sorts_with_missing_dates_lowest() {
    let repo = InMemoryRepository::new(seed::clients().unwrap());
    let clients: Vec<Client> = repo.list_records(&ListQuery::new()).unwrap();

    let sorted = sort_records(
        &clients,
        &SortState::by("insurance.verificationDate", SortDirection::Ascending),
    );

    let missing = sorted
        .iter()
        .take_while(|client| client.insurance.verification_date.is_none())
        .count();
    assert!(missing > 0);
    assert!(
        sorted[missing..]
            .iter()
            .all(|client| client.insurance.verification_date.is_some())
    );
}

#[test]
fn clones_share_the_dataset() {
    let calls: Vec<CallRecord> = seed::calls().unwrap();
    let repo = InMemoryRepository::new(calls);
    let copy = repo.clone();

    assert_eq!(repo.len(), copy.len());
    assert_eq!(
        ids(&repo.list_records(&ListQuery::new()).unwrap()),
        ids(&copy.list_records(&ListQuery::new()).unwrap())
    );
}
