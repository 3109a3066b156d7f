//! Async boundary between the table layer and a repository.
//!
//! [`Direct`] passes calls straight through. [`Simulated`] adds a random
//! latency and, for list fetches, random failures so the loading and error
//! paths of the UI get exercised.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;

use crate::domain::types::RecordId;
use crate::repository::{RecordReader, RecordWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::table::filter::ListQuery;
use crate::table::record::{Creatable, Record};

pub trait DataSource<R: Record>: Send + Sync {
    /// Records matching `query` in the record's default order.
    fn fetch_list(
        &self,
        query: &ListQuery<R>,
    ) -> impl Future<Output = ServiceResult<Vec<R>>> + Send;

    fn fetch_one(&self, id: &RecordId) -> impl Future<Output = ServiceResult<Option<R>>> + Send;
}

pub trait RecordCreator<R: Creatable>: Send + Sync {
    /// Fabricates a record from `draft`; nothing is persisted.
    fn create(&self, draft: R::Draft) -> impl Future<Output = ServiceResult<R>> + Send;
}

fn read_list<R, Repo>(repo: &Repo, query: &ListQuery<R>) -> ServiceResult<Vec<R>>
where
    R: Record,
    Repo: RecordReader<R> + ?Sized,
{
    repo.list_records(query).map_err(|err| {
        log::error!("Failed to list {}: {err}", R::NOUN);
        ServiceError::FetchFailed(R::NOUN)
    })
}

fn read_one<R, Repo>(repo: &Repo, id: &RecordId) -> ServiceResult<Option<R>>
where
    R: Record,
    Repo: RecordReader<R> + ?Sized,
{
    repo.get_record(id).map_err(|err| {
        log::error!("Failed to get {} record {id}: {err}", R::NOUN);
        ServiceError::FetchFailed(R::NOUN)
    })
}

fn write<R, Repo>(repo: &Repo, draft: R::Draft) -> ServiceResult<R>
where
    R: Creatable,
    Repo: RecordWriter<R> + ?Sized,
{
    repo.create_record(draft).map_err(|err| {
        log::error!("Failed to create {} record: {err}", R::NOUN);
        ServiceError::from(err)
    })
}

/// Calls the repository without delay or injected failures.
#[derive(Clone, Debug)]
pub struct Direct<Repo> {
    repo: Repo,
}

impl<Repo> Direct<Repo> {
    pub fn new(repo: Repo) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Repo {
        &self.repo
    }
}

impl<R, Repo> DataSource<R> for Direct<Repo>
where
    R: Record,
    Repo: RecordReader<R> + Send + Sync,
{
    async fn fetch_list(&self, query: &ListQuery<R>) -> ServiceResult<Vec<R>> {
        read_list(&self.repo, query)
    }

    async fn fetch_one(&self, id: &RecordId) -> ServiceResult<Option<R>> {
        read_one(&self.repo, id)
    }
}

impl<R, Repo> RecordCreator<R> for Direct<Repo>
where
    R: Creatable,
    Repo: RecordWriter<R> + Send + Sync,
{
    async fn create(&self, draft: R::Draft) -> ServiceResult<R> {
        write(&self.repo, draft)
    }
}

/// Latency window and failure probability of a [`Simulated`] source.
///
/// Only constructible through [`NetworkProfile::new`], so the window is
/// ordered and the rate lies in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkProfile {
    min_latency: Duration,
    max_latency: Duration,
    failure_rate: f64,
}

impl Default for NetworkProfile {
    fn default() -> Self {
        Self {
            min_latency: Duration::from_millis(300),
            max_latency: Duration::from_millis(1500),
            failure_rate: 0.1,
        }
    }
}

impl NetworkProfile {
    /// Inverted bounds are swapped; the rate is clamped to `0.0..=1.0`.
    pub fn new(min_ms: u64, max_ms: u64, failure_rate: f64) -> Self {
        let (low, high) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        let failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };

        Self {
            min_latency: Duration::from_millis(low),
            max_latency: Duration::from_millis(high),
            failure_rate,
        }
    }

    pub fn min_latency(&self) -> Duration {
        self.min_latency
    }

    pub fn max_latency(&self) -> Duration {
        self.max_latency
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

/// Wraps a repository with random latency and list-fetch failures.
///
/// Failures are independent of the query. Detail reads and creation are
/// delayed but never fail.
#[derive(Debug)]
pub struct Simulated<Repo> {
    repo: Repo,
    profile: NetworkProfile,
    rng: Mutex<StdRng>,
}

impl<Repo> Simulated<Repo> {
    pub fn new(repo: Repo, profile: NetworkProfile) -> Self {
        Self::with_rng(repo, profile, StdRng::from_entropy())
    }

    /// Deterministic latency and failure sequence.
    pub fn seeded(repo: Repo, profile: NetworkProfile, seed: u64) -> Self {
        Self::with_rng(repo, profile, StdRng::seed_from_u64(seed))
    }

    fn with_rng(repo: Repo, profile: NetworkProfile, rng: StdRng) -> Self {
        Self {
            repo,
            profile,
            rng: Mutex::new(rng),
        }
    }

    pub fn profile(&self) -> NetworkProfile {
        self.profile
    }

    pub fn repository(&self) -> &Repo {
        &self.repo
    }

    fn latency(&self) -> Duration {
        let min = self.profile.min_latency.as_millis() as u64;
        let max = self.profile.max_latency.as_millis() as u64;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Duration::from_millis(rng.gen_range(min..=max))
    }

    fn should_fail(&self) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_bool(self.profile.failure_rate)
    }
}

impl<R, Repo> DataSource<R> for Simulated<Repo>
where
    R: Record,
    Repo: RecordReader<R> + Send + Sync,
{
    async fn fetch_list(&self, query: &ListQuery<R>) -> ServiceResult<Vec<R>> {
        let delay = self.latency();
        let fail = self.should_fail();
        sleep(delay).await;

        if fail {
            log::warn!("Simulated failure while loading {}", R::NOUN);
            return Err(ServiceError::FetchFailed(R::NOUN));
        }
        read_list(&self.repo, query)
    }

    async fn fetch_one(&self, id: &RecordId) -> ServiceResult<Option<R>> {
        sleep(self.latency()).await;
        read_one(&self.repo, id)
    }
}

impl<R, Repo> RecordCreator<R> for Simulated<Repo>
where
    R: Creatable,
    Repo: RecordWriter<R> + Send + Sync,
{
    async fn create(&self, draft: R::Draft) -> ServiceResult<R> {
        sleep(self.latency()).await;
        write(&self.repo, draft)
    }
}

/// Source chosen at startup from configuration.
#[derive(Debug)]
pub enum ConfiguredSource<Repo> {
    Direct(Direct<Repo>),
    Simulated(Simulated<Repo>),
}

impl<Repo> ConfiguredSource<Repo> {
    pub fn new(repo: Repo, simulate: bool, profile: NetworkProfile) -> Self {
        if simulate {
            ConfiguredSource::Simulated(Simulated::new(repo, profile))
        } else {
            ConfiguredSource::Direct(Direct::new(repo))
        }
    }

    /// Underlying repository, bypassing latency and failure injection.
    pub fn repository(&self) -> &Repo {
        match self {
            ConfiguredSource::Direct(source) => source.repository(),
            ConfiguredSource::Simulated(source) => source.repository(),
        }
    }
}

impl<R, Repo> DataSource<R> for ConfiguredSource<Repo>
where
    R: Record,
    Repo: RecordReader<R> + Send + Sync,
{
    async fn fetch_list(&self, query: &ListQuery<R>) -> ServiceResult<Vec<R>> {
        match self {
            ConfiguredSource::Direct(source) => source.fetch_list(query).await,
            ConfiguredSource::Simulated(source) => source.fetch_list(query).await,
        }
    }

    async fn fetch_one(&self, id: &RecordId) -> ServiceResult<Option<R>> {
        match self {
            ConfiguredSource::Direct(source) => source.fetch_one(id).await,
            ConfiguredSource::Simulated(source) => source.fetch_one(id).await,
        }
    }
}

impl<R, Repo> RecordCreator<R> for ConfiguredSource<Repo>
where
    R: Creatable,
    Repo: RecordWriter<R> + Send + Sync,
{
    async fn create(&self, draft: R::Draft) -> ServiceResult<R> {
        match self {
            ConfiguredSource::Direct(source) => source.create(draft).await,
            ConfiguredSource::Simulated(source) => source.create(draft).await,
        }
    }
}


#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::domain::call::CallRecord;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockCallRepository;

    /// Ensures repository failures surface as the user-facing fetch error.
    #[tokio::test]
    async fn repository_failure_becomes_fetch_failed() {
        let mut repo = MockCallRepository::new();
        repo.expect_list_records()
            .times(1)
            .returning(|_| Err(RepositoryError::Unavailable("offline".into())));

        let source = Direct::new(repo);
        let result: ServiceResult<Vec<CallRecord>> = source.fetch_list(&ListQuery::new()).await;

        assert!(matches!(result, Err(ServiceError::FetchFailed("calls"))));
    }
}
