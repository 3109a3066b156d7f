//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::call::{CallRecord, NewCall};
use crate::domain::client::{Client, NewClient};
use crate::domain::landing_page::LandingPage;
use crate::domain::matching::{MatchResult, PatientProfileForMatching, TherapistProfile};
use crate::domain::onboarding::{NewOnboardingPatient, OnboardingPatient};
use crate::domain::types::RecordId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{RecordReader, RecordWriter};
use crate::table::filter::ListQuery;

mock! {
    pub CallRepository {}

    impl RecordReader<CallRecord> for CallRepository {
        fn list_records(&self, query: &ListQuery<CallRecord>) -> RepositoryResult<Vec<CallRecord>>;
        fn get_record(&self, id: &RecordId) -> RepositoryResult<Option<CallRecord>>;
    }

    impl RecordWriter<CallRecord> for CallRepository {
        fn create_record(&self, draft: NewCall) -> RepositoryResult<CallRecord>;
    }
}

mock! {
    pub ClientRepository {}

    impl RecordReader<Client> for ClientRepository {
        fn list_records(&self, query: &ListQuery<Client>) -> RepositoryResult<Vec<Client>>;
        fn get_record(&self, id: &RecordId) -> RepositoryResult<Option<Client>>;
    }

    impl RecordWriter<Client> for ClientRepository {
        fn create_record(&self, draft: NewClient) -> RepositoryResult<Client>;
    }
}

mock! {
    pub OnboardingRepository {}

    impl RecordReader<OnboardingPatient> for OnboardingRepository {
        fn list_records(
            &self,
            query: &ListQuery<OnboardingPatient>,
        ) -> RepositoryResult<Vec<OnboardingPatient>>;
        fn get_record(&self, id: &RecordId) -> RepositoryResult<Option<OnboardingPatient>>;
    }

    impl RecordWriter<OnboardingPatient> for OnboardingRepository {
        fn create_record(&self, draft: NewOnboardingPatient) -> RepositoryResult<OnboardingPatient>;
    }
}

mock! {
    pub LandingPageRepository {}

    impl RecordReader<LandingPage> for LandingPageRepository {
        fn list_records(&self, query: &ListQuery<LandingPage>) -> RepositoryResult<Vec<LandingPage>>;
        fn get_record(&self, id: &RecordId) -> RepositoryResult<Option<LandingPage>>;
    }
}

mock! {
    pub TherapistRepository {}

    impl RecordReader<TherapistProfile> for TherapistRepository {
        fn list_records(
            &self,
            query: &ListQuery<TherapistProfile>,
        ) -> RepositoryResult<Vec<TherapistProfile>>;
        fn get_record(&self, id: &RecordId) -> RepositoryResult<Option<TherapistProfile>>;
    }
}

mock! {
    pub PatientRepository {}

    impl RecordReader<PatientProfileForMatching> for PatientRepository {
        fn list_records(
            &self,
            query: &ListQuery<PatientProfileForMatching>,
        ) -> RepositoryResult<Vec<PatientProfileForMatching>>;
        fn get_record(&self, id: &RecordId) -> RepositoryResult<Option<PatientProfileForMatching>>;
    }
}

mock! {
    pub MatchRepository {}

    impl RecordReader<MatchResult> for MatchRepository {
        fn list_records(&self, query: &ListQuery<MatchResult>) -> RepositoryResult<Vec<MatchResult>>;
        fn get_record(&self, id: &RecordId) -> RepositoryResult<Option<MatchResult>>;
    }
}
