use crate::domain::client::Client;
use crate::domain::types::RecordId;
use crate::forms::clients::AddClientForm;
use crate::services::source::{DataSource, RecordCreator};
use crate::services::{ServiceError, ServiceResult};

pub async fn get_client<S>(source: &S, id: &RecordId) -> ServiceResult<Client>
where
    S: DataSource<Client> + ?Sized,
{
    source.fetch_one(id).await?.ok_or_else(|| {
        log::error!("Client {id} not found");
        ServiceError::NotFound("Client")
    })
}

/// Validates the add-client form and fabricates the new client.
pub async fn add_client<S>(source: &S, form: AddClientForm) -> ServiceResult<Client>
where
    S: RecordCreator<Client> + ?Sized,
{
    let new_client = form.into_new_client().map_err(|err| {
        log::error!("Failed to validate client form: {err}");
        ServiceError::Form(err.to_string())
    })?;

    let client = source.create(new_client).await.map_err(|err| {
        log::error!("Failed to add a client: {err}");
        err
    })?;

    log::info!("Added client {} ({})", client.id, client.email);
    Ok(client)
}


#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockClientRepository;
    use crate::services::source::Direct;

    /// Ensures repository validation failures surface as form errors.
    #[tokio::test]
    async fn repository_rejection_is_a_form_error() {
        let mut repo = MockClientRepository::new();
        repo.expect_create_record()
            .times(1)
            .returning(|_| Err(RepositoryError::ValidationError("duplicate email".into())));

        let form = AddClientForm {
            name: "Ava Martinez".into(),
            email: "ava@example.com".into(),
            status: "Active".into(),
            insurance_status: "Verified".into(),
            provider_type: "Medical Care".into(),
            patient_type: "Patient".into(),
            specialty_focus: Some("Cardiology".into()),
            tags: String::new(),
        };
        let result = add_client(&Direct::new(repo), form).await;

        assert!(matches!(result, Err(ServiceError::Form(message)) if message == "duplicate email"));
    }

    /// Ensures invalid forms never reach the repository.
    #[tokio::test]
    async fn invalid_form_skips_repository() {
        let mut repo = MockClientRepository::new();
        repo.expect_create_record().times(0);

        let form = AddClientForm {
            name: String::new(),
            email: "ava@example.com".into(),
            status: "Active".into(),
            insurance_status: "Verified".into(),
            provider_type: "Medical Care".into(),
            patient_type: "Patient".into(),
            specialty_focus: None,
            tags: String::new(),
        };
        assert!(add_client(&Direct::new(repo), form).await.is_err());
    }
}
