use crate::domain::onboarding::OnboardingPatient;
use crate::domain::types::RecordId;
use crate::forms::onboarding::AddOnboardingPatientForm;
use crate::services::source::{DataSource, RecordCreator};
use crate::services::{ServiceError, ServiceResult};

pub async fn get_patient<S>(source: &S, id: &RecordId) -> ServiceResult<OnboardingPatient>
where
    S: DataSource<OnboardingPatient> + ?Sized,
{
    source.fetch_one(id).await?.ok_or_else(|| {
        log::error!("Onboarding patient {id} not found");
        ServiceError::NotFound("Patient")
    })
}

/// Enrolls a patient into onboarding. The patient starts in progress at 0%.
pub async fn add_patient<S>(
    source: &S,
    form: AddOnboardingPatientForm,
) -> ServiceResult<OnboardingPatient>
where
    S: RecordCreator<OnboardingPatient> + ?Sized,
{
    let new_patient = form.into_new_patient().map_err(|err| {
        log::error!("Failed to validate onboarding form: {err}");
        ServiceError::Form(err.to_string())
    })?;

    let patient = source.create(new_patient).await.map_err(|err| {
        log::error!("Failed to add an onboarding patient: {err}");
        err
    })?;

    log::info!("Enrolled {} into onboarding as {}", patient.email, patient.id);
    Ok(patient)
}

/// Sends an onboarding reminder and returns the address it went to.
///
/// Nothing is delivered; the reminder is only logged.
pub async fn send_reminder<S>(source: &S, id: &RecordId) -> ServiceResult<String>
where
    S: DataSource<OnboardingPatient> + ?Sized,
{
    let patient = get_patient(source, id).await?;
    log::info!("Reminder sent to {}", patient.email);
    Ok(patient.email.to_string())
}
