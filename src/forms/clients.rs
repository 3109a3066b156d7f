use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{
    ClientStatus, Insurance, InsuranceStatus, NewClient, PatientType, Provider, ProviderType,
};
use crate::domain::types::{Email, clean_optional_text};
use crate::forms::{FormError, parse_tags};

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a client.
pub struct AddClientForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub status: String,
    pub insurance_status: String,
    pub provider_type: String,
    pub patient_type: String,
    pub specialty_focus: Option<String>,
    /// Comma separated.
    #[serde(default)]
    pub tags: String,
}

impl AddClientForm {
    pub fn into_new_client(self) -> Result<NewClient, FormError> {
        self.validate()?;

        Ok(NewClient {
            name: ammonia::clean(self.name.trim()),
            email: Email::new(self.email)?,
            status: self.status.parse::<ClientStatus>()?,
            insurance: Insurance {
                status: self.insurance_status.parse::<InsuranceStatus>()?,
                verification_date: None,
            },
            provider: Provider {
                provider_type: self.provider_type.parse::<ProviderType>()?,
                patient_type: self.patient_type.parse::<PatientType>()?,
                specialty_focus: clean_optional_text(self.specialty_focus),
            },
            tags: parse_tags(&self.tags),
        })
    }
}
