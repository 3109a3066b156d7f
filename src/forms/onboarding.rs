use serde::Deserialize;
use validator::Validate;

use crate::domain::onboarding::NewOnboardingPatient;
use crate::domain::types::{Email, clean_optional_text};
use crate::forms::{FormError, parse_tags};

#[derive(Debug, Deserialize, Validate)]
/// Form data for enrolling a patient into onboarding.
pub struct AddOnboardingPatientForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub assigned_to: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: String,
}

impl AddOnboardingPatientForm {
    pub fn into_new_patient(self) -> Result<NewOnboardingPatient, FormError> {
        self.validate()?;

        Ok(NewOnboardingPatient {
            name: ammonia::clean(self.name.trim()),
            email: Email::new(self.email)?,
            assigned_to: clean_optional_text(self.assigned_to),
            notes: clean_optional_text(self.notes),
            tags: parse_tags(&self.tags),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let form = AddOnboardingPatientForm {
            name: String::new(),
            email: "a@example.com".into(),
            assigned_to: None,
            notes: None,
            tags: String::new(),
        };
        assert!(matches!(form.into_new_patient(), Err(FormError::Validation(_))));
    }

    #[test]
    fn notes_are_sanitized() {
        let form = AddOnboardingPatientForm {
            name: "Ava".into(),
            email: "ava@example.com".into(),
            assigned_to: Some("Dr. Sarah Chen".into()),
            notes: Some("<b>Call</b> after 5<script>x</script>".into()),
            tags: String::new(),
        };
        let patient = form.into_new_patient().unwrap();
        assert_eq!(patient.notes.as_deref(), Some("<b>Call</b> after 5"));
        assert_eq!(patient.assigned_to.as_deref(), Some("Dr. Sarah Chen"));
    }
}
