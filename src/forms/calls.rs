use serde::Deserialize;
use validator::Validate;

use crate::domain::call::{CallType, NewCall};
use crate::domain::types::RecordId;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for placing an AI call to a client.
pub struct InitiateCallForm {
    #[validate(length(min = 1))]
    pub client_id: String,
    #[validate(length(min = 1, max = 120))]
    pub client_name: String,
    /// One of the call type literals, e.g. `Eligibility & Benefits`.
    pub call_type: String,
}

impl InitiateCallForm {
    pub fn into_new_call(self) -> Result<NewCall, FormError> {
        self.validate()?;

        Ok(NewCall {
            client_id: RecordId::new(self.client_id)?,
            client_name: ammonia::clean(self.client_name.trim()),
            call_type: self.call_type.parse::<CallType>()?,
        })
    }
}
