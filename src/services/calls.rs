use chrono::NaiveDate;
use rand::Rng;

use crate::domain::call::{CallDetails, CallInitiation, CallRecord, CallStats};
use crate::domain::types::RecordId;
use crate::forms::calls::InitiateCallForm;
use crate::repository::RecordReader;
use crate::services::source::{DataSource, RecordCreator};
use crate::services::{ServiceError, ServiceResult};
use crate::table::filter::ListQuery;

/// Probability that the dialer accepts a call request.
pub const INITIATE_SUCCESS_RATE: f64 = 0.9;

const INITIATE_FAILED: &str = "Unable to initiate call. Please try again or contact support.";

/// Loads one call with its extended notes. A missing call is reported the
/// same way as a failed fetch.
pub async fn call_details<S>(source: &S, id: &RecordId) -> ServiceResult<CallDetails>
where
    S: DataSource<CallRecord> + ?Sized,
{
    match source.fetch_one(id).await? {
        Some(record) => Ok(CallDetails::from_record(record)),
        None => {
            log::error!("Call {id} not found");
            Err(ServiceError::FetchFailed("call details"))
        }
    }
}

/// Asks the dialer to place an AI call.
///
/// A rejected request is not an error; it comes back as an unsuccessful
/// [`CallInitiation`] with a message for the user.
pub async fn initiate_call<S, G>(
    source: &S,
    form: InitiateCallForm,
    rng: &mut G,
) -> ServiceResult<CallInitiation>
where
    S: RecordCreator<CallRecord> + ?Sized,
    G: Rng + ?Sized,
{
    let new_call = form.into_new_call().map_err(|err| {
        log::error!("Failed to validate call form: {err}");
        ServiceError::Form(err.to_string())
    })?;

    if !rng.gen_bool(INITIATE_SUCCESS_RATE) {
        log::warn!("Dialer rejected call to client {}", new_call.client_id);
        return Ok(CallInitiation {
            success: false,
            message: INITIATE_FAILED.to_string(),
            call_id: None,
        });
    }

    let client_id = new_call.client_id.clone();
    let call_type = new_call.call_type;
    let call = source.create(new_call).await?;

    log::info!("Initiated {call_type} call {} for client {client_id}", call.id);
    Ok(CallInitiation {
        success: true,
        message: format!(
            "AI call successfully initiated with client {client_id} for {call_type}."
        ),
        call_id: Some(call.id),
    })
}

/// Dashboard counters over the whole call log.
pub fn call_stats<Repo>(repo: &Repo, today: NaiveDate) -> ServiceResult<CallStats>
where
    Repo: RecordReader<CallRecord> + ?Sized,
{
    let calls = repo.list_records(&ListQuery::new()).map_err(|err| {
        log::error!("Failed to compute call stats: {err}");
        ServiceError::from(err)
    })?;
    Ok(CallStats::compute(&calls, today))
}
