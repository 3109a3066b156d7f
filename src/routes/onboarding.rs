use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::onboarding::OnboardingPatient;
use crate::domain::types::RecordId;
use crate::dto::table::TableParams;
use crate::forms::onboarding::AddOnboardingPatientForm;
use crate::routes::{AppState, base_context, parse_query, redirect, render_template, table_page};
use crate::services::onboarding as onboarding_service;

#[get("/onboarding")]
pub async fn show_onboarding(
    req: HttpRequest,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: TableParams = match parse_query(req.query_string()) {
        Ok(params) => params,
        Err(response) => return response,
    };

    let table = match table_page::<OnboardingPatient, _>(
        &state.onboarding,
        "/onboarding",
        &params,
        &state,
    )
    .await
    {
        Ok(table) => table,
        Err(response) => return response,
    };

    let mut context = base_context(&flash_messages, "onboarding", &state.table);
    context.insert("table", &table);

    render_template(&tera, "onboarding/index.html", &context)
}

#[post("/onboarding/add")]
pub async fn add_patient(
    state: web::Data<AppState>,
    web::Form(form): web::Form<AddOnboardingPatientForm>,
) -> impl Responder {
    match onboarding_service::add_patient(&state.onboarding, form).await {
        Ok(patient) => {
            FlashMessage::success(format!("{} added to onboarding.", patient.name)).send();
        }
        Err(err) => {
            log::error!("Failed to add an onboarding patient: {err}");
            FlashMessage::error(format!("Failed to add patient: {err}")).send();
        }
    }
    redirect("/onboarding")
}

#[post("/onboarding/{patient_id}/remind")]
pub async fn send_reminder(
    patient_id: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let result = match RecordId::new(patient_id.into_inner()) {
        Ok(id) => onboarding_service::send_reminder(&state.onboarding, &id).await,
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(email) => FlashMessage::success(format!("Reminder sent to {email}.")).send(),
        Err(err) => {
            log::error!("Failed to send a reminder: {err}");
            FlashMessage::error(format!("Failed to send reminder: {err}")).send();
        }
    }
    redirect("/onboarding")
}
