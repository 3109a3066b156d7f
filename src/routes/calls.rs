use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tera::Tera;

use crate::detail::{DetailModal, DetailState};
use crate::domain::call::{CallRecord, CallType};
use crate::domain::client::Client;
use crate::domain::types::{Categorical, RecordId};
use crate::dto::format_date_time;
use crate::dto::table::TableParams;
use crate::forms::calls::InitiateCallForm;
use crate::repository::RecordReader;
use crate::routes::{AppState, base_context, parse_query, redirect, render_template, table_page};
use crate::services::calls as call_service;
use crate::table::filter::ListQuery;

#[get("/calls")]
pub async fn show_calls(
    req: HttpRequest,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: TableParams = match parse_query(req.query_string()) {
        Ok(params) => params,
        Err(response) => return response,
    };

    let table = match table_page::<CallRecord, _>(&state.calls, "/calls", &params, &state).await {
        Ok(table) => table,
        Err(response) => return response,
    };

    let stats = match call_service::call_stats(state.calls.repository(), Utc::now().date_naive())
    {
        Ok(stats) => stats,
        Err(err) => {
            log::error!("Failed to compute call stats: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // Clients offered by the "Initiate AI Call" form.
    let clients: Vec<Client> = match state.clients.repository().list_records(&ListQuery::new()) {
        Ok(clients) => clients,
        Err(err) => {
            log::error!("Failed to list clients for the call form: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let call_types: Vec<&str> = CallType::ALL.iter().map(|kind| kind.as_str()).collect();

    let mut context = base_context(&flash_messages, "calls", &state.table);
    context.insert("table", &table);
    context.insert("stats", &stats);
    context.insert("clients", &clients);
    context.insert("call_types", &call_types);

    render_template(&tera, "calls/index.html", &context)
}

#[get("/calls/{call_id}")]
pub async fn show_call(
    call_id: web::Path<String>,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let call_id = match RecordId::new(call_id.into_inner()) {
        Ok(call_id) => call_id,
        Err(err) => {
            log::error!("Invalid call id: {err}");
            FlashMessage::error("Call details not found.").send();
            return redirect("/calls");
        }
    };

    let mut modal = DetailModal::new();
    modal.open(&state.calls, call_id.clone()).await;

    let mut context = base_context(&flash_messages, "calls", &state.table);
    context.insert("call_id", call_id.as_str());
    match modal.state() {
        DetailState::Ready(details) => {
            let playback = modal.playback().unwrap_or_default();
            context.insert("details", details);
            context.insert("call_date", &format_date_time(&details.record.date_time));
            context.insert("sentiment", &details.record.sentiment_label());
            context.insert("playback", &playback);
            context.insert("playback_label", &playback.label());
        }
        DetailState::Failed { message, .. } => context.insert("error", message),
        DetailState::Closed | DetailState::Loading(_) => {}
    }

    render_template(&tera, "calls/detail.html", &context)
}

#[post("/calls/initiate")]
pub async fn initiate_call(
    state: web::Data<AppState>,
    web::Form(form): web::Form<InitiateCallForm>,
) -> impl Responder {
    let mut rng = StdRng::from_entropy();

    match call_service::initiate_call(&state.calls, form, &mut rng).await {
        Ok(outcome) if outcome.success => FlashMessage::success(outcome.message).send(),
        Ok(outcome) => FlashMessage::error(outcome.message).send(),
        Err(err) => {
            log::error!("Failed to initiate a call: {err}");
            FlashMessage::error(format!("Unable to initiate call: {err}")).send();
        }
    }
    redirect("/calls")
}
