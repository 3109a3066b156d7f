use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::client::{Client, InsuranceStatus, PatientType};
use crate::domain::types::Categorical;
use crate::dto::table::TableParams;
use crate::forms::clients::AddClientForm;
use crate::routes::{AppState, base_context, parse_query, redirect, render_template, table_page};
use crate::services::clients as client_service;

#[get("/clients")]
pub async fn show_clients(
    req: HttpRequest,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: TableParams = match parse_query(req.query_string()) {
        Ok(params) => params,
        Err(response) => return response,
    };

    let table = match table_page::<Client, _>(&state.clients, "/clients", &params, &state).await {
        Ok(table) => table,
        Err(response) => return response,
    };

    let insurance_statuses: Vec<&str> = InsuranceStatus::ALL.iter().map(|s| s.as_str()).collect();
    let patient_types: Vec<&str> = PatientType::ALL.iter().map(|t| t.as_str()).collect();

    let mut context = base_context(&flash_messages, "clients", &state.table);
    context.insert("table", &table);
    context.insert("insurance_statuses", &insurance_statuses);
    context.insert("patient_types", &patient_types);

    render_template(&tera, "clients/index.html", &context)
}

#[post("/clients/add")]
pub async fn add_client(
    state: web::Data<AppState>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    match client_service::add_client(&state.clients, form).await {
        Ok(client) => {
            FlashMessage::success(format!("Client {} added.", client.name)).send();
        }
        Err(err) => {
            log::error!("Failed to add a client: {err}");
            FlashMessage::error(format!("Failed to add client: {err}")).send();
        }
    }
    redirect("/clients")
}
