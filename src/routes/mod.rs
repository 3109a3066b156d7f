//! HTTP handlers and the helpers they share.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::de::DeserializeOwned;
use serde_json::json;
use tera::{Context, Tera};

use crate::domain::call::CallRecord;
use crate::domain::client::Client;
use crate::domain::landing_page::LandingPage;
use crate::domain::matching::{MatchResult, PatientProfileForMatching, TherapistProfile};
use crate::domain::onboarding::OnboardingPatient;
use crate::dto::table::{TablePage, TableParams};
use crate::repository::errors::RepositoryResult;
use crate::repository::{InMemoryRepository, seed};
use crate::services::ServiceError;
use crate::services::source::{ConfiguredSource, DataSource, NetworkProfile};
use crate::services::table::{list_records, load_table};
use crate::table::live::LiveOptions;
use crate::table::record::Record;
use crate::table::view::RowRenderer;

pub mod api;
pub mod calls;
pub mod clients;
pub mod landing_pages;
pub mod main;
pub mod matching;
pub mod onboarding;

pub type Source<R> = ConfiguredSource<InMemoryRepository<R>>;

/// Data sources and table settings shared by every handler.
pub struct AppState {
    pub calls: Source<CallRecord>,
    pub clients: Source<Client>,
    pub onboarding: Source<OnboardingPatient>,
    pub landing_pages: Source<LandingPage>,
    pub therapists: Source<TherapistProfile>,
    pub patients: Source<PatientProfileForMatching>,
    pub matches: Source<MatchResult>,
    pub table: LiveOptions,
}

impl AppState {
    /// Loads every seed dataset behind the configured source kind.
    pub fn from_seed(
        simulate: bool,
        profile: NetworkProfile,
        table: LiveOptions,
    ) -> RepositoryResult<Self> {
        fn source<R: Record>(records: Vec<R>, simulate: bool, profile: NetworkProfile) -> Source<R> {
            ConfiguredSource::new(InMemoryRepository::new(records), simulate, profile)
        }

        Ok(Self {
            calls: source(seed::calls()?, simulate, profile),
            clients: source(seed::clients()?, simulate, profile),
            onboarding: source(seed::onboarding_patients()?, simulate, profile),
            landing_pages: source(seed::landing_pages()?, simulate, profile),
            therapists: source(seed::therapists()?, simulate, profile),
            patients: source(seed::patients_for_matching()?, simulate, profile),
            matches: source(seed::match_results()?, simulate, profile),
            table,
        })
    }
}

/// Registers every page, form and API handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::index)
        .service(calls::show_calls)
        .service(calls::initiate_call)
        .service(calls::show_call)
        .service(clients::show_clients)
        .service(clients::add_client)
        .service(onboarding::show_onboarding)
        .service(onboarding::add_patient)
        .service(onboarding::send_reminder)
        .service(landing_pages::show_landing_pages)
        .service(matching::show_matching)
        .service(
            web::scope("/api")
                .service(api::api_v1_calls)
                .service(api::api_v1_clients)
                .service(api::api_v1_onboarding)
                .service(api::api_v1_landing_pages)
                .service(api::api_v1_therapists)
                .service(api::api_v1_patients)
                .service(api::api_v1_matches),
        );
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context every page starts from: pending alerts and the active nav entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    current_page: &str,
    table: &LiveOptions,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("debounce_ms", &(table.debounce.as_millis() as u64));
    context.insert("mobile_breakpoint", &table.breakpoint);
    context
}

/// Parses a raw query string; repeated keys (`expand`) are collected.
pub fn parse_query<T: DeserializeOwned>(query: &str) -> Result<T, HttpResponse> {
    serde_html_form::from_str(query).map_err(|err| {
        log::error!("Failed to parse query '{query}': {err}");
        HttpResponse::BadRequest().json(json!({ "error": format!("Invalid query: {err}") }))
    })
}

/// Builds a table for a page handler. Only invalid parameters fail; a failed
/// fetch is part of the page.
pub async fn table_page<R, S>(
    source: &S,
    base_path: &str,
    params: &TableParams,
    state: &AppState,
) -> Result<TablePage, HttpResponse>
where
    R: RowRenderer,
    S: DataSource<R> + ?Sized,
{
    load_table::<R, S>(source, base_path, params, state.table.breakpoint)
        .await
        .map_err(|err| HttpResponse::BadRequest().body(err.to_string()))
}

/// JSON list response shared by the `/api/v1` handlers.
pub async fn json_list<R, S>(source: &S, query: &str) -> HttpResponse
where
    R: RowRenderer,
    S: DataSource<R> + ?Sized,
{
    let params: TableParams = match parse_query(query) {
        Ok(params) => params,
        Err(response) => return response,
    };

    match list_records::<R, S>(source, &params).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(err @ ServiceError::TypeConstraint(_)) => {
            HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
        }
        Err(err) => HttpResponse::BadGateway().json(json!({ "error": err.to_string() })),
    }
}
