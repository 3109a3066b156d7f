use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::domain::matching::{MatchResult, PatientProfileForMatching, TherapistProfile};
use crate::dto::table::TableParams;
use crate::routes::{AppState, base_context, parse_query, render_template, table_page};
use crate::services::matching::{MatchingTab, matching_metrics};

#[derive(Deserialize)]
struct MatchingQuery {
    #[serde(default)]
    tab: MatchingTab,
}

#[get("/matching")]
pub async fn show_matching(
    req: HttpRequest,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let MatchingQuery { tab } = match parse_query(req.query_string()) {
        Ok(query) => query,
        Err(response) => return response,
    };
    let params: TableParams = match parse_query(req.query_string()) {
        Ok(params) => params,
        Err(response) => return response,
    };

    let table = match tab {
        MatchingTab::Patients => {
            table_page::<PatientProfileForMatching, _>(
                &state.patients,
                "/matching?tab=patients",
                &params,
                &state,
            )
            .await
        }
        MatchingTab::Therapists => {
            table_page::<TherapistProfile, _>(
                &state.therapists,
                "/matching?tab=therapists",
                &params,
                &state,
            )
            .await
        }
        MatchingTab::Matches => {
            table_page::<MatchResult, _>(
                &state.matches,
                "/matching?tab=matches",
                &params,
                &state,
            )
            .await
        }
    };
    let table = match table {
        Ok(table) => table,
        Err(response) => return response,
    };

    let metrics = match matching_metrics(state.patients.repository(), state.therapists.repository())
    {
        Ok(metrics) => metrics,
        Err(err) => {
            log::error!("Failed to compute matching metrics: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, "matching", &state.table);
    context.insert("tab", &tab);
    context.insert("table", &table);
    context.insert("metrics", &metrics);

    render_template(&tera, "matching/index.html", &context)
}
