use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::landing_page::LandingPage;
use crate::dto::format_rate;
use crate::dto::table::TableParams;
use crate::routes::{AppState, base_context, parse_query, render_template, table_page};
use crate::services::landing_pages::landing_page_stats;

#[get("/landing-pages")]
pub async fn show_landing_pages(
    req: HttpRequest,
    state: web::Data<AppState>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: TableParams = match parse_query(req.query_string()) {
        Ok(params) => params,
        Err(response) => return response,
    };

    let table = match table_page::<LandingPage, _>(
        &state.landing_pages,
        "/landing-pages",
        &params,
        &state,
    )
    .await
    {
        Ok(table) => table,
        Err(response) => return response,
    };

    let stats = match landing_page_stats(state.landing_pages.repository()) {
        Ok(stats) => stats,
        Err(err) => {
            log::error!("Failed to compute landing page stats: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, "landing_pages", &state.table);
    context.insert("table", &table);
    context.insert("stats", &stats);
    context.insert("conversion_rate", &format_rate(stats.overall_conversion_rate));

    render_template(&tera, "landing_pages/index.html", &context)
}
