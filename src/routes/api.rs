use actix_web::{HttpRequest, Responder, get, web};

use crate::domain::call::CallRecord;
use crate::domain::client::Client;
use crate::domain::landing_page::LandingPage;
use crate::domain::matching::{MatchResult, PatientProfileForMatching, TherapistProfile};
use crate::domain::onboarding::OnboardingPatient;
use crate::routes::{AppState, json_list};

#[get("/v1/calls")]
pub async fn api_v1_calls(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    json_list::<CallRecord, _>(&state.calls, req.query_string()).await
}

#[get("/v1/clients")]
pub async fn api_v1_clients(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    json_list::<Client, _>(&state.clients, req.query_string()).await
}

#[get("/v1/onboarding")]
pub async fn api_v1_onboarding(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    json_list::<OnboardingPatient, _>(&state.onboarding, req.query_string()).await
}

#[get("/v1/landing-pages")]
pub async fn api_v1_landing_pages(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    json_list::<LandingPage, _>(&state.landing_pages, req.query_string()).await
}

#[get("/v1/therapists")]
pub async fn api_v1_therapists(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    json_list::<TherapistProfile, _>(&state.therapists, req.query_string()).await
}

#[get("/v1/patients")]
pub async fn api_v1_patients(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    json_list::<PatientProfileForMatching, _>(&state.patients, req.query_string()).await
}

#[get("/v1/matches")]
pub async fn api_v1_matches(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    json_list::<MatchResult, _>(&state.matches, req.query_string()).await
}
