//! Single binary web server: the report generation API over an in-memory store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, and
//! DATA_FILE (JSON snapshot loaded at startup, default data.json).

use actix_web::{
    delete, get, patch, post,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::RwLock;
use tournament_reports_web::report::{aggregator, excel, pdf, recipients};
use tournament_reports_web::{
    RecipientId, ReportError, SenderSettingsUpdate, TournamentId, TournamentStore, VenueId,
};

/// In-memory state: the whole tournament dataset behind one lock.
type AppState = Data<RwLock<TournamentStore>>;

const EXCEL_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Query for the report-scope endpoints: tournament, day, optional venue.
#[derive(Deserialize)]
struct ReportQuery {
    tournament_id: TournamentId,
    target_date: NaiveDate,
    venue_id: Option<VenueId>,
}

#[derive(Deserialize)]
struct FinalDayQuery {
    tournament_id: TournamentId,
    target_date: NaiveDate,
}

#[derive(Deserialize)]
struct FinalResultQuery {
    tournament_id: TournamentId,
}

#[derive(Deserialize)]
struct StandingsQuery {
    tournament_id: TournamentId,
    group_id: Option<String>,
}

#[derive(Deserialize)]
struct RecipientsQuery {
    tournament_id: TournamentId,
}

#[derive(Deserialize)]
struct CreateRecipientBody {
    tournament_id: TournamentId,
    name: String,
    #[serde(default)]
    notes: String,
}

/// Path segment: tournament id (e.g. /reports/summary/{tournament_id})
#[derive(Deserialize)]
struct TournamentPath {
    tournament_id: TournamentId,
}

/// Path segment: recipient id (e.g. /reports/recipients/{recipient_id})
#[derive(Deserialize)]
struct RecipientPath {
    recipient_id: RecipientId,
}

fn error_response(err: &ReportError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    if err.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::InternalServerError().json(body)
    }
}

fn pdf_attachment(filename: String, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(("Content-Disposition", format!("attachment; filename={}", filename)))
        .body(bytes)
}

fn excel_attachment(filename: String, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(EXCEL_CONTENT_TYPE)
        .insert_header(("Content-Disposition", format!("attachment; filename={}", filename)))
        .body(bytes)
}

/// report_2026-03-28.pdf, report_2026-03-28_venue2.xlsx, ...
fn report_filename(target_date: NaiveDate, venue_id: Option<VenueId>, extension: &str) -> String {
    let mut name = format!("report_{}", target_date.format("%Y-%m-%d"));
    if let Some(id) = venue_id {
        name.push_str(&format!("_venue{}", id));
    }
    name.push('.');
    name.push_str(extension);
    name
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-reports-web",
    })
}

/// Aggregated report envelope: matches with relations, recipients, stamp.
#[get("/reports/data")]
async fn api_report_data(state: AppState, query: Query<ReportQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match aggregator::report_data(&g, query.tournament_id, query.target_date, query.venue_id) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(e) => error_response(&e),
    }
}

/// Formatted rows for completed matches of the scope.
#[get("/reports/match-reports")]
async fn api_match_reports(state: AppState, query: Query<ReportQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match aggregator::match_reports(&g, query.tournament_id, query.target_date, query.venue_id) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    }
}

/// Daily match report as a PDF attachment.
#[get("/reports/export/pdf")]
async fn api_export_pdf(state: AppState, query: Query<ReportQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match pdf::daily_report_pdf(&g, query.tournament_id, query.target_date, query.venue_id) {
        Ok(bytes) => {
            pdf_attachment(report_filename(query.target_date, query.venue_id, "pdf"), bytes)
        }
        Err(e) => error_response(&e),
    }
}

/// Daily match report as an Excel attachment.
#[get("/reports/export/excel")]
async fn api_export_excel(state: AppState, query: Query<ReportQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match excel::daily_report_excel(&g, query.tournament_id, query.target_date, query.venue_id) {
        Ok(bytes) => {
            excel_attachment(report_filename(query.target_date, query.venue_id, "xlsx"), bytes)
        }
        Err(e) => error_response(&e),
    }
}

/// Final-day fixture table as a PDF attachment. 404 when the day holds no
/// finals matches.
#[get("/reports/export/final-day-schedule")]
async fn api_export_final_day_schedule(
    state: AppState,
    query: Query<FinalDayQuery>,
) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match pdf::final_day_schedule_pdf(&g, query.tournament_id, query.target_date) {
        Ok(bytes) => pdf_attachment(
            format!("final_day_schedule_{}.pdf", query.target_date.format("%Y-%m-%d")),
            bytes,
        ),
        Err(e) => error_response(&e),
    }
}

/// Final result report as a PDF attachment. 404 before any knockout match
/// is completed.
#[get("/reports/export/final-result")]
async fn api_export_final_result(state: AppState, query: Query<FinalResultQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match pdf::final_result_pdf(&g, query.tournament_id) {
        Ok(bytes) => pdf_attachment(
            format!("final_result_tournament_{}.pdf", query.tournament_id),
            bytes,
        ),
        Err(e) => error_response(&e),
    }
}

/// Group standings as a PDF attachment. 404 when no standings exist yet.
#[get("/reports/export/group-standings")]
async fn api_export_group_standings(state: AppState, query: Query<StandingsQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match pdf::group_standings_pdf(&g, query.tournament_id, query.group_id.as_deref()) {
        Ok(bytes) => {
            let mut name = format!("group_standings_tournament_{}", query.tournament_id);
            if let Some(group_id) = &query.group_id {
                name.push_str(&format!("_group_{}", group_id));
            }
            name.push_str(".pdf");
            pdf_attachment(name, bytes)
        }
        Err(e) => error_response(&e),
    }
}

/// Recipient list for a tournament.
#[get("/reports/recipients")]
async fn api_get_recipients(state: AppState, query: Query<RecipientsQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match recipients::list_recipients(&g, query.tournament_id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(&e),
    }
}

/// Add a recipient (201 with the created row).
#[post("/reports/recipients")]
async fn api_create_recipient(state: AppState, body: Json<CreateRecipientBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match recipients::create_recipient(&mut g, body.tournament_id, &body.name, &body.notes) {
        Ok(recipient) => HttpResponse::Created().json(recipient),
        Err(e) => error_response(&e),
    }
}

/// Remove a recipient by id (204 on success).
#[delete("/reports/recipients/{recipient_id}")]
async fn api_delete_recipient(state: AppState, path: Path<RecipientPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match recipients::delete_recipient(&mut g, path.recipient_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Seed the standard recipient set; safe to call more than once.
#[post("/reports/recipients/{tournament_id}/setup-default")]
async fn api_setup_default_recipients(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match recipients::setup_default_recipients(&mut g, path.tournament_id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(&e),
    }
}

/// Sender identity printed on documents.
#[get("/reports/sender-settings/{tournament_id}")]
async fn api_get_sender_settings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match recipients::sender_settings(&g, path.tournament_id) {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => error_response(&e),
    }
}

/// Partial update of the sender identity: absent fields keep their value,
/// explicit nulls clear.
#[patch("/reports/sender-settings/{tournament_id}")]
async fn api_update_sender_settings(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SenderSettingsUpdate>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match recipients::update_sender_settings(&mut g, path.tournament_id, body.into_inner()) {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => error_response(&e),
    }
}

/// Dashboard statistics for one tournament.
#[get("/reports/summary/{tournament_id}")]
async fn api_tournament_summary(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match aggregator::tournament_summary(&g, path.tournament_id) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "data.json".to_string()
}

fn load_store(path: &str) -> TournamentStore {
    match std::fs::read_to_string(path) {
        Ok(contents) => match TournamentStore::from_json(&contents) {
            Ok(store) => {
                log::info!("Loaded tournament data from {}", path);
                store
            }
            Err(e) => {
                log::warn!("Could not parse {}: {}; starting with an empty store", path, e);
                TournamentStore::new()
            }
        },
        Err(e) => {
            log::warn!("Could not read {}: {}; starting with an empty store", path, e);
            TournamentStore::new()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let data_file = std::env::var("DATA_FILE").unwrap_or_else(|_| default_data_file());
    let state = Data::new(RwLock::new(load_store(&data_file)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_report_data)
            .service(api_match_reports)
            .service(api_export_pdf)
            .service(api_export_excel)
            .service(api_export_final_day_schedule)
            .service(api_export_final_result)
            .service(api_export_group_standings)
            .service(api_get_recipients)
            .service(api_create_recipient)
            .service(api_delete_recipient)
            .service(api_setup_default_recipients)
            .service(api_get_sender_settings)
            .service(api_update_sender_settings)
            .service(api_tournament_summary)
    })
    .bind(bind)?
    .run()
    .await
}
