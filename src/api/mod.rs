use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    Field, InputError, MonthlyRecord, parse_column, records_from_columns, run_allocation,
};
use crate::report::{Report, build_report};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Clone, Copy, Deserialize)]
struct MonthPayload {
    #[serde(default)]
    income: f64,
    #[serde(default)]
    needs: f64,
    #[serde(default)]
    wants: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AllocatePayload {
    months: Vec<MonthPayload>,
}

/// Query-string form: `?income=1000,1000,...&needs=...&wants=...`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AllocateQuery {
    income: String,
    needs: String,
    wants: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/allocate",
            get(allocate_get_handler).post(allocate_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("budget tracker listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn allocate_get_handler(query: Result<Query<AllocateQuery>, QueryRejection>) -> Response {
    match query {
        Ok(Query(query)) => allocate_handler_impl(records_from_query(&query)),
        Err(rejection) => rejected_payload(&rejection.body_text()),
    }
}

async fn allocate_post_handler(payload: Result<Json<AllocatePayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => allocate_handler_impl(records_from_payload(&payload)),
        Err(rejection) => rejected_payload(&rejection.body_text()),
    }
}

fn rejected_payload(detail: &str) -> Response {
    warn!(error = detail, "unreadable allocation request");
    error_response(
        StatusCode::BAD_REQUEST,
        &format!("Invalid API payload: {detail}"),
    )
}

fn allocate_handler_impl(records: Result<[MonthlyRecord; 12], InputError>) -> Response {
    let records = match records {
        Ok(records) => records,
        Err(err) => {
            warn!(error = %err, "rejected allocation request");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    let report = allocate_report(&records);
    debug!(
        invested = report.totals.invested,
        savings = report.totals.savings,
        "allocation computed"
    );
    json_response(StatusCode::OK, report)
}

pub fn allocate_report(records: &[MonthlyRecord; 12]) -> Report {
    build_report(&run_allocation(records))
}

fn records_from_payload(payload: &AllocatePayload) -> Result<[MonthlyRecord; 12], InputError> {
    let income: Vec<f64> = payload.months.iter().map(|m| m.income).collect();
    let needs: Vec<f64> = payload.months.iter().map(|m| m.needs).collect();
    let wants: Vec<f64> = payload.months.iter().map(|m| m.wants).collect();
    records_from_columns(&income, &needs, &wants)
}

fn records_from_query(query: &AllocateQuery) -> Result<[MonthlyRecord; 12], InputError> {
    let income = parse_column(Field::Income, &query.income)?;
    let needs = parse_column(Field::Needs, &query.needs)?;
    let wants = parse_column(Field::Wants, &query.wants)?;
    records_from_columns(&income, &needs, &wants)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn records_from_json(json: &str) -> Result<[MonthlyRecord; 12], String> {
    let payload = serde_json::from_str::<AllocatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    records_from_payload(&payload).map_err(|e| e.to_string())
}
