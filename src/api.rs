// 🌐 HTTP JSON API - the dashboard views over axum
//
// Every response is wrapped as {success, data, error?}.

use crate::amount::normalize_amount;
use crate::format::format_currency;
use crate::indicators::IndicatorThresholds;
use crate::statements::FinancialStatements;
use crate::views::{balance_view, cash_flow_view, dashboard_report, income_view, overview_view};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state (read-only)
#[derive(Clone)]
pub struct AppState {
    pub statements: Arc<FinancialStatements>,
    pub thresholds: IndicatorThresholds,
}

impl AppState {
    pub fn new(statements: FinancialStatements, thresholds: IndicatorThresholds) -> Self {
        Self {
            statements: Arc::new(statements),
            thresholds,
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FormatParams {
    pub amount: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatResponse {
    pub input: Option<String>,
    pub normalized: Option<f64>,
    pub display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub balanced: bool,
    pub periods: usize,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/overview - Health indicators + company scale
#[tracing::instrument(skip(state))]
async fn get_overview(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(overview_view(&state.statements, &state.thresholds)))
}

/// GET /api/balance - Balance sheet line items + balance check
#[tracing::instrument(skip(state))]
async fn get_balance(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(balance_view(&state.statements.balance_sheet)))
}

/// GET /api/income - Income statement + waterfall
#[tracing::instrument(skip(state))]
async fn get_income(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(income_view(&state.statements.income_statement)))
}

/// GET /api/cashflow - Monthly flows on a shared scale
#[tracing::instrument(skip(state))]
async fn get_cash_flow(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(cash_flow_view(&state.statements)))
}

/// GET /api/report - Every view in one document
#[tracing::instrument(skip(state))]
async fn get_report(State(state): State<AppState>) -> impl IntoResponse {
    let report = dashboard_report(&state.statements, &state.thresholds);
    tracing::info!("{}", report.summary());
    Json(ApiResponse::ok(report))
}

/// GET /api/format?amount=... - Format an arbitrary amount
#[tracing::instrument]
async fn format_amount(Query(params): Query<FormatParams>) -> impl IntoResponse {
    let normalized = normalize_amount(params.amount.clone());
    Json(ApiResponse::ok(FormatResponse {
        display: format_currency(normalized),
        normalized: normalized.value(),
        input: params.amount,
    }))
}

/// GET /api/validate - Check the accounting identities of the loaded statements
#[tracing::instrument(skip(state))]
async fn validate_statements(State(state): State<AppState>) -> Response {
    match state.statements.validate() {
        Ok(()) => Json(ApiResponse::ok(ValidationResponse {
            balanced: true,
            periods: state.statements.cash_flow.len(),
        }))
        .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "statements failed validation");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<ValidationResponse>::error(err.to_string())),
            )
                .into_response()
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/overview", get(get_overview))
        .route("/api/balance", get(get_balance))
        .route("/api/income", get(get_income))
        .route("/api/cashflow", get(get_cash_flow))
        .route("/api/report", get(get_report))
        .route("/api/format", get(format_amount))
        .route("/api/validate", get(validate_statements))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_statements;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app() -> Router {
        build_router(AppState::new(sample_statements(), IndicatorThresholds::default()))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, json) = get_json(test_app(), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
    }

    #[tokio::test]
    async fn test_overview_indicators() {
        let (status, json) = get_json(test_app(), "/api/overview").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["indicators"][0]["display"], "62.5%");
        assert_eq!(json["data"]["indicators"][2]["status"], "good");
    }

    #[tokio::test]
    async fn test_income_margin() {
        let (_, json) = get_json(test_app(), "/api/income").await;
        assert_eq!(json["data"]["margin"], "13.3%");
    }

    #[tokio::test]
    async fn test_cash_flow_scale() {
        let (_, json) = get_json(test_app(), "/api/cashflow").await;

        assert_eq!(json["data"]["scale"], 1_500_000.0);
        assert_eq!(json["data"]["periods"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_cash_flow_activity_guides() {
        let (_, json) = get_json(test_app(), "/api/cashflow").await;

        assert_eq!(json["data"]["activities"][0]["label"], "営業活動");
        assert_eq!(json["data"]["activities"][0]["summary"], "本業でのお金の出入り");
    }

    #[tokio::test]
    async fn test_report_has_every_view() {
        let (status, json) = get_json(test_app(), "/api/report").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["balance"]["check"]["balanced"], true);
        assert_eq!(json["data"]["income"]["waterfall"].as_array().unwrap().len(), 3);
        assert!(json["data"]["generated_at"].is_string());
    }

    #[tokio::test]
    async fn test_format_amount() {
        let (_, json) = get_json(test_app(), "/api/format?amount=3000000").await;
        assert_eq!(json["data"]["display"], "3.0百万円");
        assert_eq!(json["data"]["normalized"], 3_000_000.0);

        let (_, json) = get_json(test_app(), "/api/format?amount=abc").await;
        assert_eq!(json["data"]["display"], "0百万円");
        assert!(json["data"]["normalized"].is_null());

        let (status, json) = get_json(test_app(), "/api/format").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["display"], "0百万円");
    }

    #[tokio::test]
    async fn test_validate_reports_broken_identity() {
        let mut statements = sample_statements();
        statements.income_statement.profit = 3_000_000.0;
        let app = build_router(AppState::new(statements, IndicatorThresholds::default()));

        let (status, json) = get_json(app, "/api/validate").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("profit = revenue - costs - expenses"));
    }

    #[tokio::test]
    async fn test_validate_sample() {
        let (status, json) = get_json(test_app(), "/api/validate").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["balanced"], true);
    }
}
