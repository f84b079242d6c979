// Spend Dashboard - HTTP layer
// Router and handlers over an immutable Dataset snapshot

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use maud::Markup;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::aggregation::{CategorySummary, DailySummary};
use crate::dataset::Dataset;
use crate::selection::SelectionEvent;
use crate::transaction::Transaction;
use crate::views::{category_partial, dashboard_page, format_currency, SelectionView};

/// Shared application state
/// The dataset is generated once and never mutated, so no lock is needed
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Summary response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total: f64,
    pub total_formatted: String,
    pub transaction_count: usize,
    pub by_category: Vec<CategorySummary>,
    pub daily: Vec<DailySummary>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

// ============================================================================
// Page Handlers
// ============================================================================

fn html_or_500(markup: anyhow::Result<Markup>, what: &str) -> Response {
    match markup {
        Ok(markup) => Html(markup.into_string()).into_response(),
        Err(e) => {
            tracing::error!("Error rendering {}: {:#}", what, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error rendering page").into_response()
        }
    }
}

/// GET / - Full dashboard
async fn serve_dashboard(State(state): State<AppState>) -> Response {
    html_or_500(dashboard_page(&state.dataset), "dashboard")
}

/// GET /filter_by_category?category=... - Category partial
///
/// Unknown or missing categories render an empty view ($0.00, no points).
async fn filter_by_category(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Response {
    let name = query.category.unwrap_or_default();
    let view = state.dataset.category_view(&name);

    if view.category.is_none() {
        tracing::debug!(category = %name, "Unrecognized category, rendering empty view");
    }

    html_or_500(category_partial(&view), "category partial")
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/transactions - Get all transactions
async fn get_transactions(State(state): State<AppState>) -> Json<ApiResponse<Vec<Transaction>>> {
    Json(ApiResponse::ok(state.dataset.transactions().to_vec()))
}

/// GET /api/summary - Totals by category and by day
async fn get_summary(State(state): State<AppState>) -> Json<ApiResponse<SummaryResponse>> {
    let total = state.dataset.total_spending();

    Json(ApiResponse::ok(SummaryResponse {
        total,
        total_formatted: format_currency(total),
        transaction_count: state.dataset.len(),
        by_category: state.dataset.category_spending(),
        daily: state.dataset.daily_spending(),
    }))
}

/// POST /api/selection - Apply a chart selection event
///
/// The body is parsed leniently: anything that is not a well-formed event
/// resets the table to the recent view.
async fn apply_selection(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<ApiResponse<SelectionView>> {
    let event = SelectionEvent::from_slice(&body);
    let result = state.dataset.select(&event);

    tracing::info!(
        selected_dates = event.date_keys().len(),
        matches = result.match_count,
        shown = result.shown(),
        "Applied selection"
    );

    Json(ApiResponse::ok(SelectionView::from(&result)))
}

// ============================================================================
// Router
// ============================================================================

pub fn app_router(dataset: Arc<Dataset>) -> Router {
    let state = AppState { dataset };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/transactions", get(get_transactions))
        .route("/summary", get(get_summary))
        .route("/selection", post(apply_selection))
        .with_state(state.clone());

    Router::new()
        .route("/", get(serve_dashboard))
        .route("/filter_by_category", get(filter_by_category))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
