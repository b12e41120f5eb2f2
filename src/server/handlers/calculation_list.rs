use axum::{extract::State, http::StatusCode, response::Html};
use serde_json::json;

use super::error_status;
use crate::server::{app::AppState, templates::render_page};
use crate::services::CalculationMetaService;

pub async fn list_calculations(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let calculations = CalculationMetaService::new(state.db.clone())
        .list_calculations()
        .await
        .map_err(error_status)?;

    render_page(
        &state.templates,
        "calculation_list",
        &json!({ "calculations": calculations }),
    )
}
