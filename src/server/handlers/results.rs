use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use serde::Serialize;

use super::error_status;
use crate::database::entities::{calculation_metas, lines};
use crate::server::{app::AppState, templates::render_page};
use crate::services::{CalculationMetaService, LineService, SettingsResultRow};

#[derive(Serialize)]
struct ResultsPage {
    calculation: calculation_metas::Model,
    line: lines::Model,
    rows: Vec<SettingsResultRow>,
}

pub async fn show_results(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, StatusCode> {
    let metas = CalculationMetaService::new(state.db.clone());
    let calculation = metas.get_calculation(id).await.map_err(error_status)?;
    let line = LineService::new(state.db.clone())
        .get_line(calculation.line_id)
        .await
        .map_err(error_status)?;
    let rows = metas.settings_results(id).await.map_err(error_status)?;

    render_page(
        &state.templates,
        "results",
        &ResultsPage {
            calculation,
            line,
            rows,
        },
    )
}
