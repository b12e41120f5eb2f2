use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Serialize;

use super::error_status;
use crate::database::entities::{calculation_metas, lines};
use crate::server::{app::AppState, templates::render_page};
use crate::services::{
    CalculationMetaService, LineService, SensitivityAnalysisService, SensitivityResultRow,
};

#[derive(Serialize)]
struct SensitivityPage {
    calculation: calculation_metas::Model,
    line: lines::Model,
    rows: Vec<SensitivityResultRow>,
}

pub async fn show_sensitivity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, StatusCode> {
    let metas = CalculationMetaService::new(state.db.clone());
    let calculation = metas.get_calculation(id).await.map_err(error_status)?;
    let line = LineService::new(state.db.clone())
        .get_line(calculation.line_id)
        .await
        .map_err(error_status)?;
    let rows = metas.sensitivity_results(id).await.map_err(error_status)?;

    render_page(
        &state.templates,
        "sensitivity",
        &SensitivityPage {
            calculation,
            line,
            rows,
        },
    )
}

pub async fn run_sensitivity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, StatusCode> {
    let calculation = CalculationMetaService::new(state.db.clone())
        .get_calculation(id)
        .await
        .map_err(error_status)?;
    SensitivityAnalysisService::new(state.db.clone())
        .run(&calculation)
        .await
        .map_err(error_status)?;

    Ok(Redirect::to(&format!("/sensitivity_analysis/{}", id)))
}
