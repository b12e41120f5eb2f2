use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error_status;
use crate::database::entities::lines;
use crate::server::{app::AppState, templates::render_page};
use crate::services::{
    CalculationMetaService, HalfSetSummary, LineService, SettingsCalculationService,
};

#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub line_id: i32,
    /// Present when the calculate button was pressed
    pub run_calculation: Option<String>,
}

#[derive(Serialize)]
struct SelectedLine {
    line: lines::Model,
    half_sets: Vec<HalfSetSummary>,
}

#[derive(Serialize)]
struct CalculationPage {
    lines: Vec<lines::Model>,
    selected_id: Option<i32>,
    selected: Option<SelectedLine>,
}

pub async fn select_line(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let lines = LineService::new(state.db.clone())
        .list_lines()
        .await
        .map_err(error_status)?;

    let page = CalculationPage {
        lines,
        selected_id: None,
        selected: None,
    };
    Ok(render_page(&state.templates, "calculation", &page)?.into_response())
}

pub async fn submit_line(
    State(state): State<AppState>,
    Form(form): Form<LineForm>,
) -> Result<Response, StatusCode> {
    let line_service = LineService::new(state.db.clone());
    let line = line_service.get_line(form.line_id).await.map_err(error_status)?;

    if form.run_calculation.is_some() {
        let meta = CalculationMetaService::new(state.db.clone())
            .create_for_line(line.id)
            .await
            .map_err(error_status)?;
        SettingsCalculationService::new(state.db.clone(), state.factors.clone())
            .run(&meta)
            .await
            .map_err(error_status)?;

        info!(
            "Calculation #{} for {} completed",
            meta.calculation_number, line.dispatch_name
        );
        return Ok(Redirect::to(&format!("/results/{}", meta.id)).into_response());
    }

    let lines = line_service.list_lines().await.map_err(error_status)?;
    let half_sets = line_service.half_sets(line.id).await.map_err(error_status)?;
    let page = CalculationPage {
        lines,
        selected_id: Some(line.id),
        selected: Some(SelectedLine { line, half_sets }),
    };
    Ok(render_page(&state.templates, "calculation", &page)?.into_response())
}
