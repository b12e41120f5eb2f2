use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use handlebars::Handlebars;
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{calculation, calculation_list, health, results, sensitivity};
use super::templates;
use crate::settings::SettingsFactors;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub templates: Arc<Handlebars<'static>>,
    pub factors: SettingsFactors,
}

pub async fn create_app(db: DatabaseConnection, factors: SettingsFactors) -> Result<Router> {
    let state = AppState {
        db,
        templates: Arc::new(templates::get_handlebars()?),
        factors,
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/",
            get(calculation::select_line).post(calculation::submit_line),
        )
        .route("/results/:id", get(results::show_results))
        .route(
            "/sensitivity_analysis/:id",
            get(sensitivity::show_sensitivity).post(sensitivity::run_sensitivity),
        )
        .route("/calculation_list/", get(calculation_list::list_calculations))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state);

    Ok(app)
}
