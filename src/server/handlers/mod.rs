pub mod calculation;
pub mod calculation_list;
pub mod health;
pub mod results;
pub mod sensitivity;

use axum::http::StatusCode;
use tracing::{error, warn};

use crate::errors::CalculationError;

/// Maps a service error onto the response status, logging everything but lookups
pub(crate) fn error_status(err: CalculationError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_data_error() {
        warn!("Calculation rejected by stored data: {}", err);
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        error!("Request failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
