use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::SlotSearchRequest;
use super::providers::{CapacitySource, JobHistoryProvider, ZoneDirectory};
use super::service::{SlotSearchError, SlotSearchService};

/// Router exposing the one read-side operation: compute ranked arrival
/// windows. Booking the chosen slot is a separate write-side component.
pub fn slot_router<C, J, Z>(service: Arc<SlotSearchService<C, J, Z>>) -> Router
where
    C: CapacitySource + 'static,
    J: JobHistoryProvider + 'static,
    Z: ZoneDirectory + 'static,
{
    Router::new()
        .route("/api/v1/scheduling/slots", post(search_handler::<C, J, Z>))
        .with_state(service)
}

pub(crate) async fn search_handler<C, J, Z>(
    State(service): State<Arc<SlotSearchService<C, J, Z>>>,
    axum::Json(request): axum::Json<SlotSearchRequest>,
) -> Response
where
    C: CapacitySource + 'static,
    J: JobHistoryProvider + 'static,
    Z: ZoneDirectory + 'static,
{
    match service.search(request).await {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(
            error @ (SlotSearchError::MissingServiceType | SlotSearchError::MissingStartDate),
        ) => {
            let payload = json!({
                "success": false,
                "errorMessage": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(error @ SlotSearchError::AvailabilityUnavailable) => {
            let payload = json!({
                "success": false,
                "errorMessage": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
