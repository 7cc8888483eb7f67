use axum::{extract::State, response::Json};
use common::{ApiResponse, HomePage};
use tracing::{debug, instrument, trace};

use crate::error::AppError;
use crate::schemas::AppState;
use crate::session::Viewer;
use crate::views::{concert_dto, nav};

/// Home page: every concert plus the viewer's navigation
#[utoipa::path(
    get,
    path = "/",
    tag = "concerts",
    responses(
        (status = 200, description = "Home page", body = ApiResponse<HomePage>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, viewer))]
pub async fn home(
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Json<ApiResponse<HomePage>>, AppError> {
    trace!("Entering home function");
    let concerts = catalog::concerts::all_concerts(&state.db).await?;
    debug!("Home page lists {} concerts", concerts.len());

    let page = HomePage {
        concerts: concerts.into_iter().map(concert_dto).collect(),
        nav: nav(viewer.user()),
    };
    Ok(Json(ApiResponse::ok(page, "Concerts retrieved successfully")))
}
