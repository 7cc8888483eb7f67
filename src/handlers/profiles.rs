use axum::{
    extract::{Path, State},
    response::Json,
};
use common::{ApiResponse, ProfilePage};
use tracing::{instrument, trace};

use crate::error::AppError;
use crate::schemas::AppState;
use crate::session::Viewer;
use crate::views::{artist_dto, concert_dto, nav, user_dto};

/// A user's profile with the concerts they attend and their favourite artists
#[utoipa::path(
    get,
    path = "/profile/{username}",
    tag = "profiles",
    params(
        ("username" = String, Path, description = "Username"),
    ),
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<ProfilePage>),
        (status = 404, description = "User not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, viewer))]
pub async fn profile(
    Path(username): Path<String>,
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Json<ApiResponse<ProfilePage>>, AppError> {
    trace!("Entering profile function for username: {}", username);
    let user = catalog::accounts::get_profile(&state.db, &username).await?;
    let attending = user.attending(&state.db).await?;
    let favourites = user.favourite_artists(&state.db).await?;

    let body = ProfilePage {
        user: user_dto(user),
        attending: attending.into_iter().map(concert_dto).collect(),
        favourite_artists: favourites.into_iter().map(artist_dto).collect(),
        nav: nav(viewer.user()),
    };
    Ok(Json(ApiResponse::ok(body, "Profile retrieved successfully")))
}
