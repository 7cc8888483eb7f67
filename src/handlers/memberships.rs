//! Attend / favourite toggles. Repeating a toggle is not an error: the
//! outcome says whether anything changed and the message says what to tell
//! the user.

use axum::{
    extract::{Path, State},
    response::Json,
};
use catalog::{membership, Toggle};
use common::{ApiResponse, MembershipDto};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::schemas::AppState;
use crate::session::CurrentUser;
use crate::views::membership_dto;

fn respond(toggle: Toggle) -> Json<ApiResponse<MembershipDto>> {
    info!("{}", toggle.message());
    Json(ApiResponse::ok(membership_dto(&toggle), toggle.message()))
}

/// Attend a concert
#[utoipa::path(
    post,
    path = "/attending/{concert_id}",
    tag = "memberships",
    params(
        ("concert_id" = i32, Path, description = "Concert ID"),
    ),
    responses(
        (status = 200, description = "Attendance added, or already present", body = ApiResponse<MembershipDto>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Concert not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, user))]
pub async fn attend(
    Path(concert_id): Path<i32>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<MembershipDto>>, AppError> {
    let toggle = membership::attend(&state.db, user.id, concert_id).await?;
    Ok(respond(toggle))
}

/// Stop attending a concert
#[utoipa::path(
    post,
    path = "/unattend/{concert_id}",
    tag = "memberships",
    params(
        ("concert_id" = i32, Path, description = "Concert ID"),
    ),
    responses(
        (status = 200, description = "Attendance removed, or was absent", body = ApiResponse<MembershipDto>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Concert not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, user))]
pub async fn unattend(
    Path(concert_id): Path<i32>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<MembershipDto>>, AppError> {
    let toggle = membership::unattend(&state.db, user.id, concert_id).await?;
    Ok(respond(toggle))
}

/// Favourite an artist
#[utoipa::path(
    post,
    path = "/favourite/{artist_id}",
    tag = "memberships",
    params(
        ("artist_id" = i32, Path, description = "Artist ID"),
    ),
    responses(
        (status = 200, description = "Favourite added, or already present", body = ApiResponse<MembershipDto>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Artist not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, user))]
pub async fn favourite(
    Path(artist_id): Path<i32>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<MembershipDto>>, AppError> {
    let toggle = membership::favourite(&state.db, user.id, artist_id).await?;
    Ok(respond(toggle))
}

/// Remove an artist from favourites
#[utoipa::path(
    post,
    path = "/unfavourite/{artist_id}",
    tag = "memberships",
    params(
        ("artist_id" = i32, Path, description = "Artist ID"),
    ),
    responses(
        (status = 200, description = "Favourite removed, or was absent", body = ApiResponse<MembershipDto>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Artist not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, user))]
pub async fn unfavourite(
    Path(artist_id): Path<i32>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<MembershipDto>>, AppError> {
    let toggle = membership::unfavourite(&state.db, user.id, artist_id).await?;
    Ok(respond(toggle))
}
