use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_extra::extract::WithRejection;
use axum_valid::Valid;
use catalog::membership::Association;
use common::{ApiResponse, ArtistDetailPage, ArtistDto, ArtistForm, ArtistFormPage, ListPage};
use tracing::{debug, info, instrument, trace};

use crate::error::AppError;
use crate::schemas::{AppState, ListQuery};
use crate::session::{CurrentUser, Viewer};
use crate::views::{artist_dto, artist_nav, concert_dto, nav};

/// List artists
#[utoipa::path(
    get,
    path = "/artist",
    tag = "artists",
    params(ListQuery),
    responses(
        (status = 200, description = "Artists retrieved successfully", body = ApiResponse<ListPage<ArtistDto>>),
        (status = 400, description = "Invalid pagination", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, viewer))]
pub async fn list_artists(
    State(state): State<AppState>,
    viewer: Viewer,
    Valid(Query(query)): Valid<Query<ListQuery>>,
) -> Result<Json<ApiResponse<ListPage<ArtistDto>>>, AppError> {
    trace!("Entering list_artists function");
    let (page, limit) = (query.page(), query.limit());
    let listing = catalog::artists::list_artists(&state.db, page, limit).await?;
    debug!("Returning {} of {} artists", listing.items.len(), listing.total);

    let body = ListPage {
        items: listing.items.into_iter().map(artist_dto).collect(),
        page,
        limit,
        total: listing.total,
        nav: nav(viewer.user()),
    };
    Ok(Json(ApiResponse::ok(body, "Artists retrieved successfully")))
}

/// Empty artist form
#[utoipa::path(
    get,
    path = "/new_artist",
    tag = "artists",
    responses(
        (status = 200, description = "Artist form", body = ApiResponse<ArtistFormPage>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(user))]
pub async fn new_artist_form(CurrentUser(user): CurrentUser) -> Json<ApiResponse<ArtistFormPage>> {
    let body = ArtistFormPage {
        form: ArtistForm::default(),
        nav: nav(Some(&user)),
    };
    Json(ApiResponse::ok(body, "New artist"))
}

/// Create an artist
#[utoipa::path(
    post,
    path = "/new_artist",
    tag = "artists",
    request_body = ArtistForm,
    responses(
        (status = 201, description = "New artist was created successfully", body = ApiResponse<ArtistDto>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse),
        (status = 422, description = "Invalid fields", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, user))]
pub async fn create_artist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Json(form), _): WithRejection<Json<ArtistForm>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<ArtistDto>>), AppError> {
    debug!("User {} creating artist '{}'", user.id, form.name);
    let created = catalog::artists::create_artist(&state.db, &form).await?;
    info!("Artist {} created by user {}", created.id, user.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            artist_dto(created),
            "New artist was created successfully.",
        )),
    ))
}

/// Artist details: upcoming concerts and fan count
#[utoipa::path(
    get,
    path = "/artist/{artist_id}",
    tag = "artists",
    params(
        ("artist_id" = i32, Path, description = "Artist ID"),
    ),
    responses(
        (status = 200, description = "Artist retrieved successfully", body = ApiResponse<ArtistDetailPage>),
        (status = 404, description = "Artist not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, viewer))]
pub async fn artist_detail(
    Path(artist_id): Path<i32>,
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Json<ApiResponse<ArtistDetailPage>>, AppError> {
    trace!("Entering artist_detail function for artist_id: {}", artist_id);
    let artist = catalog::artists::get_artist(&state.db, artist_id).await?;
    let upcoming = artist.upcoming_concerts(&state.db).await?;
    let fans = artist.fans(&state.db).await?.len() as u64;

    let favourite = match viewer.user() {
        Some(user) => {
            Association::Favourite
                .contains(&state.db, user.id, artist.id)
                .await?
        }
        None => false,
    };

    let body = ArtistDetailPage {
        nav: artist_nav(viewer.user(), artist.id, favourite),
        artist: artist_dto(artist),
        upcoming_concerts: upcoming.into_iter().map(concert_dto).collect(),
        fans,
        favourite,
    };
    Ok(Json(ApiResponse::ok(body, "Artist retrieved successfully")))
}

/// Edit an artist
#[utoipa::path(
    post,
    path = "/artist/{artist_id}",
    tag = "artists",
    params(
        ("artist_id" = i32, Path, description = "Artist ID"),
    ),
    request_body = ArtistForm,
    responses(
        (status = 200, description = "Artist updated successfully", body = ApiResponse<ArtistDto>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Artist not found", body = crate::schemas::ErrorResponse),
        (status = 422, description = "Invalid fields", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, user))]
pub async fn update_artist(
    Path(artist_id): Path<i32>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Json(form), _): WithRejection<Json<ArtistForm>, AppError>,
) -> Result<Json<ApiResponse<ArtistDto>>, AppError> {
    debug!("User {} updating artist {}", user.id, artist_id);
    let updated = catalog::artists::update_artist(&state.db, artist_id, &form).await?;
    Ok(Json(ApiResponse::ok(
        artist_dto(updated),
        "Artist updated successfully.",
    )))
}
