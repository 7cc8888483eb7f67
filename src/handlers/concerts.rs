use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_extra::extract::WithRejection;
use axum_valid::Valid;
use common::{ApiResponse, ConcertDetailPage, ConcertDto, ConcertForm, ConcertFormPage, ListPage};
use tracing::{debug, info, instrument, trace};

use crate::error::AppError;
use crate::schemas::{AppState, ListQuery};
use crate::session::{CurrentUser, Viewer};
use crate::views::{artist_dto, concert_dto, concert_nav, nav, user_dto};

/// List concerts
#[utoipa::path(
    get,
    path = "/concert",
    tag = "concerts",
    params(ListQuery),
    responses(
        (status = 200, description = "Concerts retrieved successfully", body = ApiResponse<ListPage<ConcertDto>>),
        (status = 400, description = "Invalid pagination", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, viewer))]
pub async fn list_concerts(
    State(state): State<AppState>,
    viewer: Viewer,
    Valid(Query(query)): Valid<Query<ListQuery>>,
) -> Result<Json<ApiResponse<ListPage<ConcertDto>>>, AppError> {
    trace!("Entering list_concerts function");
    let (page, limit) = (query.page(), query.limit());
    let listing = catalog::concerts::list_concerts(&state.db, page, limit).await?;
    debug!("Returning {} of {} concerts", listing.items.len(), listing.total);

    let body = ListPage {
        items: listing.items.into_iter().map(concert_dto).collect(),
        page,
        limit,
        total: listing.total,
        nav: nav(viewer.user()),
    };
    Ok(Json(ApiResponse::ok(body, "Concerts retrieved successfully")))
}

/// Empty concert form with the artists that can be picked
#[utoipa::path(
    get,
    path = "/new_concert",
    tag = "concerts",
    responses(
        (status = 200, description = "Concert form", body = ApiResponse<ConcertFormPage>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, user))]
pub async fn new_concert_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<ConcertFormPage>>, AppError> {
    let artists = catalog::artists::all_artists(&state.db).await?;
    let body = ConcertFormPage {
        form: ConcertForm::default(),
        artists: artists.into_iter().map(artist_dto).collect(),
        nav: nav(Some(&user)),
    };
    Ok(Json(ApiResponse::ok(body, "New concert")))
}

/// Create a concert
#[utoipa::path(
    post,
    path = "/new_concert",
    tag = "concerts",
    request_body = ConcertForm,
    responses(
        (status = 201, description = "New concert was created successfully", body = ApiResponse<ConcertDto>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse),
        (status = 422, description = "Invalid fields", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, user))]
pub async fn create_concert(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Json(form), _): WithRejection<Json<ConcertForm>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<ConcertDto>>), AppError> {
    debug!("User {} creating concert '{}'", user.id, form.name);
    let created = catalog::concerts::create_concert(&state.db, &form).await?;
    info!("Concert {} created by user {}", created.id, user.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            concert_dto(created),
            "New concert was created successfully.",
        )),
    ))
}

/// Concert details: artist playing and guest list
#[utoipa::path(
    get,
    path = "/concert/{concert_id}",
    tag = "concerts",
    params(
        ("concert_id" = i32, Path, description = "Concert ID"),
    ),
    responses(
        (status = 200, description = "Concert retrieved successfully", body = ApiResponse<ConcertDetailPage>),
        (status = 404, description = "Concert not found", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, viewer))]
pub async fn concert_detail(
    Path(concert_id): Path<i32>,
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Json<ApiResponse<ConcertDetailPage>>, AppError> {
    trace!("Entering concert_detail function for concert_id: {}", concert_id);
    let concert = catalog::concerts::get_concert(&state.db, concert_id).await?;
    let artist_playing = concert
        .artist_playing(&state.db)
        .await?;
    let guests = concert
        .guests_attending(&state.db)
        .await?;

    let attending = match viewer.user() {
        Some(user) => guests.iter().any(|guest| guest.id == user.id),
        None => false,
    };

    let body = ConcertDetailPage {
        nav: concert_nav(viewer.user(), concert.id, attending),
        concert: concert_dto(concert),
        artist_playing: artist_playing.map(artist_dto),
        guests_attending: guests.into_iter().map(user_dto).collect(),
        attending,
    };
    Ok(Json(ApiResponse::ok(body, "Concert retrieved successfully")))
}

/// Edit a concert
#[utoipa::path(
    post,
    path = "/concert/{concert_id}",
    tag = "concerts",
    params(
        ("concert_id" = i32, Path, description = "Concert ID"),
    ),
    request_body = ConcertForm,
    responses(
        (status = 200, description = "Concert updated successfully", body = ApiResponse<ConcertDto>),
        (status = 401, description = "Not logged in", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Concert not found", body = crate::schemas::ErrorResponse),
        (status = 422, description = "Invalid fields", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, user))]
pub async fn update_concert(
    Path(concert_id): Path<i32>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Json(form), _): WithRejection<Json<ConcertForm>, AppError>,
) -> Result<Json<ApiResponse<ConcertDto>>, AppError> {
    debug!("User {} updating concert {}", user.id, concert_id);
    let updated = catalog::concerts::update_concert(&state.db, concert_id, &form).await?;
    Ok(Json(ApiResponse::ok(
        concert_dto(updated),
        "Concert updated successfully.",
    )))
}
