use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use common::{ApiResponse, Credentials, UserDto};
use tracing::{debug, info, instrument, warn};

use crate::error::AppError;
use crate::schemas::AppState;
use crate::session::{removal_cookie, session_cookie, SESSION_COOKIE};
use crate::views::user_dto;

/// Create an account
#[utoipa::path(
    post,
    path = "/signup",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserDto>),
        (status = 409, description = "Username taken", body = crate::schemas::ErrorResponse),
        (status = 422, description = "Invalid fields", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, credentials), fields(username = %credentials.username))]
pub async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(credentials), _): WithRejection<Json<Credentials>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), AppError> {
    let user = catalog::accounts::signup(&state.db, &credentials).await?;
    info!("Signed up user {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            user_dto(user),
            "Your account was created. Please log in.",
        )),
    ))
}

/// Log in and receive a session cookie
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = ApiResponse<UserDto>),
        (status = 401, description = "Unknown user or wrong password", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, jar, credentials), fields(username = %credentials.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(credentials), _): WithRejection<Json<Credentials>, AppError>,
) -> Result<(CookieJar, Json<ApiResponse<UserDto>>), AppError> {
    let user = catalog::accounts::login(&state.db, &credentials)
        .await
        .inspect_err(|e| warn!("Login refused: {}", e))?;

    if let Some(previous) = jar.get(SESSION_COOKIE) {
        state.sessions.close(previous.value()).await;
    }
    let token = state.sessions.open(user.id).await;
    info!("User {} logged in", user.id);

    let message = format!("Welcome back, {}.", user.username);
    Ok((
        jar.add(session_cookie(token)),
        Json(ApiResponse::ok(user_dto(user), message)),
    ))
}

/// End the current session
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<bool>)
    )
)]
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<bool>>) {
    let had_session = match jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            state.sessions.close(cookie.value()).await;
            true
        }
        None => false,
    };
    debug!("Logout, had session: {}", had_session);
    (
        jar.remove(removal_cookie()),
        Json(ApiResponse::ok(had_session, "You have been logged out.")),
    )
}
