use common::{
    ApiResponse, ArtistDetailPage, ArtistDto, ArtistForm, ArtistFormPage, ConcertDetailPage,
    ConcertDto, ConcertForm, ConcertFormPage, Credentials, FieldError, HomePage, ListPage,
    MembershipDto, NavLink, ProfilePage, UserDto,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use crate::session::SessionStore;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Live login sessions
    pub sessions: SessionStore,
    /// Upper bound on a single request
    pub request_timeout: Duration,
}

/// Default page size for listings
pub const DEFAULT_LIMIT: u64 = 50;

/// Query parameters for the concert and artist listings
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct ListQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
}

impl ListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
    /// Field-level validation failures, empty for other errors
    pub fields: Vec<FieldError>,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::pages::home,
        crate::handlers::concerts::list_concerts,
        crate::handlers::concerts::new_concert_form,
        crate::handlers::concerts::create_concert,
        crate::handlers::concerts::concert_detail,
        crate::handlers::concerts::update_concert,
        crate::handlers::artists::list_artists,
        crate::handlers::artists::new_artist_form,
        crate::handlers::artists::create_artist,
        crate::handlers::artists::artist_detail,
        crate::handlers::artists::update_artist,
        crate::handlers::profiles::profile,
        crate::handlers::memberships::attend,
        crate::handlers::memberships::unattend,
        crate::handlers::memberships::favourite,
        crate::handlers::memberships::unfavourite,
        crate::handlers::auth::signup,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
    ),
    components(
        schemas(
            ApiResponse<HomePage>,
            ApiResponse<ConcertDetailPage>,
            ApiResponse<ArtistDetailPage>,
            ApiResponse<ProfilePage>,
            ApiResponse<MembershipDto>,
            ApiResponse<UserDto>,
            ErrorResponse,
            HealthResponse,
            ListQuery,
            HomePage,
            ListPage<ConcertDto>,
            ListPage<ArtistDto>,
            ConcertDetailPage,
            ArtistDetailPage,
            ProfilePage,
            ArtistFormPage,
            ConcertFormPage,
            MembershipDto,
            ArtistDto,
            ConcertDto,
            UserDto,
            NavLink,
            FieldError,
            ArtistForm,
            ConcertForm,
            Credentials,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "concerts", description = "Concert listing, creation and editing"),
        (name = "artists", description = "Artist listing, creation and editing"),
        (name = "profiles", description = "User profiles"),
        (name = "memberships", description = "Attend and favourite toggles"),
        (name = "auth", description = "Signup, login and logout"),
    ),
    info(
        title = "Encore API",
        description = "Concert and artist catalogue with attendance and favourites",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
