use crate::handlers::{
    artists::{artist_detail, create_artist, list_artists, new_artist_form, update_artist},
    auth::{login, logout, signup},
    concerts::{concert_detail, create_concert, list_concerts, new_concert_form, update_concert},
    health::health_check,
    memberships::{attend, favourite, unattend, unfavourite},
    pages::home,
    profiles::profile,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = state.request_timeout;

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .route("/", get(home))
        // Concerts
        .route("/concert", get(list_concerts))
        .route("/new_concert", get(new_concert_form).post(create_concert))
        .route("/concert/:concert_id", get(concert_detail).post(update_concert))
        // Artists
        .route("/artist", get(list_artists))
        .route("/new_artist", get(new_artist_form).post(create_artist))
        .route("/artist/:artist_id", get(artist_detail).post(update_artist))
        .route("/profile/:username", get(profile))
        // Membership toggles
        .route("/attending/:concert_id", post(attend))
        .route("/unattend/:concert_id", post(unattend))
        .route("/favourite/:artist_id", post(favourite))
        .route("/unfavourite/:artist_id", post(unfavourite))
        // Auth
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
