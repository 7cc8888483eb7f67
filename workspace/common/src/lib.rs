//! Transport-layer types shared by the web handlers and the catalog crate.
//! Request payloads (forms) carry their own validation rules; response
//! documents are plain data so they can be reused by any client.

mod forms;
mod pages;

pub use forms::{ArtistForm, ConcertForm, Credentials, FieldError, DATE_FORMAT};
pub use pages::{
    ArtistDetailPage, ArtistDto, ArtistFormPage, ConcertDetailPage, ConcertDto, ConcertFormPage,
    HomePage, ListPage, MembershipDto, NavLink, ProfilePage, UserDto,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
