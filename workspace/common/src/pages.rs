//! Response documents. Each one corresponds to a page of the site and
//! carries the navigation affordances visible to the current viewer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::forms::{ArtistForm, ConcertForm};

/// A navigation affordance, e.g. "New Concert" -> "/new_concert".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ArtistDto {
    pub id: i32,
    pub name: String,
    pub hometown: String,
    pub image: Option<String>,
    pub genre: String,
    pub biography: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ConcertDto {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub venue: String,
    pub address: String,
    pub date: NaiveDate,
    pub image: Option<String>,
    pub artist_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
}

/// GET `/`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomePage {
    pub concerts: Vec<ConcertDto>,
    pub nav: Vec<NavLink>,
}

/// Paginated listing of concerts or artists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub nav: Vec<NavLink>,
}

/// GET `/concert/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConcertDetailPage {
    pub concert: ConcertDto,
    pub artist_playing: Option<ArtistDto>,
    pub guests_attending: Vec<UserDto>,
    /// Whether the viewer is attending. Always false when logged out.
    pub attending: bool,
    pub nav: Vec<NavLink>,
}

/// GET `/artist/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtistDetailPage {
    pub artist: ArtistDto,
    pub upcoming_concerts: Vec<ConcertDto>,
    pub fans: u64,
    /// Whether the viewer has this artist as a favourite.
    pub favourite: bool,
    pub nav: Vec<NavLink>,
}

/// GET `/profile/{username}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfilePage {
    pub user: UserDto,
    pub attending: Vec<ConcertDto>,
    pub favourite_artists: Vec<ArtistDto>,
    pub nav: Vec<NavLink>,
}

/// GET `/new_artist`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtistFormPage {
    pub form: ArtistForm,
    pub nav: Vec<NavLink>,
}

/// GET `/new_concert`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConcertFormPage {
    pub form: ConcertForm,
    /// Artists that may be picked as the one playing.
    pub artists: Vec<ArtistDto>,
    pub nav: Vec<NavLink>,
}

/// Result of an attend/favourite toggle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MembershipDto {
    /// One of `added`, `already_member`, `removed`, `not_member`.
    pub outcome: String,
    /// Whether the association set changed.
    pub changed: bool,
}
