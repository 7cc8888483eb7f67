//! Conversions from stored models to response documents, and the
//! navigation affordances each viewer gets.

use common::{ArtistDto, ConcertDto, MembershipDto, NavLink, UserDto};
use catalog::Toggle;
use model::entities::{artist, concert, user};

pub fn artist_dto(model: artist::Model) -> ArtistDto {
    ArtistDto {
        id: model.id,
        name: model.name,
        hometown: model.hometown,
        image: model.image,
        genre: model.genre,
        biography: model.biography,
    }
}

pub fn concert_dto(model: concert::Model) -> ConcertDto {
    ConcertDto {
        id: model.id,
        name: model.name,
        price: model.price,
        venue: model.venue,
        address: model.address,
        date: model.date,
        image: model.image,
        artist_id: model.artist_id,
    }
}

pub fn user_dto(model: user::Model) -> UserDto {
    UserDto {
        id: model.id,
        username: model.username,
    }
}

pub fn membership_dto(toggle: &Toggle) -> MembershipDto {
    MembershipDto {
        outcome: toggle.outcome.as_str().to_string(),
        changed: toggle.outcome.changed(),
    }
}

/// Link to a user's profile, with the username percent-encoded as a path
/// segment.
pub fn profile_href(username: &str) -> String {
    format!("/profile/{}", urlencoding::encode(username))
}

/// Site-wide navigation. Creation links only show up for logged-in users,
/// login and signup only for anonymous ones.
pub fn nav(viewer: Option<&user::Model>) -> Vec<NavLink> {
    let mut links = vec![
        NavLink::new("Home", "/"),
        NavLink::new("Concerts", "/concert"),
        NavLink::new("Artists", "/artist"),
    ];
    match viewer {
        Some(user) => {
            links.push(NavLink::new("New Concert", "/new_concert"));
            links.push(NavLink::new("New Artist", "/new_artist"));
            links.push(NavLink::new("Profile", profile_href(&user.username)));
            links.push(NavLink::new("Logout", "/logout"));
        }
        None => {
            links.push(NavLink::new("Log In", "/login"));
            links.push(NavLink::new("Sign Up", "/signup"));
        }
    }
    links
}

/// Navigation for a concert detail page: adds the attend/unattend action.
pub fn concert_nav(viewer: Option<&user::Model>, concert_id: i32, attending: bool) -> Vec<NavLink> {
    let mut links = nav(viewer);
    if viewer.is_some() {
        links.push(if attending {
            NavLink::new("Stop Attending", format!("/unattend/{concert_id}"))
        } else {
            NavLink::new("Attend this Concert", format!("/attending/{concert_id}"))
        });
    }
    links
}

/// Navigation for an artist detail page: adds the favourite action.
pub fn artist_nav(viewer: Option<&user::Model>, artist_id: i32, favourite: bool) -> Vec<NavLink> {
    let mut links = nav(viewer);
    if viewer.is_some() {
        links.push(if favourite {
            NavLink::new("Remove from Favourites", format!("/unfavourite/{artist_id}"))
        } else {
            NavLink::new("Favourite this Artist", format!("/favourite/{artist_id}"))
        });
    }
    links
}
