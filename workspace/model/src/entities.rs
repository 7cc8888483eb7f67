//! Root of the SeaORM entity modules.
//!
//! Artists, concerts and users are plain tables. The many-to-many links
//! (attendance and favourites) live in their own association tables so that
//! neither side owns the other; each side gets query helpers instead.

pub mod artist;
pub mod concert;
pub mod user;
pub mod user_artist;
pub mod user_concert;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::artist::Entity as Artist;
    pub use super::concert::Entity as Concert;
    pub use super::user::Entity as User;
    pub use super::user_artist::Entity as UserArtist;
    pub use super::user_concert::Entity as UserConcert;
}
