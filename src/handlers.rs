pub mod artists;
pub mod auth;
pub mod concerts;
pub mod health;
pub mod memberships;
pub mod pages;
pub mod profiles;
