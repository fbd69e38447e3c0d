pub mod analysis;
pub mod auth;
pub mod catalog;
pub mod dates;
pub mod user;
