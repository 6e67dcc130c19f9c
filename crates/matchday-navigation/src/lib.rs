//! Matchday Navigation
//!
//! Client-side route table and a router that applies the auth gate to every
//! protected navigation. Unauthenticated attempts land on the login screen.

mod error;
mod route;
mod router;

pub use error::NavigationError;
pub use route::Route;
pub use router::Router;

pub type Result<T> = std::result::Result<T, NavigationError>;
