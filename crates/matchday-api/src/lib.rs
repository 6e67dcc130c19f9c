//! Matchday API Client
//!
//! Typed bindings for the backend REST contract. All state lives on the
//! server; this crate only shuttles JSON. Every outgoing call reads the
//! token store and attaches the bearer credential.

mod auth;
mod client;
mod error;
mod events;
mod schedule;
mod teams;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    Event, Game, MemberUpdate, NewEvent, NewTeam, Registration, RegistrationRequest,
    ScheduleRequest, ScoreUpdate, SignInResponse, SignUpRequest, Team,
};

pub type Result<T> = std::result::Result<T, ApiError>;
