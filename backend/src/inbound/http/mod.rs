//! HTTP inbound adapter exposing REST endpoints.

pub mod engagement;
pub mod error;
pub mod leaderboard;
pub mod preview;
pub mod projects;
pub mod state;
pub mod transcribe;
pub mod users;
pub mod validation;
pub mod versions;

pub use error::ApiResult;
