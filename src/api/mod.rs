//! HTTP API module for the attendance kiosk.
//!
//! This module provides the REST endpoints used by the kiosk terminal and the
//! admin review screen.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    LatePenaltyQuery, LoginRequest, RecordQuery, ReviewRequest, UpdatePinRequest,
    VerifyPinRequest,
};
pub use response::{ApiError, ApiErrorResponse, LatePenaltyResponse, LoginResponse};
pub use state::AppState;
