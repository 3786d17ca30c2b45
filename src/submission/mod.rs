//! Kiosk submission flow.
//!
//! Ties PIN lookup, the clock, the late-penalty rule, and the store together
//! for check-in and check-out.

mod clock;
mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use service::{
    CancelHandle, CancelSignal, CheckRequest, SharedStore, SubmissionService, cancellation,
};
