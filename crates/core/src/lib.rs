//! `storex-core` -- onboarding and access gating for the Storex dashboard.
//!
//! Pure, synchronous reducers over two closed state machines (user access
//! and business access) plus a readiness-flag projection. No I/O and no
//! shared state: callers own persistence and install their own `tracing`
//! subscriber.

pub mod business_access;
pub mod error;
pub mod gates;
pub mod guidance;
pub mod readiness;
pub mod user_access;

pub use business_access::{transition_business_state, BusinessAccessState, BusinessAction};
pub use error::CoreError;
pub use readiness::{
    update_readiness_flags, update_readiness_flags_with, BusinessSnapshot, ReadinessConfig,
    ReadinessFlags,
};
pub use user_access::{transition_user_state, UserAccessState, UserAction};
