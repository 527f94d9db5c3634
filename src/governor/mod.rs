//! Outbound-request governor.
//!
//! Every call to the upstream Mercado Público API goes through a single
//! [`RequestGovernor`], which paces dispatches and absorbs the upstream's
//! transient "concurrent request rejected" error.
//!
//! # Key Characteristics
//!
//! - **Process-scoped:** the spacing state lives on the governor instance,
//!   shared by all concurrent callers within one process
//! - **Best-effort spacing:** sequential dispatches are spaced at least
//!   `min_request_interval` apart; concurrent entry can dispatch together
//!   (see [`RequestGovernor::dispatch`])
//! - **Bounded retries:** at most `max_retries` extra attempts per logical
//!   call, only for the contention signature; everything else propagates
//!   unchanged
//!
//! # When to Use
//!
//! The governor exists because the upstream bans callers that issue requests
//! too quickly and rejects overlapping requests outright. Handlers never talk
//! to the transport directly; they hand a fully-formed request to the
//! governor and interpret the outcome.

mod request_governor;
pub use request_governor::*;

use std::time::Duration;

/// Tuning for [`RequestGovernor`].
#[derive(Clone, Debug)]
pub struct GovernorOptions {
    /// Minimum spacing between two upstream dispatches.
    pub min_request_interval: Duration,
    /// Retry budget for the upstream contention signature.
    pub max_retries: u32,
    /// Fixed delay before each retry attempt.
    pub retry_delay: Duration,
}

impl Default for GovernorOptions {
    fn default() -> Self {
        Self {
            min_request_interval: Duration::from_millis(2000),
            max_retries: 3,
            retry_delay: Duration::from_millis(2000),
        }
    }
}
