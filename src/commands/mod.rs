//! Dashboard Commands
//!
//! Async actions behind the dashboard screens, organized by domain. Each one
//! calls a gateway and applies the outcome to the dashboard store; failures
//! come back as display strings for the notification banner.

mod mvp;
mod three_d;
mod website;

use dashboard_core::FetchOutcome;

// Re-export all public items
pub use mvp::*;
pub use three_d::*;
pub use website::*;

/// `Ok(true)` when the response replaced the list, `Ok(false)` when a newer
/// fetch had already superseded it.
fn settle(outcome: FetchOutcome) -> Result<bool, String> {
    match outcome {
        FetchOutcome::Applied => Ok(true),
        FetchOutcome::Stale => Ok(false),
        FetchOutcome::Failed(error) => Err(error.user_message()),
    }
}
