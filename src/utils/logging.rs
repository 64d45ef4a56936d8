use log::warn;
use std::time::Duration;

/// Registers a warning when a frame's simulation work exceeded its budget.
///
/// Returns `true` when the budget was exceeded.
pub fn warn_if_frame_budget_exceeded(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms > budget_ms {
        warn!("Frame exceeded budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        return true;
    }
    false
}
