//! Join-flow observer that feeds logs and metrics.

use domain::services::{JoinObserver, JoinState};
use tracing::{debug, info};

use crate::middleware::metrics::record_join_outcome;

/// Logs every transition and counts terminal states.
pub struct TracingJoinObserver;

impl JoinObserver for TracingJoinObserver {
    fn on_transition(&self, state: &JoinState) {
        match state {
            JoinState::Joining { trip_id } => {
                debug!(trip_id = %trip_id, "Join flow writing membership");
            }
            JoinState::Error { error } => {
                info!(state = state.name(), code = error.code(), "Join flow finished");
            }
            _ if state.is_terminal() => {
                info!(state = state.name(), "Join flow finished");
            }
            _ => debug!(state = state.name(), "Join flow transition"),
        }

        if let Some(outcome) = outcome_label(state) {
            record_join_outcome(outcome);
        }
    }
}

/// Label counted in `join_flow_outcomes_total`; only terminal states count.
fn outcome_label(state: &JoinState) -> Option<&'static str> {
    state.is_terminal().then(|| state.name())
}
