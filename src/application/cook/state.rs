//! Orchestrator state machine
//!
//! Tracks the run's `CookState` and reports every transition to the event
//! sink. Transitions outside `CookState::can_transition_to` are rejected.

use std::sync::Arc;

use crate::domain::ports::{CookEvent, CookEventSink};
use crate::domain::value_objects::CookState;
use crate::error::{CookError, CookResult};

pub struct CookStateMachine {
    state: CookState,
    events: Arc<dyn CookEventSink>,
}

impl CookStateMachine {
    pub fn new(events: Arc<dyn CookEventSink>) -> Self {
        Self {
            state: CookState::Idle,
            events,
        }
    }

    pub fn state(&self) -> CookState {
        self.state
    }

    pub fn transition(&mut self, to: CookState) -> CookResult<()> {
        let from = self.state;
        if !from.can_transition_to(to) {
            return Err(CookError::IllegalTransition { from, to });
        }
        tracing::debug!(%from, %to, "cook state transition");
        self.state = to;
        self.events.on_event(CookEvent::StateChanged { from, to });
        Ok(())
    }
}
