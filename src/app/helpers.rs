//! Contains helper functions to reduce boilerplate code in other `app` modules.

use std::sync::{Arc, Mutex, MutexGuard};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::SelectionState;
use super::view_model::generate_view;

/// Locks the session state.
pub fn lock_state(state: &Arc<Mutex<SelectionState>>) -> MutexGuard<'_, SelectionState> {
    state
        .lock()
        .expect("Mutex was poisoned. This should not happen.")
}

/// Sends a `StateUpdate` for the given state, preceded by a `SelectionChanged`
/// when the selected paths differ from `paths_before`.
pub fn notify<P: EventProxy>(state: &SelectionState, proxy: &P, paths_before: &[String]) {
    if state.selected_paths != paths_before {
        proxy.send_event(UserEvent::SelectionChanged(state.selected_paths.clone()));
    }
    proxy.send_event(UserEvent::StateUpdate(Box::new(generate_view(state))));
}

/// Resets a session flag when dropped, unless disarmed first.
///
/// Held across a suspension point so the flag clears even if the awaiting task is
/// aborted. The normal path clears the flag itself and calls `disarm` inside the
/// same critical section, so a later drop cannot reset a flag set by a newer request.
pub struct ResetOnDrop {
    state: Arc<Mutex<SelectionState>>,
    reset: fn(&mut SelectionState),
    armed: bool,
}

impl ResetOnDrop {
    pub fn new(state: &Arc<Mutex<SelectionState>>, reset: fn(&mut SelectionState)) -> Self {
        Self {
            state: state.clone(),
            reset,
            armed: true,
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ResetOnDrop {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut state_guard) = self.state.lock() {
            (self.reset)(&mut state_guard);
        }
    }
}

/// A helper function that locks the `SelectionState`, performs a mutation,
/// and then automatically notifies the embedding application.
///
/// Every change of the selected paths produces exactly one `SelectionChanged`.
pub fn with_state_and_notify<F, R, P: EventProxy>(
    state: &Arc<Mutex<SelectionState>>,
    proxy: &P,
    update_fn: F,
) -> R
where
    F: FnOnce(&mut SelectionState) -> R,
{
    let mut state_guard = lock_state(state);
    let paths_before = state_guard.selected_paths.clone();

    let result = update_fn(&mut state_guard);

    notify(&state_guard, proxy, &paths_before);
    result
}
