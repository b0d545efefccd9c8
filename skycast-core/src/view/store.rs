//! State container owned by the weather view.

use tracing::trace;

use super::action::Action;
use super::effect::Effect;
use super::reducer::reducer;
use super::state::ViewState;

/// Result of dispatching an action: whether state changed, and what to run next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    pub changed: bool,
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// `changed()` when `changed` is true, `unchanged()` otherwise.
    #[inline]
    pub fn changed_if(changed: bool) -> Self {
        Self {
            changed,
            effects: vec![],
        }
    }
}

pub type Reducer = fn(&mut ViewState, Action) -> DispatchResult<Effect>;

pub struct Store {
    state: ViewState,
    reducer: Reducer,
}

impl Store {
    pub fn new(state: ViewState) -> Self {
        Self::with_reducer(state, reducer)
    }

    pub fn with_reducer(state: ViewState, reducer: Reducer) -> Self {
        Self { state, reducer }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        trace!(action = %action.summary(), "dispatch");
        (self.reducer)(&mut self.state, action)
    }
}
