//! The weather view's state machine: state, actions, effects, reducer and store.

pub mod action;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::Action;
pub use effect::Effect;
pub use reducer::reducer;
pub use state::{RequestId, Tab, ViewState, clock_text, date_text};
pub use store::{DispatchResult, Store};
