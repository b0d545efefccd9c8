//! Reducer - (state, action) -> (changed, effects)
//!
//! All state transitions of the weather view happen here. No I/O.

use crate::error::NETWORK_PROBLEM;

use super::action::Action;
use super::effect::Effect;
use super::state::ViewState;
use super::store::DispatchResult;

pub fn reducer(state: &mut ViewState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather =====
        Action::WeatherFetch(city) => {
            let abandoned = abandon_locate(state);
            with_first(abandoned, fetch(state, city))
        }

        Action::WeatherDidLoad { request, snapshot } => {
            if state.in_flight != Some(request) {
                return DispatchResult::unchanged(); // superseded
            }
            state.weather = Some(*snapshot);
            state.is_loading = false;
            state.error = None;
            state.stale = false;
            state.in_flight = None;
            DispatchResult::changed()
        }

        Action::WeatherDidError { request, message } => {
            if state.in_flight != Some(request) {
                return DispatchResult::unchanged();
            }
            state.is_loading = false;
            state.error = Some(if message.trim().is_empty() {
                NETWORK_PROBLEM.to_string()
            } else {
                message
            });
            state.stale = state.weather.is_some();
            state.in_flight = None;
            DispatchResult::changed()
        }

        // ===== Search =====
        Action::SearchFocus(focused) => {
            let changed = state.search_focused != focused;
            state.search_focused = focused;
            DispatchResult::changed_if(changed)
        }

        Action::SearchTextChange(text) => {
            let changed = state.search_text != text;
            state.search_text = text;
            DispatchResult::changed_if(changed)
        }

        Action::SearchSubmit(text) => {
            let city = text.trim().to_string();
            if city.is_empty() {
                return DispatchResult::unchanged();
            }
            state.city = city.clone();
            state.search_text.clear();
            state.search_focused = false;
            let abandoned = abandon_locate(state);
            with_first(abandoned, fetch(state, city))
        }

        // ===== Location =====
        Action::LocateRequest => {
            if state.locating {
                return DispatchResult::unchanged();
            }
            state.locating = true;
            DispatchResult::changed_with(Effect::Locate)
        }

        Action::LocateDidResolve(city) => {
            if !state.locating {
                return DispatchResult::unchanged(); // a newer fetch took over
            }
            state.locating = false;
            fetch(state, city)
        }

        Action::LocateDidFail(_reason) => {
            if !state.locating {
                return DispatchResult::unchanged();
            }
            // No banner: quietly show the fallback city instead.
            state.locating = false;
            let city = state.fallback_city.clone();
            fetch(state, city)
        }

        // ===== UI =====
        Action::TabSelect(tab) => {
            let changed = state.tab != tab;
            state.tab = tab;
            DispatchResult::changed_if(changed)
        }

        Action::TabToggle => {
            state.tab = state.tab.toggle();
            DispatchResult::changed()
        }

        Action::ErrorDismiss => DispatchResult::changed_if(state.error.take().is_some()),

        Action::ClockTick { clock, date } => {
            state.tick_count = state.tick_count.wrapping_add(1);
            let changed = state.clock != clock || state.date != date;
            state.clock = clock;
            state.date = date;
            // spinner animates while loading
            DispatchResult::changed_if(changed || state.is_loading || state.locating)
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn fetch(state: &mut ViewState, city: String) -> DispatchResult<Effect> {
    state.is_loading = true;
    state.error = None;
    let request = state.begin_request();
    DispatchResult::changed_with(Effect::FetchWeather { request, city })
}

/// A fetch started by the user wins over a location lookup still running.
fn abandon_locate(state: &mut ViewState) -> Option<Effect> {
    if state.locating {
        state.locating = false;
        Some(Effect::CancelLocate)
    } else {
        None
    }
}

fn with_first(effect: Option<Effect>, mut result: DispatchResult<Effect>) -> DispatchResult<Effect> {
    if let Some(effect) = effect {
        result.effects.insert(0, effect);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use crate::view::state::{RequestId, Tab};

    fn fetch_effect(result: &DispatchResult<Effect>) -> (RequestId, String) {
        match result.effects.as_slice() {
            [Effect::FetchWeather { request, city }] => (*request, city.clone()),
            other => panic!("expected one fetch effect, got {other:?}"),
        }
    }

    fn loaded(request: RequestId, city: &str, condition: &str) -> Action {
        Action::WeatherDidLoad {
            request,
            snapshot: Box::new(fixtures::snapshot(city, condition)),
        }
    }

    #[test]
    fn weather_fetch_sets_loading_and_clears_error() {
        let mut state = ViewState::default();
        state.is_loading = false;
        state.error = Some("old".into());

        let result = reducer(&mut state, Action::WeatherFetch("Surat".into()));

        assert!(result.changed);
        assert!(state.is_loading);
        assert!(state.error.is_none());
        let (request, city) = fetch_effect(&result);
        assert_eq!(city, "Surat");
        assert_eq!(state.in_flight, Some(request));
    }

    #[test]
    fn successful_load_replaces_snapshot_and_clears_flags() {
        let mut state = ViewState::default();
        let (request, _) = fetch_effect(&reducer(&mut state, Action::WeatherFetch("Surat".into())));
        state.error = Some("stale banner".into());

        let result = reducer(&mut state, loaded(request, "Surat", "Sunny"));

        assert!(result.changed);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(!state.stale);
        assert_eq!(state.in_flight, None);
        assert_eq!(state.weather.as_ref().unwrap().location.name, "Surat");
        assert!(!state.shows_placeholder());
    }

    #[test]
    fn failed_fetch_sets_error_and_clears_loading() {
        let mut state = ViewState::default();
        let (request, _) = fetch_effect(&reducer(&mut state, Action::WeatherFetch("Surat".into())));

        let result = reducer(
            &mut state,
            Action::WeatherDidError {
                request,
                message: NETWORK_PROBLEM.into(),
            },
        );

        assert!(result.changed);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some(NETWORK_PROBLEM));
        assert!(!state.stale, "nothing loaded yet, nothing stale");
    }

    #[test]
    fn empty_error_message_gets_generic_text() {
        let mut state = ViewState::default();
        let (request, _) = fetch_effect(&reducer(&mut state, Action::WeatherFetch("Surat".into())));

        reducer(
            &mut state,
            Action::WeatherDidError {
                request,
                message: "  ".into(),
            },
        );

        assert_eq!(state.error.as_deref(), Some(NETWORK_PROBLEM));
    }

    #[test]
    fn failure_after_success_keeps_snapshot_marked_stale() {
        let mut state = ViewState::default();
        let (first, _) = fetch_effect(&reducer(&mut state, Action::WeatherFetch("Surat".into())));
        reducer(&mut state, loaded(first, "Surat", "Sunny"));

        let (second, _) = fetch_effect(&reducer(&mut state, Action::WeatherFetch("Pune".into())));
        reducer(
            &mut state,
            Action::WeatherDidError {
                request: second,
                message: NETWORK_PROBLEM.into(),
            },
        );

        assert!(state.stale);
        assert_eq!(state.weather.as_ref().unwrap().location.name, "Surat");
        assert!(state.error.is_some());
    }

    #[test]
    fn superseded_result_is_ignored() {
        let mut state = ViewState::default();
        let (slow, _) = fetch_effect(&reducer(&mut state, Action::WeatherFetch("Surat".into())));
        let (fast, _) = fetch_effect(&reducer(&mut state, Action::WeatherFetch("Mumbai".into())));

        reducer(&mut state, loaded(fast, "Mumbai", "Mist"));
        let before = state.clone();

        let result = reducer(&mut state, loaded(slow, "Surat", "Sunny"));

        assert!(!result.changed);
        assert_eq!(state, before);
        assert_eq!(state.weather.as_ref().unwrap().location.name, "Mumbai");
    }

    #[test]
    fn superseded_error_is_ignored() {
        let mut state = ViewState::default();
        let (slow, _) = fetch_effect(&reducer(&mut state, Action::WeatherFetch("Surat".into())));
        reducer(&mut state, Action::WeatherFetch("Mumbai".into()));

        let result = reducer(
            &mut state,
            Action::WeatherDidError {
                request: slow,
                message: NETWORK_PROBLEM.into(),
            },
        );

        assert!(!result.changed);
        assert!(state.is_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn blank_search_is_a_no_op() {
        for text in ["", "   ", "\t\n"] {
            let mut state = ViewState::default();
            state.search_text = text.to_string();

            let result = reducer(&mut state, Action::SearchSubmit(text.to_string()));

            assert!(!result.changed);
            assert!(result.effects.is_empty());
            assert_eq!(state.city, "Surat");
        }
    }

    #[test]
    fn search_trims_sets_city_clears_box_and_fetches_once() {
        let mut state = ViewState::default();
        state.search_text = "  Mumbai  ".into();
        state.search_focused = true;

        let result = reducer(&mut state, Action::SearchSubmit("  Mumbai  ".into()));

        assert!(result.changed);
        assert_eq!(state.city, "Mumbai");
        assert_eq!(state.search_text, "");
        assert!(!state.search_focused);
        let (_, city) = fetch_effect(&result);
        assert_eq!(city, "Mumbai");
    }

    #[test]
    fn locate_request_emits_locate_once() {
        let mut state = ViewState::default();

        let result = reducer(&mut state, Action::LocateRequest);
        assert_eq!(result.effects, vec![Effect::Locate]);
        assert!(state.locating);

        let again = reducer(&mut state, Action::LocateRequest);
        assert!(again.effects.is_empty());
    }

    #[test]
    fn resolved_location_fetches_that_city() {
        let mut state = ViewState::default();
        reducer(&mut state, Action::LocateRequest);

        let result = reducer(&mut state, Action::LocateDidResolve("Vadodara".into()));

        assert!(!state.locating);
        let (_, city) = fetch_effect(&result);
        assert_eq!(city, "Vadodara");
    }

    #[test]
    fn failed_location_fetches_fallback_without_banner() {
        let mut state = ViewState::new("Mumbai", "Surat");
        reducer(&mut state, Action::LocateRequest);

        let result = reducer(&mut state, Action::LocateDidFail("denied".into()));

        assert!(!state.locating);
        assert!(state.error.is_none());
        let (_, city) = fetch_effect(&result);
        assert_eq!(city, "Surat");
    }

    #[test]
    fn search_text_and_focus_changes() {
        let mut state = ViewState::default();

        assert!(reducer(&mut state, Action::SearchFocus(true)).changed);
        assert!(!reducer(&mut state, Action::SearchFocus(true)).changed);

        assert!(reducer(&mut state, Action::SearchTextChange("Pa".into())).changed);
        assert!(!reducer(&mut state, Action::SearchTextChange("Pa".into())).changed);
        assert_eq!(state.search_text, "Pa");
    }

    #[test]
    fn tab_select_and_toggle() {
        let mut state = ViewState::default();

        assert!(!reducer(&mut state, Action::TabSelect(Tab::Today)).changed);
        assert!(reducer(&mut state, Action::TabSelect(Tab::Week)).changed);
        assert_eq!(state.tab, Tab::Week);

        reducer(&mut state, Action::TabToggle);
        assert_eq!(state.tab, Tab::Today);
    }

    #[test]
    fn dismiss_clears_banner() {
        let mut state = ViewState::default();
        assert!(!reducer(&mut state, Action::ErrorDismiss).changed);

        state.error = Some(NETWORK_PROBLEM.into());
        assert!(reducer(&mut state, Action::ErrorDismiss).changed);
        assert!(state.error.is_none());
    }

    #[test]
    fn clock_tick_rerenders_on_change_or_while_loading() {
        let mut state = ViewState::default();
        state.is_loading = false;
        let tick = |clock: &str| Action::ClockTick {
            clock: clock.into(),
            date: "1/6/2025".into(),
        };

        assert!(reducer(&mut state, tick("2:05:09 PM")).changed);
        assert!(!reducer(&mut state, tick("2:05:09 PM")).changed);

        state.is_loading = true;
        assert!(reducer(&mut state, tick("2:05:09 PM")).changed);
        assert_eq!(state.tick_count, 3);
    }

    #[test]
    fn search_during_lookup_cancels_it_and_late_location_is_ignored() {
        let mut state = ViewState::default();
        reducer(&mut state, Action::LocateRequest);

        let search = reducer(&mut state, Action::SearchSubmit("Mumbai".into()));
        let request = match search.effects.as_slice() {
            [Effect::CancelLocate, Effect::FetchWeather { request, city }] => {
                assert_eq!(city, "Mumbai");
                *request
            }
            other => panic!("unexpected effects: {other:?}"),
        };
        assert!(!state.locating);

        let before = state.clone();
        let late = reducer(&mut state, Action::LocateDidResolve("Vadodara".into()));

        assert!(!late.changed);
        assert!(late.effects.is_empty());
        assert_eq!(state, before);
        assert_eq!(state.in_flight, Some(request));

        reducer(&mut state, loaded(request, "Mumbai", "Mist"));
        assert_eq!(state.city, "Mumbai");
        assert_eq!(state.weather.as_ref().unwrap().location.name, "Mumbai");
    }

    #[test]
    fn late_location_failure_after_search_is_ignored() {
        let mut state = ViewState::new("Mumbai", "Surat");
        reducer(&mut state, Action::LocateRequest);
        reducer(&mut state, Action::SearchSubmit("Pune".into()));

        let late = reducer(&mut state, Action::LocateDidFail("timed out".into()));

        assert!(!late.changed);
        assert!(late.effects.is_empty());
    }

    #[test]
    fn search_without_lookup_emits_only_fetch() {
        let mut state = ViewState::default();

        let result = reducer(&mut state, Action::SearchSubmit("Pune".into()));

        let (_, city) = fetch_effect(&result);
        assert_eq!(city, "Pune");
    }
}
