//! Terminal events -> view actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use skycast_core::view::{Action, Tab, ViewState};

pub fn map_event(event: &Event, state: &ViewState) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key, state),
        _ => None,
    }
}

fn map_key(key: &KeyEvent, state: &ViewState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if state.search_focused {
        return match key.code {
            KeyCode::Enter => Some(Action::SearchSubmit(state.search_text.clone())),
            KeyCode::Esc => Some(Action::SearchFocus(false)),
            KeyCode::Backspace => {
                let mut text = state.search_text.clone();
                text.pop()?;
                Some(Action::SearchTextChange(text))
            }
            KeyCode::Char(c) => {
                let mut text = state.search_text.clone();
                text.push(c);
                Some(Action::SearchTextChange(text))
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') | KeyCode::Char('s') => Some(Action::SearchFocus(true)),
        KeyCode::Char('l') => Some(Action::LocateRequest),
        KeyCode::Char('t') => Some(Action::TabSelect(Tab::Today)),
        KeyCode::Char('w') => Some(Action::TabSelect(Tab::Week)),
        KeyCode::Tab => Some(Action::TabToggle),
        KeyCode::Char('x') => Some(Action::ErrorDismiss),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn browse_mode_bindings() {
        let state = ViewState::default();

        assert_eq!(map_event(&press(KeyCode::Char('q')), &state), Some(Action::Quit));
        assert_eq!(
            map_event(&press(KeyCode::Char('/')), &state),
            Some(Action::SearchFocus(true))
        );
        assert_eq!(
            map_event(&press(KeyCode::Char('l')), &state),
            Some(Action::LocateRequest)
        );
        assert_eq!(
            map_event(&press(KeyCode::Char('w')), &state),
            Some(Action::TabSelect(Tab::Week))
        );
        assert_eq!(map_event(&press(KeyCode::Tab), &state), Some(Action::TabToggle));
        assert_eq!(
            map_event(&press(KeyCode::Char('x')), &state),
            Some(Action::ErrorDismiss)
        );
        assert_eq!(map_event(&press(KeyCode::F(5)), &state), None);
    }

    #[test]
    fn typing_edits_search_text() {
        let mut state = ViewState::default();
        state.search_focused = true;
        state.search_text = "Mumba".into();

        assert_eq!(
            map_event(&press(KeyCode::Char('i')), &state),
            Some(Action::SearchTextChange("Mumbai".into()))
        );
        assert_eq!(
            map_event(&press(KeyCode::Backspace), &state),
            Some(Action::SearchTextChange("Mumb".into()))
        );
        // 'q' is text while the box is focused
        assert_eq!(
            map_event(&press(KeyCode::Char('q')), &state),
            Some(Action::SearchTextChange("Mumbaq".into()))
        );
    }

    #[test]
    fn enter_submits_and_esc_leaves_box() {
        let mut state = ViewState::default();
        state.search_focused = true;
        state.search_text = "  Mumbai  ".into();

        assert_eq!(
            map_event(&press(KeyCode::Enter), &state),
            Some(Action::SearchSubmit("  Mumbai  ".into()))
        );
        assert_eq!(
            map_event(&press(KeyCode::Esc), &state),
            Some(Action::SearchFocus(false))
        );
    }

    #[test]
    fn backspace_on_empty_box_does_nothing() {
        let mut state = ViewState::default();
        state.search_focused = true;

        assert_eq!(map_event(&press(KeyCode::Backspace), &state), None);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut state = ViewState::default();
        state.search_focused = true;

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&ctrl_c, &state), Some(Action::Quit));
    }

    #[test]
    fn key_release_is_ignored() {
        let state = ViewState::default();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;

        assert_eq!(map_event(&Event::Key(key), &state), None);
    }
}
