//! Mapping from terminal events to the single logical action.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

/// Raw reading of one terminal event, before hold tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawAction {
    KeyPress,
    /// Terminal auto-repeat while a key is held.
    KeyRepeat,
    KeyRelease,
    MouseDown,
    MouseUp,
}

/// Keys bound to the action.
pub fn is_action_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char(' ') | KeyCode::Enter)
}

/// Map a terminal event to a raw action reading.
pub fn map_event(event: &Event) -> Option<RawAction> {
    match event {
        Event::Key(key) if is_action_key(key.code) => Some(match key.kind {
            KeyEventKind::Press => RawAction::KeyPress,
            KeyEventKind::Repeat => RawAction::KeyRepeat,
            KeyEventKind::Release => RawAction::KeyRelease,
        }),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(RawAction::MouseDown),
            MouseEventKind::Up(MouseButton::Left) => Some(RawAction::MouseUp),
            _ => None,
        },
        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            map_event(&key(KeyCode::Char(' '), KeyEventKind::Press)),
            Some(RawAction::KeyPress)
        );
        assert_eq!(
            map_event(&key(KeyCode::Enter, KeyEventKind::Repeat)),
            Some(RawAction::KeyRepeat)
        );
        assert_eq!(
            map_event(&key(KeyCode::Char(' '), KeyEventKind::Release)),
            Some(RawAction::KeyRelease)
        );
        assert_eq!(map_event(&key(KeyCode::Char('x'), KeyEventKind::Press)), None);
    }

    #[test]
    fn test_left_click_is_action() {
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(RawAction::MouseDown)
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Up(MouseButton::Left))),
            Some(RawAction::MouseUp)
        );
        assert_eq!(map_event(&mouse(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(map_event(&mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char(' '))));
    }
}
