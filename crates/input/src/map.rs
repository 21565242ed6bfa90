//! Key mapping from terminal events to game keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key code to the game key it stands for.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Key::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Key::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Key::Down)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Key::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Key::RotateCcw),

        KeyCode::Char(' ') => Some(Key::Space),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyCode::Left), Some(Key::Left));
        assert_eq!(map_key(KeyCode::Right), Some(Key::Right));
        assert_eq!(map_key(KeyCode::Down), Some(Key::Down));

        assert_eq!(map_key(KeyCode::Char('H')), Some(Key::Left));
        assert_eq!(map_key(KeyCode::Char('d')), Some(Key::Right));
        assert_eq!(map_key(KeyCode::Char('j')), Some(Key::Down));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyCode::Char('x')), Some(Key::RotateCw));
        assert_eq!(map_key(KeyCode::Up), Some(Key::RotateCw));
        assert_eq!(map_key(KeyCode::Char('z')), Some(Key::RotateCcw));
        assert_eq!(map_key(KeyCode::Char('Z')), Some(Key::RotateCcw));
    }

    #[test]
    fn test_drop_and_unbound_keys() {
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(map_key(KeyCode::Char('p')), None);
        assert_eq!(map_key(KeyCode::Enter), None);
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
    }
}
