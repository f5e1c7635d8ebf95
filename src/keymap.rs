/// Translation from crossterm key events to the simulation's `Key`.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::entities::Key;

/// Map a key-down to a `Key`, or `None` if the game has no use for it.
///
/// Ctrl-C is the only control chord that means anything; every other
/// Ctrl/Alt combination is dropped so it never reaches the enemies as typing.
pub fn to_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let chorded = modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match code {
        KeyCode::Char('c') | KeyCode::Char('C') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Interrupt)
        }
        KeyCode::Char(_) if chorded => None,
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}
