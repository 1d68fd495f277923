// Keyboard shortcuts. Pure lookups from a minifb key (plus modifiers) to an app event,
// so the main loop stays a thin poll-and-dispatch.

use minifb::Key;

use crate::app::{Action, AppEvent, Prompt};
use crate::paint::{ColorChoice, PresetColor, Tool};

/// What a key does when no prompt is open. `Escape` is handled by the caller (quit).
pub fn shortcut(key: Key, ctrl: bool, shift: bool) -> Option<Action> {
    let preset = |i: usize| Some(Action::Color(ColorChoice::Preset(PresetColor::ALL[i])));
    match (key, ctrl) {
        (Key::Z, true) if shift => Some(Action::Redo),
        (Key::Z, true) => Some(Action::Undo),
        (Key::Y, true) => Some(Action::Redo),
        (Key::S, true) => Some(Action::Save),
        (Key::P, false) => Some(Action::SelectTool(Tool::Pen)),
        (Key::E, false) => Some(Action::SelectTool(Tool::Eraser)),
        (Key::H, false) => Some(Action::OpenHexEntry),
        (Key::Delete, _) => Some(Action::Clear),
        (Key::LeftBracket, _) => Some(Action::WidthStep(-1)),
        (Key::RightBracket, _) => Some(Action::WidthStep(1)),
        (Key::Key1, false) => preset(0),
        (Key::Key2, false) => preset(1),
        (Key::Key3, false) => preset(2),
        (Key::Key4, false) => preset(3),
        (Key::Key5, false) => preset(4),
        (Key::Key6, false) => preset(5),
        (Key::Key7, false) => preset(6),
        _ => None,
    }
}

/// What a key does while `prompt` is open.
/// Y/N only answer the clear question; hex entry takes digits and Enter/Esc.
pub fn prompt_key(key: Key, prompt: &Prompt) -> Option<AppEvent> {
    match (key, prompt) {
        (Key::Enter | Key::NumPadEnter, _) => Some(AppEvent::Confirm(true)),
        (Key::Escape, _) => Some(AppEvent::Confirm(false)),
        (Key::Y, Prompt::ConfirmClear) => Some(AppEvent::Confirm(true)),
        (Key::N, Prompt::ConfirmClear) => Some(AppEvent::Confirm(false)),
        (_, Prompt::ConfirmClear) => None,
        (Key::Backspace, Prompt::HexEntry(_)) => Some(AppEvent::HexBackspace),
        (_, Prompt::HexEntry(_)) => hex_digit(key).map(AppEvent::HexInput),
    }
}

fn hex_digit(key: Key) -> Option<char> {
    Some(match key {
        Key::Key0 | Key::NumPad0 => '0',
        Key::Key1 | Key::NumPad1 => '1',
        Key::Key2 | Key::NumPad2 => '2',
        Key::Key3 | Key::NumPad3 => '3',
        Key::Key4 | Key::NumPad4 => '4',
        Key::Key5 | Key::NumPad5 => '5',
        Key::Key6 | Key::NumPad6 => '6',
        Key::Key7 | Key::NumPad7 => '7',
        Key::Key8 | Key::NumPad8 => '8',
        Key::Key9 | Key::NumPad9 => '9',
        Key::A => 'a',
        Key::B => 'b',
        Key::C => 'c',
        Key::D => 'd',
        Key::E => 'e',
        Key::F => 'f',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_redo_chords() {
        assert_eq!(shortcut(Key::Z, true, false), Some(Action::Undo));
        assert_eq!(shortcut(Key::Z, true, true), Some(Action::Redo));
        assert_eq!(shortcut(Key::Y, true, false), Some(Action::Redo));
        assert_eq!(shortcut(Key::Z, false, false), None);
    }

    #[test]
    fn number_row_picks_presets_in_order() {
        assert_eq!(shortcut(Key::Key1, false, false), Some(Action::Color(ColorChoice::Preset(PresetColor::Red))));
        assert_eq!(shortcut(Key::Key7, false, false), Some(Action::Color(ColorChoice::Preset(PresetColor::Black))));
        assert_eq!(shortcut(Key::Key8, false, false), None);
    }

    #[test]
    fn clear_prompt_keys() {
        let clear = Prompt::ConfirmClear;
        assert_eq!(prompt_key(Key::Y, &clear), Some(AppEvent::Confirm(true)));
        assert_eq!(prompt_key(Key::Enter, &clear), Some(AppEvent::Confirm(true)));
        assert_eq!(prompt_key(Key::N, &clear), Some(AppEvent::Confirm(false)));
        assert_eq!(prompt_key(Key::Escape, &clear), Some(AppEvent::Confirm(false)));
        assert_eq!(prompt_key(Key::C, &clear), None);
    }

    #[test]
    fn hex_prompt_keys() {
        let hex = Prompt::HexEntry(String::new());
        assert_eq!(prompt_key(Key::C, &hex), Some(AppEvent::HexInput('c')));
        assert_eq!(prompt_key(Key::NumPad4, &hex), Some(AppEvent::HexInput('4')));
        assert_eq!(prompt_key(Key::Backspace, &hex), Some(AppEvent::HexBackspace));
        assert_eq!(prompt_key(Key::Enter, &hex), Some(AppEvent::Confirm(true)));
        assert_eq!(prompt_key(Key::Escape, &hex), Some(AppEvent::Confirm(false)));
        // only Esc cancels a color entry
        assert_eq!(prompt_key(Key::N, &hex), None);
        assert_eq!(prompt_key(Key::Y, &hex), None);
        assert_eq!(prompt_key(Key::G, &hex), None);
    }
}
