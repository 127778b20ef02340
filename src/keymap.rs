use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Command;
use crate::ui::tabs::ALL_TABS;

/// Translate a key press into a controller command. While the search box is
/// open every key belongs to it, except Ctrl+C.
pub fn command_for_key(key: KeyEvent, search_open: bool) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    if search_open {
        return Some(Command::SearchKey(key));
    }

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch as usize - '1' as usize;
            let tab = ALL_TABS.get(index)?;
            Command::SwitchTab(tab.id.to_string())
        }
        KeyCode::Tab => Command::NextTab,
        KeyCode::BackTab => Command::PrevTab,
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
            Command::SelectNext
        }
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
            Command::SelectPrev
        }
        KeyCode::Enter => Command::OpenSelected,
        KeyCode::Char(' ') | KeyCode::Char('x') => Command::ToggleSelected,
        KeyCode::Char('t') => Command::ToggleTheme,
        KeyCode::Char('/') => Command::OpenSearch,
        _ => return None,
    };
    Some(command)
}
