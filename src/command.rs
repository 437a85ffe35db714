use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;

/// A user action on the timer screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Command {
    Start,
    Settings,
    Reset,
    Pause,
    Resume,
    Stop,
}

impl Command {
    pub fn key(&self) -> char {
        match self {
            Command::Start => 's',
            Command::Settings => 'e',
            Command::Reset => 'r',
            Command::Pause | Command::Resume => 'p',
            Command::Stop => 'x',
        }
    }

    /// Resolve a key press against the commands currently on offer.
    ///
    /// Pause and Resume share a key, so the lookup has to be scoped to what the
    /// current state actually allows.
    pub fn from_key(key: &KeyEvent, available: &[Command]) -> Option<Command> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match key.code {
            KeyCode::Char(c) => {
                let c = c.to_ascii_lowercase();
                available.iter().copied().find(|cmd| cmd.key() == c)
            }
            _ => None,
        }
    }
}

/// Legend line such as "(s) Start   (e) Settings   (q) Quit"
pub fn hint_line(available: &[Command]) -> String {
    available
        .iter()
        .map(|cmd| format!("({}) {}", cmd.key(), cmd))
        .chain(std::iter::once("(q) Quit".to_string()))
        .join("   ")
}
