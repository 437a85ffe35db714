use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::error::SettingsError;
use crate::timer::Timer;

/// Delay before the input field grabs focus after the editor opens
pub const FOCUS_DELAY: Duration = Duration::from_millis(500);

/// Parse editor text as a whole number of seconds, strictly positive
pub fn parse_duration(input: &str) -> Result<u64, SettingsError> {
    match input.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(SettingsError::InvalidDuration {
            input: input.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Editing,
    Saved(u64),
    Cancelled,
}

/// Single-field form for entering a new countdown duration
#[derive(Debug, Default)]
pub struct SettingsEditor {
    input: String,
    focused: bool,
    since_open: Duration,
    error: Option<SettingsError>,
}

impl SettingsEditor {
    pub fn open() -> Self {
        debug!("settings editor opened");
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Last rejection, cleared on the next edit
    pub fn error(&self) -> Option<&SettingsError> {
        self.error.as_ref()
    }

    /// Display columns occupied by the current input
    pub fn cursor_offset(&self) -> u16 {
        self.input.width().min(u16::MAX as usize) as u16
    }

    pub fn advance(&mut self, elapsed: Duration) {
        if self.focused {
            return;
        }
        self.since_open = self.since_open.saturating_add(elapsed);
        if self.since_open >= FOCUS_DELAY {
            self.focused = true;
        }
    }

    pub fn push(&mut self, c: char) {
        self.focused = true;
        self.error = None;
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.focused = true;
        self.error = None;
        self.input.pop();
    }

    /// Validate the input and commit it to the timer.
    ///
    /// On rejection the timer is untouched and the editor keeps its text.
    pub fn submit(&mut self, timer: &mut Timer) -> Result<u64, SettingsError> {
        let secs = match parse_duration(&self.input) {
            Ok(secs) => secs,
            Err(e) => {
                debug!(input = %self.input, "rejected duration");
                self.error = Some(e.clone());
                return Err(e);
            }
        };
        if timer.set_duration(secs).is_err() {
            let e = SettingsError::InvalidDuration {
                input: self.input.clone(),
            };
            self.error = Some(e.clone());
            return Err(e);
        }
        info!(secs, "new duration saved");
        Ok(secs)
    }

    pub fn on_key(&mut self, key: KeyEvent, timer: &mut Timer) -> EditorOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return EditorOutcome::Editing;
        }
        match key.code {
            KeyCode::Esc => EditorOutcome::Cancelled,
            KeyCode::Enter => match self.submit(timer) {
                Ok(secs) => EditorOutcome::Saved(secs),
                Err(_) => EditorOutcome::Editing,
            },
            KeyCode::Backspace => {
                self.backspace();
                EditorOutcome::Editing
            }
            KeyCode::Char(c) => {
                self.push(c);
                EditorOutcome::Editing
            }
            _ => EditorOutcome::Editing,
        }
    }
}
