use ratatui::Frame;

use crate::{ui::render_settings, App, AppState};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Countdown screen - renders the timer using the App widget
pub struct TimerScreen;

impl Screen for TimerScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Duration editor screen
pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_settings(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Timer => Box::new(TimerScreen),
        AppState::Settings => Box::new(SettingsScreen),
    }
}
