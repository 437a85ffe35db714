pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tock::{
    command::Command,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, Ticker, TockEvent, TockEventSource},
    settings::{EditorOutcome, SettingsEditor},
    timer::Timer,
};
use tracing::{info, warn};

use crate::ui::screen::{current_screen, Screen};

/// minimal countdown timer tui
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A single-screen countdown timer: start, pause, resume, reset and stop a countdown, and edit its duration inline."
)]
pub struct Cli {
    /// countdown duration in seconds (overrides the config file)
    #[clap(short = 'd', long, value_parser = clap::value_parser!(u64).range(1..))]
    duration: Option<u64>,

    /// frame tick interval in milliseconds
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    tick_rate_ms: Option<u64>,

    /// read configuration from this file instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective configuration to the config file and exit
    #[clap(long)]
    init_config: bool,

    /// append logs to this file (also settable via TOCK_LOG)
    #[clap(long)]
    log: Option<PathBuf>,
}

impl Cli {
    /// Layer CLI overrides on top of the file configuration
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(secs) = self.duration {
            config.default_duration_secs = secs;
        }
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Timer,
    Settings,
}

#[derive(Debug, PartialEq)]
enum ExitType {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub timer: Timer,
    pub editor: SettingsEditor,
    pub state: AppState,
}

impl App {
    pub fn new(timer: Timer) -> Self {
        Self {
            timer,
            editor: SettingsEditor::default(),
            state: AppState::Timer,
        }
    }

    fn open_settings(&mut self) {
        self.editor = SettingsEditor::open();
        self.state = AppState::Settings;
    }

    fn on_key(&mut self, key: KeyEvent) -> ExitType {
        // ctrl+c to quit from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return ExitType::Quit;
        }

        match self.state {
            AppState::Settings => match self.editor.on_key(key, &mut self.timer) {
                EditorOutcome::Editing => {}
                EditorOutcome::Saved(_) | EditorOutcome::Cancelled => {
                    self.state = AppState::Timer;
                }
            },
            AppState::Timer => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    return ExitType::Quit;
                }
                if let Some(cmd) = Command::from_key(&key, self.timer.state().commands()) {
                    if !self.timer.apply(cmd) {
                        self.open_settings();
                    }
                }
            }
        }
        ExitType::Continue
    }

    /// Returns true when something visible changed
    fn on_tick(&mut self, elapsed: Duration) -> bool {
        let fired = self.timer.advance(elapsed);
        if self.state == AppState::Settings {
            let was_focused = self.editor.is_focused();
            self.editor.advance(elapsed);
            return fired > 0 || was_focused != self.editor.is_focused();
        }
        fired > 0
    }
}

fn load_config(store: &FileConfigStore) -> Config {
    match store.load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "using default configuration");
            Config::default()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init_tracing(logging::log_path(cli.log.as_deref()));

    let store = cli.config_store();
    let config = cli.apply_to(load_config(&store));

    if cli.init_config {
        store.save(&config)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let timer = Timer::new(config.default_duration_secs)?;
    info!(
        duration = config.default_duration_secs,
        tick_rate_ms = config.tick_rate_ms,
        "starting tock"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(timer);
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(config.tick_rate()),
    );
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: TockEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        let redraw = match runner.step() {
            TockEvent::Tick(elapsed) => app.on_tick(elapsed),
            TockEvent::Resize => true,
            TockEvent::Key(key) => {
                if app.on_key(key) == ExitType::Quit {
                    break;
                }
                true
            }
        };
        if redraw {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    info!("exiting");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    current_screen(&app.state).render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;
    use tock::runtime::TestEventSource;
    use tock::timer::TimerState;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["tock"]);

        assert_eq!(cli.duration, None);
        assert_eq!(cli.tick_rate_ms, None);
        assert_eq!(cli.config, None);
        assert!(!cli.init_config);
        assert_eq!(cli.log, None);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["tock", "-d", "90", "--tick-rate-ms", "250"]);
        let config = cli.apply_to(Config::default());
        assert_eq!(config.default_duration_secs, 90);
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn test_cli_keeps_file_values_without_flags() {
        let cli = Cli::parse_from(["tock"]);
        let file = Config {
            default_duration_secs: 45,
            tick_rate_ms: 20,
        };
        assert_eq!(cli.apply_to(file.clone()), file);
    }

    #[test]
    fn test_cli_rejects_zero_duration() {
        let err = Cli::try_parse_from(["tock", "--duration", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_rejects_non_numeric_duration() {
        assert!(Cli::try_parse_from(["tock", "-d", "soon"]).is_err());
    }

    #[test]
    fn test_app_starts_on_timer_screen() {
        let app = App::new(Timer::default());
        assert_eq!(app.state, AppState::Timer);
        assert_eq!(app.timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_key_flow_start_pause_resume_stop() {
        let mut app = App::new(Timer::default());

        app.on_key(key('s'));
        assert_eq!(app.timer.state(), TimerState::Running);
        app.on_tick(Duration::from_secs(2));
        assert_eq!(app.timer.remaining_secs(), 58);

        app.on_key(key('p'));
        assert_eq!(app.timer.state(), TimerState::Paused);
        app.on_key(key('p'));
        assert_eq!(app.timer.state(), TimerState::Running);

        app.on_key(key('x'));
        assert_eq!(app.timer.state(), TimerState::Idle);
        assert_eq!(app.timer.remaining_secs(), 60);
    }

    #[test]
    fn test_unavailable_keys_are_ignored() {
        let mut app = App::new(Timer::default());
        // pause, reset and stop are not offered while idle
        for c in ['p', 'r', 'x'] {
            app.on_key(key(c));
            assert_eq!(app.timer.state(), TimerState::Idle);
        }

        app.on_key(key('s'));
        app.on_key(key('e'));
        assert_eq!(app.state, AppState::Timer);
    }

    #[test]
    fn test_settings_save_returns_to_timer() {
        let mut app = App::new(Timer::default());
        app.on_key(key('e'));
        assert_eq!(app.state, AppState::Settings);

        // 'q' is text while editing, not quit
        assert_eq!(app.on_key(key('q')), ExitType::Continue);
        app.on_key(code(KeyCode::Enter));
        assert_eq!(app.state, AppState::Settings);

        app.on_key(code(KeyCode::Backspace));
        app.on_key(key('3'));
        app.on_key(key('0'));
        app.on_key(code(KeyCode::Enter));

        assert_eq!(app.state, AppState::Timer);
        assert_eq!(app.timer.configured_secs(), 30);
        assert_eq!(app.timer.remaining_secs(), 30);
    }

    #[test]
    fn test_settings_escape_cancels() {
        let mut app = App::new(Timer::default());
        app.on_key(key('e'));
        app.on_key(key('5'));
        assert_eq!(app.on_key(code(KeyCode::Esc)), ExitType::Continue);
        assert_eq!(app.state, AppState::Timer);
        assert_eq!(app.timer.configured_secs(), 60);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(Timer::default());
        assert_eq!(app.on_key(code(KeyCode::Esc)), ExitType::Quit);
        assert_eq!(app.on_key(key('q')), ExitType::Quit);

        app.on_key(key('e'));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.on_key(ctrl_c), ExitType::Quit);
    }

    #[test]
    fn test_on_tick_reports_focus_change() {
        let mut app = App::new(Timer::default());
        app.on_key(key('e'));
        assert!(!app.on_tick(Duration::from_millis(100)));
        assert!(app.on_tick(Duration::from_millis(400)));
        assert!(app.editor.is_focused());
    }

    #[test]
    fn test_ui_function_timer_state() {
        let mut app = App::new(Timer::new(42).unwrap());
        app.on_key(key('s'));

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("42 seconds"));
        assert!(content.contains("(p) Pause"));
        assert!(!content.contains("(s) Start"));
    }

    #[test]
    fn test_ui_function_settings_state() {
        let mut app = App::new(Timer::default());
        app.on_key(key('e'));

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Set New Timer Value"));
        assert!(content.contains("Enter new time in seconds"));

        app.on_key(key('x'));
        app.on_key(code(KeyCode::Enter));
        terminal.draw(|f| ui(&app, f)).unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("not a positive whole number"));
    }

    #[test]
    fn test_start_tui_runs_until_quit() {
        let (tx, rx) = mpsc::channel();
        tx.send(TockEvent::Key(key('s'))).unwrap();
        tx.send(TockEvent::Resize).unwrap();
        tx.send(TockEvent::Key(key('q'))).unwrap();

        let mut runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_secs(60)),
        );
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let mut app = App::new(Timer::new(5).unwrap());

        start_tui(&mut terminal, &mut app, &mut runner).unwrap();

        assert_eq!(app.timer.state(), TimerState::Running);
        assert_eq!(app.timer.remaining_secs(), 5);
        assert!(buffer_text(&terminal).contains("5 seconds"));
    }
}
