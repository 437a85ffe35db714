use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::warn;

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum TockEvent {
    Key(KeyEvent),
    Resize,
    /// Frame tick carrying the wall time since the previous tick
    Tick(Duration),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait TockEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TockEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TockEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // windows reports releases too; only presses drive commands
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => TockEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => TockEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TockEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TockEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source fed from a channel
pub struct TestEventSource {
    rx: Receiver<TockEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TockEvent>) -> Self {
        Self { rx }
    }
}

impl TockEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TockEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that merges input events with a steady frame tick.
///
/// Ticks are scheduled against a deadline rather than an idle timeout, so a
/// stream of key presses cannot starve the countdown.
pub struct Runner<E: TockEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    last_tick: Instant,
}

impl<E: TockEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            last_tick: Instant::now(),
        }
    }

    /// Blocks until the next event or the next tick deadline, whichever is first
    pub fn step(&mut self) -> TockEvent {
        let deadline = self.last_tick + self.ticker.interval();
        let now = Instant::now();
        if now >= deadline {
            return self.emit_tick(now);
        }

        match self.event_source.recv_timeout(deadline - now) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.emit_tick(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                self.emit_tick(Instant::now())
            }
        }
    }

    fn emit_tick(&mut self, now: Instant) -> TockEvent {
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        TockEvent::Tick(elapsed)
    }
}
