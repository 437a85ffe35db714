use std::time::Duration;

use tracing::{debug, info, trace};

use crate::command::Command;
use crate::error::TimerError;
use crate::tick::{TickSource, TICK_PERIOD};

pub const DEFAULT_DURATION_SECS: u64 = 60;

/// Externally visible timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
}

impl TimerState {
    /// Commands offered to the user in this state
    pub fn commands(&self) -> &'static [Command] {
        match self {
            TimerState::Idle => &[Command::Start, Command::Settings],
            TimerState::Running => &[Command::Reset, Command::Pause, Command::Stop],
            TimerState::Paused => &[Command::Reset, Command::Resume, Command::Stop],
            TimerState::Expired => &[
                Command::Start,
                Command::Settings,
                Command::Reset,
                Command::Stop,
            ],
        }
    }
}

// Only `Running` owns a tick source, so a live source and the running flag
// can never disagree and there is never more than one source.
#[derive(Debug)]
enum Phase {
    Idle,
    Running(TickSource),
    Paused,
    Expired,
}

/// Plain-data copy of the timer for the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub remaining_secs: u64,
    pub configured_secs: u64,
    pub commands: &'static [Command],
}

/// Countdown state machine.
///
/// All mutation happens through the command methods and [`Timer::advance`];
/// the caller renders from [`Timer::snapshot`] after each one.
#[derive(Debug)]
pub struct Timer {
    configured_secs: u64,
    remaining_secs: u64,
    phase: Phase,
    tick_period: Duration,
    next_source_id: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            configured_secs: DEFAULT_DURATION_SECS,
            remaining_secs: DEFAULT_DURATION_SECS,
            phase: Phase::Idle,
            tick_period: TICK_PERIOD,
            next_source_id: 0,
        }
    }
}

impl Timer {
    pub fn new(configured_secs: u64) -> Result<Self, TimerError> {
        if configured_secs == 0 {
            return Err(TimerError::ZeroDuration);
        }
        Ok(Self {
            configured_secs,
            remaining_secs: configured_secs,
            ..Self::default()
        })
    }

    pub fn state(&self) -> TimerState {
        match self.phase {
            Phase::Idle => TimerState::Idle,
            Phase::Running(_) => TimerState::Running,
            Phase::Paused => TimerState::Paused,
            Phase::Expired => TimerState::Expired,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn configured_secs(&self) -> u64 {
        self.configured_secs
    }

    /// Id of the live tick source, if any
    pub fn tick_source_id(&self) -> Option<u64> {
        match &self.phase {
            Phase::Running(source) => Some(source.id()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let state = self.state();
        TimerSnapshot {
            state,
            remaining_secs: self.remaining_secs,
            configured_secs: self.configured_secs,
            commands: state.commands(),
        }
    }

    /// Dispatch a user command. Returns false for `Settings`, which the
    /// caller handles by opening the editor.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Reset => self.reset_and_restart(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Stop => self.stop(),
            Command::Settings => return false,
        }
        true
    }

    /// Hard reset to the configured duration and begin ticking, from any state
    pub fn start(&mut self) {
        self.remaining_secs = self.configured_secs;
        let source = self.schedule();
        self.transition(Phase::Running(source));
        info!(remaining = self.remaining_secs, "countdown started");
    }

    pub fn reset_and_restart(&mut self) {
        self.transition(Phase::Idle);
        self.remaining_secs = self.configured_secs;
        self.start();
    }

    /// Halt ticking and keep the remaining time. No-op unless running.
    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        let next = if self.remaining_secs == 0 {
            Phase::Expired
        } else if self.remaining_secs == self.configured_secs {
            Phase::Idle
        } else {
            Phase::Paused
        };
        self.transition(next);
        info!(remaining = self.remaining_secs, state = %self.state(), "countdown paused");
    }

    /// Continue from the paused remaining time. No-op unless paused.
    pub fn resume(&mut self) {
        if !matches!(self.phase, Phase::Paused) {
            return;
        }
        let source = self.schedule();
        self.transition(Phase::Running(source));
        info!(remaining = self.remaining_secs, "countdown resumed");
    }

    pub fn stop(&mut self) {
        self.transition(Phase::Idle);
        self.remaining_secs = self.configured_secs;
        info!(remaining = self.remaining_secs, "countdown stopped");
    }

    /// Commit a new configured duration; the countdown resets to it and idles
    pub fn set_duration(&mut self, secs: u64) -> Result<(), TimerError> {
        if secs == 0 {
            return Err(TimerError::ZeroDuration);
        }
        self.transition(Phase::Idle);
        self.configured_secs = secs;
        self.remaining_secs = secs;
        info!(configured = secs, "duration updated");
        Ok(())
    }

    /// Feed wall time to the live tick source, firing the tick handler once per
    /// whole period. Returns the number of fires. Time passed while no source
    /// is live is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let Phase::Running(source) = &mut self.phase else {
            return 0;
        };
        source.accumulate(elapsed);

        let mut fired = 0;
        loop {
            let due = match &mut self.phase {
                Phase::Running(source) => source.take_fire(),
                _ => false,
            };
            if !due {
                break;
            }
            self.on_tick();
            fired += 1;
        }
        fired
    }

    /// Fire the live tick source once, bypassing the clock
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.on_tick();
        true
    }

    fn on_tick(&mut self) {
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            trace!(remaining = self.remaining_secs, "tick");
        } else {
            self.transition(Phase::Expired);
            info!("countdown expired");
        }
    }

    fn schedule(&mut self) -> TickSource {
        self.next_source_id += 1;
        TickSource::new(self.next_source_id, self.tick_period)
    }

    // Replacing the phase drops any previous source before anything else can
    // observe the timer.
    fn transition(&mut self, next: Phase) {
        if let Phase::Running(old) = &self.phase {
            debug!(source = old.id(), "tick source cancelled");
        }
        if let Phase::Running(new) = &next {
            debug!(source = new.id(), period = ?new.period(), "tick source scheduled");
        }
        self.phase = next;
    }
}
