//! Tick-driven countdown used for rounds, screen holds and LED pulses

use crate::types::TimerStatus;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Idle,
    Running,
    Paused,
    /// Expiry already reported
    Expired,
    Stopped,
}

/// Countdown clock advanced by explicit tick durations.
///
/// Elapsed time only grows while running. Expiry is edge-triggered:
/// [`TimerStatus::Expired`] is returned on exactly one tick, every later
/// tick returns [`TimerStatus::Stopped`].
#[derive(Clone, Debug)]
pub struct RoundTimer {
    duration_ms: u32,
    elapsed_ms: u32,
    phase: Phase,
}

impl RoundTimer {
    pub const fn new() -> Self {
        Self {
            duration_ms: 0,
            elapsed_ms: 0,
            phase: Phase::Idle,
        }
    }

    /// (Re)start the countdown from `duration_ms`
    pub fn start(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
        self.elapsed_ms = 0;
        self.phase = Phase::Running;
    }

    /// Advance by the time since the previous tick
    pub fn tick(&mut self, elapsed_since_last_tick_ms: u32) -> TimerStatus {
        match self.phase {
            Phase::Running => {
                self.elapsed_ms = self
                    .elapsed_ms
                    .saturating_add(elapsed_since_last_tick_ms)
                    .min(self.duration_ms);
                if self.elapsed_ms >= self.duration_ms {
                    self.phase = Phase::Expired;
                    TimerStatus::Expired
                } else {
                    TimerStatus::Running
                }
            }
            Phase::Paused => TimerStatus::Paused,
            Phase::Idle | Phase::Expired | Phase::Stopped => TimerStatus::Stopped,
        }
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// Halt without reporting expiry
    pub fn stop(&mut self) {
        if matches!(self.phase, Phase::Running | Phase::Paused) {
            self.phase = Phase::Stopped;
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn has_expired(&self) -> bool {
        self.phase == Phase::Expired
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.duration_ms - self.elapsed_ms
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new()
    }
}
