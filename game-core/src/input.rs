//! Joystick sampling: analog axes and button to navigation events

use crate::hal::{AnalogAxis, DigitalButton, HalError};
use crate::types::{GameConfig, NavigationEvent};

/// Converts raw joystick samples into [`NavigationEvent`]s.
///
/// Polled once per tick. The button reports `Select` on a released-to-pressed
/// edge only and `Hold` once when a press outlasts the long-hold threshold.
/// Directions fire when an axis leaves the deadzone, then auto-repeat while
/// it stays deflected.
#[derive(Clone, Debug)]
pub struct InputReader {
    deadzone: f32,
    long_hold_ticks: u32,
    repeat_delay_ticks: u32,
    repeat_interval_ticks: u32,
    /// Button level at the previous poll, `None` before the first poll
    last_button: Option<bool>,
    held_ticks: u32,
    hold_reported: bool,
    direction: Option<NavigationEvent>,
    direction_ticks: u32,
}

impl InputReader {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_thresholds(
            config.deadzone,
            config.ticks(config.long_hold_ms),
            config.ticks(config.repeat_delay_ms),
            config.ticks(config.repeat_interval_ms),
        )
    }

    /// Build a reader from thresholds expressed in ticks
    pub fn with_thresholds(
        deadzone: f32,
        long_hold_ticks: u32,
        repeat_delay_ticks: u32,
        repeat_interval_ticks: u32,
    ) -> Self {
        Self {
            deadzone,
            long_hold_ticks: long_hold_ticks.max(1),
            repeat_delay_ticks: repeat_delay_ticks.max(1),
            repeat_interval_ticks: repeat_interval_ticks.max(1),
            last_button: None,
            held_ticks: 0,
            hold_reported: false,
            direction: None,
            direction_ticks: 0,
        }
    }

    /// Read the joystick and produce this tick's event
    pub fn poll<X, Y, B>(&mut self, x: &mut X, y: &mut Y, button: &mut B) -> Result<NavigationEvent, HalError>
    where
        X: AnalogAxis,
        Y: AnalogAxis,
        B: DigitalButton,
    {
        let x = x.read()?;
        let y = y.read()?;
        let pressed = button.read()?;
        Ok(self.sample(x, y, pressed))
    }

    /// Feed one set of raw samples
    pub fn sample(&mut self, x: f32, y: f32, pressed: bool) -> NavigationEvent {
        let direction = self.direction_event(self.classify(x, y));
        let button = self.button_event(pressed);
        // Button wins when both fire on the same tick
        button.or(direction).unwrap_or(NavigationEvent::None)
    }

    /// Returns true while the button is down
    pub fn button_held(&self) -> bool {
        self.last_button == Some(true)
    }

    /// Forget edge history; the next poll only records levels
    pub fn reset(&mut self) {
        self.last_button = None;
        self.held_ticks = 0;
        self.hold_reported = false;
        self.direction = None;
        self.direction_ticks = 0;
    }

    fn classify(&self, x: f32, y: f32) -> Option<NavigationEvent> {
        let (ax, ay) = (x.abs(), y.abs());
        let horizontal = ax > self.deadzone;
        let vertical = ay > self.deadzone;
        let use_horizontal = match (horizontal, vertical) {
            (false, false) => return None,
            (true, false) => true,
            (false, true) => false,
            (true, true) => ax >= ay,
        };
        Some(match (use_horizontal, x > 0.0, y > 0.0) {
            (true, true, _) => NavigationEvent::Right,
            (true, false, _) => NavigationEvent::Left,
            (false, _, true) => NavigationEvent::Up,
            (false, _, false) => NavigationEvent::Down,
        })
    }

    fn direction_event(&mut self, direction: Option<NavigationEvent>) -> Option<NavigationEvent> {
        match direction {
            None => {
                self.direction = None;
                self.direction_ticks = 0;
                None
            }
            Some(dir) if self.direction != Some(dir) => {
                self.direction = Some(dir);
                self.direction_ticks = 0;
                Some(dir)
            }
            Some(dir) => {
                self.direction_ticks = self.direction_ticks.saturating_add(1);
                let past_delay = self.direction_ticks.checked_sub(self.repeat_delay_ticks)?;
                if past_delay % self.repeat_interval_ticks == 0 {
                    Some(dir)
                } else {
                    None
                }
            }
        }
    }

    fn button_event(&mut self, pressed: bool) -> Option<NavigationEvent> {
        let previous = self.last_button.replace(pressed);
        match (previous, pressed) {
            (Some(false), true) => {
                self.held_ticks = 0;
                self.hold_reported = false;
                Some(NavigationEvent::Select)
            }
            (Some(true), true) => {
                self.held_ticks = self.held_ticks.saturating_add(1);
                if !self.hold_reported && self.held_ticks >= self.long_hold_ticks {
                    self.hold_reported = true;
                    Some(NavigationEvent::Hold)
                } else {
                    None
                }
            }
            // First sample already pressed: wait for a release before reporting
            (None, true) => {
                self.hold_reported = true;
                None
            }
            (_, false) => {
                self.held_ticks = 0;
                self.hold_reported = false;
                None
            }
        }
    }
}
