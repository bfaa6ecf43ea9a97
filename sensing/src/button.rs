//! Button debouncing
//!
//! A four state machine sampled from a fixed tick. Every `debounce_ticks`
//! samples form a window; the state moves once per window and only when
//! every sample in the window agreed.
//!
//! ```text
//!             active            active
//! Released ----------> Pressing ---------> Pressed
//!    ^  ^                 |                 |  ^
//!    |  +-----inactive----+        inactive |  | active
//!    |                                      v  |
//!    +--------------inactive-------------- Releasing
//! ```
//!
//! Reaching `Pressed` takes two agreeing windows, so does getting back to
//! `Released`. At 250Hz with 3 ticks per window that is 24ms either way.
//!
//! `is_pressed()` and `is_released()` are not opposites. Both are false
//! while the button is `Pressing` or `Releasing`, do not substitute one for
//! the negation of the other.

use embedded_hal::digital::InputPin;

use crate::hal::ActiveLevel;

/// Samples per debounce window
pub const DEFAULT_DEBOUNCE_TICKS: u8 = 3;

/// Debounced button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Stable, not pressed
    #[default]
    Released,
    /// One window active, not yet accepted
    Pressing,
    /// Stable, pressed
    Pressed,
    /// One window inactive, not yet accepted
    Releasing,
}

impl ButtonState {
    /// State after one agreeing window
    pub fn next(self, active: bool) -> ButtonState {
        match (self, active) {
            (ButtonState::Released, true) => ButtonState::Pressing,
            (ButtonState::Released, false) => ButtonState::Released,
            (ButtonState::Pressing, true) => ButtonState::Pressed,
            (ButtonState::Pressing, false) => ButtonState::Released,
            (ButtonState::Pressed, true) => ButtonState::Pressed,
            (ButtonState::Pressed, false) => ButtonState::Releasing,
            (ButtonState::Releasing, true) => ButtonState::Pressed,
            (ButtonState::Releasing, false) => ButtonState::Released,
        }
    }
}

/// Tick driven debounce state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    state: ButtonState,
    debounce_ticks: u8,
    ticks: u8,
    active_ticks: u8,
}

impl Debouncer {
    /// Starts released. A window shorter than one tick is treated as one.
    pub const fn new(debounce_ticks: u8) -> Self {
        Self {
            state: ButtonState::Released,
            debounce_ticks: if debounce_ticks == 0 { 1 } else { debounce_ticks },
            ticks: 0,
            active_ticks: 0,
        }
    }

    /// Feeds one pin sample; returns the new state if this tick changed it
    pub fn tick(&mut self, active: bool) -> Option<ButtonState> {
        self.ticks += 1;
        if active {
            self.active_ticks += 1;
        }
        if self.ticks < self.debounce_ticks {
            return None;
        }

        let window = if self.active_ticks == self.debounce_ticks {
            Some(true)
        } else if self.active_ticks == 0 {
            Some(false)
        } else {
            None
        };
        self.ticks = 0;
        self.active_ticks = 0;

        let next = self.state.next(window?);
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }

    /// Current state
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// True only in the stable pressed state
    pub fn is_pressed(&self) -> bool {
        self.state == ButtonState::Pressed
    }

    /// True only in the stable released state
    pub fn is_released(&self) -> bool {
        self.state == ButtonState::Released
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_TICKS)
    }
}

/// A debouncer bound to its input pin
pub struct DebouncedButton<P> {
    pin: P,
    level: ActiveLevel,
    debouncer: Debouncer,
}

impl<P: InputPin> DebouncedButton<P> {
    /// Wraps a configured input pin
    pub fn new(pin: P, level: ActiveLevel, debounce_ticks: u8) -> Self {
        Self {
            pin,
            level,
            debouncer: Debouncer::new(debounce_ticks),
        }
    }

    /// Instantaneous pin reading, a read error counts as inactive
    pub fn is_active(&mut self) -> bool {
        let reading = match self.level {
            ActiveLevel::Low => self.pin.is_low(),
            ActiveLevel::High => self.pin.is_high(),
        };
        reading.unwrap_or(false)
    }

    /// Periodic sampler, call once per debounce tick
    pub fn sample(&mut self) -> Option<ButtonState> {
        let active = self.is_active();
        self.debouncer.tick(active)
    }

    /// Current debounced state
    pub fn state(&self) -> ButtonState {
        self.debouncer.state()
    }

    /// See [`Debouncer::is_pressed`]
    pub fn is_pressed(&self) -> bool {
        self.debouncer.is_pressed()
    }

    /// See [`Debouncer::is_released`]
    pub fn is_released(&self) -> bool {
        self.debouncer.is_released()
    }

    /// Gives the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum ClickPhase {
    #[default]
    AwaitPress,
    AwaitRelease,
}

/// Detects one complete press and release.
///
/// Feed it every debounced state as it is observed. It reports a click the
/// first time it sees `Released` after having seen `Pressed`, then rearms.
/// Transitional states are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickTracker {
    phase: ClickPhase,
}

impl ClickTracker {
    /// Armed, waiting for a press
    pub const fn new() -> Self {
        Self {
            phase: ClickPhase::AwaitPress,
        }
    }

    /// Observes a state; true when a click just completed
    pub fn observe(&mut self, state: ButtonState) -> bool {
        match (self.phase, state) {
            (ClickPhase::AwaitPress, ButtonState::Pressed) => {
                self.phase = ClickPhase::AwaitRelease;
                false
            }
            (ClickPhase::AwaitRelease, ButtonState::Released) => {
                self.phase = ClickPhase::AwaitPress;
                true
            }
            _ => false,
        }
    }

    /// True between the press and the release
    pub fn is_held(&self) -> bool {
        self.phase == ClickPhase::AwaitRelease
    }
}
