//! Start selection gesture
//!
//! Before a run the operator picks a mode without touching the console:
//! hold a hand over the left front sensor, the right front sensor, or press
//! the button. The caller polls at a fixed period (10ms on the robot).
//!
//! - Button pressed: selected immediately, wins over any occlusion
//! - One side occluded for more than `dwell_ticks` consecutive polls:
//!   that side is selected
//! - A side whose occlusion drops starts counting from zero again
//!
//! Nothing carries over between selections.

/// Polls a side must stay occluded, exclusive
pub const DEFAULT_DWELL_TICKS: u16 = 5;

/// Outcome of the start gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartChoice {
    /// Left front sensor was held
    Left,
    /// Right front sensor was held
    Right,
    /// Button was pressed
    Button,
}

/// Dwell time vote between the two front sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StartGesture {
    dwell_ticks: u16,
    left: u16,
    right: u16,
}

impl StartGesture {
    /// New vote with no dwell accumulated
    pub const fn new(dwell_ticks: u16) -> Self {
        Self {
            dwell_ticks,
            left: 0,
            right: 0,
        }
    }

    /// One poll. Returns the choice once made and resets for the next run.
    pub fn poll(
        &mut self,
        occluded_left: bool,
        occluded_right: bool,
        pressed: bool,
    ) -> Option<StartChoice> {
        if pressed {
            self.reset();
            return Some(StartChoice::Button);
        }

        self.left = if occluded_left { self.left.saturating_add(1) } else { 0 };
        self.right = if occluded_right { self.right.saturating_add(1) } else { 0 };

        let choice = if self.right > self.dwell_ticks {
            Some(StartChoice::Right)
        } else if self.left > self.dwell_ticks {
            Some(StartChoice::Left)
        } else {
            None
        };
        if choice.is_some() {
            self.reset();
        }
        choice
    }

    /// Consecutive polls the left side has been occluded
    pub fn left_dwell(&self) -> u16 {
        self.left
    }

    /// Consecutive polls the right side has been occluded
    pub fn right_dwell(&self) -> u16 {
        self.right
    }

    /// Drops accumulated dwell
    pub fn reset(&mut self) {
        self.left = 0;
        self.right = 0;
    }
}

impl Default for StartGesture {
    fn default() -> Self {
        Self::new(DEFAULT_DWELL_TICKS)
    }
}
