//! Calibrated front sensor tables
//!
//! Recorded by backing the robot away from a wall one step at a time and
//! logging the normalised front readings at each step. Index 0 is touching
//! the wall; each index further is one step back.
//!
//! - `FRONT_SUM_TABLE`: expected `front_left + front_right`
//! - `FRONT_DIFF_TABLE`: expected `front_left - front_right` when square
//!   to the wall
//!
//! The sum falls off with distance. Measurement noise leaves a few small
//! local bumps far from the wall; the first-crossing search below does not
//! depend on strict ordering.

/// Number of calibrated steps
pub const FRONT_TABLE_LEN: usize = 127;

/// Fixed length, read-only lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationTable<const N: usize> {
    entries: [i16; N],
}

impl<const N: usize> CalibrationTable<N> {
    /// Wraps recorded calibration data
    pub const fn new(entries: [i16; N]) -> Self {
        Self { entries }
    }

    /// Number of entries
    pub const fn len(&self) -> usize {
        N
    }

    /// True for a zero-length table
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Bounds-checked entry lookup
    pub fn get(&self, index: usize) -> Option<i16> {
        self.entries.get(index).copied()
    }

    /// First index whose entry `value` has reached, or `N` if none
    pub fn first_reached(&self, value: i32) -> usize {
        self.entries
            .iter()
            .position(|&entry| value >= i32::from(entry))
            .unwrap_or(N)
    }
}

/// Expected front sum at each calibrated step
pub static FRONT_SUM_TABLE: CalibrationTable<FRONT_TABLE_LEN> = CalibrationTable::new([
    485, 485, 484, 483, 481, 479, 477, 475, 473, 470, 467, 465, 462, 460, 456, 454, 450, 447, 445,
    440, 435, 433, 425, 421, 410, 398, 393, 379, 367, 361, 352, 345, 334, 325, 319, 311, 303, 299,
    291, 287, 280, 275, 271, 264, 260, 255, 250, 247, 243, 236, 234, 231, 226, 224, 222, 217, 214,
    210, 208, 206, 202, 200, 199, 196, 193, 192, 190, 186, 185, 184, 181, 179, 178, 176, 175, 173,
    172, 171, 170, 169, 166, 166, 163, 163, 163, 161, 160, 160, 158, 157, 157, 154, 153, 153, 152,
    151, 150, 149, 149, 147, 147, 147, 146, 144, 145, 143, 143, 141, 141, 141, 140, 140, 138, 139,
    138, 138, 136, 137, 135, 135, 134, 134, 133, 133, 133, 131, 133,
]);

/// Expected front difference at each calibrated step
pub static FRONT_DIFF_TABLE: CalibrationTable<FRONT_TABLE_LEN> = CalibrationTable::new([
    -15, -15, -14, -15, -15, -15, -15, -15, -15, -16, -15, -15, -14, -14, -14, -14, -14, -13, -13,
    -12, -11, -11, -9, -7, -4, 0, -1, 1, 1, 1, 2, 1, 2, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 0, 1, 0,
    1, -1, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, 0, 0, 0, -1, 0, -1, 0, 0, 0, -1, 0, -1, 1, 0, 0, -1, 1,
    0, -1, 0, -1, 0, 0, -1, -1, 1, -1, 0, 0, 0, 1, 1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 2, 1, 1,
    1, 1, 1, 1, 2, 0, 2, 1, 2, 2, 2, 1, 3, 1, 2, 0, 1, 3, 1, 3, 1,
]);

/// Distance step for a front sum.
///
/// Returns the smallest index whose calibrated sum the reading has reached.
/// A reading weaker than every entry returns [`FRONT_TABLE_LEN`], meaning no
/// wall within calibrated range.
pub fn front_distance(front_sum: i32) -> usize {
    FRONT_SUM_TABLE.first_reached(front_sum)
}

/// Steering error at a distance step.
///
/// Deviation of the live front difference from the difference expected at
/// `distance`. Outside the table there is nothing to compare against and the
/// correction is 0.
pub fn front_steering(front_diff: i32, distance: i32) -> i32 {
    usize::try_from(distance)
        .ok()
        .and_then(|index| FRONT_DIFF_TABLE.get(index))
        .map_or(0, |expected| front_diff - i32::from(expected))
}
