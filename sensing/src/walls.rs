//! Wall classification
//!
//! # Front walls
//! - Each front emitter votes independently against one threshold
//! - A front wall needs both votes
//! - No hysteresis, the two emitters together are stable enough
//!
//! # Side walls
//! - Hysteresis band between `side` and `side + hysteresis`
//! - A set flag clears only strictly below `side`
//! - A clear flag sets only strictly above `side + hysteresis`
//! - Readings inside the band keep the previous decision, which gives
//!   clean edges as the robot passes wall posts

use crate::calibration::WallThresholds;
use crate::sensors::ChannelValues;

/// Latching side wall detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SideWall {
    present: bool,
}

impl SideWall {
    /// Starts with no wall seen
    pub const fn new() -> Self {
        Self { present: false }
    }

    /// Feeds one normalised reading and returns the resulting decision
    pub fn update(&mut self, reading: u16, thresholds: &WallThresholds) -> bool {
        if reading < thresholds.side {
            self.present = false;
        } else if reading > thresholds.side_upper() {
            self.present = true;
        }
        self.present
    }

    /// Current decision
    pub fn is_present(&self) -> bool {
        self.present
    }
}

/// Wall flags derived from one acquisition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallState {
    /// Left front emitter sees a wall
    pub front_left: bool,
    /// Right front emitter sees a wall
    pub front_right: bool,
    /// Both front emitters see a wall
    pub front: bool,
    /// Wall on the left
    pub left: bool,
    /// Wall on the right
    pub right: bool,
}

impl WallState {
    /// No walls anywhere
    pub const NONE: Self = Self {
        front_left: false,
        front_right: false,
        front: false,
        left: false,
        right: false,
    };

    /// Classifies one cycle's normalised readings.
    ///
    /// `previous` supplies the side wall decisions the hysteresis band holds
    /// on to; front flags ignore it.
    pub fn classify(
        previous: &WallState,
        normalized: &ChannelValues,
        thresholds: &WallThresholds,
    ) -> WallState {
        let front_left = normalized.front_left > thresholds.front;
        let front_right = normalized.front_right > thresholds.front;

        let mut left = SideWall {
            present: previous.left,
        };
        let mut right = SideWall {
            present: previous.right,
        };

        WallState {
            front_left,
            front_right,
            front: front_left && front_right,
            left: left.update(normalized.left, thresholds),
            right: right.update(normalized.right, thresholds),
        }
    }
}
