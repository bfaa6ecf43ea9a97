//! Per-channel calibration and wall thresholds
//!
//! Nominally identical emitter/detector pairs differ in gain after assembly.
//! Each channel carries a ratio of the count it should report against a
//! reference wall (nominal) to the count it actually reported (measured).
//! Scaling raw readings by that ratio lets one set of thresholds serve all
//! four channels.
//!
//! # Calibration procedure
//! - Place the robot centred in a cell with walls on both sides and ahead
//! - Read the raw values for each channel
//! - Enter the readings as `measured`, the design target as `nominal`
//!
//! All values here are fixed when the firmware is built.

use crate::hal::SensorChannel;

/// Scale factor for one channel, applied as `raw * nominal / measured`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelCalibration {
    nominal: u16,
    measured: u16,
}

impl ChannelCalibration {
    /// Ratio that leaves readings unchanged
    pub const UNITY: Self = Self::new(1, 1);

    /// Creates a ratio. A zero `measured` count fails const evaluation, so a
    /// bad calibration constant is a build error rather than a runtime trap.
    pub const fn new(nominal: u16, measured: u16) -> Self {
        assert!(measured > 0, "measured calibration count must be non-zero");
        Self { nominal, measured }
    }

    /// Count the channel should report against the reference wall
    pub const fn nominal(&self) -> u16 {
        self.nominal
    }

    /// Count the channel actually reported against the reference wall
    pub const fn measured(&self) -> u16 {
        self.measured
    }

    /// Normalises a raw reading, truncating toward zero
    pub fn apply(&self, raw: u16) -> u16 {
        let scaled = u32::from(raw) * u32::from(self.nominal) / u32::from(self.measured);
        u16::try_from(scaled).unwrap_or(u16::MAX)
    }

    /// Recovers the raw reading a normalised value came from.
    ///
    /// Rounds up so that the result is exact whenever the ratio is at least
    /// one, and off by at most one count while `measured <= 2 * nominal`.
    pub fn invert(&self, normalized: u16) -> u16 {
        if self.nominal == 0 {
            return 0;
        }
        let nominal = u32::from(self.nominal);
        let scaled = (u32::from(normalized) * u32::from(self.measured)).div_ceil(nominal);
        u16::try_from(scaled).unwrap_or(u16::MAX)
    }
}

impl Default for ChannelCalibration {
    fn default() -> Self {
        Self::UNITY
    }
}

/// Ratios for all four channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorCalibration {
    /// Left diagonal
    pub left: ChannelCalibration,
    /// Right diagonal
    pub right: ChannelCalibration,
    /// Left front
    pub front_left: ChannelCalibration,
    /// Right front
    pub front_right: ChannelCalibration,
}

impl SensorCalibration {
    /// Ratio for one channel
    pub fn channel(&self, channel: SensorChannel) -> ChannelCalibration {
        match channel {
            SensorChannel::Left => self.left,
            SensorChannel::Right => self.right,
            SensorChannel::FrontLeft => self.front_left,
            SensorChannel::FrontRight => self.front_right,
        }
    }
}

/// Normalised front reading above which a front emitter sees a wall
pub const DEFAULT_FRONT_THRESHOLD: u16 = 60;

/// Normalised side reading below which a side wall is cleared
pub const DEFAULT_SIDE_THRESHOLD: u16 = 40;

/// Width of the side wall dead band above [`DEFAULT_SIDE_THRESHOLD`]
pub const DEFAULT_SIDE_HYSTERESIS: u16 = 5;

/// Normalised front reading that counts as a hand held over the sensor
pub const DEFAULT_OCCLUDED_LEVEL: u16 = 200;

/// Wall detection thresholds, in normalised counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallThresholds {
    /// Front walls are present strictly above this level
    pub front: u16,
    /// Side walls clear strictly below this level
    pub side: u16,
    /// Side walls set strictly above `side + hysteresis`
    pub hysteresis: u16,
}

impl WallThresholds {
    /// Level a side reading must exceed to set a side wall
    pub fn side_upper(&self) -> u16 {
        self.side.saturating_add(self.hysteresis)
    }
}

impl Default for WallThresholds {
    fn default() -> Self {
        Self {
            front: DEFAULT_FRONT_THRESHOLD,
            side: DEFAULT_SIDE_THRESHOLD,
            hysteresis: DEFAULT_SIDE_HYSTERESIS,
        }
    }
}

/// Everything the acquisition engine needs besides hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Per-channel gain correction
    pub calibration: SensorCalibration,
    /// Wall classification levels
    pub thresholds: WallThresholds,
    /// Front level used by the start gesture occlusion test
    pub occluded_level: u16,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            calibration: SensorCalibration::default(),
            thresholds: WallThresholds::default(),
            occluded_level: DEFAULT_OCCLUDED_LEVEL,
        }
    }
}
