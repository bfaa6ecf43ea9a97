//! IR wall sensor acquisition
//!
//! Four emitter/detector pairs: two facing forward, two angled to the sides.
//! Every update measures each detector twice, once dark and once lit, and
//! keeps only the reflected part of the light.
//!
//! # Acquisition cycle
//! 1. All emitters off, sample all four detectors (ambient baseline)
//! 2. Front emitters on, settle 50µs, sample front detectors, emitters off
//! 3. Side emitters on, settle 50µs, sample side detectors, emitters off
//! 4. `raw = max(lit - dark, 0)`
//! 5. Normalise with the per-channel calibration ratio
//! 6. Derive front sum and difference
//! 7. Classify walls
//!
//! Emitters are lit in pairs so a lit side emitter never leaks into a front
//! detector and vice versa. Ambient light is taken as constant over the
//! ~100µs cycle, so one dark sample per channel serves both lit phases.
//!
//! # Timing
//! - Designed to run from a 4kHz tick
//! - The two settle delays are busy-waits and must not be shortened or
//!   made asynchronous; the lit sample is only valid once the emitter and
//!   detector have settled
//! - Each update publishes a complete [`SensorReadings`] at the end, readers
//!   never see half a cycle

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::calibration::{SensorCalibration, SensorConfig};
use crate::hal::{AnalogSource, SensorChannel};
use crate::table;
use crate::walls::WallState;

/// Emitter and detector rise time before a lit sample is valid (µs)
pub const EMITTER_SETTLE_US: u32 = 50;

/// One value per detector channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelValues {
    /// Left diagonal
    pub left: u16,
    /// Right diagonal
    pub right: u16,
    /// Left front
    pub front_left: u16,
    /// Right front
    pub front_right: u16,
}

impl ChannelValues {
    /// All channels reading zero
    pub const ZERO: Self = Self {
        left: 0,
        right: 0,
        front_left: 0,
        front_right: 0,
    };

    /// Value for one channel
    pub fn get(&self, channel: SensorChannel) -> u16 {
        match channel {
            SensorChannel::Left => self.left,
            SensorChannel::Right => self.right,
            SensorChannel::FrontLeft => self.front_left,
            SensorChannel::FrontRight => self.front_right,
        }
    }

    /// Sets the value for one channel
    pub fn set(&mut self, channel: SensorChannel, value: u16) {
        match channel {
            SensorChannel::Left => self.left = value,
            SensorChannel::Right => self.right = value,
            SensorChannel::FrontLeft => self.front_left = value,
            SensorChannel::FrontRight => self.front_right = value,
        }
    }

    /// Reflected light from a lit and a dark sample, never negative
    pub fn reflected(lit: &ChannelValues, dark: &ChannelValues) -> ChannelValues {
        let mut raw = ChannelValues::default();
        for channel in SensorChannel::ALL {
            raw.set(channel, lit.get(channel).saturating_sub(dark.get(channel)));
        }
        raw
    }

    /// Applies per-channel calibration
    pub fn normalized(&self, calibration: &SensorCalibration) -> ChannelValues {
        let mut normalized = ChannelValues::default();
        for channel in SensorChannel::ALL {
            normalized.set(channel, calibration.channel(channel).apply(self.get(channel)));
        }
        normalized
    }

    /// Undoes [`ChannelValues::normalized`], up to truncation
    pub fn denormalized(&self, calibration: &SensorCalibration) -> ChannelValues {
        let mut raw = ChannelValues::default();
        for channel in SensorChannel::ALL {
            raw.set(channel, calibration.channel(channel).invert(self.get(channel)));
        }
        raw
    }
}

/// Everything one acquisition cycle produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReadings {
    /// Reflected light per channel, before calibration
    pub raw: ChannelValues,
    /// Calibrated readings
    pub normalized: ChannelValues,
    /// `front_left + front_right`, normalised
    pub front_sum: i32,
    /// `front_left - front_right`, normalised
    pub front_diff: i32,
    /// Wall decisions
    pub walls: WallState,
}

impl SensorReadings {
    /// Readings before the first cycle: no light, no walls
    pub const EMPTY: Self = Self {
        raw: ChannelValues::ZERO,
        normalized: ChannelValues::ZERO,
        front_sum: 0,
        front_diff: 0,
        walls: WallState::NONE,
    };

    /// Derives aggregates and walls from raw readings.
    ///
    /// `previous` supplies the side wall state held by the hysteresis band.
    pub fn from_raw(raw: ChannelValues, previous: &WallState, config: &SensorConfig) -> Self {
        let normalized = raw.normalized(&config.calibration);
        let front_left = i32::from(normalized.front_left);
        let front_right = i32::from(normalized.front_right);
        Self {
            raw,
            normalized,
            front_sum: front_left + front_right,
            front_diff: front_left - front_right,
            walls: WallState::classify(previous, &normalized, &config.thresholds),
        }
    }

    /// Calibrated distance step to the wall ahead, see [`table::front_distance`]
    pub fn front_distance(&self) -> usize {
        table::front_distance(self.front_sum)
    }

    /// Steering error at `distance`, see [`table::front_steering`]
    pub fn front_steering(&self, distance: i32) -> i32 {
        table::front_steering(self.front_diff, distance)
    }

    /// Only the left front detector is covered
    pub fn occluded_left(&self, level: u16) -> bool {
        self.normalized.front_left > level && self.normalized.front_right < level
    }

    /// Only the right front detector is covered
    pub fn occluded_right(&self, level: u16) -> bool {
        self.normalized.front_left < level && self.normalized.front_right > level
    }
}

/// The four emitter outputs
pub struct Emitters<P> {
    /// Left front emitter
    pub front_left: P,
    /// Right front emitter
    pub front_right: P,
    /// Left diagonal emitter
    pub left: P,
    /// Right diagonal emitter
    pub right: P,
}

impl<P: OutputPin> Emitters<P> {
    fn set_front(&mut self, on: bool) {
        // a stuck emitter shows up as a dead channel, nothing to do here
        let _ = self.front_right.set_state(on.into());
        let _ = self.front_left.set_state(on.into());
    }

    fn set_side(&mut self, on: bool) {
        let _ = self.right.set_state(on.into());
        let _ = self.left.set_state(on.into());
    }

    fn all_off(&mut self) {
        self.set_front(false);
        self.set_side(false);
    }
}

/// Acquisition engine owning the IR sensor hardware
pub struct IrSensors<A, P, D> {
    adc: A,
    emitters: Emitters<P>,
    delay: D,
    config: SensorConfig,
    readings: SensorReadings,
}

impl<A, P, D> IrSensors<A, P, D>
where
    A: AnalogSource,
    P: OutputPin,
    D: DelayNs,
{
    /// Takes the hardware and switches every emitter off
    pub fn new(adc: A, emitters: Emitters<P>, delay: D, config: SensorConfig) -> Self {
        let mut sensors = Self {
            adc,
            emitters,
            delay,
            config,
            readings: SensorReadings::default(),
        };
        sensors.emitters.all_off();
        sensors
    }

    /// Runs one acquisition cycle and returns its readings
    pub fn update(&mut self) -> SensorReadings {
        let mut dark = ChannelValues::default();
        for channel in SensorChannel::ALL {
            dark.set(channel, self.adc.read(channel));
        }

        let mut lit = ChannelValues::default();
        self.emitters.set_front(true);
        self.delay.delay_us(EMITTER_SETTLE_US);
        lit.front_left = self.adc.read(SensorChannel::FrontLeft);
        lit.front_right = self.adc.read(SensorChannel::FrontRight);
        self.emitters.set_front(false);

        self.emitters.set_side(true);
        self.delay.delay_us(EMITTER_SETTLE_US);
        lit.left = self.adc.read(SensorChannel::Left);
        lit.right = self.adc.read(SensorChannel::Right);
        self.emitters.set_side(false);

        let raw = ChannelValues::reflected(&lit, &dark);
        self.readings = SensorReadings::from_raw(raw, &self.readings.walls, &self.config);
        self.readings
    }

    /// Readings from the last completed cycle
    pub fn readings(&self) -> SensorReadings {
        self.readings
    }

    /// Distance step from the last completed cycle
    pub fn front_distance(&self) -> usize {
        self.readings.front_distance()
    }

    /// Steering error from the last completed cycle
    pub fn front_steering(&self, distance: i32) -> i32 {
        self.readings.front_steering(distance)
    }

    /// Gives the hardware back, emitters off
    pub fn release(mut self) -> (A, Emitters<P>, D) {
        self.emitters.all_off();
        (self.adc, self.emitters, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{ChannelCalibration, WallThresholds};

    #[test]
    fn reflected_clamps_at_zero() {
        let lit = ChannelValues {
            left: 100,
            right: 5,
            front_left: 300,
            front_right: 0,
        };
        let dark = ChannelValues {
            left: 40,
            right: 20,
            front_left: 300,
            front_right: 12,
        };
        let raw = ChannelValues::reflected(&lit, &dark);
        assert_eq!(
            raw,
            ChannelValues {
                left: 60,
                right: 0,
                front_left: 0,
                front_right: 0,
            }
        );
    }

    #[test]
    fn from_raw_derives_front_aggregates() {
        let config = SensorConfig {
            calibration: SensorCalibration {
                front_left: ChannelCalibration::new(80, 100),
                ..SensorCalibration::default()
            },
            ..SensorConfig::default()
        };
        let raw = ChannelValues {
            left: 0,
            right: 0,
            front_left: 100,
            front_right: 120,
        };
        let readings = SensorReadings::from_raw(raw, &WallState::default(), &config);
        assert_eq!(readings.normalized.front_left, 80);
        assert_eq!(readings.normalized.front_right, 120);
        assert_eq!(readings.front_sum, 200);
        assert_eq!(readings.front_diff, -40);
    }

    #[test]
    fn occlusion_needs_one_side_only() {
        let config = SensorConfig {
            thresholds: WallThresholds::default(),
            occluded_level: 200,
            ..SensorConfig::default()
        };
        let mut raw = ChannelValues {
            front_left: 250,
            front_right: 50,
            ..ChannelValues::default()
        };
        let readings = SensorReadings::from_raw(raw, &WallState::default(), &config);
        assert!(readings.occluded_left(config.occluded_level));
        assert!(!readings.occluded_right(config.occluded_level));

        raw.front_right = 250;
        let readings = SensorReadings::from_raw(raw, &WallState::default(), &config);
        assert!(!readings.occluded_left(config.occluded_level));
        assert!(!readings.occluded_right(config.occluded_level));

        raw.front_left = 10;
        let readings = SensorReadings::from_raw(raw, &WallState::default(), &config);
        assert!(!readings.occluded_left(config.occluded_level));
        assert!(readings.occluded_right(config.occluded_level));
    }
}
