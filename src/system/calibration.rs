//! Sensor calibration for this robot
//!
//! Values come from the calibration run: the robot sits centred in a cell
//! with walls on both sides and ahead, and the raw reading of each channel is
//! recorded as its `*_MEASURED` count. The nominal counts are what the
//! thresholds below were tuned against.
//!
//! Re-run the calibration after touching the sensor board; a bent emitter
//! moves its channel by tens of counts.

use micromouse_sensing::button::DEFAULT_DEBOUNCE_TICKS;
use micromouse_sensing::gesture::DEFAULT_DWELL_TICKS;
use micromouse_sensing::{
    ActiveLevel, ChannelCalibration, SensorCalibration, SensorConfig, WallThresholds,
};

/// Left diagonal nominal count
const LEFT_NOMINAL: u16 = 100;
/// Left diagonal measured count
const LEFT_MEASURED: u16 = 96;
/// Right diagonal nominal count
const RIGHT_NOMINAL: u16 = 100;
/// Right diagonal measured count
const RIGHT_MEASURED: u16 = 105;
/// Left front nominal count
const FRONT_LEFT_NOMINAL: u16 = 100;
/// Left front measured count
const FRONT_LEFT_MEASURED: u16 = 98;
/// Right front nominal count
const FRONT_RIGHT_NOMINAL: u16 = 100;
/// Right front measured count
const FRONT_RIGHT_MEASURED: u16 = 102;

/// Front wall present above this normalised level
const FRONT_THRESHOLD: u16 = 60;
/// Side wall cleared below this normalised level
const SIDE_THRESHOLD: u16 = 40;
/// Side wall set above `SIDE_THRESHOLD + SIDE_HYSTERESIS`
const SIDE_HYSTERESIS: u16 = 5;
/// A hand over one front sensor reads above this
const OCCLUDED_LEVEL: u16 = 200;

/// Everything the sensor engine needs to know about this robot
pub const SENSOR_CONFIG: SensorConfig = SensorConfig {
    calibration: SensorCalibration {
        left: ChannelCalibration::new(LEFT_NOMINAL, LEFT_MEASURED),
        right: ChannelCalibration::new(RIGHT_NOMINAL, RIGHT_MEASURED),
        front_left: ChannelCalibration::new(FRONT_LEFT_NOMINAL, FRONT_LEFT_MEASURED),
        front_right: ChannelCalibration::new(FRONT_RIGHT_NOMINAL, FRONT_RIGHT_MEASURED),
    },
    thresholds: WallThresholds {
        front: FRONT_THRESHOLD,
        side: SIDE_THRESHOLD,
        hysteresis: SIDE_HYSTERESIS,
    },
    occluded_level: OCCLUDED_LEVEL,
};

/// Button wiring
pub const BUTTON_ACTIVE_LEVEL: ActiveLevel = ActiveLevel::Low;

/// Button samples per debounce window, 12ms at 250Hz
pub const BUTTON_DEBOUNCE_TICKS: u8 = DEFAULT_DEBOUNCE_TICKS;

/// Start gesture polls a sensor must stay covered, exclusive: 60ms at 10ms per poll
pub const START_DWELL_TICKS: u16 = DEFAULT_DWELL_TICKS;
