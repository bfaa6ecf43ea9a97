//! Wall sensing and button input for a maze solving robot
//!
//! Platform independent half of the firmware: every algorithm that turns
//! raw photodetector counts and a bouncing switch into values navigation
//! can trust. Hardware is reached only through `embedded-hal` traits and
//! [`hal::AnalogSource`], so the whole crate runs on the host for testing.
//!
//! # Modules
//! - [`sensors`]: IR acquisition cycle with ambient light cancellation
//! - [`walls`]: front and side wall classification
//! - [`table`]: calibrated distance and steering tables
//! - [`calibration`]: per-channel ratios and thresholds
//! - [`button`]: debounce state machine and click detection
//! - [`gesture`]: start mode selection by hand or button
//! - [`hal`]: hardware seams
//!
//! Nothing here allocates, blocks beyond the emitter settle time, or
//! returns an error. Out of range queries return neutral values.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod button;
pub mod calibration;
pub mod gesture;
pub mod hal;
pub mod sensors;
pub mod table;
pub mod walls;

pub use button::{ButtonState, ClickTracker, DebouncedButton, Debouncer};
pub use calibration::{ChannelCalibration, SensorCalibration, SensorConfig, WallThresholds};
pub use gesture::{StartChoice, StartGesture};
pub use hal::{ActiveLevel, AnalogSource, SensorChannel};
pub use sensors::{ChannelValues, Emitters, IrSensors, SensorReadings};
pub use walls::{SideWall, WallState};
