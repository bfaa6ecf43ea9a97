//! Hardware Resource Management
//!
//! Assigns the robot's pins and peripherals to the tasks that own them.
//! Every resource has exactly one owner, nothing here is shared.
//!
//! # Resource Groups
//! - IR Sensor: the ADC, four photodetector inputs and four emitter outputs
//! - Button: start button, pulled up and shorted to ground when pressed
//! - Status LEDs: red and green indicators used during start selection
//!
//! # ADC Channels
//! The RP2350A has exactly four ADC capable pins (GPIO 26-29); all four are
//! taken by the photodetectors, so the ADC is owned outright by the sensor
//! task and read in blocking mode.

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// IR wall sensors: photodetectors on the ADC pins, emitter drivers on GPIO
    ir_sensor: IRSensorResources {
        adc: ADC,
        left_detector_pin: PIN_26,
        right_detector_pin: PIN_27,
        front_left_detector_pin: PIN_28,
        front_right_detector_pin: PIN_29,
        front_left_emitter_pin: PIN_10,
        front_right_emitter_pin: PIN_11,
        left_emitter_pin: PIN_12,
        right_emitter_pin: PIN_13,
    },
    /// Start button (active low)
    button: ButtonResources {
        pin: PIN_16,
    },
    /// Status LEDs
    status_leds: StatusLedResources {
        red_pin: PIN_2,
        green_pin: PIN_4,
    },
}
