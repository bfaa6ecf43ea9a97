//! IR Wall Sensor Reading
//!
//! Runs the IR acquisition cycle at a fixed rate and publishes the results.
//!
//! # Sensor Operation
//! - Four photodetectors on the ADC, each paired with an IR emitter
//! - Every cycle samples each detector dark and lit, see
//!   [`micromouse_sensing::sensors`]
//! - The two 50µs emitter settle waits are busy-waits on purpose, the lit
//!   sample is only valid after the full settle time
//!
//! # Operation
//! - Idle until started, then one cycle every 250µs (4kHz)
//! - Each completed cycle replaces the readings in system state
//! - Wall changes are reported as events
//! - Can be started/stopped on demand via control signals
//!
//! # Timing
//! A cycle takes a little over 100µs, most of it in the settle waits. At
//! 4kHz that is close to half the CPU, which is why the sensors can be
//! stopped when nobody needs them.

use defmt::info;
use embassy_rp::adc::{self, Adc, Blocking, Channel};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Delay, Duration, Ticker};
use micromouse_sensing::{AnalogSource, Emitters, IrSensors, SensorChannel};

use crate::system::{
    calibration::SENSOR_CONFIG,
    event::{self, Events},
    resources::IRSensorResources,
    state,
};

/// One acquisition cycle per tick
const SAMPLE_INTERVAL: Duration = Duration::from_hz(4_000);

/// Commands for sensor reading control
enum SensorCommand {
    /// Start acquisition
    Start,
    /// Stop acquisition
    Stop,
}

/// Control signal for the sensor task
static SENSOR_CONTROL: Signal<CriticalSectionRawMutex, SensorCommand> = Signal::new();

/// Start continuous sensor readings
pub fn start_sensor_readings() {
    SENSOR_CONTROL.signal(SensorCommand::Start);
}

/// Stop sensor readings, emitters stay off
pub fn stop_sensor_readings() {
    SENSOR_CONTROL.signal(SensorCommand::Stop);
}

/// Photodetectors read through the RP2350 ADC
struct Photodetectors {
    adc: Adc<'static, Blocking>,
    left: Channel<'static>,
    right: Channel<'static>,
    front_left: Channel<'static>,
    front_right: Channel<'static>,
}

impl AnalogSource for Photodetectors {
    fn read(&mut self, channel: SensorChannel) -> u16 {
        let channel = match channel {
            SensorChannel::Left => &mut self.left,
            SensorChannel::Right => &mut self.right,
            SensorChannel::FrontLeft => &mut self.front_left,
            SensorChannel::FrontRight => &mut self.front_right,
        };
        // A failed conversion reads as darkness, the next cycle re-measures
        self.adc.blocking_read(channel).unwrap_or(0)
    }
}

/// IR sensor task
///
/// Owns the ADC and the emitters. Waits for a start command, then runs
/// acquisition cycles until told to stop.
#[embassy_executor::task]
pub async fn ir_sensor_read(r: IRSensorResources) {
    let detectors = Photodetectors {
        adc: Adc::new_blocking(r.adc, adc::Config::default()),
        left: Channel::new_pin(r.left_detector_pin, Pull::None),
        right: Channel::new_pin(r.right_detector_pin, Pull::None),
        front_left: Channel::new_pin(r.front_left_detector_pin, Pull::None),
        front_right: Channel::new_pin(r.front_right_detector_pin, Pull::None),
    };
    let emitters = Emitters {
        front_left: Output::new(r.front_left_emitter_pin, Level::Low),
        front_right: Output::new(r.front_right_emitter_pin, Level::Low),
        left: Output::new(r.left_emitter_pin, Level::Low),
        right: Output::new(r.right_emitter_pin, Level::Low),
    };
    let mut sensors = IrSensors::new(detectors, emitters, Delay, SENSOR_CONFIG);

    'command: loop {
        // Wait for next command, consuming it
        match SENSOR_CONTROL.wait().await {
            SensorCommand::Start => {
                info!("Starting IR sensor readings");
                state::set_sensors_enabled(true);
                event::try_send(Events::SensorsEnabled(true));

                let mut walls = sensors.readings().walls;
                let mut ticker = Ticker::every(SAMPLE_INTERVAL);
                loop {
                    // A pending command ends this run
                    if SENSOR_CONTROL.signaled() {
                        continue 'command;
                    }

                    let readings = sensors.update();
                    state::publish_readings(readings);

                    if readings.walls != walls {
                        walls = readings.walls;
                        event::try_send(Events::WallsChanged(walls));
                    }

                    ticker.next().await;
                }
            }
            SensorCommand::Stop => {
                info!("Stopping IR sensor readings");
                state::set_sensors_enabled(false);
                event::try_send(Events::SensorsEnabled(false));
                continue 'command;
            }
        }
    }
}
