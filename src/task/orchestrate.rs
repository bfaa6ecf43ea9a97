//! Orchestrator Module
//!
//! This module contains the main orchestrator task that consumes system
//! events and reports what the sensing front-end sees.
//!
//! Navigation and motion control are not part of this firmware; the
//! orchestrator stands in for them, reading the published walls, distance
//! and steering values the same way they would.

use defmt::{debug, info};
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use micromouse_sensing::table::FRONT_TABLE_LEN;

use crate::system::event::{self, Events};
use crate::system::state;
use crate::task::ir_sensor_read;

/// Sensor report period while no events arrive
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Main orchestrator task
///
/// Starts the IR sensors, then listens for system events. When nothing
/// happens for a while it logs the current sensor state.
#[embassy_executor::task]
pub async fn orchestrate() {
    info!("Orchestrator started");
    ir_sensor_read::start_sensor_readings();

    loop {
        match select(event::wait(), Timer::after(REPORT_INTERVAL)).await {
            Either::First(event) => handle_event(event),
            Either::Second(_) => report_sensors(),
        }
    }
}

/// Handles one system event
fn handle_event(event: Events) {
    match event {
        Events::SensorsEnabled(enabled) => {
            info!("IR sensors enabled: {}", enabled);
        }
        Events::WallsChanged(walls) => {
            debug!(
                "Walls L:{} FL:{} F:{} FR:{} R:{}",
                walls.left, walls.front_left, walls.front, walls.front_right, walls.right
            );
        }
        Events::ButtonChanged(button) => {
            debug!(
                "Button {} (pressed: {}, released: {})",
                button,
                state::button_pressed(),
                state::button_released()
            );
        }
        Events::StartSelected(choice) => {
            info!("Start choice {}, click to confirm", choice);
        }
        Events::RunConfirmed(choice) => {
            info!("Run confirmed with {}", choice);
            report_sensors();
        }
    }
}

/// Logs raw and normalised readings with the derived front values
fn report_sensors() {
    let snapshot = state::snapshot();
    if !snapshot.sensors_enabled {
        return;
    }
    let readings = snapshot.readings;
    info!("Raw:        {}", readings.raw);
    info!("Normalized: {}", readings.normalized);

    let distance = readings.front_distance();
    if distance < FRONT_TABLE_LEN {
        info!(
            "Front wall at step {}, steering error {}",
            distance,
            readings.front_steering(distance as i32)
        );
    } else {
        info!("No front wall in calibrated range");
    }
}
