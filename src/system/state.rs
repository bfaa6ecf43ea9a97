//! System State Management
//!
//! Holds the latest sensor and button state for every task that reads it.
//!
//! # Ownership
//! - Sensor readings: written only by the IR sensor task, at 4kHz
//! - Button state: written only by the button debounce task, at 250Hz
//! - Everything else only reads
//!
//! The whole state is one `Copy` value inside a blocking mutex. Writers
//! replace a field inside the critical section and readers copy the whole
//! value out, so a reader always gets the result of a completed cycle and
//! never a mix of two.
//!
//! # State Access Pattern
//! ```rust
//! let readings = state::readings();
//! if readings.walls.front {
//!     // stop before the wall
//! }
//! ```

use core::cell::Cell;

use defmt::Format;
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use micromouse_sensing::{ButtonState, SensorReadings};

/// Global system state
///
/// Initialized to:
/// - Empty sensor readings, no walls
/// - Button released
/// - Sensors disabled until the sensor task is started
static SYSTEM_STATE: Mutex<CriticalSectionRawMutex, Cell<SystemState>> =
    Mutex::new(Cell::new(SystemState {
        readings: SensorReadings::EMPTY,
        button: ButtonState::Released,
        sensors_enabled: false,
    }));

/// Snapshot of everything the sensing tasks publish
#[derive(Debug, Clone, Copy, Format)]
pub struct SystemState {
    /// Latest completed IR acquisition cycle
    pub readings: SensorReadings,
    /// Debounced start button
    pub button: ButtonState,
    /// IR acquisition running
    /// - true: readings refresh at 4kHz
    /// - false: readings hold the last cycle before stopping
    pub sensors_enabled: bool,
}

/// Copies out the whole state
pub fn snapshot() -> SystemState {
    SYSTEM_STATE.lock(|state| state.get())
}

/// Applies a change to the state inside one critical section
fn modify(f: impl FnOnce(&mut SystemState)) {
    SYSTEM_STATE.lock(|state| {
        let mut current = state.get();
        f(&mut current);
        state.set(current);
    });
}

/// Latest sensor readings
pub fn readings() -> SensorReadings {
    snapshot().readings
}

/// Publishes a completed acquisition cycle
pub fn publish_readings(readings: SensorReadings) {
    modify(|state| state.readings = readings);
}

/// Debounced button state
pub fn button() -> ButtonState {
    snapshot().button
}

/// Publishes a debounced button transition
pub fn publish_button(button: ButtonState) {
    modify(|state| state.button = button);
}

/// Button is stably pressed. Not the negation of [`button_released`].
pub fn button_pressed() -> bool {
    button() == ButtonState::Pressed
}

/// Button is stably released. Not the negation of [`button_pressed`].
pub fn button_released() -> bool {
    button() == ButtonState::Released
}

/// Records whether the sensor task is acquiring
pub fn set_sensors_enabled(enabled: bool) {
    modify(|state| state.sensors_enabled = enabled);
}
