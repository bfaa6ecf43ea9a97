//! Start button debouncing
//!
//! Samples the start button on a fixed tick and runs it through the
//! debounce state machine in [`micromouse_sensing::button`].
//!
//! # Operation
//! - Sampled at 250Hz, 3 samples per debounce window (12ms)
//! - Two agreeing windows to press, two to release
//! - Every accepted transition is published to system state, signalled to
//!   [`wait_for_click`] and reported as an event
//!
//! Callers that only need the instantaneous state read
//! [`state::button_pressed`] / [`state::button_released`]; callers that want
//! a whole press-and-release gesture await [`wait_for_click`].

use defmt::debug;
use embassy_rp::gpio::{Input, Pull};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker};
use micromouse_sensing::{ButtonState, ClickTracker, DebouncedButton};

use crate::system::{
    calibration::{BUTTON_ACTIVE_LEVEL, BUTTON_DEBOUNCE_TICKS},
    event::{self, Events},
    resources::ButtonResources,
    state,
};

/// Debounce sampling period
const SAMPLE_INTERVAL: Duration = Duration::from_hz(250);

/// Latest debounced transition, for waiters
static BUTTON_CHANGED: Signal<CriticalSectionRawMutex, ButtonState> = Signal::new();

/// Button sampling task
#[embassy_executor::task]
pub async fn button_debounce(r: ButtonResources) {
    // Pulled up, the switch shorts the pin to ground
    let pin = Input::new(r.pin, Pull::Up);
    let mut button = DebouncedButton::new(pin, BUTTON_ACTIVE_LEVEL, BUTTON_DEBOUNCE_TICKS);

    let mut ticker = Ticker::every(SAMPLE_INTERVAL);
    loop {
        if let Some(button_state) = button.sample() {
            debug!("Button {}", button_state);
            state::publish_button(button_state);
            BUTTON_CHANGED.signal(button_state);
            event::try_send(Events::ButtonChanged(button_state));
        }
        ticker.next().await;
    }
}

/// Waits for one complete click
///
/// Returns once the button has gone from pressed back to released. A press
/// already held when this is called counts, the release completes it.
/// Only one task may wait at a time.
pub async fn wait_for_click() {
    BUTTON_CHANGED.reset();
    let mut tracker = ClickTracker::new();
    tracker.observe(state::button());
    loop {
        if tracker.observe(BUTTON_CHANGED.wait().await) {
            return;
        }
    }
}

/// Waits until the button is stably released
pub async fn wait_for_release() {
    BUTTON_CHANGED.reset();
    while !state::button_released() {
        BUTTON_CHANGED.wait().await;
    }
}
