//! Start Selection
//!
//! Lets the operator choose how the next run starts, using only the front
//! sensors and the button.
//!
//! # Gesture
//! - Hold a hand over the left front sensor: green LED, left choice
//! - Hold a hand over the right front sensor: red LED, right choice
//! - Press the button: button choice, taken once the button is released
//!
//! After a choice both LEDs go off; a click then confirms the run.

use defmt::info;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Duration, Ticker, Timer};
use micromouse_sensing::{ButtonState, StartChoice, StartGesture};

use crate::system::{
    calibration::{SENSOR_CONFIG, START_DWELL_TICKS},
    event::{self, Events},
    resources::StatusLedResources,
    state,
};
use crate::task::button_debounce::{wait_for_click, wait_for_release};

/// Gesture polling period
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Pause after a choice so the hand can be taken away
const SETTLE_AFTER_CHOICE: Duration = Duration::from_millis(200);

/// Red and green indicator LEDs
pub struct StatusLeds {
    red: Output<'static>,
    green: Output<'static>,
}

impl StatusLeds {
    /// Configures both LEDs, off
    pub fn new(r: StatusLedResources) -> Self {
        Self {
            red: Output::new(r.red_pin, Level::Low),
            green: Output::new(r.green_pin, Level::Low),
        }
    }

    /// Sets both LEDs at once
    pub fn set(&mut self, red: bool, green: bool) {
        self.red.set_level(red.into());
        self.green.set_level(green.into());
    }
}

/// Start selection task
///
/// Loops forever: choose, confirm with a click, report, choose again.
#[embassy_executor::task]
pub async fn start_select(r: StatusLedResources) {
    let mut leds = StatusLeds::new(r);
    loop {
        let choice = wait_for_start(&mut leds).await;
        info!("Start selected: {}", choice);
        event::send(Events::StartSelected(choice)).await;

        wait_for_click().await;
        event::send(Events::RunConfirmed(choice)).await;
    }
}

/// Polls the start gesture until the operator has chosen
///
/// Needs the IR sensors running; with sensors stopped only the button can
/// make a choice.
pub async fn wait_for_start(leds: &mut StatusLeds) -> StartChoice {
    let mut gesture = StartGesture::new(START_DWELL_TICKS);
    let mut ticker = Ticker::every(POLL_INTERVAL);

    let choice = loop {
        let snapshot = state::snapshot();
        let occluded_left = snapshot.readings.occluded_left(SENSOR_CONFIG.occluded_level);
        let occluded_right = snapshot.readings.occluded_right(SENSOR_CONFIG.occluded_level);
        let pressed = snapshot.button == ButtonState::Pressed;

        leds.set(occluded_right || pressed, occluded_left || pressed);

        if let Some(choice) = gesture.poll(occluded_left, occluded_right, pressed) {
            break choice;
        }
        ticker.next().await;
    };

    if choice == StartChoice::Button {
        wait_for_release().await;
    }
    Timer::after(SETTLE_AFTER_CHOICE).await;
    leds.set(false, false);
    choice
}
