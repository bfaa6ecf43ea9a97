//! System Events
//!
//! Defines events and channels for inter-task communication.
//!
//! Producers running on a fixed tick (sensors, button) use [`try_send`] so a
//! slow consumer can never stretch their period; an event that does not fit
//! is dropped, the state it reported is still in [`crate::system::state`].

use defmt::{warn, Format};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use micromouse_sensing::{ButtonState, StartChoice, WallState};

/// Multi-producer, single-consumer event channel with capacity of 10
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Events, 10> = Channel::new();

/// Sends an event to the system channel
pub async fn send(event: Events) {
    EVENT_CHANNEL.sender().send(event).await;
}

/// Sends an event without waiting, dropping it if the channel is full
pub fn try_send(event: Events) {
    if EVENT_CHANNEL.try_send(event).is_err() {
        warn!("Event channel full, dropped {}", event);
    }
}

/// Receives the next event from the system channel
pub async fn wait() -> Events {
    EVENT_CHANNEL.receiver().receive().await
}

/// System-wide events
#[derive(Debug, Clone, Copy, Format)]
pub enum Events {
    /// IR sensors started or stopped
    SensorsEnabled(bool),
    /// Wall flags differ from the previous cycle
    WallsChanged(WallState),
    /// Debounced button moved to a new state
    ButtonChanged(ButtonState),
    /// Operator picked a start mode
    StartSelected(StartChoice),
    /// Operator clicked the button to go
    RunConfirmed(StartChoice),
}
