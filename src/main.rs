//! Micromouse firmware entry point
//!
//! Initializes the system and spawns the sensing tasks.

#![no_std]
#![no_main]

use crate::task::{
    button_debounce::button_debounce, ir_sensor_read::ir_sensor_read, orchestrate::orchestrate,
    start_select::start_select,
};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{
    AssignedResources, ButtonResources, IRSensorResources, StatusLedResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups for each task
    let r = split_resources!(p);

    // Sampling tasks first, so state is live before anyone reads it
    spawner.spawn(button_debounce(r.button)).unwrap();
    spawner.spawn(ir_sensor_read(r.ir_sensor)).unwrap();
    spawner.spawn(orchestrate()).unwrap();
    spawner.spawn(start_select(r.status_leds)).unwrap();
}
