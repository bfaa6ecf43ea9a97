//! Core system components for robot operation
pub mod calibration;
pub mod event;
pub mod resources;
pub mod state;
