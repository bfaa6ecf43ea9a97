pub mod button_debounce;
pub mod ir_sensor_read;
pub mod orchestrate;
pub mod start_select;
