//! Type definitions for zenkeo

pub mod error;
pub mod state;

pub use error::{Error, Result};
pub use state::{
    DeviceState, FanSpeed, Limits, Mode, StateRequest, MAX_CLIMATE_TEMPERATURE,
    MAX_ENCODABLE_TARGET_TEMPERATURE, MIN_TARGET_TEMPERATURE,
};
