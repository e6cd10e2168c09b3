//! Thermostat-style controller on top of [`DeviceClient`]
//!
//! The unit has no notion of "off in cool mode": powering off via set-state
//! still sends a mode. The controller remembers the last active mode so that
//! turning back on resumes it.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use zenkeo_types::{
    DeviceState, FanSpeed, Mode, StateRequest, MAX_CLIMATE_TEMPERATURE, MIN_TARGET_TEMPERATURE,
};

use crate::device::DeviceClient;
use crate::error::Result;

/// User-facing operating mode
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HvacMode {
    Off,
    Auto,
    Cool,
    Heat,
    FanOnly,
    Dry,
}

impl HvacMode {
    /// Device mode to send, `None` for [`HvacMode::Off`]
    pub fn device_mode(self) -> Option<Mode> {
        match self {
            Self::Off => None,
            Self::Auto => Some(Mode::Smart),
            Self::Cool => Some(Mode::Cool),
            Self::Heat => Some(Mode::Heat),
            Self::FanOnly => Some(Mode::Fan),
            Self::Dry => Some(Mode::Dry),
        }
    }
}

impl From<Mode> for HvacMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Smart => Self::Auto,
            Mode::Cool => Self::Cool,
            Mode::Heat => Self::Heat,
            Mode::Fan => Self::FanOnly,
            Mode::Dry => Self::Dry,
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Auto => "auto",
            Self::Cool => "cool",
            Self::Heat => "heat",
            Self::FanOnly => "fan_only",
            Self::Dry => "dry",
        };
        f.write_str(name)
    }
}

/// Last known settings of the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateState {
    pub current_temperature: u16,
    pub target_temperature: u16,
    pub hvac_mode: HvacMode,

    /// Mode resumed by [`Climate::turn_on`]; never [`HvacMode::Off`]
    pub previous_mode: HvacMode,

    pub fan_speed: FanSpeed,
}

impl Default for ClimateState {
    fn default() -> Self {
        Self {
            current_temperature: StateRequest::QUERY_TARGET_TEMPERATURE,
            target_temperature: StateRequest::QUERY_TARGET_TEMPERATURE,
            hvac_mode: HvacMode::Off,
            previous_mode: HvacMode::Cool,
            fan_speed: FanSpeed::Auto,
        }
    }
}

/// Climate controller
///
/// Every setter pushes the full cached state to the unit and then adopts
/// what the unit reports back. When the unit does not answer with a
/// decodable state the cache keeps the requested values.
pub struct Climate {
    client: Arc<DeviceClient>,
    state: ClimateState,
}

impl Climate {
    /// Create a controller with default cached settings
    pub fn new(client: Arc<DeviceClient>) -> Self {
        Self {
            client,
            state: ClimateState::default(),
        }
    }

    /// Get the cached settings
    pub fn state(&self) -> &ClimateState {
        &self.state
    }

    /// Poll the unit. Returns `false` when it was not available.
    pub async fn update(&mut self) -> Result<bool> {
        match self.client.get_state().await? {
            Some(state) => {
                self.apply(&state);
                Ok(true)
            }
            None => {
                warn!("Could not retrieve state from {}", self.client.mac());
                Ok(false)
            }
        }
    }

    /// Set target temperature, clamped to the supported range
    pub async fn set_temperature(&mut self, temperature: u16) -> Result<()> {
        self.state.target_temperature =
            temperature.clamp(MIN_TARGET_TEMPERATURE, MAX_CLIMATE_TEMPERATURE);
        self.send_state().await
    }

    /// Switch mode; [`HvacMode::Off`] powers the unit down
    pub async fn set_hvac_mode(&mut self, mode: HvacMode) -> Result<()> {
        self.state.hvac_mode = mode;
        if mode != HvacMode::Off {
            self.state.previous_mode = mode;
        }
        self.send_state().await
    }

    /// Set fan speed
    pub async fn set_fan_speed(&mut self, fan_speed: FanSpeed) -> Result<()> {
        self.state.fan_speed = fan_speed;
        self.send_state().await
    }

    /// Power on in the last active mode
    pub async fn turn_on(&mut self) -> Result<()> {
        self.set_hvac_mode(self.state.previous_mode).await
    }

    /// Power off, remembering the active mode
    pub async fn turn_off(&mut self) -> Result<()> {
        self.set_hvac_mode(HvacMode::Off).await
    }

    async fn send_state(&mut self) -> Result<()> {
        let (power, mode) = match self.state.hvac_mode.device_mode() {
            Some(mode) => (true, mode),
            None => (
                false,
                self.state.previous_mode.device_mode().unwrap_or(Mode::Cool),
            ),
        };

        let request = StateRequest::new(power, mode, self.state.fan_speed, self.state.target_temperature);

        match self.client.change_state(request).await? {
            Some(state) => self.apply(&state),
            None => warn!("Unit did not confirm {:?}", request),
        }

        Ok(())
    }

    fn apply(&mut self, state: &DeviceState) {
        self.state.current_temperature = state.current_temperature;
        self.state.target_temperature = state.target_temperature;
        self.state.fan_speed = state.fan_speed;

        if state.power {
            self.state.hvac_mode = state.mode.into();
            self.state.previous_mode = self.state.hvac_mode;
        } else {
            self.state.hvac_mode = HvacMode::Off;
        }

        debug!("Climate now {:?}", self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hvac_mode_mapping() {
        for mode in Mode::ALL {
            assert_eq!(HvacMode::from(mode).device_mode(), Some(mode));
        }
        assert_eq!(HvacMode::Off.device_mode(), None);
        assert_eq!(HvacMode::FanOnly.to_string(), "fan_only");
    }

    #[test]
    fn test_default_state() {
        let state = ClimateState::default();
        assert_eq!(state.hvac_mode, HvacMode::Off);
        assert_eq!(state.previous_mode, HvacMode::Cool);
        assert_eq!(state.target_temperature, 21);
        assert_eq!(state.fan_speed, FanSpeed::Auto);
    }

    #[test]
    fn test_apply_keeps_previous_mode_when_off() {
        let client = DeviceClient::new("192.168.1.50", "AA:BB:CC:DD:EE:FF").unwrap();
        let mut climate = Climate::new(Arc::new(client));

        let mut state = DeviceState {
            current_temperature: 26,
            target_temperature: 20,
            fan_speed: FanSpeed::Min,
            mode: Mode::Heat,
            limits: Default::default(),
            health: false,
            power: true,
        };
        climate.apply(&state);
        assert_eq!(climate.state().hvac_mode, HvacMode::Heat);
        assert_eq!(climate.state().previous_mode, HvacMode::Heat);

        state.power = false;
        state.mode = Mode::Cool;
        climate.apply(&state);
        assert_eq!(climate.state().hvac_mode, HvacMode::Off);
        assert_eq!(climate.state().previous_mode, HvacMode::Heat);
        assert_eq!(climate.state().current_temperature, 26);
    }
}
