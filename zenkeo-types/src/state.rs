//! Air-conditioner state structures

use std::fmt;

use crate::error::{Error, Result};

/// Lowest target temperature the unit accepts (wire value 0)
pub const MIN_TARGET_TEMPERATURE: u16 = 16;

/// Highest target temperature whose wire value still fits one nibble
pub const MAX_ENCODABLE_TARGET_TEMPERATURE: u16 = MIN_TARGET_TEMPERATURE + 0x0F;

/// Highest target temperature offered to users of the climate controller
pub const MAX_CLIMATE_TEMPERATURE: u16 = 30;

/// Operating mode
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Mode {
    Smart = 0,
    Cool = 1,
    Heat = 2,
    Fan = 3,
    Dry = 4,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Self::Smart, Self::Cool, Self::Heat, Self::Fan, Self::Dry];

    pub fn name(self) -> &'static str {
        match self {
            Self::Smart => "SMART",
            Self::Cool => "COOL",
            Self::Heat => "HEAT",
            Self::Fan => "FAN",
            Self::Dry => "DRY",
        }
    }
}

impl From<Mode> for u16 {
    fn from(mode: Mode) -> u16 {
        mode as u16
    }
}

impl TryFrom<u16> for Mode {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Self::Smart),
            1 => Ok(Self::Cool),
            2 => Ok(Self::Heat),
            3 => Ok(Self::Fan),
            4 => Ok(Self::Dry),
            _ => Err(Error::UnknownCode { field: "mode", value }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fan speed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum FanSpeed {
    Max = 0,
    Mid = 1,
    Min = 2,
    Auto = 3,
}

impl FanSpeed {
    pub const ALL: [FanSpeed; 4] = [Self::Max, Self::Mid, Self::Min, Self::Auto];

    pub fn name(self) -> &'static str {
        match self {
            Self::Max => "MAX",
            Self::Mid => "MID",
            Self::Min => "MIN",
            Self::Auto => "AUTO",
        }
    }
}

impl From<FanSpeed> for u16 {
    fn from(speed: FanSpeed) -> u16 {
        speed as u16
    }
}

impl TryFrom<u16> for FanSpeed {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Self::Max),
            1 => Ok(Self::Mid),
            2 => Ok(Self::Min),
            3 => Ok(Self::Auto),
            _ => Err(Error::UnknownCode { field: "fan speed", value }),
        }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Louver swing limits
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum Limits {
    #[default]
    Off = 0,
    OnlyVertical = 1,
}

impl From<Limits> for u16 {
    fn from(limits: Limits) -> u16 {
        limits as u16
    }
}

impl TryFrom<u16> for Limits {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::OnlyVertical),
            _ => Err(Error::UnknownCode { field: "limits", value }),
        }
    }
}

/// State decoded from a device response
///
/// A fresh value is produced for every response; nothing is shared between
/// callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeviceState {
    /// Room temperature in °C as reported by the unit
    pub current_temperature: u16,

    /// Target temperature in °C (wire offset already applied)
    pub target_temperature: u16,

    pub fan_speed: FanSpeed,

    pub mode: Mode,

    /// Swing limits. Decoded but not acted upon by the climate controller.
    pub limits: Limits,

    pub health: bool,

    pub power: bool,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State[{} {} fan={} target={}°C current={}°C health={}]",
            if self.power { "ON" } else { "OFF" },
            self.mode,
            self.fan_speed,
            self.target_temperature,
            self.current_temperature,
            self.health
        )
    }
}

/// Desired state sent with a set-state command
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StateRequest {
    pub power: bool,
    pub mode: Mode,
    pub fan_speed: FanSpeed,
    pub target_temperature: u16,
    pub health: bool,
    pub limits: Limits,
}

impl StateRequest {
    /// Target used when polling the unit
    pub const QUERY_TARGET_TEMPERATURE: u16 = 21;

    pub fn new(power: bool, mode: Mode, fan_speed: FanSpeed, target_temperature: u16) -> Self {
        Self {
            power,
            mode,
            fan_speed,
            target_temperature,
            health: false,
            limits: Limits::Off,
        }
    }

    /// Body used to read state back.
    ///
    /// The unit has no read-only opcode; every set-state answers with the
    /// resulting state, so polling sends these values and may force them.
    pub fn query() -> Self {
        Self::new(false, Mode::Cool, FanSpeed::Auto, Self::QUERY_TARGET_TEMPERATURE)
    }

    pub fn with_health(mut self, health: bool) -> Self {
        self.health = health;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Target temperature as carried on the wire (°C - 16)
    pub fn wire_target(&self) -> Result<u8> {
        if !(MIN_TARGET_TEMPERATURE..=MAX_ENCODABLE_TARGET_TEMPERATURE)
            .contains(&self.target_temperature)
        {
            return Err(Error::OutOfRange {
                field: "target temperature",
                value: self.target_temperature,
                min: MIN_TARGET_TEMPERATURE,
                max: MAX_ENCODABLE_TARGET_TEMPERATURE,
            });
        }

        Ok((self.target_temperature - MIN_TARGET_TEMPERATURE) as u8)
    }
}
