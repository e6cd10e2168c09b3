//! State response parser
//!
//! Responses carry unparsed leading framing of varying length, so the state
//! payload is located by scanning for [`STATE_MARKER`] instead of using a
//! fixed offset.
//!
//! # Layout after the marker (big-endian)
//!
//! ```text
//! offset  size  field
//!      0     8  (skipped)
//!      8     2  current temperature
//!     10     8  (skipped)
//!     18     2  mode
//!     20     2  fan speed
//!     22     2  limits
//!     24     2  power   (bit 0)
//!     26     2  health  (bit 0)
//!     28     2  (skipped)
//!     30     2  target temperature - 16
//! ```

use byteorder::{BigEndian, ByteOrder};
use zenkeo_types::{DeviceState, FanSpeed, Limits, Mode, MIN_TARGET_TEMPERATURE};

use crate::{constants::STATE_MARKER, error::ParseError};

/// Bytes of state body required after the marker
pub const STATE_BODY_SIZE: usize = 32;

const CURRENT_TEMPERATURE: usize = 8;
const MODE: usize = 18;
const FAN_SPEED: usize = 20;
const LIMITS: usize = 22;
const POWER: usize = 24;
const HEALTH: usize = 26;
const TARGET_TEMPERATURE: usize = 30;

/// Position of the first state marker in `response`
pub fn find_marker(response: &[u8]) -> Option<usize> {
    response
        .windows(STATE_MARKER.len())
        .position(|window| window == STATE_MARKER)
}

/// Check whether `response` holds a marker followed by a full state body
pub fn is_complete(response: &[u8]) -> bool {
    find_marker(response)
        .is_some_and(|pos| response.len() - pos - STATE_MARKER.len() >= STATE_BODY_SIZE)
}

/// Decode device state from a raw response buffer
///
/// # Errors
///
/// - [`ParseError::MarkerNotFound`] if `FF FF 22 00` is absent
/// - [`ParseError::Truncated`] if fewer than 32 bytes follow the marker
/// - [`ParseError::InvalidEnum`] for an undefined mode, fan speed or limits code
///
/// # Examples
///
/// ```
/// use zenkeo_core::parser::parse_state;
/// use zenkeo_core::ParseError;
///
/// assert_eq!(parse_state(&[0x00, 0x01]), Err(ParseError::MarkerNotFound));
/// ```
pub fn parse_state(response: &[u8]) -> Result<DeviceState, ParseError> {
    let start = find_marker(response).ok_or(ParseError::MarkerNotFound)? + STATE_MARKER.len();

    let body = &response[start..];
    if body.len() < STATE_BODY_SIZE {
        return Err(ParseError::Truncated {
            needed: STATE_BODY_SIZE,
            available: body.len(),
        });
    }

    let field = |offset: usize| BigEndian::read_u16(&body[offset..offset + 2]);

    Ok(DeviceState {
        current_temperature: field(CURRENT_TEMPERATURE),
        target_temperature: field(TARGET_TEMPERATURE).saturating_add(MIN_TARGET_TEMPERATURE),
        mode: Mode::try_from(field(MODE))?,
        fan_speed: FanSpeed::try_from(field(FAN_SPEED))?,
        limits: Limits::try_from(field(LIMITS))?,
        health: field(HEALTH) % 2 == 1,
        power: field(POWER) % 2 == 1,
    })
}
