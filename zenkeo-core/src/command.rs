//! Command catalog
//!
//! Payloads are independent of the sequence number; the envelope carries it.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use zenkeo_types::StateRequest;

use crate::{
    checksum,
    constants::payloads,
    error::{Error, Result},
};

/// Commands understood by the unit
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Hello,
    Init,
    PowerOn,
    PowerOff,

    /// Write the full state. The unit answers with its resulting state.
    SetState(StateRequest),
}

impl Command {
    /// Size of an encoded set-state payload, checksum included
    pub const SET_STATE_SIZE: usize =
        payloads::SET_STATE_HEADER.len() + payloads::SET_STATE_PADDING + 5 * 2 + 4 + 1;

    /// Read the current state
    ///
    /// There is no read-only opcode: this sends [`StateRequest::query`] and
    /// relies on the echoed state.
    pub fn query() -> Self {
        Self::SetState(StateRequest::query())
    }

    /// Check if the unit answers this command with a state payload
    pub fn expects_state(&self) -> bool {
        matches!(self, Self::SetState(_))
    }

    /// Get command name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hello => "HELLO",
            Self::Init => "INIT",
            Self::PowerOn => "POWER_ON",
            Self::PowerOff => "POWER_OFF",
            Self::SetState(_) => "SET_STATE",
        }
    }

    /// Build the payload bytes
    ///
    /// # Errors
    ///
    /// Set-state fails with [`Error::TemperatureOutOfRange`] when the target
    /// does not fit the single-nibble wire field.
    pub fn payload(&self) -> Result<Bytes> {
        match self {
            Self::Hello => Ok(Bytes::from_static(&payloads::HELLO)),
            Self::Init => Ok(Bytes::from_static(&payloads::INIT)),
            Self::PowerOn => Ok(Bytes::from_static(&payloads::POWER_ON)),
            Self::PowerOff => Ok(Bytes::from_static(&payloads::POWER_OFF)),
            Self::SetState(request) => set_state_payload(request),
        }
    }
}

/// Each field is `00 0x`: the firmware reserves the high nibble.
fn put_field(buf: &mut BytesMut, value: u8) {
    buf.put_u8(0x00);
    buf.put_u8(value & 0x0F);
}

fn set_state_payload(request: &StateRequest) -> Result<Bytes> {
    let target = request.wire_target().map_err(Error::TemperatureOutOfRange)?;

    let mut buf = BytesMut::with_capacity(Command::SET_STATE_SIZE);
    buf.put_slice(&payloads::SET_STATE_HEADER);
    buf.put_bytes(0, payloads::SET_STATE_PADDING);

    put_field(&mut buf, u16::from(request.mode) as u8);
    put_field(&mut buf, u16::from(request.fan_speed) as u8);
    put_field(&mut buf, u16::from(request.limits) as u8);
    put_field(&mut buf, request.power as u8);
    put_field(&mut buf, request.health as u8);

    buf.put_u16(0);
    put_field(&mut buf, target);

    let checksum = checksum::calculate(&buf);
    buf.put_u8(checksum);

    Ok(buf.freeze())
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetState(request) => write!(
                f,
                "{}(power={}, mode={}, fan={}, target={})",
                self.name(),
                request.power,
                request.mode,
                request.fan_speed,
                request.target_temperature
            ),
            _ => f.write_str(self.name()),
        }
    }
}
