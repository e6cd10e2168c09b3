//! Protocol constants

/// Magic bytes opening every envelope
pub const ENVELOPE_MAGIC: [u8; 8] = [0x00, 0x00, 0x27, 0x14, 0x00, 0x00, 0x00, 0x00];

/// Marker preceding a state-bearing payload
pub const STATE_MARKER: [u8; 4] = [0xFF, 0xFF, 0x22, 0x00];

/// Constant subtracted by the set-state checksum
pub const CHECKSUM_BIAS: u32 = 2 * 0xFF;

/// Default device port
pub const DEFAULT_PORT: u16 = 56800;

/// Default connection timeout (seconds)
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Default read timeout (seconds)
pub const DEFAULT_READ_TIMEOUT: u64 = 5;

/// Largest response accepted from a single exchange
pub const MAX_RESPONSE_SIZE: usize = 1024;

/// Fixed command payloads
pub mod payloads {
    pub const HELLO: [u8; 13] = [
        0xFF, 0xFF, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x4D, 0x01, 0x59,
    ];

    pub const INIT: [u8; 11] = [
        0xFF, 0xFF, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x73, 0x7B,
    ];

    pub const POWER_ON: [u8; 13] = [
        0xFF, 0xFF, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x4D, 0x02, 0x5A,
    ];

    pub const POWER_OFF: [u8; 13] = [
        0xFF, 0xFF, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x4D, 0x03, 0x5B,
    ];

    /// Set-state header; followed by zero padding and the state fields
    pub const SET_STATE_HEADER: [u8; 12] = [
        0xFF, 0xFF, 0x22, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x4D, 0x5F,
    ];

    /// Zero bytes between the set-state header and the first field
    pub const SET_STATE_PADDING: usize = 10;
}
