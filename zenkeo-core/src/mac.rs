//! Unit MAC address as embedded in the envelope

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// MAC address of the target unit
///
/// Stored as the 12 upper-case hex digits without separators, which is the
/// form the envelope carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacAddress {
    digits: [u8; 12],
}

impl MacAddress {
    /// Size of the MAC block inside the envelope
    pub const BLOCK_SIZE: usize = 16;

    /// Parse a MAC address
    ///
    /// `:`, `-` and `.` separators are ignored, case is normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use zenkeo_core::MacAddress;
    ///
    /// let mac = MacAddress::parse("aa:bb:cc:dd:ee:ff").unwrap();
    /// assert_eq!(mac.to_string(), "AABBCCDDEEFF");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let stripped: String = input
            .chars()
            .filter(|c| !matches!(c, ':' | '-' | '.'))
            .collect::<String>()
            .to_ascii_uppercase();

        let raw = hex::decode(&stripped).map_err(|e| Error::InvalidMac(format!("{input}: {e}")))?;
        if raw.len() != 6 {
            return Err(Error::InvalidMac(format!(
                "{input}: expected 6 bytes, got {}",
                raw.len()
            )));
        }

        let mut digits = [0u8; 12];
        digits.copy_from_slice(stripped.as_bytes());

        Ok(Self { digits })
    }

    /// The 16-byte envelope block: one ASCII byte per hex digit, then 4 zeros
    pub fn block(&self) -> [u8; Self::BLOCK_SIZE] {
        let mut block = [0u8; Self::BLOCK_SIZE];
        block[..self.digits.len()].copy_from_slice(&self.digits);
        block
    }

    /// Recover a MAC address from an envelope block
    pub fn from_block(block: &[u8]) -> Result<Self> {
        let digits = block
            .get(..12)
            .ok_or_else(|| Error::InvalidMac(format!("block of {} bytes", block.len())))?;
        let text = std::str::from_utf8(digits)
            .map_err(|_| Error::InvalidMac(format!("{digits:02X?}")))?;
        Self::parse(text)
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Digits are validated ASCII hex
        f.write_str(&String::from_utf8_lossy(&self.digits))
    }
}
