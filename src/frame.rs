//! R200 command frame construction
//!
//! Layout: `AA 00 <cmd> <len_hi> <len_lo> <params..> <checksum> DD`, where the
//! checksum is the low byte of the sum of everything from the type byte through
//! the last parameter byte.

use crate::types::UhfError;

/// Frame header
pub const HEADER: u8 = 0xAA;
/// Frame type for commands sent to the reader
pub const CMD_TYPE: u8 = 0x00;
/// Frame terminator
pub const END: u8 = 0xDD;

/// Header, type, command, two length bytes, checksum and terminator
const OVERHEAD: usize = 7;

/// A complete, checksummed R200 command frame.
///
/// Only [`build_frame`] and [`CommandFrame::verify`] produce values of this type,
/// so a `CommandFrame` is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame(Vec<u8>);

impl CommandFrame {
    /// Check raw bytes against the frame layout and wrap them if they are valid
    pub fn verify(bytes: &[u8]) -> Result<Self, UhfError> {
        if bytes.len() < OVERHEAD {
            return Err(UhfError::InvalidParameter(format!(
                "Frame too short: {} bytes (minimum: {})",
                bytes.len(),
                OVERHEAD
            )));
        }

        if bytes[0] != HEADER || bytes[1] != CMD_TYPE || bytes[bytes.len() - 1] != END {
            return Err(UhfError::InvalidParameter(format!(
                "Invalid frame delimiters: {:02X?}",
                bytes
            )));
        }

        let param_len = u16::from_be_bytes([bytes[3], bytes[4]]) as usize;
        if param_len != bytes.len() - OVERHEAD {
            return Err(UhfError::InvalidParameter(format!(
                "Length field says {} parameter bytes but frame carries {}",
                param_len,
                bytes.len() - OVERHEAD
            )));
        }

        let expected = checksum(&bytes[1..bytes.len() - 2]);
        let actual = bytes[bytes.len() - 2];
        if expected != actual {
            return Err(UhfError::InvalidParameter(format!(
                "Checksum mismatch: expected 0x{:02X}, got 0x{:02X}",
                expected, actual
            )));
        }

        Ok(Self(bytes.to_vec()))
    }

    /// Whether raw bytes form a valid frame
    pub fn is_well_formed(bytes: &[u8]) -> bool {
        Self::verify(bytes).is_ok()
    }

    pub fn command(&self) -> u8 {
        self.0[2]
    }

    pub fn params(&self) -> &[u8] {
        &self.0[5..self.0.len() - 2]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Build an R200 command frame from a command code and its parameters.
///
/// Parameter blocks longer than `u16::MAX` bytes cannot be described by the
/// length field; only the low 16 bits of the length are encoded.
pub fn build_frame(command: u8, params: &[u8]) -> CommandFrame {
    let param_len = params.len() as u16;
    let msb = (param_len >> 8) as u8;
    let lsb = (param_len & 0xFF) as u8;

    let mut frame = Vec::with_capacity(params.len() + OVERHEAD);
    frame.extend_from_slice(&[HEADER, CMD_TYPE, command, msb, lsb]);
    frame.extend_from_slice(params);
    frame.push(checksum(&frame[1..]));
    frame.push(END);
    CommandFrame(frame)
}

/// Modulo-256 sum
fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}
