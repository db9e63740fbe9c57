//! Error type and small helpers shared by the reader modules

use thiserror::Error;

/// Errors that can occur while talking to a reader
#[derive(Error, Debug)]
pub enum UhfError {
    /// Transport layer error (open, write or read on the serial link)
    #[error("transport error: {0}")]
    Transport(String),
    /// Invalid parameter passed to a function
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A command was issued on a session that has no open channel
    #[error("reader is not connected")]
    NotConnected,
    /// The reconnect loop was stopped by its policy before a channel could be reopened
    #[error("reconnect aborted after {attempts} attempt(s)")]
    ReconnectAborted { attempts: u32 },
}

/// Convert bytes to uppercase hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
