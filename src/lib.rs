//! Serial driver for R200 and E200 UHF RFID readers.
//!
//! A [`ReaderSession`] owns the serial link and runs every command as a
//! transaction: write the frame, wait, read whatever the reader sent, retry a
//! bounded number of times and reopen the port when the link fails. Replies are
//! returned as raw bytes.
//!
//! # Features
//!
//! - `serial` - Serial port transport for desktop using serialport crate
//!
//! # Example
//!
//! ```ignore
//! use uhf_reader::{ConnectionConfig, ReaderSession, ReaderVariant, SerialConnector, UhfReader};
//!
//! let session = ReaderSession::new(ConnectionConfig::new("/dev/ttyUSB0", 115200), SerialConnector)?;
//! let mut reader = UhfReader::new(ReaderVariant::R200, session);
//!
//! if reader.connect() {
//!     if let Some(raw) = reader.scan()? {
//!         println!("Raw data: {}", uhf_reader::bytes_to_hex(&raw));
//!     }
//!     reader.disconnect();
//! }
//! ```

mod config;
mod frame;
mod reader;
mod session;
mod text;
mod transport;
mod types;

#[cfg(feature = "serial")]
mod serial;

// Re-exports
pub use config::{
    CancelToken, ConnectionConfig, DEFAULT_BAUD_RATE, DEFAULT_RETRIES, DEFAULT_TIMEOUT,
    ReconnectPolicy, SessionTiming,
};
pub use frame::{CommandFrame, build_frame};
pub use reader::{FrameSource, ReaderVariant, UhfReader, scan};
pub use session::ReaderSession;
pub use text::text_command;
pub use transport::{RfidConnector, RfidTransport};
pub use types::{UhfError, bytes_to_hex};

#[cfg(feature = "serial")]
pub use serial::{SerialConnector, SerialTransport, available_ports};
