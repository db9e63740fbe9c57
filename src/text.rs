//! Line-oriented ASCII commands
//!
//! Simpler UHF modules are driven with newline-terminated text commands such as
//! `SET_PWR 20` and report each tag as one line of text.

use log::debug;

use crate::session::{ReaderSession, pause};
use crate::transport::{RfidConnector, RfidTransport};
use crate::types::UhfError;

const SET_POWER: &str = "SET_PWR";
const SET_PING: &str = "SET_PING";

/// Format one text command, newline included
pub fn text_command(name: &str, value: impl std::fmt::Display) -> String {
    format!("{} {}\n", name, value)
}

impl<C: RfidConnector> ReaderSession<C> {
    /// Set the transmit power level in dBm
    pub fn set_power_level(&mut self, dbm: u16) -> Result<(), UhfError> {
        self.write_text(&text_command(SET_POWER, dbm))
    }

    /// Set the interval between inventory pings in milliseconds
    pub fn set_ping_rate(&mut self, milliseconds: u32) -> Result<(), UhfError> {
        self.write_text(&text_command(SET_PING, milliseconds))
    }

    /// Read one tag line reported by the reader, or `None` if nothing arrived
    pub fn read_tag(&mut self) -> Result<Option<String>, UhfError> {
        let delay = self.timing().response_delay;
        pause(delay);

        let data = self
            .transport_mut()?
            .read_available()
            .map_err(|e| UhfError::Transport(format!("{:?}", e)))?;

        Ok(first_line(&data))
    }

    fn write_text(&mut self, command: &str) -> Result<(), UhfError> {
        debug!("Sending text command: {:?}", command);
        self.transport_mut()?
            .write(command.as_bytes())
            .map_err(|e| UhfError::Transport(format!("{:?}", e)))?;
        Ok(())
    }
}

fn first_line(data: &[u8]) -> Option<String> {
    String::from_utf8_lossy(data)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
