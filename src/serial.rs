//! Serial port transport for desktop using serialport crate

use std::io::{Read, Write};

use crate::config::ConnectionConfig;
use crate::transport::{RfidConnector, RfidTransport};

pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    pub fn open(config: &ConnectionConfig) -> Result<Self, serialport::Error> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(config.timeout)
            .open()?;
        port.clear(serialport::ClearBuffer::Input)?;

        Ok(Self { port })
    }

    pub fn name(&self) -> Option<String> {
        self.port.name()
    }
}

impl RfidTransport for SerialTransport {
    type Error = std::io::Error;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(data.len())
    }

    fn read_available(&mut self) -> Result<Vec<u8>, Self::Error> {
        let pending = self.port.bytes_to_read().map_err(std::io::Error::other)? as usize;
        let mut buf = vec![0u8; pending];
        if pending > 0 {
            self.port.read_exact(&mut buf)?;
        }
        Ok(buf)
    }
}

/// Opens [`SerialTransport`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialConnector;

impl RfidConnector for SerialConnector {
    type Transport = SerialTransport;
    type Error = serialport::Error;

    fn open(&mut self, config: &ConnectionConfig) -> Result<Self::Transport, Self::Error> {
        SerialTransport::open(config)
    }
}

/// Names of the serial ports present on this machine
pub fn available_ports() -> Result<Vec<String>, serialport::Error> {
    let mut names: Vec<String> = serialport::available_ports()?
        .into_iter()
        .map(|info| info.port_name)
        .collect();
    names.sort();
    Ok(names)
}
