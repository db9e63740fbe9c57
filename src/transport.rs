use crate::config::ConnectionConfig;

/// Trait for reader communication backends.
/// Implement this trait for different transports (serial port, test doubles, etc.)
///
/// Dropping a transport closes it.
pub trait RfidTransport {
    /// Error type for transport operations
    type Error: std::fmt::Debug;

    /// Write data to the transport
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read every byte currently buffered by the transport without waiting for more.
    /// Returns an empty vector when nothing is pending.
    fn read_available(&mut self) -> Result<Vec<u8>, Self::Error>;
}

/// Opens transports for a session.
///
/// A session keeps its connector for its whole lifetime so that it can open a
/// fresh transport with the same parameters after a link failure.
pub trait RfidConnector {
    /// Transport produced by this connector
    type Transport: RfidTransport;
    /// Error type for open failures
    type Error: std::fmt::Debug;

    /// Open a transport bound to `config.port` at `config.baud_rate`
    fn open(&mut self, config: &ConnectionConfig) -> Result<Self::Transport, Self::Error>;
}
