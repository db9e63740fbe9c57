use log::{debug, error, info, warn};
use std::time::Duration;

use crate::config::{ConnectionConfig, ReconnectPolicy, SessionTiming};
use crate::transport::{RfidConnector, RfidTransport};
use crate::types::UhfError;

/// A connection to one reader over one serial link.
///
/// The session owns at most one open transport. `connect` fills the slot,
/// `disconnect` empties it, and a failed transaction replaces it through the
/// reconnect loop. Dropping the session closes the transport.
pub struct ReaderSession<C: RfidConnector> {
    config: ConnectionConfig,
    connector: C,
    channel: Option<C::Transport>,
    timing: SessionTiming,
    reconnect_policy: ReconnectPolicy,
}

impl<C: RfidConnector> ReaderSession<C> {
    /// Create a disconnected session. Fails if the port name is empty or the baud rate is zero.
    pub fn new(config: ConnectionConfig, connector: C) -> Result<Self, UhfError> {
        config.validate()?;
        Ok(Self {
            config,
            connector,
            channel: None,
            timing: SessionTiming::default(),
            reconnect_policy: ReconnectPolicy::default(),
        })
    }

    pub fn with_timing(mut self, timing: SessionTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_reconnect_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect_policy = policy;
        self
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn timing(&self) -> SessionTiming {
        self.timing
    }

    pub fn reconnect_policy(&self) -> &ReconnectPolicy {
        &self.reconnect_policy
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_some()
    }

    /// The currently open transport, if any
    pub fn transport(&self) -> Option<&C::Transport> {
        self.channel.as_ref()
    }

    pub(crate) fn transport_mut(&mut self) -> Result<&mut C::Transport, UhfError> {
        self.channel.as_mut().ok_or(UhfError::NotConnected)
    }

    /// Open the serial link. Returns `false` if the port could not be opened.
    pub fn connect(&mut self) -> bool {
        match self.try_connect() {
            Ok(()) => true,
            Err(e) => {
                error!("Error opening serial port {}: {}", self.config.port, e);
                false
            }
        }
    }

    /// Open the serial link, reporting why it failed.
    ///
    /// An already open transport is closed first.
    pub fn try_connect(&mut self) -> Result<(), UhfError> {
        self.channel = None;
        let transport = self
            .connector
            .open(&self.config)
            .map_err(|e| UhfError::Transport(format!("{:?}", e)))?;
        self.channel = Some(transport);
        info!("Connected to {} at {} baud", self.config.port, self.config.baud_rate);
        Ok(())
    }

    /// Close the serial link. Does nothing when already disconnected.
    pub fn disconnect(&mut self) {
        if self.channel.take().is_some() {
            info!("Disconnected from {}", self.config.port);
        }
    }

    /// Send raw bytes and return the reader's raw reply.
    ///
    /// Each attempt writes `command`, waits `response_delay` and reads whatever
    /// the reader has sent. The first non-empty read is returned. An empty read
    /// uses up the attempt; a transport error reopens the link (blocking per the
    /// reconnect policy) and also uses up the attempt. Attempts are separated by
    /// `retry_delay`.
    ///
    /// # Returns
    /// `Ok(None)` once `retries` attempts produced no data.
    ///
    /// # Errors
    /// `InvalidParameter` if `retries` is zero, `NotConnected` if the session has
    /// no open link, `ReconnectAborted` if the reconnect policy gave up.
    pub fn send_command(
        &mut self,
        command: &[u8],
        retries: u32,
    ) -> Result<Option<Vec<u8>>, UhfError> {
        if retries == 0 {
            return Err(UhfError::InvalidParameter("Retries must be at least 1".into()));
        }
        if self.channel.is_none() {
            return Err(UhfError::NotConnected);
        }

        for attempt in 1..=retries {
            debug!("Sending command: {:02X?} (attempt {}/{})", command, attempt, retries);

            match self.transact(command) {
                Ok(response) if !response.is_empty() => {
                    debug!("Received {} bytes: {:02X?}", response.len(), response);
                    return Ok(Some(response));
                }
                Ok(_) => {
                    warn!("No response received (attempt {}/{})", attempt, retries);
                }
                Err(e) => {
                    warn!("Error communicating with the reader: {}", e);
                    self.reconnect()?;
                }
            }

            if attempt < retries {
                pause(self.timing.retry_delay);
            }
        }

        Ok(None)
    }

    /// Drop the current link and reopen it with the same configuration.
    ///
    /// Blocks until the port opens again unless the policy sets an attempt
    /// limit or its cancel token fires.
    pub(crate) fn reconnect(&mut self) -> Result<(), UhfError> {
        self.channel = None;
        let mut attempts: u32 = 0;

        loop {
            if self.reconnect_policy.is_cancelled() {
                warn!("Reconnect to {} cancelled after {} attempt(s)", self.config.port, attempts);
                return Err(UhfError::ReconnectAborted { attempts });
            }

            attempts = attempts.saturating_add(1);
            info!("Attempting to reconnect to {}...", self.config.port);

            match self.connector.open(&self.config) {
                Ok(transport) => {
                    self.channel = Some(transport);
                    info!(
                        "Reconnected to {} at {} baud",
                        self.config.port, self.config.baud_rate
                    );
                    return Ok(());
                }
                Err(e) => {
                    warn!("Reconnection failed: {:?}", e);
                }
            }

            if self.reconnect_policy.exhausted(attempts) {
                error!("Giving up on {} after {} attempt(s)", self.config.port, attempts);
                return Err(UhfError::ReconnectAborted { attempts });
            }

            pause(self.reconnect_policy.interval);
        }
    }

    /// One write-wait-read cycle
    fn transact(&mut self, command: &[u8]) -> Result<Vec<u8>, UhfError> {
        let channel = self.channel.as_mut().ok_or(UhfError::NotConnected)?;

        let written = channel
            .write(command)
            .map_err(|e| UhfError::Transport(format!("{:?}", e)))?;
        debug!("Wrote {} bytes", written);

        pause(self.timing.response_delay);

        channel
            .read_available()
            .map_err(|e| UhfError::Transport(format!("{:?}", e)))
    }
}

pub(crate) fn pause(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}
