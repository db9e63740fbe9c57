//! Connection parameters and timing policy

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::types::UhfError;

pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
/// Attempts per `send_command` call
pub const DEFAULT_RETRIES: u32 = 3;

/// Where and how to open the serial link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Port name (e.g., "/dev/ttyUSB0" or "COM7")
    pub port: String,
    pub baud_rate: u32,
    /// Read/write timeout applied to the opened port
    pub timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), UhfError> {
        if self.port.trim().is_empty() {
            return Err(UhfError::InvalidParameter("Port name must not be empty".into()));
        }
        if self.baud_rate == 0 {
            return Err(UhfError::InvalidParameter("Baud rate must be positive".into()));
        }
        Ok(())
    }
}

/// Fixed pauses used inside a transaction.
///
/// The right values depend on the reader hardware; the defaults suit R200/E200
/// modules at 9600-115200 baud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    /// Wait after writing a frame before reading the reply
    pub response_delay: Duration,
    /// Wait between two attempts of the same transaction
    pub retry_delay: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(500),
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl SessionTiming {
    /// No pauses at all, for simulated transports
    pub fn immediate() -> Self {
        Self {
            response_delay: Duration::ZERO,
            retry_delay: Duration::ZERO,
        }
    }
}

/// Shared flag used to stop a blocking reconnect loop from another thread
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a session tries to restore a dropped link.
///
/// The default never gives up: it keeps reopening the port every `interval`
/// until it succeeds. Set `max_attempts` or attach a [`CancelToken`] to bound it.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    /// Wait between failed open attempts
    pub interval: Duration,
    /// `None` retries forever
    pub max_attempts: Option<u32>,
    pub cancel: Option<CancelToken>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: None,
            cancel: None,
        }
    }
}

impl ReconnectPolicy {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    pub(crate) fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}
