use log::debug;

use crate::config::DEFAULT_RETRIES;
use crate::frame::build_frame;
use crate::session::ReaderSession;
use crate::transport::RfidConnector;
use crate::types::UhfError;

/// Supported reader families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderVariant {
    /// Frames built at runtime: `AA 00 <cmd> <len> <params> <checksum> DD`
    R200,
    /// Fixed, pre-encoded command frames
    E200,
}

/// How a family produces its scan frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSource {
    /// Built by [`build_frame`] from a command code and parameters
    Command { code: u8, params: &'static [u8] },
    /// Sent verbatim
    Fixed(&'static [u8]),
}

impl FrameSource {
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            FrameSource::Command { code, params } => build_frame(code, params).into_bytes(),
            FrameSource::Fixed(bytes) => bytes.to_vec(),
        }
    }
}

impl ReaderVariant {
    /// R200 single poll inventory command
    pub const R200_SINGLE_POLL: u8 = 0x22;

    /// E200 inventory command
    pub const E200_SCAN_COMMAND: [u8; 12] = [
        0x55, 0x00, 0x07, 0x97, 0x83, 0x03, 0x01, 0x07, 0x08, 0x00, 0xC2, 0x0D,
    ];

    /// The frame this family sends for a scan
    pub fn scan_source(self) -> FrameSource {
        match self {
            ReaderVariant::R200 => FrameSource::Command {
                code: Self::R200_SINGLE_POLL,
                params: &[],
            },
            ReaderVariant::E200 => FrameSource::Fixed(&Self::E200_SCAN_COMMAND),
        }
    }

    /// Whether this family accepts runtime-built command frames
    pub fn builds_frames(self) -> bool {
        matches!(self.scan_source(), FrameSource::Command { .. })
    }
}

/// Run a scan for `variant` on `session` and return the raw reply
pub fn scan<C: RfidConnector>(
    variant: ReaderVariant,
    session: &mut ReaderSession<C>,
) -> Result<Option<Vec<u8>>, UhfError> {
    let frame = variant.scan_source().to_bytes();
    debug!("{:?} scan frame: {:02X?}", variant, frame);
    session.send_command(&frame, DEFAULT_RETRIES)
}

/// A reader of a given family bound to its session
pub struct UhfReader<C: RfidConnector> {
    variant: ReaderVariant,
    session: ReaderSession<C>,
}

impl<C: RfidConnector> UhfReader<C> {
    pub fn new(variant: ReaderVariant, session: ReaderSession<C>) -> Self {
        Self { variant, session }
    }

    pub fn variant(&self) -> ReaderVariant {
        self.variant
    }

    pub fn session(&self) -> &ReaderSession<C> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ReaderSession<C> {
        &mut self.session
    }

    pub fn into_session(self) -> ReaderSession<C> {
        self.session
    }

    /// Open the serial link. Returns `false` if the port could not be opened.
    pub fn connect(&mut self) -> bool {
        self.session.connect()
    }

    pub fn disconnect(&mut self) {
        self.session.disconnect()
    }

    /// Ask the reader for an inventory and return the raw reply, or `None` if it stayed silent
    pub fn scan(&mut self) -> Result<Option<Vec<u8>>, UhfError> {
        scan(self.variant, &mut self.session)
    }

    /// Send an arbitrary R200 command and return the raw reply.
    ///
    /// Only R200 readers take runtime-built frames; E200 readers only accept
    /// their fixed command set, use [`ReaderSession::send_command`] for those.
    pub fn execute(&mut self, command: u8, params: &[u8]) -> Result<Option<Vec<u8>>, UhfError> {
        if !self.variant.builds_frames() {
            return Err(UhfError::InvalidParameter(format!(
                "{:?} readers do not accept built command frames",
                self.variant
            )));
        }

        let frame = build_frame(command, params);
        self.session.send_command(frame.as_bytes(), DEFAULT_RETRIES)
    }
}
