use embassy_time::{with_timeout, Duration, Instant};

use crate::command::{CommandKind, MbimStatus, Request, Response};
use crate::config::Timeouts;
use crate::device::{DeviceError, MbimDevice};
use crate::error::Error;

/// Outcome of a single command that did not produce a usable response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum CommandError {
    /// The device answered with an error status
    Failed(MbimStatus),
    /// The response could not be decoded
    Parse,
    /// No answer within the command's timeout
    Timeout,
    /// The device answered with a response for a different command
    UnexpectedResponse,
}

impl CommandError {
    /// Terminal classification of this failure for a command of `kind`
    pub fn classify(self, kind: CommandKind) -> Error {
        match self {
            Self::Failed(_) => Error::CommandFailed(kind),
            Self::Timeout => Error::CommandTimedOut(kind),
            Self::Parse | Self::UnexpectedResponse => Error::ParseFailed(kind),
        }
    }
}

impl From<DeviceError> for CommandError {
    fn from(e: DeviceError) -> Self {
        match e {
            DeviceError::Status(status) => Self::Failed(status),
            DeviceError::Parse => Self::Parse,
            DeviceError::Timeout => Self::Timeout,
            DeviceError::Io => Self::Failed(MbimStatus::Failure),
        }
    }
}

/// The command currently outstanding on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingCommand {
    pub kind: CommandKind,
    pub issued_at: Instant,
    pub timeout: Duration,
}

/// Holds the pending command for the lifetime of one `execute` call, also
/// when that call is dropped before the device answers.
struct PendingSlot<'a>(&'a mut Option<PendingCommand>);

impl<'a> PendingSlot<'a> {
    fn fill(slot: &'a mut Option<PendingCommand>, command: PendingCommand) -> Self {
        *slot = Some(command);
        Self(slot)
    }

    fn issued_at(&self) -> Instant {
        self.0.as_ref().map_or_else(Instant::now, |p| p.issued_at)
    }
}

impl Drop for PendingSlot<'_> {
    fn drop(&mut self) {
        *self.0 = None;
    }
}

/// Issues commands on an open device, one at a time.
///
/// The device is owned for the duration of the session and handed back with
/// [`Transaction::release`] for closing.
pub struct Transaction<D> {
    device: D,
    timeouts: Timeouts,
    pending: Option<PendingCommand>,
}

impl<D: MbimDevice> Transaction<D> {
    pub fn new(device: D, timeouts: Timeouts) -> Self {
        Self {
            device,
            timeouts,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<&PendingCommand> {
        self.pending.as_ref()
    }

    /// Submit `request` and wait for its single outcome.
    ///
    /// A response of another command kind is reported as
    /// [`CommandError::UnexpectedResponse`].
    pub async fn execute(&mut self, request: &Request<'_>) -> Result<Response, CommandError> {
        debug_assert!(self.pending.is_none());

        let kind = request.kind();
        let timeout = self.timeouts.for_kind(kind);
        debug!(
            "Submitting {:?} command, timeout {} ms",
            kind,
            timeout.as_millis()
        );

        let pending = PendingSlot::fill(
            &mut self.pending,
            PendingCommand {
                kind,
                issued_at: Instant::now(),
                timeout,
            },
        );

        let result = with_timeout(timeout, self.device.command(request)).await;

        trace!(
            "{:?} completed after {} ms",
            kind,
            pending.issued_at().elapsed().as_millis()
        );
        drop(pending);

        let response = match result {
            Ok(r) => r?,
            Err(_) => {
                warn!("{:?} command timed out", kind);
                return Err(CommandError::Timeout);
            }
        };

        if response.kind() != kind {
            error!(
                "Expected {:?} response, got {:?}",
                kind,
                response.kind()
            );
            return Err(CommandError::UnexpectedResponse);
        }

        Ok(response)
    }

    /// Give up the device, e.g. to close it
    pub fn release(self) -> D {
        self.device
    }
}
