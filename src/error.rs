use crate::command::CommandKind;

/// Terminal classification of a session run.
///
/// A run reports exactly one of these, or a
/// [`NetworkConfig`](crate::ip_config::NetworkConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The modem device could not be opened. No command was submitted.
    DeviceOpenFailed,
    /// The device answered a command with an error status
    CommandFailed(CommandKind),
    /// The device did not answer a command within its timeout
    CommandTimedOut(CommandKind),
    /// A response could not be decoded into the structure its command expects
    ParseFailed(CommandKind),
    /// The registration poll cap was reached without a usable registration
    RegistrationTimedOut,
    /// The device reported no IPv4 configuration for the session
    ConfigUnavailable,
    /// Closing the device failed. Only ever reported by the shutdown step
    /// itself, never as the outcome of a run.
    CloseFailed,
    /// The session was driven in a way it does not support, e.g. run twice
    InvalidState,
}

impl Error {
    /// Process exit status matching this failure
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::DeviceOpenFailed => 2,
            Self::CommandFailed(_) => 3,
            Self::CommandTimedOut(_) => 4,
            Self::ParseFailed(_) => 5,
            Self::RegistrationTimedOut => 6,
            Self::ConfigUnavailable => 7,
            Self::CloseFailed => 8,
            Self::InvalidState => 1,
        }
    }

    /// Command the failure is attributed to, if any
    pub const fn command(&self) -> Option<CommandKind> {
        match self {
            Self::CommandFailed(kind) | Self::CommandTimedOut(kind) | Self::ParseFailed(kind) => {
                Some(*kind)
            }
            Self::RegistrationTimedOut => Some(CommandKind::RegisterState),
            Self::ConfigUnavailable => Some(CommandKind::IpConfiguration),
            _ => None,
        }
    }
}

/// Exit status for a finished run: `0` on success, [`Error::exit_code`]
/// otherwise.
pub fn exit_status<T>(outcome: &Result<T, Error>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}
