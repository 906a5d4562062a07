//! Types shared by all MBIM services
use core::fmt;

use serde::{Deserialize, Serialize};

/// MBIM service or context identifier, kept in wire (big endian) order
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uuid(uuid::Uuid);

impl Uuid {
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Uuid::from_bytes(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl From<uuid::Uuid> for Uuid {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Uuid> for uuid::Uuid {
    fn from(uuid: Uuid) -> Self {
        uuid.0
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Uuid {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", defmt::Display2Format(&self.0.hyphenated()))
    }
}

/// Status codes a function reports in its `MBIM_COMMAND_DONE` message.
///
/// Only the generic and Basic Connect statuses are listed, anything else
/// is mapped to [`MbimStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MbimStatus {
    Success,
    Busy,
    Failure,
    SimNotInserted,
    BadSim,
    PinRequired,
    PinDisabled,
    NotRegistered,
    ProvidersNotFound,
    NoDeviceSupport,
    ProviderNotVisible,
    DataClassNotAvailable,
    PacketServiceDetached,
    MaxActivatedContexts,
    NotInitialized,
    VoiceCallInProgress,
    ContextNotActivated,
    ServiceNotActivated,
    InvalidAccessString,
    InvalidUserNamePassword,
    RadioPowerOff,
    InvalidParameters,
    ReadFailure,
    WriteFailure,
    OperationNotAllowed,
    ContextNotSupported,
    Unknown(u32),
}

impl From<u32> for MbimStatus {
    fn from(v: u32) -> Self {
        match v {
            0 => Self::Success,
            1 => Self::Busy,
            2 => Self::Failure,
            3 => Self::SimNotInserted,
            4 => Self::BadSim,
            5 => Self::PinRequired,
            6 => Self::PinDisabled,
            7 => Self::NotRegistered,
            8 => Self::ProvidersNotFound,
            9 => Self::NoDeviceSupport,
            10 => Self::ProviderNotVisible,
            11 => Self::DataClassNotAvailable,
            12 => Self::PacketServiceDetached,
            13 => Self::MaxActivatedContexts,
            14 => Self::NotInitialized,
            15 => Self::VoiceCallInProgress,
            16 => Self::ContextNotActivated,
            17 => Self::ServiceNotActivated,
            18 => Self::InvalidAccessString,
            19 => Self::InvalidUserNamePassword,
            20 => Self::RadioPowerOff,
            21 => Self::InvalidParameters,
            22 => Self::ReadFailure,
            23 => Self::WriteFailure,
            28 => Self::OperationNotAllowed,
            38 => Self::ContextNotSupported,
            other => Self::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_display() {
        let uuid = Uuid::from_bytes([
            0xa2, 0x89, 0xcc, 0x33, 0xbc, 0xbb, 0x8b, 0x4f, 0xb6, 0xb0, 0x13, 0x3e, 0xc2, 0xaa,
            0xe6, 0xdf,
        ]);
        assert_eq!(uuid.to_string(), "a289cc33-bcbb-8b4f-b6b0-133ec2aae6df");
        assert_eq!(format!("{:?}", uuid), "a289cc33-bcbb-8b4f-b6b0-133ec2aae6df");

        let parsed = uuid::Uuid::parse_str("a289cc33-bcbb-8b4f-b6b0-133ec2aae6df").unwrap();
        assert_eq!(Uuid::from(parsed), uuid);
        assert_eq!(uuid::Uuid::from(uuid).as_bytes(), uuid.as_bytes());
    }

    #[test]
    fn status_from_raw() {
        assert_eq!(MbimStatus::from(6), MbimStatus::PinDisabled);
        assert_eq!(MbimStatus::from(28), MbimStatus::OperationNotAllowed);
        assert_eq!(MbimStatus::from(24), MbimStatus::Unknown(24));
    }
}
