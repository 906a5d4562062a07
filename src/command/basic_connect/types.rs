//! Argument and result types for Basic Connect commands
use serde::{Deserialize, Serialize};

use crate::command::types::Uuid;

/// PIN type, as carried in `MBIM_CID_PIN`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinType {
    Unknown = 0,
    Custom = 1,
    Pin1 = 2,
    Pin2 = 3,
    DeviceSimPin = 4,
    DeviceFirstSimPin = 5,
    NetworkPin = 6,
    NetworkSubsetPin = 7,
    ServiceProviderPin = 8,
    CorporatePin = 9,
    SubsidyLock = 10,
    Puk1 = 11,
    Puk2 = 12,
    DeviceFirstSimPuk = 13,
    NetworkPuk = 14,
    NetworkSubsetPuk = 15,
    ServiceProviderPuk = 16,
    CorporatePuk = 17,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinOperation {
    Enter = 0,
    Enable = 1,
    Disable = 2,
    Change = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    Unlocked = 0,
    Locked = 1,
}

/// Network registration state reported by `MBIM_CID_REGISTER_STATE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterState {
    #[default]
    Unknown = 0,
    Deregistered = 1,
    Searching = 2,
    Home = 3,
    Roaming = 4,
    Partner = 5,
    Denied = 6,
}

impl From<u32> for RegisterState {
    fn from(v: u32) -> Self {
        match v {
            1 => Self::Deregistered,
            2 => Self::Searching,
            3 => Self::Home,
            4 => Self::Roaming,
            5 => Self::Partner,
            6 => Self::Denied,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterMode {
    #[default]
    Unknown = 0,
    Automatic = 1,
    Manual = 2,
}

/// Bitmask of radio data classes (`MBIM_DATA_CLASS`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataClass(pub u32);

impl DataClass {
    pub const NONE: Self = Self(0);
    pub const GPRS: Self = Self(1 << 0);
    pub const EDGE: Self = Self(1 << 1);
    pub const UMTS: Self = Self(1 << 2);
    pub const HSDPA: Self = Self(1 << 3);
    pub const HSUPA: Self = Self(1 << 4);
    pub const LTE: Self = Self(1 << 5);
    pub const NR5G_NSA: Self = Self(1 << 6);
    pub const NR5G_SA: Self = Self(1 << 7);
    pub const CUSTOM: Self = Self(1 << 31);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketServiceAction {
    Attach = 0,
    Detach = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketServiceState {
    #[default]
    Unknown = 0,
    Attaching = 1,
    Attached = 2,
    Detaching = 3,
    Detached = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivationCommand {
    Deactivate = 0,
    Activate = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivationState {
    #[default]
    Unknown = 0,
    Activated = 1,
    Activating = 2,
    Deactivated = 3,
    Deactivating = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VoiceCallState {
    #[default]
    None = 0,
    InProgress = 1,
    HangUp = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Compression {
    #[default]
    None = 0,
    Enable = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuthProtocol {
    #[default]
    None = 0,
    Pap = 1,
    Chap = 2,
    MsChapV2 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContextIpType {
    #[default]
    Default = 0,
    Ipv4 = 1,
    Ipv6 = 2,
    Ipv4v6 = 3,
    Ipv4AndIpv6 = 4,
}

/// Context types known to MBIM. Only the ones relevant to data sessions are
/// listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContextType {
    #[default]
    Internet,
    Vpn,
    VoiceOverIp,
    VideoShare,
    Purchase,
    Ims,
    Mms,
    Local,
}

impl ContextType {
    /// UUID identifying the context type on the wire
    pub const fn uuid(&self) -> Uuid {
        let bytes = match self {
            Self::Internet => [
                0x7e, 0x5e, 0x2a, 0x7e, 0x4e, 0x6f, 0x72, 0x72, 0x73, 0x6b, 0x65, 0x6e, 0x7e,
                0x5e, 0x2a, 0x7e,
            ],
            Self::Vpn => [
                0x9b, 0x9f, 0x7b, 0xbe, 0x89, 0x52, 0x44, 0xb7, 0x83, 0xac, 0xca, 0x41, 0x31,
                0x8d, 0xf7, 0xa0,
            ],
            Self::VoiceOverIp => [
                0x88, 0x91, 0x82, 0x94, 0x0e, 0xf4, 0x43, 0x96, 0x8c, 0xca, 0xa8, 0x58, 0x8f,
                0xbc, 0x02, 0xb2,
            ],
            Self::VideoShare => [
                0x05, 0xa2, 0xa7, 0x16, 0x7c, 0x34, 0x4b, 0x4d, 0x9a, 0x91, 0xc5, 0xef, 0x0c,
                0x7a, 0xaa, 0xcc,
            ],
            Self::Purchase => [
                0xb3, 0x27, 0x24, 0x96, 0xac, 0x6c, 0x42, 0x2b, 0xa8, 0xc0, 0xac, 0xf6, 0x87,
                0xa2, 0x72, 0x17,
            ],
            Self::Ims => [
                0x21, 0x61, 0x0d, 0x01, 0x30, 0x74, 0x4b, 0xce, 0x94, 0x25, 0xb5, 0x3a, 0x07,
                0xd6, 0x97, 0xd6,
            ],
            Self::Mms => [
                0x46, 0x72, 0x66, 0x64, 0x72, 0x69, 0x6b, 0xc6, 0x96, 0x24, 0xd1, 0xd3, 0x53,
                0x89, 0xac, 0xa9,
            ],
            Self::Local => [
                0xa5, 0x7a, 0x9a, 0xfc, 0xb0, 0x9f, 0x45, 0xd7, 0xbb, 0x40, 0x03, 0x3c, 0x39,
                0xf6, 0x0d, 0xb9,
            ],
        };
        Uuid::from_bytes(bytes)
    }

    pub fn from_uuid(uuid: &Uuid) -> Option<Self> {
        [
            Self::Internet,
            Self::Vpn,
            Self::VoiceOverIp,
            Self::VideoShare,
            Self::Purchase,
            Self::Ims,
            Self::Mms,
            Self::Local,
        ]
        .into_iter()
        .find(|ctx| ctx.uuid() == *uuid)
    }
}

/// Availability flags of an `MBIM_CID_IP_CONFIGURATION` response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IpConfigurationAvailable(pub u32);

impl IpConfigurationAvailable {
    pub const NONE: Self = Self(0);
    pub const ADDRESS: Self = Self(1 << 0);
    pub const GATEWAY: Self = Self(1 << 1);
    pub const DNS: Self = Self(1 << 2);
    pub const MTU: Self = Self(1 << 3);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for IpConfigurationAvailable {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One IPv4 address entry together with its on-link prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Element {
    pub on_link_prefix_length: u32,
    pub ipv4_address: no_std_net::Ipv4Addr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internet_context_uuid() {
        assert_eq!(
            ContextType::Internet.uuid().to_string(),
            "7e5e2a7e-4e6f-7272-736b-656e7e5e2a7e"
        );
        assert_eq!(
            ContextType::from_uuid(&ContextType::Ims.uuid()),
            Some(ContextType::Ims)
        );
        assert_eq!(ContextType::from_uuid(&Uuid::from_bytes([0; 16])), None);
    }

    #[test]
    fn register_state_from_raw() {
        assert_eq!(RegisterState::from(3), RegisterState::Home);
        assert_eq!(RegisterState::from(5), RegisterState::Partner);
        assert_eq!(RegisterState::from(42), RegisterState::Unknown);
    }

    #[test]
    fn availability_flags() {
        let flags = IpConfigurationAvailable::ADDRESS | IpConfigurationAvailable::DNS;
        assert!(flags.contains(IpConfigurationAvailable::ADDRESS));
        assert!(!flags.contains(IpConfigurationAvailable::GATEWAY));
        assert!(flags.contains(IpConfigurationAvailable::NONE));
    }
}
