//! MBIM commands used to bring up a data session
//!
//! Following the [MBIM v1.0 specification](https://www.usb.org/document-library/mobile-broadband-interface-model-v10-errata-1-and-adopters-agreement)

pub mod basic_connect;
pub mod types;

use serde::{Deserialize, Serialize};

use basic_connect::responses::{
    ConnectInfo, IpConfiguration, PacketServiceInfo, PinInfo, RegistrationStateInfo,
};
use basic_connect::{GetIpConfiguration, GetRegisterState, SetConnect, SetPacketService, SetPin};
pub use types::{MbimStatus, Uuid};

/// The command kinds a session issues, one per step of the bring-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    Pin,
    RegisterState,
    PacketService,
    Connect,
    IpConfiguration,
}

impl CommandKind {
    /// Command identifier within the Basic Connect service
    pub const fn cid(&self) -> u32 {
        match self {
            Self::Pin => basic_connect::cid::PIN,
            Self::RegisterState => basic_connect::cid::REGISTER_STATE,
            Self::PacketService => basic_connect::cid::PACKET_SERVICE,
            Self::Connect => basic_connect::cid::CONNECT,
            Self::IpConfiguration => basic_connect::cid::IP_CONFIGURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request<'a> {
    SetPin(SetPin<'a>),
    GetRegisterState(GetRegisterState),
    SetPacketService(SetPacketService),
    SetConnect(SetConnect<'a>),
    GetIpConfiguration(GetIpConfiguration),
}

impl Request<'_> {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::SetPin(_) => CommandKind::Pin,
            Self::GetRegisterState(_) => CommandKind::RegisterState,
            Self::SetPacketService(_) => CommandKind::PacketService,
            Self::SetConnect(_) => CommandKind::Connect,
            Self::GetIpConfiguration(_) => CommandKind::IpConfiguration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Pin(PinInfo),
    RegisterState(RegistrationStateInfo),
    PacketService(PacketServiceInfo),
    Connect(ConnectInfo),
    IpConfiguration(IpConfiguration),
}

impl Response {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Pin(_) => CommandKind::Pin,
            Self::RegisterState(_) => CommandKind::RegisterState,
            Self::PacketService(_) => CommandKind::PacketService,
            Self::Connect(_) => CommandKind::Connect,
            Self::IpConfiguration(_) => CommandKind::IpConfiguration,
        }
    }
}
