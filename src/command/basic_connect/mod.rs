//! ### 10.5 - Basic Connect service
//!
//! The Basic Connect service (`a289cc33-bcbb-8b4f-b6b0-133ec2aae6df`) holds
//! the commands needed to get a data session up: unlocking the SIM,
//! checking network registration, attaching to the packet service,
//! activating a context and reading back its IP configuration.
//!
//! Only the parameters are modelled here. Framing and information buffer
//! layout belong to the protocol library on the other side of
//! [`crate::device::MbimDevice`].

pub mod responses;
pub mod types;

use crate::command::types::Uuid;
use types::*;

/// UUID of the Basic Connect service
pub const SERVICE: Uuid = Uuid::from_bytes([
    0xa2, 0x89, 0xcc, 0x33, 0xbc, 0xbb, 0x8b, 0x4f, 0xb6, 0xb0, 0x13, 0x3e, 0xc2, 0xaa, 0xe6,
    0xdf,
]);

/// Command identifiers within the Basic Connect service
pub mod cid {
    pub const PIN: u32 = 4;
    pub const REGISTER_STATE: u32 = 9;
    pub const PACKET_SERVICE: u32 = 10;
    pub const CONNECT: u32 = 12;
    pub const IP_CONFIGURATION: u32 = 15;
}

/// 10.5.4 PIN `MBIM_CID_PIN` (set)
///
/// Enter, enable, disable or change a PIN. Entering a PIN when the SIM is not
/// locked makes the function report a failure status, which a caller may
/// treat as "already entered".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetPin<'a> {
    pub pin_type: PinType,
    pub pin_operation: PinOperation,
    pub pin: &'a str,
    pub new_pin: Option<&'a str>,
}

impl<'a> SetPin<'a> {
    /// Enter PIN1
    pub fn enter(pin: &'a str) -> Self {
        Self {
            pin_type: PinType::Pin1,
            pin_operation: PinOperation::Enter,
            pin,
            new_pin: None,
        }
    }
}

/// 10.5.9 Register state `MBIM_CID_REGISTER_STATE` (query)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetRegisterState;

/// 10.5.10 Packet service `MBIM_CID_PACKET_SERVICE` (set)
///
/// Attaching makes the function eligible for context activation once the
/// device is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetPacketService {
    pub action: PacketServiceAction,
}

/// 10.5.12 Connect `MBIM_CID_CONNECT` (set)
///
/// Activates or deactivates the context identified by `session_id`. The
/// response reports the session id and activation state the function ended
/// up in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetConnect<'a> {
    pub session_id: u32,
    pub activation_command: ActivationCommand,
    pub access_string: &'a str,
    pub user_name: &'a str,
    pub password: &'a str,
    pub compression: Compression,
    pub auth_protocol: AuthProtocol,
    pub ip_type: ContextIpType,
    pub context_type: Uuid,
}

/// 10.5.15 IP configuration `MBIM_CID_IP_CONFIGURATION` (query)
///
/// The query carries a fully zeroed configuration, only the session id is
/// significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetIpConfiguration {
    pub session_id: u32,
}
