//! Responses for Basic Connect Commands
use heapless::{String, Vec};
use no_std_net::Ipv4Addr;
use serde::{Deserialize, Serialize};

use super::types::*;
use crate::command::types::Uuid;

/// Most IPv4 address entries kept from a single IP configuration response
pub const MAX_IPV4_ADDRESSES: usize = 4;

/// Most IPv4 DNS server entries kept from a single IP configuration response
pub const MAX_IPV4_DNS_SERVERS: usize = 4;

/// 10.5.4 `MBIM_CID_PIN`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinInfo {
    pub pin_type: PinType,
    pub pin_state: PinState,
    pub remaining_attempts: u32,
}

/// 10.5.9 `MBIM_CID_REGISTER_STATE`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegistrationStateInfo {
    pub nw_error: u32,
    pub register_state: RegisterState,
    pub register_mode: RegisterMode,
    pub available_data_classes: DataClass,
    pub provider_id: String<8>,
    pub provider_name: String<64>,
    pub roaming_text: String<64>,
}

/// 10.5.10 `MBIM_CID_PACKET_SERVICE`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PacketServiceInfo {
    pub nw_error: u32,
    pub packet_service_state: PacketServiceState,
    pub highest_available_data_class: DataClass,
    pub uplink_speed: u64,
    pub downlink_speed: u64,
}

/// 10.5.12 `MBIM_CID_CONNECT`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectInfo {
    pub session_id: u32,
    pub activation_state: ActivationState,
    pub voice_call_state: VoiceCallState,
    pub ip_type: ContextIpType,
    pub context_type: Uuid,
    pub nw_error: u32,
}

/// 10.5.15 `MBIM_CID_IP_CONFIGURATION`
///
/// IPv6 details are not kept, only whether the device reports any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IpConfiguration {
    pub session_id: u32,
    pub ipv4_configuration_available: IpConfigurationAvailable,
    pub ipv6_configuration_available: IpConfigurationAvailable,
    pub ipv4_addresses: Vec<Ipv4Element, MAX_IPV4_ADDRESSES>,
    pub ipv4_gateway: Option<Ipv4Addr>,
    pub ipv4_dns_servers: Vec<Ipv4Addr, MAX_IPV4_DNS_SERVERS>,
    pub ipv4_mtu: u32,
}
