//! Decoding of `MBIM_CID_IP_CONFIGURATION` responses into a usable IPv4
//! network configuration.

use no_std_net::Ipv4Addr;
use serde::{Deserialize, Serialize};

use crate::command::basic_connect::responses::IpConfiguration;
use crate::command::basic_connect::types::IpConfigurationAvailable;

/// Number of DNS servers kept in a [`NetworkConfig`]
pub const DNS_SERVERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The device reports no IPv4 address for the session
    Unavailable,
    /// An on-link prefix length outside `0..=32`
    InvalidPrefixLength(u32),
}

/// IPv4 configuration of an established data session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub address: Ipv4Addr,
    /// Derived from the on-link prefix length, never reported by the device
    pub netmask: Ipv4Addr,
    /// Unspecified when the device reports no gateway
    pub gateway: Ipv4Addr,
    /// In the order reported, unused slots are unspecified
    pub dns: [Ipv4Addr; DNS_SERVERS],
    pub mtu: Option<u32>,
}

#[cfg(feature = "defmt")]
impl defmt::Format for NetworkConfig {
    fn format(&self, f: defmt::Formatter) {
        let [a0, a1, a2, a3] = self.address.octets();
        let [m0, m1, m2, m3] = self.netmask.octets();
        let [g0, g1, g2, g3] = self.gateway.octets();
        defmt::write!(
            f,
            "address: {}.{}.{}.{}, netmask: {}.{}.{}.{}, gateway: {}.{}.{}.{}",
            a0,
            a1,
            a2,
            a3,
            m0,
            m1,
            m2,
            m3,
            g0,
            g1,
            g2,
            g3,
        );
        for dns in self.dns.iter() {
            let [d0, d1, d2, d3] = dns.octets();
            defmt::write!(f, ", dns: {}.{}.{}.{}", d0, d1, d2, d3);
        }
        defmt::write!(f, ", mtu: {}", self.mtu);
    }
}

const fn unspecified() -> Ipv4Addr {
    Ipv4Addr::new(0, 0, 0, 0)
}

/// Netmask with the top `prefix_length` bits set.
///
/// Returns `None` for prefix lengths above 32.
pub fn netmask(prefix_length: u32) -> Option<Ipv4Addr> {
    if prefix_length > 32 {
        return None;
    }

    let bits = u32::MAX.checked_shl(32 - prefix_length).unwrap_or(0);
    let [a, b, c, d] = bits.to_be_bytes();
    Some(Ipv4Addr::new(a, b, c, d))
}

/// Turn the IPv4 part of an IP configuration response into a
/// [`NetworkConfig`].
///
/// The first address entry is the station address. Gateway and DNS servers
/// are only taken when their availability flag is set, DNS servers past the
/// second are ignored.
pub fn decode(response: &IpConfiguration) -> Result<NetworkConfig, DecodeError> {
    let available = response.ipv4_configuration_available;

    if !available.contains(IpConfigurationAvailable::ADDRESS) {
        return Err(DecodeError::Unavailable);
    }

    let element = response
        .ipv4_addresses
        .first()
        .ok_or(DecodeError::Unavailable)?;

    let netmask = netmask(element.on_link_prefix_length)
        .ok_or(DecodeError::InvalidPrefixLength(element.on_link_prefix_length))?;

    let gateway = if available.contains(IpConfigurationAvailable::GATEWAY) {
        response.ipv4_gateway.unwrap_or(unspecified())
    } else {
        unspecified()
    };

    let mut dns = [unspecified(); DNS_SERVERS];
    if available.contains(IpConfigurationAvailable::DNS) {
        for (slot, server) in dns.iter_mut().zip(response.ipv4_dns_servers.iter()) {
            *slot = *server;
        }
    }

    let mtu = available
        .contains(IpConfigurationAvailable::MTU)
        .then_some(response.ipv4_mtu);

    Ok(NetworkConfig {
        address: element.ipv4_address,
        netmask,
        gateway,
        dns,
        mtu,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::basic_connect::types::Ipv4Element;
    use heapless::Vec;

    fn response(
        available: IpConfigurationAvailable,
        address: Option<(Ipv4Addr, u32)>,
        gateway: Option<Ipv4Addr>,
        dns: &[Ipv4Addr],
    ) -> IpConfiguration {
        let mut ipv4_addresses = Vec::new();
        if let Some((ipv4_address, on_link_prefix_length)) = address {
            ipv4_addresses
                .push(Ipv4Element {
                    on_link_prefix_length,
                    ipv4_address,
                })
                .unwrap();
        }

        IpConfiguration {
            session_id: 0,
            ipv4_configuration_available: available,
            ipv6_configuration_available: IpConfigurationAvailable::NONE,
            ipv4_addresses,
            ipv4_gateway: gateway,
            ipv4_dns_servers: Vec::from_slice(dns).unwrap(),
            ipv4_mtu: 0,
        }
    }

    fn full() -> IpConfigurationAvailable {
        IpConfigurationAvailable::ADDRESS
            | IpConfigurationAvailable::GATEWAY
            | IpConfigurationAvailable::DNS
    }

    #[test]
    fn netmask_for_every_prefix() {
        for p in 0..=32u32 {
            let mask = u32::from_be_bytes(netmask(p).unwrap().octets());
            assert_eq!(mask.leading_ones(), p, "prefix {}", p);
            assert_eq!(mask.trailing_zeros(), 32 - p, "prefix {}", p);
        }

        assert_eq!(netmask(0), Some(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(netmask(24), Some(Ipv4Addr::new(255, 255, 255, 0)));
        assert_eq!(netmask(32), Some(Ipv4Addr::new(255, 255, 255, 255)));
        assert_eq!(netmask(33), None);
    }

    #[test]
    fn decode_full_configuration() {
        let config = decode(&response(
            full(),
            Some((Ipv4Addr::new(10, 0, 0, 5), 24)),
            Some(Ipv4Addr::new(10, 0, 0, 1)),
            &[Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)],
        ))
        .unwrap();

        assert_eq!(
            config,
            NetworkConfig {
                address: Ipv4Addr::new(10, 0, 0, 5),
                netmask: Ipv4Addr::new(255, 255, 255, 0),
                gateway: Ipv4Addr::new(10, 0, 0, 1),
                dns: [Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)],
                mtu: None,
            }
        );
    }

    #[test]
    fn unavailable_without_address() {
        let no_flag = response(
            IpConfigurationAvailable::GATEWAY,
            Some((Ipv4Addr::new(10, 0, 0, 5), 24)),
            None,
            &[],
        );
        assert_eq!(decode(&no_flag), Err(DecodeError::Unavailable));

        let empty = response(IpConfigurationAvailable::ADDRESS, None, None, &[]);
        assert_eq!(decode(&empty), Err(DecodeError::Unavailable));
    }

    #[test]
    fn invalid_prefix_length() {
        let bad = response(
            IpConfigurationAvailable::ADDRESS,
            Some((Ipv4Addr::new(10, 0, 0, 5), 40)),
            None,
            &[],
        );
        assert_eq!(decode(&bad), Err(DecodeError::InvalidPrefixLength(40)));
    }

    #[test]
    fn missing_gateway_and_dns_are_unspecified() {
        let config = decode(&response(
            IpConfigurationAvailable::ADDRESS | IpConfigurationAvailable::DNS,
            Some((Ipv4Addr::new(100, 64, 1, 2), 30)),
            None,
            &[Ipv4Addr::new(1, 1, 1, 1)],
        ))
        .unwrap();

        assert_eq!(config.gateway, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(
            config.dns,
            [Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(0, 0, 0, 0)]
        );
    }

    #[test]
    fn extra_dns_servers_ignored() {
        let config = decode(&response(
            full(),
            Some((Ipv4Addr::new(10, 0, 0, 5), 24)),
            Some(Ipv4Addr::new(10, 0, 0, 1)),
            &[
                Ipv4Addr::new(8, 8, 8, 8),
                Ipv4Addr::new(8, 8, 4, 4),
                Ipv4Addr::new(9, 9, 9, 9),
            ],
        ))
        .unwrap();

        assert_eq!(
            config.dns,
            [Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)]
        );
    }

    #[test]
    fn mtu_when_reported() {
        let mut raw = response(
            IpConfigurationAvailable::ADDRESS | IpConfigurationAvailable::MTU,
            Some((Ipv4Addr::new(10, 0, 0, 5), 24)),
            None,
            &[],
        );
        raw.ipv4_mtu = 1500;
        assert_eq!(decode(&raw).unwrap().mtu, Some(1500));

        raw.ipv4_configuration_available = IpConfigurationAvailable::ADDRESS;
        assert_eq!(decode(&raw).unwrap().mtu, None);
    }
}
