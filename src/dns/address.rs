//! Address classification and conversion between raw octets, text and
//! structured addresses.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{DnsError, Result};

/// Address family of a host address
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    IPv4,
    IPv6,
}

impl Family {
    /// Classify an address by the length of its octet representation
    pub fn from_length(len: usize) -> Option<Self> {
        match len {
            4 => Some(Family::IPv4),
            16 => Some(Family::IPv6),
            _ => None,
        }
    }

    /// Classify a host address, `None` when it is neither IPv4 nor IPv6
    pub fn of<A: HostAddress + ?Sized>(addr: &A) -> Option<Self> {
        addr.family()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::IPv4 => f.write_str("IPv4"),
            Family::IPv6 => f.write_str("IPv6"),
        }
    }
}

/// Anything that can hand out the raw octets of a network address.
pub trait HostAddress {
    fn octets(&self) -> Vec<u8>;

    fn family(&self) -> Option<Family> {
        Family::from_length(self.octets().len())
    }
}

impl HostAddress for Ipv4Addr {
    fn octets(&self) -> Vec<u8> {
        Ipv4Addr::octets(self).to_vec()
    }

    fn family(&self) -> Option<Family> {
        Some(Family::IPv4)
    }
}

impl HostAddress for Ipv6Addr {
    fn octets(&self) -> Vec<u8> {
        Ipv6Addr::octets(self).to_vec()
    }

    fn family(&self) -> Option<Family> {
        Some(Family::IPv6)
    }
}

impl HostAddress for IpAddr {
    fn octets(&self) -> Vec<u8> {
        match self {
            IpAddr::V4(v4) => HostAddress::octets(v4),
            IpAddr::V6(v6) => HostAddress::octets(v6),
        }
    }
}

/// A network address with an optional hostname hint attached.
///
/// The hostname is cosmetic: it is never resolved and does not take part in
/// comparisons of the address itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InetAddress {
    hostname: Option<String>,
    addr: IpAddr,
}

impl InetAddress {
    pub fn new(addr: IpAddr) -> Self {
        Self {
            hostname: None,
            addr,
        }
    }

    pub fn with_hostname(hostname: impl Into<String>, addr: IpAddr) -> Self {
        Self {
            hostname: Some(hostname.into()),
            addr,
        }
    }

    /// Build an address from raw octets (4 or 16 of them)
    pub fn from_octets(hostname: Option<String>, octets: &[u8]) -> Result<Self> {
        let addr = to_ip_addr(octets)?;
        Ok(Self { hostname, addr })
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    pub fn ip(&self) -> IpAddr {
        self.addr
    }
}

impl HostAddress for InetAddress {
    fn octets(&self) -> Vec<u8> {
        HostAddress::octets(&self.addr)
    }
}

impl fmt::Display for InetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hostname {
            Some(host) => write!(f, "{}/{}", host, self.addr),
            None => write!(f, "{}", self.addr),
        }
    }
}

/// Convert raw octets into an address; fails unless there are exactly 4 or 16
pub fn to_ip_addr(octets: &[u8]) -> Result<IpAddr> {
    if let Ok(v4) = <[u8; 4]>::try_from(octets) {
        return Ok(IpAddr::V4(Ipv4Addr::from(v4)));
    }
    if let Ok(v6) = <[u8; 16]>::try_from(octets) {
        return Ok(IpAddr::V6(Ipv6Addr::from(v6)));
    }
    Err(DnsError::InvalidArgument(format!(
        "invalid address length: {} bytes",
        octets.len()
    )))
}

/// Parse the textual form of an address of the given family into octets.
///
/// IPv6 text may embed a trailing dotted quad (`::ffff:192.0.2.1`).
pub fn to_byte_array(text: &str, family: Family) -> Option<Vec<u8>> {
    match family {
        Family::IPv4 => text.parse::<Ipv4Addr>().ok().map(|a| a.octets().to_vec()),
        Family::IPv6 => text.parse::<Ipv6Addr>().ok().map(|a| a.octets().to_vec()),
    }
}
