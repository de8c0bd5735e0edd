//! IPv6 address record (RFC 3596)

use std::net::IpAddr;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::debug;

use super::fixed::{self, FixedLengthRdata};
use crate::dns::address::{self, Family, HostAddress, InetAddress};
use crate::dns::compression::Compression;
use crate::dns::enums::{DNSResourceClass, DNSResourceType};
use crate::dns::name::Name;
use crate::dns::record::{Record, RecordData, check_type};
use crate::dns::wire::{WireReader, WireWriter};
use crate::error::{DnsError, Result};
use crate::zone::tokenizer::Tokenizer;

/// AAAA rdata.
///
/// Normally 16 octets. Built from an IPv4 address object it holds 4 octets,
/// which are written to the wire as-is and rendered as `::ffff:a.b.c.d`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aaaa {
    address: SmallVec<[u8; 16]>,
}

pub type AaaaRecord = Record<Aaaa>;

impl FixedLengthRdata for Aaaa {
    const RTYPE: DNSResourceType = DNSResourceType::AAAA;
    const LENGTH: usize = 16;

    fn from_octets_unchecked(octets: &[u8]) -> Self {
        Self {
            address: SmallVec::from_slice(octets),
        }
    }

    fn octets(&self) -> &[u8] {
        &self.address
    }
}

impl Aaaa {
    /// Exactly 16 octets, anything else is rejected
    pub fn from_bytes(octets: &[u8]) -> Result<Self> {
        fixed::from_octets(octets)
    }

    /// Any IPv4 or IPv6 address; its octets are stored without widening
    pub fn from_address<A: HostAddress + ?Sized>(addr: &A) -> Result<Self> {
        if Family::of(addr).is_none() {
            return Err(DnsError::InvalidArgument(
                "invalid IPv4/IPv6 address".to_string(),
            ));
        }
        Ok(Self::from_octets_unchecked(&addr.octets()))
    }

    pub fn octets(&self) -> &[u8] {
        &self.address
    }

    pub fn ip_addr(&self) -> Option<IpAddr> {
        address::to_ip_addr(&self.address).ok()
    }
}

impl RecordData for Aaaa {
    fn rtype(&self) -> DNSResourceType {
        DNSResourceType::AAAA
    }

    fn read_rdata(rtype: DNSResourceType, reader: &mut WireReader<'_>) -> Result<Self> {
        fixed::read(rtype, reader)
    }

    fn write_rdata(
        &self,
        writer: &mut WireWriter,
        _compression: Option<&mut Compression>,
        _canonical: bool,
    ) {
        fixed::write(self, writer);
    }

    fn parse_rdata(
        rtype: DNSResourceType,
        tokenizer: &mut Tokenizer<'_>,
        _origin: Option<&Name>,
    ) -> Result<Self> {
        check_type(DNSResourceType::AAAA, rtype)?;
        let octets = tokenizer.get_address_bytes(Family::IPv6)?;
        Ok(Self::from_octets_unchecked(&octets))
    }

    fn rdata_to_string(&self) -> Option<String> {
        match self.ip_addr()? {
            // Four stored octets still denote an IPv6 address.
            IpAddr::V4(v4) => Some(format!("::ffff:{}", v4)),
            IpAddr::V6(v6) => Some(v6.to_string()),
        }
    }
}

impl Record<Aaaa> {
    /// Build from an address object; IPv4 addresses are kept as 4 octets
    pub fn from_address<A: HostAddress + ?Sized>(
        name: Option<Arc<Name>>,
        class: DNSResourceClass,
        ttl: u32,
        addr: &A,
    ) -> Result<Self> {
        Record::new(name, class, ttl, Aaaa::from_address(addr)?)
    }

    /// Build from exactly 16 raw octets
    pub fn from_bytes(
        name: Option<Arc<Name>>,
        class: DNSResourceClass,
        ttl: u32,
        octets: &[u8],
    ) -> Result<Self> {
        Record::new(name, class, ttl, Aaaa::from_bytes(octets)?)
    }

    pub fn octets(&self) -> &[u8] {
        self.data().octets()
    }

    /// The stored address, tagged with the owner name as hostname when there
    /// is one. `None` if the octets do not form an address.
    pub fn address(&self) -> Option<InetAddress> {
        let hostname = self.name().map(|name| name.to_string());
        match InetAddress::from_octets(hostname, self.octets()) {
            Ok(addr) => Some(addr),
            Err(e) => {
                debug!("AAAA record holds no usable address: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    const DOC_ADDR: [u8; 16] = [
        0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01,
    ];

    #[test]
    fn test_strict_length_check() {
        assert!(Aaaa::from_bytes(&DOC_ADDR).is_ok());
        for len in [0, 4, 15, 17, 32] {
            assert!(matches!(
                Aaaa::from_bytes(&vec![0; len]),
                Err(DnsError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_address_object_keeps_native_length() {
        let v4 = Aaaa::from_address(&Ipv4Addr::new(192, 0, 2, 1)).unwrap();
        assert_eq!(v4.octets(), &[192, 0, 2, 1]);

        let v6 = Aaaa::from_address(&Ipv6Addr::LOCALHOST).unwrap();
        assert_eq!(v6.octets().len(), 16);
    }

    #[test]
    fn test_rendering() {
        let data = Aaaa::from_bytes(&DOC_ADDR).unwrap();
        assert_eq!(data.rdata_to_string().as_deref(), Some("2001:db8::1"));

        let mapped = Aaaa::from_address(&Ipv4Addr::new(192, 0, 2, 1)).unwrap();
        assert_eq!(mapped.rdata_to_string().as_deref(), Some("::ffff:192.0.2.1"));
    }

    #[test]
    fn test_unrenderable_length_is_soft_failure() {
        let odd = Aaaa::from_octets_unchecked(&[1, 2, 3]);
        assert_eq!(odd.rdata_to_string(), None);
        assert_eq!(odd.ip_addr(), None);
    }

    #[test]
    fn test_wrong_type_code_rejected() {
        let mut reader = WireReader::new(&DOC_ADDR);
        assert_eq!(
            Aaaa::read_rdata(DNSResourceType::A, &mut reader).unwrap_err(),
            DnsError::TypeMismatch {
                expected: 28,
                found: 1
            }
        );
    }
}
