//! Shared plumbing for record types whose rdata is an opaque run of a fixed
//! number of octets.

use crate::dns::enums::DNSResourceType;
use crate::dns::record::check_type;
use crate::dns::wire::{WireReader, WireWriter};
use crate::error::{DnsError, Result};

pub trait FixedLengthRdata: Sized {
    const RTYPE: DNSResourceType;
    const LENGTH: usize;

    /// Wrap octets that have already been length-checked
    fn from_octets_unchecked(octets: &[u8]) -> Self;

    fn octets(&self) -> &[u8];
}

/// Strict construction: exactly `T::LENGTH` octets
pub fn from_octets<T: FixedLengthRdata>(octets: &[u8]) -> Result<T> {
    if octets.len() != T::LENGTH {
        return Err(DnsError::InvalidArgument(format!(
            "{} rdata must be {} bytes, got {}",
            T::RTYPE,
            T::LENGTH,
            octets.len()
        )));
    }
    Ok(T::from_octets_unchecked(octets))
}

/// Consume exactly `T::LENGTH` octets; no length prefix is read
pub fn read<T: FixedLengthRdata>(rtype: DNSResourceType, reader: &mut WireReader<'_>) -> Result<T> {
    check_type(T::RTYPE, rtype)?;
    let octets = reader.read_fixed_bytes(T::LENGTH)?;
    Ok(T::from_octets_unchecked(octets))
}

/// Write the stored octets verbatim
pub fn write<T: FixedLengthRdata>(data: &T, writer: &mut WireWriter) {
    writer.write_bytes(data.octets());
}
