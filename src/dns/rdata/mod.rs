pub mod aaaa;
pub mod fixed;
pub mod unknown;

pub use aaaa::{Aaaa, AaaaRecord};
pub use unknown::UnknownRdata;

use super::compression::Compression;
use super::enums::DNSResourceType;
use super::name::Name;
use super::record::{Record, RecordData};
use super::wire::{WireReader, WireWriter};
use crate::error::Result;
use crate::zone::tokenizer::Tokenizer;

/// Type-code registry: rdata of any type, decoded by the codec registered
/// for its type code. Unregistered codes are carried opaquely.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RData {
    AAAA(Aaaa),
    Unknown(UnknownRdata),
}

pub type AnyRecord = Record<RData>;

impl RData {
    pub fn as_aaaa(&self) -> Option<&Aaaa> {
        match self {
            RData::AAAA(aaaa) => Some(aaaa),
            RData::Unknown(_) => None,
        }
    }
}

impl From<Aaaa> for RData {
    fn from(aaaa: Aaaa) -> Self {
        RData::AAAA(aaaa)
    }
}

impl From<UnknownRdata> for RData {
    fn from(unknown: UnknownRdata) -> Self {
        RData::Unknown(unknown)
    }
}

impl RecordData for RData {
    fn rtype(&self) -> DNSResourceType {
        match self {
            RData::AAAA(aaaa) => aaaa.rtype(),
            RData::Unknown(unknown) => unknown.rtype(),
        }
    }

    fn read_rdata(rtype: DNSResourceType, reader: &mut WireReader<'_>) -> Result<Self> {
        match rtype {
            DNSResourceType::AAAA => Aaaa::read_rdata(rtype, reader).map(RData::AAAA),
            _ => UnknownRdata::read_rdata(rtype, reader).map(RData::Unknown),
        }
    }

    fn write_rdata(
        &self,
        writer: &mut WireWriter,
        compression: Option<&mut Compression>,
        canonical: bool,
    ) {
        match self {
            RData::AAAA(aaaa) => aaaa.write_rdata(writer, compression, canonical),
            RData::Unknown(unknown) => unknown.write_rdata(writer, compression, canonical),
        }
    }

    fn parse_rdata(
        rtype: DNSResourceType,
        tokenizer: &mut Tokenizer<'_>,
        origin: Option<&Name>,
    ) -> Result<Self> {
        match rtype {
            DNSResourceType::AAAA => Aaaa::parse_rdata(rtype, tokenizer, origin).map(RData::AAAA),
            _ => UnknownRdata::parse_rdata(rtype, tokenizer, origin).map(RData::Unknown),
        }
    }

    fn rdata_to_string(&self) -> Option<String> {
        match self {
            RData::AAAA(aaaa) => aaaa.rdata_to_string(),
            RData::Unknown(unknown) => unknown.rdata_to_string(),
        }
    }
}

impl From<AaaaRecord> for AnyRecord {
    fn from(record: AaaaRecord) -> Self {
        record.map_data(RData::AAAA)
    }
}

impl TryFrom<AnyRecord> for AaaaRecord {
    type Error = AnyRecord;

    fn try_from(record: AnyRecord) -> std::result::Result<Self, Self::Error> {
        record.try_map_data(|data| match data {
            RData::AAAA(aaaa) => Ok(aaaa),
            other => Err(other),
        })
    }
}
