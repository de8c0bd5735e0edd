use crate::dns::compression::Compression;
use crate::dns::enums::DNSResourceType;
use crate::dns::name::Name;
use crate::dns::record::{GENERIC_RDATA_MARKER, RecordData, read_generic_rdata};
use crate::dns::wire::{WireReader, WireWriter};
use crate::error::{DnsError, Result};
use crate::zone::tokenizer::Tokenizer;

/// Opaque rdata for types without a dedicated codec (RFC 3597)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnknownRdata {
    rtype: DNSResourceType,
    data: Vec<u8>,
}

impl UnknownRdata {
    pub fn new(rtype: DNSResourceType, data: Vec<u8>) -> Self {
        Self { rtype, data }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl RecordData for UnknownRdata {
    fn rtype(&self) -> DNSResourceType {
        self.rtype
    }

    fn read_rdata(rtype: DNSResourceType, reader: &mut WireReader<'_>) -> Result<Self> {
        Ok(Self::new(rtype, reader.read_remaining().to_vec()))
    }

    fn write_rdata(
        &self,
        writer: &mut WireWriter,
        _compression: Option<&mut Compression>,
        _canonical: bool,
    ) {
        writer.write_bytes(&self.data);
    }

    fn parse_rdata(
        rtype: DNSResourceType,
        tokenizer: &mut Tokenizer<'_>,
        _origin: Option<&Name>,
    ) -> Result<Self> {
        let marker = tokenizer.get_string()?;
        if marker != GENERIC_RDATA_MARKER {
            return Err(DnsError::Parse(format!(
                "no presentation format for {}; use the {} form",
                rtype, GENERIC_RDATA_MARKER
            )));
        }
        Ok(Self::new(rtype, read_generic_rdata(tokenizer)?))
    }

    fn rdata_to_string(&self) -> Option<String> {
        if self.data.is_empty() {
            return Some(format!("{} 0", GENERIC_RDATA_MARKER));
        }
        Some(format!(
            "{} {} {}",
            GENERIC_RDATA_MARKER,
            self.data.len(),
            hex::encode(&self.data)
        ))
    }
}
