use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::compression::Compression;
use super::enums::{DNSResourceClass, DNSResourceType};
use super::name::Name;
use super::wire::{WireReader, WireWriter};
use crate::error::{DnsError, Result};
use crate::zone::tokenizer::Tokenizer;

/// Marker that introduces the RFC 3597 generic rdata form, `\# <len> <hex>`
pub const GENERIC_RDATA_MARKER: &str = "\\#";

/// The per-type half of a resource record: the four codec hooks every record
/// type supplies. Identity (owner, class, TTL) and framing live in
/// [`Record`].
pub trait RecordData: fmt::Debug + Clone + PartialEq + Send + Sync + Sized {
    /// Type code this data travels under
    fn rtype(&self) -> DNSResourceType;

    /// Decode rdata. The reader is already bounded to the declared rdlength.
    fn read_rdata(rtype: DNSResourceType, reader: &mut WireReader<'_>) -> Result<Self>;

    /// Encode rdata. Types that embed names may use `compression`; when
    /// `canonical` is set, names must be lower-cased and uncompressed.
    fn write_rdata(
        &self,
        writer: &mut WireWriter,
        compression: Option<&mut Compression>,
        canonical: bool,
    );

    /// Decode rdata from zone-file tokens
    fn parse_rdata(
        rtype: DNSResourceType,
        tokenizer: &mut Tokenizer<'_>,
        origin: Option<&Name>,
    ) -> Result<Self>;

    /// Presentation form of the rdata; `None` when it cannot be rendered
    fn rdata_to_string(&self) -> Option<String>;
}

/// Reject data decoded under a type code it does not belong to
pub fn check_type(expected: DNSResourceType, found: DNSResourceType) -> Result<()> {
    if expected != found {
        return Err(DnsError::TypeMismatch {
            expected: expected.code(),
            found: found.code(),
        });
    }
    Ok(())
}

/// A resource record: owner name, class, TTL and typed rdata.
///
/// Records are immutable. The owner name is shared, so cloning a record or
/// building many records for one owner does not copy it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record<D> {
    name: Option<Arc<Name>>,
    class: DNSResourceClass,
    ttl: u32,
    data: D,
}

impl<D: RecordData> Record<D> {
    /// Owner names must be absolute
    pub fn new(
        name: Option<Arc<Name>>,
        class: DNSResourceClass,
        ttl: u32,
        data: D,
    ) -> Result<Self> {
        if let Some(name) = &name {
            if !name.is_absolute() {
                return Err(DnsError::InvalidArgument(format!(
                    "owner name {} is not absolute",
                    name
                )));
            }
        }
        Ok(Self {
            name,
            class,
            ttl,
            data,
        })
    }

    pub fn name(&self) -> Option<&Arc<Name>> {
        self.name.as_ref()
    }

    pub fn rtype(&self) -> DNSResourceType {
        self.data.rtype()
    }

    pub fn class(&self) -> DNSResourceClass {
        self.class
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    /// Swap the rdata representation, keeping owner, class and TTL
    pub fn map_data<E>(self, f: impl FnOnce(D) -> E) -> Record<E> {
        Record {
            name: self.name,
            class: self.class,
            ttl: self.ttl,
            data: f(self.data),
        }
    }

    pub fn try_map_data<E>(
        self,
        f: impl FnOnce(D) -> std::result::Result<E, D>,
    ) -> std::result::Result<Record<E>, Record<D>> {
        let Record {
            name,
            class,
            ttl,
            data,
        } = self;
        match f(data) {
            Ok(data) => Ok(Record {
                name,
                class,
                ttl,
                data,
            }),
            Err(data) => Err(Record {
                name,
                class,
                ttl,
                data,
            }),
        }
    }

    /// Same owner, type and class
    pub fn same_rrset<E: RecordData>(&self, other: &Record<E>) -> bool {
        self.rtype() == other.rtype() && self.class == other.class && self.name == other.name
    }

    /// Decode one record (header and rdata) at the reader's cursor.
    ///
    /// The rdata hook sees only the declared rdlength and must consume all of
    /// it; on any failure no record is produced.
    pub fn from_wire(reader: &mut WireReader<'_>) -> Result<Self> {
        let start = reader.current();
        let name = Name::from_wire(reader)?;
        let rtype: DNSResourceType = reader.read_u16()?.into();
        let class: DNSResourceClass = reader.read_u16()?.into();
        let ttl = reader.read_u32()?;
        let rdlength = reader.read_u16()? as usize;

        let saved = reader.set_active(rdlength)?;
        let data = D::read_rdata(rtype, reader);
        let leftover = reader.remaining();
        reader.restore_active(saved);
        let data = data?;
        if leftover != 0 {
            return Err(DnsError::RdataLengthMismatch {
                declared: rdlength,
                consumed: rdlength - leftover,
            });
        }

        trace!(
            "Decoded {} {} record at offset {} ({} rdata bytes)",
            name, rtype, start, rdlength
        );
        Self::new(Some(Arc::new(name)), class, ttl, data)
    }

    /// Encode the record, compressing the owner name through `compression`
    pub fn to_wire(
        &self,
        writer: &mut WireWriter,
        mut compression: Option<&mut Compression>,
    ) -> Result<()> {
        let name = self.owner()?;
        name.to_wire(writer, compression.as_deref_mut())?;
        self.write_fixed_fields(writer);
        self.write_rdata_framed(writer, compression, false)
    }

    /// Canonical form: lower-cased owner, no compression
    pub fn to_wire_canonical(&self) -> Result<Vec<u8>> {
        let mut writer = WireWriter::new();
        self.owner()?.to_wire_canonical(&mut writer)?;
        self.write_fixed_fields(&mut writer);
        self.write_rdata_framed(&mut writer, None, true)?;
        Ok(writer.into_vec())
    }

    /// The bare rdata bytes
    pub fn rdata_to_wire(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.data.write_rdata(&mut writer, None, false);
        writer.into_vec()
    }

    pub fn rdata_to_string(&self) -> Option<String> {
        self.data.rdata_to_string()
    }

    fn owner(&self) -> Result<&Arc<Name>> {
        self.name
            .as_ref()
            .ok_or_else(|| DnsError::InvalidArgument("record has no owner name".to_string()))
    }

    fn write_fixed_fields(&self, writer: &mut WireWriter) {
        writer.write_u16(self.rtype().code());
        writer.write_u16(self.class.code());
        writer.write_u32(self.ttl);
    }

    fn write_rdata_framed(
        &self,
        writer: &mut WireWriter,
        compression: Option<&mut Compression>,
        canonical: bool,
    ) -> Result<()> {
        let length_at = writer.current();
        writer.write_u16(0);
        self.data.write_rdata(writer, compression, canonical);
        let rdlength = writer.current() - length_at - 2;
        let rdlength = u16::try_from(rdlength).map_err(|_| {
            DnsError::InvalidArgument(format!("rdata too long: {} bytes", rdlength))
        })?;
        writer.write_u16_at(rdlength, length_at)
    }

    /// Build a record from the rdata tokens of a zone-file entry whose owner,
    /// type, class and TTL are already known. Accepts the generic `\#` form
    /// for every type. The line must end after the rdata.
    pub fn from_tokens(
        name: Arc<Name>,
        rtype: DNSResourceType,
        class: DNSResourceClass,
        ttl: u32,
        tokenizer: &mut Tokenizer<'_>,
        origin: Option<&Name>,
    ) -> Result<Self> {
        let token = tokenizer.get()?;
        let data = if token.is_string() && token.value == GENERIC_RDATA_MARKER {
            let bytes = read_generic_rdata(tokenizer)?;
            let mut reader = WireReader::new(&bytes);
            let data = D::read_rdata(rtype, &mut reader)?;
            if reader.remaining() != 0 {
                return Err(DnsError::RdataLengthMismatch {
                    declared: bytes.len(),
                    consumed: bytes.len() - reader.remaining(),
                });
            }
            data
        } else {
            tokenizer.unget(token);
            D::parse_rdata(rtype, tokenizer, origin)?
        };
        tokenizer.get_eol()?;

        debug!("Parsed {} {} record from text", name, rtype);
        Self::new(Some(name), class, ttl, data)
    }
}

/// The `<len> <hex>` part of a generic rdata field, after the marker
pub fn read_generic_rdata(tokenizer: &mut Tokenizer<'_>) -> Result<Vec<u8>> {
    let length = tokenizer.get_u16()? as usize;
    let bytes = tokenizer.get_hex()?;
    if bytes.len() != length {
        return Err(DnsError::Parse(format!(
            "generic rdata length {} does not match {} bytes of data",
            length,
            bytes.len()
        )));
    }
    Ok(bytes)
}

impl<D: RecordData> fmt::Display for Record<D> {
    /// One zone-file line: owner, TTL, class, type and rdata, tab separated
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}", name)?;
        }
        write!(f, "\t{}\t{}\t{}", self.ttl, self.class, self.rtype())?;
        if let Some(rdata) = self.rdata_to_string() {
            if !rdata.is_empty() {
                write!(f, "\t{}", rdata)?;
            }
        }
        Ok(())
    }
}
