pub mod address;
pub mod compression;
pub mod enums;
pub mod name;
pub mod rdata;
pub mod record;
pub mod wire;

pub use address::{Family, HostAddress, InetAddress};
pub use compression::Compression;
pub use enums::{DNSResourceClass, DNSResourceType};
pub use name::Name;
pub use rdata::{Aaaa, AaaaRecord, AnyRecord, RData, UnknownRdata};
pub use record::{Record, RecordData};
pub use wire::{WireReader, WireWriter};

use tracing::debug;

use crate::error::Result;

/// Decode consecutive records until the buffer is exhausted. Any failure
/// aborts the whole run; no partial results are returned.
pub fn decode_records<D: RecordData>(buf: &[u8]) -> Result<Vec<Record<D>>> {
    let mut reader = WireReader::new(buf);
    let mut records = Vec::new();
    while reader.remaining() > 0 {
        records.push(Record::from_wire(&mut reader)?);
    }
    debug!("Decoded {} records from {} bytes", records.len(), buf.len());
    Ok(records)
}

/// Encode records back to back, sharing one compression table
pub fn encode_records<D: RecordData>(records: &[Record<D>]) -> Result<Vec<u8>> {
    let mut writer = WireWriter::with_capacity(records.len() * 32);
    let mut compression = Compression::new();
    for record in records {
        record.to_wire(&mut writer, Some(&mut compression))?;
    }
    Ok(writer.into_vec())
}
