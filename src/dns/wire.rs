use bitstream_io::{BigEndian, BitRead, BitReader};
use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::error::{DnsError, Result};

/// Sequential reader over a DNS message buffer.
///
/// Reads are confined to the active region, which the record layer narrows to
/// a record's declared rdata length while the rdata hook runs. The whole
/// message stays reachable through [`WireReader::message`] so that
/// compression pointers can be chased.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            end: buf.len(),
        }
    }

    /// Current cursor offset from the start of the message
    pub fn current(&self) -> usize {
        self.pos
    }

    /// Bytes left in the active region
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn message(&self) -> &'a [u8] {
        self.buf
    }

    /// Restrict reads to the next `len` bytes; returns the previous limit so
    /// it can be handed back to [`WireReader::restore_active`].
    pub fn set_active(&mut self, len: usize) -> Result<usize> {
        if len > self.remaining() {
            return Err(DnsError::UnexpectedEndOfInput {
                need: len,
                have: self.remaining(),
            });
        }
        let previous = self.end;
        self.end = self.pos + len;
        Ok(previous)
    }

    pub fn restore_active(&mut self, end: usize) {
        self.end = end.min(self.buf.len()).max(self.pos);
    }

    /// Move the cursor to an absolute offset inside the active region
    pub fn jump(&mut self, offset: usize) -> Result<()> {
        if offset > self.end {
            return Err(DnsError::UnexpectedEndOfInput {
                need: offset,
                have: self.end,
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Consume exactly `n` bytes, failing without moving the cursor when
    /// fewer remain.
    pub fn read_fixed_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            trace!(
                "Short read at offset {}: need {} bytes, have {}",
                self.pos,
                n,
                self.remaining()
            );
            return Err(DnsError::UnexpectedEndOfInput {
                need: n,
                have: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Consume everything left in the active region
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let bytes = &self.buf[self.pos..self.end];
        self.pos = self.end;
        bytes
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let bytes = self.read_fixed_bytes(1)?;
        Ok(BitReader::<_, BigEndian>::new(bytes).read_var::<u8>(8)?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_fixed_bytes(2)?;
        Ok(BitReader::<_, BigEndian>::new(bytes).read_var::<u16>(16)?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_fixed_bytes(4)?;
        Ok(BitReader::<_, BigEndian>::new(bytes).read_var::<u32>(32)?)
    }
}

/// Append-only writer for wire-format output. Writes cannot fail.
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Offset the next byte will be written at
    pub fn current(&self) -> usize {
        self.buf.len()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Overwrite a previously written u16, used to back-patch rdlength
    pub fn write_u16_at(&mut self, value: u16, offset: usize) -> Result<()> {
        let have = self.buf.len();
        let slot = self
            .buf
            .get_mut(offset..offset + 2)
            .ok_or(DnsError::UnexpectedEndOfInput {
                need: offset + 2,
                have,
            })?;
        slot.copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}
