use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use smallvec::SmallVec;
use tracing::trace;

use super::compression::Compression;
use super::wire::{WireReader, WireWriter};
use crate::error::{DnsError, Result};

pub const MAX_LABEL_LENGTH: usize = 63;
pub const MAX_NAME_LENGTH: usize = 255;

const POINTER_MASK: u8 = 0xc0;

/// An immutable domain name.
///
/// Labels are raw octets. Names compare and hash case-insensitively (ASCII
/// only). Relative names only exist on the text side; anything written to the
/// wire must be absolute.
#[derive(Clone, Debug)]
pub struct Name {
    labels: SmallVec<[Vec<u8>; 4]>,
    absolute: bool,
}

impl Name {
    /// The root name, `.`
    pub fn root() -> Self {
        Self {
            labels: SmallVec::new(),
            absolute: true,
        }
    }

    pub fn from_labels<I, S>(labels: I, absolute: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        let name = Self {
            labels: labels.into_iter().map(Into::into).collect(),
            absolute,
        };
        name.validate()?;
        Ok(name)
    }

    /// Parse a name in presentation format, resolving relative names and `@`
    /// against `origin` when one is given. `\X` and `\DDD` escapes are
    /// decoded.
    pub fn parse(text: &str, origin: Option<&Name>) -> Result<Self> {
        match text {
            "" => return Err(DnsError::Parse("empty domain name".to_string())),
            "@" => {
                return origin
                    .cloned()
                    .ok_or_else(|| DnsError::Parse("'@' used without an origin".to_string()));
            }
            "." => return Ok(Self::root()),
            _ => {}
        }

        let (labels, absolute) = split_labels(text)?;
        let name = Self::from_labels(labels, absolute)?;

        match origin {
            Some(origin) if !absolute => name.concatenate(origin),
            _ => Ok(name),
        }
    }

    /// Append `suffix` to a relative name; absolute names are returned as-is
    pub fn concatenate(&self, suffix: &Name) -> Result<Self> {
        if self.absolute {
            return Ok(self.clone());
        }
        let labels = self.labels.iter().chain(suffix.labels.iter()).cloned();
        Self::from_labels(labels, suffix.absolute)
    }

    fn validate(&self) -> Result<()> {
        for label in &self.labels {
            if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
                return Err(DnsError::InvalidLabelLength(label.len()));
            }
        }
        if self.wire_length() > MAX_NAME_LENGTH {
            return Err(DnsError::NameTooLong);
        }
        Ok(())
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn is_root(&self) -> bool {
        self.absolute && self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Uncompressed wire length including the root label
    pub fn wire_length(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// The name with its first `skip` labels removed
    pub fn suffix(&self, skip: usize) -> Name {
        Self {
            labels: self.labels.iter().skip(skip).cloned().collect(),
            absolute: self.absolute,
        }
    }

    /// Lower-cased copy, as used for DNSSEC canonical form
    pub fn to_canonical(&self) -> Name {
        Self {
            labels: self.labels.iter().map(|l| l.to_ascii_lowercase()).collect(),
            absolute: self.absolute,
        }
    }

    pub fn from_wire(reader: &mut WireReader<'_>) -> Result<Self> {
        let message = reader.message();
        let byte_at = |pos: usize| -> Result<u8> {
            message
                .get(pos)
                .copied()
                .ok_or(DnsError::UnexpectedEndOfInput {
                    need: pos + 1,
                    have: message.len(),
                })
        };

        let mut labels: SmallVec<[Vec<u8>; 4]> = SmallVec::new();
        let mut wire_len = 1;
        // After the first pointer the cursor stays put and reading continues
        // from this offset in the message.
        let mut jumped: Option<usize> = None;

        loop {
            let (len, at) = match jumped {
                None => (reader.read_u8()?, reader.current() - 1),
                Some(pos) => (byte_at(pos)?, pos),
            };

            match len & POINTER_MASK {
                0 if len == 0 => break,
                0 => {
                    let len = len as usize;
                    wire_len += len + 1;
                    if wire_len > MAX_NAME_LENGTH {
                        return Err(DnsError::NameTooLong);
                    }
                    let bytes = match jumped {
                        None => reader.read_fixed_bytes(len)?,
                        Some(pos) => {
                            let bytes = message.get(pos + 1..pos + 1 + len).ok_or(
                                DnsError::UnexpectedEndOfInput {
                                    need: pos + 1 + len,
                                    have: message.len(),
                                },
                            )?;
                            jumped = Some(pos + 1 + len);
                            bytes
                        }
                    };
                    labels.push(bytes.to_vec());
                }
                POINTER_MASK => {
                    let low = match jumped {
                        None => reader.read_u8()?,
                        Some(pos) => byte_at(pos + 1)?,
                    };
                    let target = (((len & !POINTER_MASK) as usize) << 8) | low as usize;
                    // Only strictly backward pointers, which rules out loops.
                    if target >= at {
                        return Err(DnsError::BadCompressionPointer(at));
                    }
                    trace!("Following compression pointer at {} to {}", at, target);
                    jumped = Some(target);
                }
                _ => return Err(DnsError::InvalidLabelLength(len as usize)),
            }
        }

        Ok(Self {
            labels,
            absolute: true,
        })
    }

    /// Write the name, compressing against and registering into
    /// `compression` when it is supplied.
    pub fn to_wire(
        &self,
        writer: &mut WireWriter,
        mut compression: Option<&mut Compression>,
    ) -> Result<()> {
        if !self.absolute {
            return Err(DnsError::InvalidArgument(format!(
                "relative name {} cannot be written to wire",
                self
            )));
        }

        for (i, label) in self.labels.iter().enumerate() {
            if let Some(table) = compression.as_deref_mut() {
                let suffix = self.suffix(i);
                if let Some(offset) = table.get(&suffix) {
                    writer.write_u16(0xc000 | offset);
                    return Ok(());
                }
                table.add(writer.current(), &suffix);
            }
            writer.write_u8(label.len() as u8);
            writer.write_bytes(label);
        }
        writer.write_u8(0);
        Ok(())
    }

    /// Lower-cased and uncompressed
    pub fn to_wire_canonical(&self, writer: &mut WireWriter) -> Result<()> {
        self.to_canonical().to_wire(writer, None)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.absolute == other.absolute
            && self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(other.labels.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.absolute.hash(state);
        for label in &self.labels {
            state.write_usize(label.len());
            for &b in label {
                state.write_u8(b.to_ascii_lowercase());
            }
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(if self.absolute { "." } else { "" });
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write_label(f, label)?;
        }
        if self.absolute {
            f.write_str(".")?;
        }
        Ok(())
    }
}

/// Presentation form of one label: zone-file delimiters are backslash
/// escaped, anything outside printable ASCII becomes `\DDD`.
fn write_label(f: &mut fmt::Formatter<'_>, label: &[u8]) -> fmt::Result {
    for &b in label {
        match b {
            b'.' | b'\\' | b'"' | b'(' | b')' | b';' | b'@' | b'$' => {
                write!(f, "\\{}", b as char)?
            }
            0x21..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\{:03}", b)?,
        }
    }
    Ok(())
}

/// Split presentation text into raw labels, decoding escapes. A trailing
/// unescaped dot makes the name absolute.
fn split_labels(text: &str) -> Result<(Vec<Vec<u8>>, bool)> {
    let bytes = text.as_bytes();
    let mut labels = Vec::new();
    let mut current = Vec::new();
    let mut absolute = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'.' => {
                labels.push(std::mem::take(&mut current));
                absolute = i == bytes.len() - 1;
                i += 1;
            }
            b'\\' => {
                let digits = bytes.get(i + 1..i + 4);
                match digits {
                    Some(d) if d.iter().all(u8::is_ascii_digit) => {
                        let value = d
                            .iter()
                            .fold(0u16, |acc, &c| acc * 10 + (c - b'0') as u16);
                        let value = u8::try_from(value).map_err(|_| {
                            DnsError::Parse(format!("escape \\{} out of range in {}", value, text))
                        })?;
                        current.push(value);
                        i += 4;
                    }
                    _ => {
                        let escaped = bytes.get(i + 1).ok_or_else(|| {
                            DnsError::Parse(format!("trailing backslash in {}", text))
                        })?;
                        current.push(*escaped);
                        i += 2;
                    }
                }
            }
            b => {
                current.push(b);
                i += 1;
            }
        }
    }

    if !absolute {
        labels.push(current);
    }
    Ok((labels, absolute))
}

impl FromStr for Name {
    type Err = DnsError;

    fn from_str(s: &str) -> Result<Self> {
        Name::parse(s, None)
    }
}
