use std::fmt;

use crate::error::DnsError;

/// Zone-text errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    /// Lexical or syntax error
    ParseError(String),
    /// A record line that tokenized but could not be turned into a record
    InvalidRecord(String),
    /// Invalid domain name
    InvalidDomainName(String),
    /// IO error
    IoError(String),
    /// Zone file too large
    FileTooLarge,
    /// Invalid TTL value
    InvalidTTL(String),
    /// Invalid resource record type
    InvalidRRType(String),
}

impl fmt::Display for ZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(msg) => write!(f, "Zone parse error: {}", msg),
            Self::InvalidRecord(msg) => write!(f, "Invalid record: {}", msg),
            Self::InvalidDomainName(name) => write!(f, "Invalid domain name: {}", name),
            Self::IoError(msg) => write!(f, "IO error: {}", msg),
            Self::FileTooLarge => write!(f, "Zone file exceeds maximum size"),
            Self::InvalidTTL(ttl) => write!(f, "Invalid TTL value: {}", ttl),
            Self::InvalidRRType(rtype) => write!(f, "Invalid resource record type: {}", rtype),
        }
    }
}

impl std::error::Error for ZoneError {}

impl From<ZoneError> for DnsError {
    fn from(err: ZoneError) -> Self {
        match err {
            ZoneError::IoError(msg) => DnsError::Io(msg),
            other => DnsError::Parse(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ZoneError {
    fn from(err: std::io::Error) -> Self {
        ZoneError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ZoneError>;
