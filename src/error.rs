use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid default TTL: {0}")]
    InvalidTtl(String),

    #[error("Invalid record class: {0}")]
    InvalidClass(String),

    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),

    #[error("Invalid error policy: {0}")]
    InvalidErrorPolicy(String),

    #[error("Invalid zone file size limit: {0}")]
    InvalidFileSize(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unexpected end of input: need {need} bytes, have {have} bytes")]
    UnexpectedEndOfInput { need: usize, have: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid label length: {0}")]
    InvalidLabelLength(usize),

    #[error("DNS name too long")]
    NameTooLong,

    #[error("Bad compression pointer at offset {0}")]
    BadCompressionPointer(usize),

    #[error("Record type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: u16, found: u16 },

    #[error("Record data length mismatch: declared {declared} bytes, consumed {consumed} bytes")]
    RdataLengthMismatch { declared: usize, consumed: usize },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<std::io::Error> for DnsError {
    fn from(err: std::io::Error) -> Self {
        DnsError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DnsError>;
