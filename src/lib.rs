pub mod config;
pub mod dns;
pub mod error;
pub mod zone;

pub use config::CodecConfig;
pub use dns::{AaaaRecord, AnyRecord, Name, Record, RecordData};
pub use error::{DnsError, Result};
