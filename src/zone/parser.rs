use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::tokenizer::{Token, TokenKind, Tokenizer, parse_ttl};
use super::{Result, ZoneError};
use crate::config::{CodecConfig, ErrorPolicy};
use crate::dns::enums::{DNSResourceClass, DNSResourceType};
use crate::dns::name::Name;
use crate::dns::rdata::{AnyRecord, RData};
use crate::dns::record::{Record, RecordData};
use crate::error::DnsError;

/// RFC 1035 master-file reader
pub struct ZoneParser {
    config: CodecConfig,
    /// Current origin for relative names
    current_origin: Option<Name>,
    /// TTL set by the last `$TTL`
    current_ttl: Option<u32>,
    /// Owner inherited by entries with a blank owner field
    last_owner: Option<Arc<Name>>,
    skipped: usize,
}

impl ZoneParser {
    pub fn new(config: CodecConfig) -> Result<Self> {
        let current_origin = config
            .origin_name()
            .map_err(|e| ZoneError::InvalidDomainName(e.to_string()))?;
        Ok(Self {
            config,
            current_origin,
            current_ttl: None,
            last_owner: None,
            skipped: 0,
        })
    }

    pub fn origin(&self) -> Option<&Name> {
        self.current_origin.as_ref()
    }

    /// Entries dropped under [`ErrorPolicy::Skip`]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Parse a zone file from path
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<AnyRecord>> {
        let path = path.as_ref();

        let size = fs::metadata(path)?.len();
        if size > self.config.max_zone_file_size as u64 {
            return Err(ZoneError::FileTooLarge);
        }

        let contents = fs::read_to_string(path)?;
        debug!("Loading zone file {} ({} bytes)", path.display(), size);
        self.parse(&contents)
    }

    /// Parse zone file contents
    pub fn parse(&mut self, contents: &str) -> Result<Vec<AnyRecord>> {
        if contents.len() > self.config.max_zone_file_size {
            return Err(ZoneError::FileTooLarge);
        }

        let mut tokenizer = Tokenizer::new(contents);
        let mut records = Vec::new();

        loop {
            let token = tokenizer.get()?;
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Eol => continue,
                _ => {}
            }

            if !token.blank_owner && token.value.starts_with('$') {
                self.parse_directive(&token.value, &mut tokenizer)?;
                continue;
            }

            let line = tokenizer.line();
            match self.parse_entry::<RData>(token, &mut tokenizer) {
                Ok(record) => {
                    trace!("Line {}: {}", line, record);
                    records.push(record);
                }
                Err(e) => match self.config.on_error {
                    ErrorPolicy::Abort => {
                        return Err(ZoneError::InvalidRecord(format!("line {}: {}", line, e)));
                    }
                    ErrorPolicy::Skip => {
                        warn!("Skipping entry on line {}: {}", line, e);
                        self.skipped += 1;
                        tokenizer.skip_line()?;
                    }
                },
            }
        }

        debug!(
            "Parsed {} records ({} skipped)",
            records.len(),
            self.skipped
        );
        Ok(records)
    }

    /// Parse a single entry such as `www.example.com. 300 IN AAAA 2001:db8::1`
    pub fn parse_record<D: RecordData>(&mut self, text: &str) -> crate::error::Result<Record<D>> {
        let mut tokenizer = Tokenizer::new(text);
        let token = tokenizer.get()?;
        if token.is_eol() {
            return Err(DnsError::Parse("empty record".to_string()));
        }
        let record = self.parse_entry(token, &mut tokenizer)?;
        let trailing = tokenizer.get()?;
        if trailing.is_string() {
            return Err(DnsError::Parse(format!(
                "unexpected data after record: {}",
                trailing.value
            )));
        }
        Ok(record)
    }

    fn parse_entry<D: RecordData>(
        &mut self,
        first: Token,
        tokenizer: &mut Tokenizer<'_>,
    ) -> crate::error::Result<Record<D>> {
        let name = if first.blank_owner {
            let owner = self.last_owner.clone().ok_or_else(|| {
                DnsError::Parse("blank owner with no previous owner".to_string())
            })?;
            tokenizer.unget(first);
            owner
        } else {
            let name = Name::parse(&first.value, self.current_origin.as_ref())?;
            if !name.is_absolute() {
                return Err(DnsError::Parse(format!(
                    "relative owner name {} with no origin",
                    name
                )));
            }
            Arc::new(name)
        };

        let (ttl, class, rtype) = self.parse_ttl_class_type(tokenizer)?;
        self.last_owner = Some(Arc::clone(&name));
        Record::from_tokens(
            name,
            rtype,
            class,
            ttl,
            tokenizer,
            self.current_origin.as_ref(),
        )
    }

    /// TTL and class may appear in either order, both optional, before the type
    fn parse_ttl_class_type(
        &self,
        tokenizer: &mut Tokenizer<'_>,
    ) -> crate::error::Result<(u32, DNSResourceClass, DNSResourceType)> {
        let mut ttl = None;
        let mut class = None;
        loop {
            let value = tokenizer.get_string()?;
            if ttl.is_none() {
                if let Some(parsed) = parse_ttl(&value) {
                    ttl = Some(parsed);
                    continue;
                }
            }
            if class.is_none() {
                if let Ok(parsed) = value.parse::<DNSResourceClass>() {
                    class = Some(parsed);
                    continue;
                }
            }
            let rtype = value.parse::<DNSResourceType>()?;
            let ttl = ttl
                .or(self.current_ttl)
                .unwrap_or(self.config.default_ttl);
            let class = class.unwrap_or(self.config.default_class);
            return Ok((ttl, class, rtype));
        }
    }

    /// Handle `$ORIGIN` and `$TTL`
    fn parse_directive(&mut self, directive: &str, tokenizer: &mut Tokenizer<'_>) -> Result<()> {
        match directive.to_uppercase().as_str() {
            "$ORIGIN" => {
                let origin = tokenizer.get_name(self.current_origin.as_ref())?;
                if !origin.is_absolute() {
                    return Err(ZoneError::InvalidDomainName(format!(
                        "$ORIGIN {} is not absolute",
                        origin
                    )));
                }
                debug!("Origin set to {}", origin);
                self.current_origin = Some(origin);
            }
            "$TTL" => {
                let ttl = tokenizer.get_ttl()?;
                debug!("Default TTL set to {}", ttl);
                self.current_ttl = Some(ttl);
            }
            other => {
                return Err(tokenizer.error(format!("unsupported directive {}", other)));
            }
        }
        tokenizer.get_eol()
    }
}
