use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rrcodec::config::CodecConfig;
use rrcodec::dns::{AnyRecord, DNSResourceType, Name, RData, RecordData, WireReader, WireWriter};
use rrcodec::zone::ZoneParser;
use tracing::{debug, info};

/// Convert DNS resource records between wire format and zone-file text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file; RRCODEC_* variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode hex wire data and print it as a zone-file line
    Decode {
        /// Hex-encoded rdata, or a whole record with --record
        hex: String,

        /// The input is a full record (owner, type, class, TTL, rdlength, rdata)
        #[arg(long)]
        record: bool,

        /// Record type of bare rdata
        #[arg(short = 't', long = "type", default_value = "AAAA")]
        rtype: String,

        /// Owner name for bare rdata
        #[arg(short, long, default_value = ".")]
        name: String,

        /// TTL for bare rdata (defaults to the configured TTL)
        #[arg(long)]
        ttl: Option<u32>,
    },

    /// Parse a zone-file line and print its wire encoding as hex
    Encode {
        /// Record text, e.g. `www.example.com. 300 IN AAAA 2001:db8::1`
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Origin for relative names
        #[arg(short, long)]
        origin: Option<String>,
    },

    /// Load a zone file and print every record with its wire encoding
    Zone {
        file: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<CodecConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            let mut config = CodecConfig::from_file(path)?;
            config.apply_env()?;
            config.validate()?;
            config
        }
        None => CodecConfig::from_env()?,
    };
    debug!("Using configuration: {:?}", config);
    Ok(config)
}

/// The encodings `encode` prints: bare rdata, the record as written into a
/// message, and its canonical (lower-cased) form
fn encode_forms(record: &AnyRecord) -> rrcodec::Result<[(&'static str, Vec<u8>); 3]> {
    let mut writer = WireWriter::new();
    record.to_wire(&mut writer, None)?;
    Ok([
        ("rdata", record.rdata_to_wire()),
        ("record", writer.into_vec()),
        ("canonical", record.to_wire_canonical()?),
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Decode {
            hex,
            record,
            rtype,
            name,
            ttl,
        } => {
            let bytes = hex::decode(hex.trim())?;
            let mut reader = WireReader::new(&bytes);
            let decoded = if record {
                AnyRecord::from_wire(&mut reader)?
            } else {
                let rtype: DNSResourceType = rtype.parse()?;
                let name: Name = name.parse()?;
                let data = RData::read_rdata(rtype, &mut reader)?;
                AnyRecord::new(
                    Some(Arc::new(name)),
                    config.default_class,
                    ttl.unwrap_or(config.default_ttl),
                    data,
                )?
            };
            if reader.remaining() > 0 {
                info!("{} trailing bytes ignored", reader.remaining());
            }
            println!("{}", decoded);
        }
        Command::Encode { text, origin } => {
            if origin.is_some() {
                config.origin = origin;
                config.validate()?;
            }
            let mut parser = ZoneParser::new(config)?;
            let record: AnyRecord = parser.parse_record(&text.join(" "))?;
            for (label, bytes) in encode_forms(&record)? {
                println!("{:<10} {}", format!("{}:", label), hex::encode(bytes));
            }
        }
        Command::Zone { file } => {
            let mut parser = ZoneParser::new(config)?;
            let records = parser.parse_file(&file)?;
            for record in &records {
                println!("{}", record);
                println!(";; {}", hex::encode(record.rdata_to_wire()));
            }
            info!(
                "{} records loaded from {} ({} skipped)",
                records.len(),
                file.display(),
                parser.skipped()
            );
        }
    }

    Ok(())
}
