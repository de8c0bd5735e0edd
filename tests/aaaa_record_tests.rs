use rrcodec::dns::address::{Family, HostAddress};
use rrcodec::dns::enums::{DNSResourceClass, DNSResourceType};
use rrcodec::dns::{Aaaa, AaaaRecord, Compression, Name, RecordData, WireReader, WireWriter};
use rrcodec::zone::Tokenizer;
use rrcodec::DnsError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

const DOC_BYTES: [u8; 16] = [
    0x20, 0x01, 0x0d, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01,
];

fn owner(text: &str) -> Option<Arc<Name>> {
    Some(Arc::new(text.parse().unwrap()))
}

/// An address the family classifier recognizes as neither IPv4 nor IPv6
struct ShortAddress;

impl HostAddress for ShortAddress {
    fn octets(&self) -> Vec<u8> {
        vec![10, 0]
    }
}

struct Ipv4Claiming;

impl HostAddress for Ipv4Claiming {
    fn octets(&self) -> Vec<u8> {
        vec![10, 0, 0, 1]
    }

    fn family(&self) -> Option<Family> {
        None
    }
}

#[test]
fn test_documentation_address_renders() {
    let record =
        AaaaRecord::from_bytes(owner("host.example."), DNSResourceClass::IN, 300, &DOC_BYTES)
            .unwrap();
    assert_eq!(record.rtype(), DNSResourceType::AAAA);
    assert_eq!(record.rdata_to_string().as_deref(), Some("2001:db8::1"));
    assert_eq!(record.to_string(), "host.example.\t300\tIN\tAAAA\t2001:db8::1");
}

#[test]
fn test_wire_encode_is_verbatim_without_prefix() {
    let record =
        AaaaRecord::from_bytes(owner("host.example."), DNSResourceClass::IN, 300, &DOC_BYTES)
            .unwrap();
    assert_eq!(record.rdata_to_wire(), DOC_BYTES.to_vec());

    let mut writer = WireWriter::new();
    let mut compression = Compression::new();
    record
        .data()
        .write_rdata(&mut writer, Some(&mut compression), false);
    assert_eq!(writer.as_slice(), &DOC_BYTES);
    assert!(compression.is_empty());
}

#[test]
fn test_wire_round_trip() {
    let samples: [[u8; 16]; 4] = [
        DOC_BYTES,
        [0; 16],
        [0xff; 16],
        Ipv6Addr::new(0xfe80, 0, 0, 0, 0x1, 0x2, 0x3, 0x4).octets(),
    ];
    for bytes in samples {
        let record =
            AaaaRecord::from_bytes(owner("a.example."), DNSResourceClass::IN, 60, &bytes).unwrap();
        let mut writer = WireWriter::new();
        record.to_wire(&mut writer, None).unwrap();

        let encoded = writer.into_vec();
        let mut reader = WireReader::new(&encoded);
        let decoded = AaaaRecord::from_wire(&mut reader).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(reader.remaining(), 0);
    }
}

#[test]
fn test_text_round_trip() {
    for text in [
        "2001:db8::1",
        "2001:0db8:0000:0000:0000:0000:0000:0001",
        "::",
        "::1",
        "fe80::1:2:3:4",
        "::ffff:192.0.2.1",
    ] {
        let mut tokenizer = Tokenizer::new(text);
        let parsed = Aaaa::parse_rdata(DNSResourceType::AAAA, &mut tokenizer, None).unwrap();
        let rendered = parsed.rdata_to_string().unwrap();

        let mut tokenizer = Tokenizer::new(&rendered);
        let reparsed = Aaaa::parse_rdata(DNSResourceType::AAAA, &mut tokenizer, None).unwrap();
        assert_eq!(reparsed.octets(), parsed.octets(), "{} -> {}", text, rendered);
        assert_eq!(
            parsed.octets(),
            &text.parse::<Ipv6Addr>().unwrap().octets()[..]
        );
    }
}

#[test]
fn test_malformed_text_is_parse_error() {
    for text in ["2001:db8::g", "192.0.2.1", "1:2:3:4:5:6:7:8:9", "host.example."] {
        let mut tokenizer = Tokenizer::new(text);
        let result = Aaaa::parse_rdata(DNSResourceType::AAAA, &mut tokenizer, None);
        assert!(matches!(result, Err(DnsError::Parse(_))), "{}", text);
    }
}

#[test]
fn test_strict_length_guard() {
    for len in [0usize, 1, 4, 15, 17, 20] {
        let result = AaaaRecord::from_bytes(
            owner("a.example."),
            DNSResourceClass::IN,
            60,
            &vec![0u8; len],
        );
        assert!(matches!(result, Err(DnsError::InvalidArgument(_))), "length {}", len);
    }
    assert!(AaaaRecord::from_bytes(None, DNSResourceClass::IN, 60, &[0u8; 16]).is_ok());
}

#[test]
fn test_family_guard() {
    let result = AaaaRecord::from_address(None, DNSResourceClass::IN, 60, &ShortAddress);
    assert!(matches!(result, Err(DnsError::InvalidArgument(_))));

    let result = AaaaRecord::from_address(None, DNSResourceClass::IN, 60, &Ipv4Claiming);
    assert!(matches!(result, Err(DnsError::InvalidArgument(_))));
}

#[test]
fn test_ipv4_address_object_renders_mapped() {
    let record = AaaaRecord::from_address(
        owner("legacy.example."),
        DNSResourceClass::IN,
        60,
        &Ipv4Addr::new(192, 0, 2, 1),
    )
    .unwrap();
    // Stored as-is, no widening
    assert_eq!(record.octets(), &[192, 0, 2, 1]);
    assert_eq!(record.rdata_to_wire(), vec![192, 0, 2, 1]);
    assert_eq!(record.rdata_to_string().as_deref(), Some("::ffff:192.0.2.1"));
}

#[test]
fn test_ipv6_address_object() {
    let addr = IpAddr::V6("2001:db8::1".parse().unwrap());
    let record = AaaaRecord::from_address(None, DNSResourceClass::IN, 60, &addr).unwrap();
    assert_eq!(record.octets(), &DOC_BYTES);
}

#[test]
fn test_truncated_decode() {
    for len in 0..16 {
        let mut reader = WireReader::new(&DOC_BYTES[..len]);
        let result = Aaaa::read_rdata(DNSResourceType::AAAA, &mut reader);
        assert_eq!(
            result.unwrap_err(),
            DnsError::UnexpectedEndOfInput {
                need: 16,
                have: len
            }
        );
        assert_eq!(reader.current(), 0);
    }
}

#[test]
fn test_truncated_record_yields_nothing() {
    let record =
        AaaaRecord::from_bytes(owner("a.example."), DNSResourceClass::IN, 60, &DOC_BYTES).unwrap();
    let mut writer = WireWriter::new();
    record.to_wire(&mut writer, None).unwrap();
    let encoded = writer.into_vec();

    for cut in 1..=16 {
        let mut reader = WireReader::new(&encoded[..encoded.len() - cut]);
        assert!(matches!(
            AaaaRecord::from_wire(&mut reader),
            Err(DnsError::UnexpectedEndOfInput { .. })
        ));
    }
}

#[test]
fn test_accessor_binds_owner_name() {
    let record =
        AaaaRecord::from_bytes(owner("www.example.com."), DNSResourceClass::IN, 60, &DOC_BYTES)
            .unwrap();
    let address = record.address().unwrap();
    assert_eq!(address.hostname(), Some("www.example.com."));
    assert_eq!(address.ip(), "2001:db8::1".parse::<IpAddr>().unwrap());

    let anonymous = AaaaRecord::from_bytes(None, DNSResourceClass::IN, 60, &DOC_BYTES).unwrap();
    let address = anonymous.address().unwrap();
    assert_eq!(address.hostname(), None);
    assert_eq!(address.to_string(), "2001:db8::1");
}

#[test]
fn test_accessor_on_legacy_payload() {
    let record = AaaaRecord::from_address(
        owner("legacy.example."),
        DNSResourceClass::IN,
        60,
        &Ipv4Addr::new(192, 0, 2, 1),
    )
    .unwrap();
    let address = record.address().unwrap();
    assert_eq!(address.ip(), IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
}

#[test]
fn test_relative_owner_rejected() {
    let relative = Arc::new(Name::parse("www", None).unwrap());
    let result = AaaaRecord::from_bytes(Some(relative), DNSResourceClass::IN, 60, &DOC_BYTES);
    assert!(matches!(result, Err(DnsError::InvalidArgument(_))));
}
