use rrcodec::dns::enums::{DNSResourceClass, DNSResourceType};
use rrcodec::dns::{
    AaaaRecord, AnyRecord, Compression, Name, RData, UnknownRdata, WireReader, WireWriter,
    decode_records, encode_records,
};
use rrcodec::DnsError;
use std::sync::Arc;

fn name(text: &str) -> Arc<Name> {
    Arc::new(text.parse().unwrap())
}

/// Header for `host.example.` AAAA IN, TTL 300, followed by the given rdlength
fn aaaa_header(rdlength: u16) -> Vec<u8> {
    let mut bytes = vec![4, b'h', b'o', b's', b't', 7];
    bytes.extend_from_slice(b"example");
    bytes.push(0);
    bytes.extend_from_slice(&[0x00, 0x1c, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2c]);
    bytes.extend_from_slice(&rdlength.to_be_bytes());
    bytes
}

#[test]
fn test_decode_hand_built_record() {
    let mut bytes = aaaa_header(16);
    bytes.extend_from_slice(&[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);

    let mut reader = WireReader::new(&bytes);
    let record = AaaaRecord::from_wire(&mut reader).unwrap();
    assert_eq!(record.name().unwrap().to_string(), "host.example.");
    assert_eq!(record.class(), DNSResourceClass::IN);
    assert_eq!(record.ttl(), 300);
    assert_eq!(record.rdata_to_string().as_deref(), Some("2001:db8::1"));

    let mut writer = WireWriter::new();
    record.to_wire(&mut writer, None).unwrap();
    assert_eq!(writer.as_slice(), &bytes[..]);
}

#[test]
fn test_short_rdlength_is_truncation() {
    // Declared rdlength of 4 bounds the reader below the 16 octets needed
    let mut bytes = aaaa_header(4);
    bytes.extend_from_slice(&[192, 0, 2, 1]);
    let mut reader = WireReader::new(&bytes);
    assert_eq!(
        AaaaRecord::from_wire(&mut reader).unwrap_err(),
        DnsError::UnexpectedEndOfInput { need: 16, have: 4 }
    );
}

#[test]
fn test_long_rdlength_is_rejected() {
    let mut bytes = aaaa_header(18);
    bytes.extend_from_slice(&[0u8; 18]);
    let mut reader = WireReader::new(&bytes);
    assert_eq!(
        AaaaRecord::from_wire(&mut reader).unwrap_err(),
        DnsError::RdataLengthMismatch {
            declared: 18,
            consumed: 16
        }
    );
}

#[test]
fn test_typed_decode_rejects_other_types() {
    let mut bytes = aaaa_header(4);
    // Patch the type field to A
    bytes[15] = 0x01;
    bytes.extend_from_slice(&[192, 0, 2, 1]);
    let mut reader = WireReader::new(&bytes);
    assert!(matches!(
        AaaaRecord::from_wire(&mut reader),
        Err(DnsError::TypeMismatch {
            expected: 28,
            found: 1
        })
    ));

    // The registry carries it opaquely instead
    let mut reader = WireReader::new(&bytes);
    let record = AnyRecord::from_wire(&mut reader).unwrap();
    assert_eq!(record.rtype(), DNSResourceType::A);
    assert_eq!(
        record.data(),
        &RData::Unknown(UnknownRdata::new(DNSResourceType::A, vec![192, 0, 2, 1]))
    );
}

#[test]
fn test_any_record_conversions() {
    let record =
        AaaaRecord::from_bytes(Some(name("a.example.")), DNSResourceClass::IN, 60, &[7; 16])
            .unwrap();
    let any: AnyRecord = record.clone().into();
    assert!(any.data().as_aaaa().is_some());
    assert_eq!(AaaaRecord::try_from(any).unwrap(), record);

    let unknown = AnyRecord::new(
        Some(name("a.example.")),
        DNSResourceClass::IN,
        60,
        RData::Unknown(UnknownRdata::new(DNSResourceType::TXT, vec![1, 2])),
    )
    .unwrap();
    assert!(AaaaRecord::try_from(unknown).is_err());
}

#[test]
fn test_sequence_compresses_owner_names() {
    let records: Vec<AaaaRecord> = ["www.example.com.", "mail.example.com.", "WWW.Example.COM."]
        .iter()
        .enumerate()
        .map(|(i, owner)| {
            AaaaRecord::from_bytes(Some(name(owner)), DNSResourceClass::IN, 60, &[i as u8; 16])
                .unwrap()
        })
        .collect();

    let bytes = encode_records(&records).unwrap();
    // www.example.com. = 17, mail + pointer = 7, pointer only = 2
    assert_eq!(bytes.len(), 17 + 7 + 2 + 3 * (10 + 16));

    let decoded: Vec<AaaaRecord> = decode_records(&bytes).unwrap();
    assert_eq!(decoded, records);
    // Case is preserved from the first occurrence the pointer refers to
    assert_eq!(decoded[2].name().unwrap().to_string(), "www.example.com.");
}

#[test]
fn test_canonical_form_lowercases_and_skips_compression() {
    let record = AaaaRecord::from_bytes(
        Some(name("WWW.Example.COM.")),
        DNSResourceClass::IN,
        60,
        &[1; 16],
    )
    .unwrap();
    let canonical = record.to_wire_canonical().unwrap();
    assert_eq!(&canonical[..17], b"\x03www\x07example\x03com\x00");
    assert_eq!(canonical.len(), 17 + 10 + 16);
}

#[test]
fn test_record_without_owner_cannot_be_framed() {
    let record = AaaaRecord::from_bytes(None, DNSResourceClass::IN, 60, &[1; 16]).unwrap();
    let mut writer = WireWriter::new();
    assert!(matches!(
        record.to_wire(&mut writer, None),
        Err(DnsError::InvalidArgument(_))
    ));
    assert_eq!(record.rdata_to_wire(), vec![1; 16]);
}

#[test]
fn test_forward_pointer_rejected() {
    // Pointer at offset 0 to offset 2
    let bytes = [0xc0, 0x02, 0x00];
    let mut reader = WireReader::new(&bytes);
    assert_eq!(
        Name::from_wire(&mut reader).unwrap_err(),
        DnsError::BadCompressionPointer(0)
    );
}

#[test]
fn test_self_pointer_rejected() {
    let bytes = [0x01, b'a', 0xc0, 0x02];
    let mut reader = WireReader::new(&bytes);
    assert_eq!(
        Name::from_wire(&mut reader).unwrap_err(),
        DnsError::BadCompressionPointer(2)
    );
}

#[test]
fn test_reserved_label_type_rejected() {
    let bytes = [0x40, 0x00];
    let mut reader = WireReader::new(&bytes);
    assert_eq!(
        Name::from_wire(&mut reader).unwrap_err(),
        DnsError::InvalidLabelLength(0x40)
    );
}

#[test]
fn test_compression_table_keeps_first_offset() {
    let mut table = Compression::new();
    let example = "example.com.".parse::<Name>().unwrap();
    table.add(12, &example);
    table.add(40, &example);
    assert_eq!(table.get(&"EXAMPLE.com.".parse().unwrap()), Some(12));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_empty_buffer_decodes_to_nothing() {
    let records: Vec<AnyRecord> = decode_records(&[]).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_same_rrset() {
    let www = AaaaRecord::from_bytes(Some(name("www.example.")), DNSResourceClass::IN, 60, &[1; 16])
        .unwrap();
    let other_data =
        AaaaRecord::from_bytes(Some(name("www.example.")), DNSResourceClass::IN, 300, &[2; 16])
            .unwrap();
    assert!(www.same_rrset(&other_data));

    let upper = AaaaRecord::from_bytes(Some(name("WWW.Example.")), DNSResourceClass::IN, 60, &[1; 16])
        .unwrap();
    assert!(www.same_rrset(&upper));

    let chaos = AaaaRecord::from_bytes(Some(name("www.example.")), DNSResourceClass::CH, 60, &[1; 16])
        .unwrap();
    assert!(!www.same_rrset(&chaos));

    let elsewhere =
        AaaaRecord::from_bytes(Some(name("mail.example.")), DNSResourceClass::IN, 60, &[1; 16])
            .unwrap();
    assert!(!www.same_rrset(&elsewhere));

    let opaque = AnyRecord::new(
        Some(name("www.example.")),
        DNSResourceClass::IN,
        60,
        RData::Unknown(UnknownRdata::new(DNSResourceType::TXT, vec![0])),
    )
    .unwrap();
    assert!(!www.same_rrset(&opaque));
    let any: AnyRecord = www.clone().into();
    assert!(any.same_rrset(&www));
}
