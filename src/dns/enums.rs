use std::fmt;
use std::str::FromStr;

use crate::error::DnsError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DNSResourceType {
    #[default]
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA,
    SRV,
    OPT,
    DS,
    RRSIG,
    NSEC,
    DNSKEY,
    TLSA,
    HTTPS,
    CAA,
    /// Any type code without a mnemonic here; rendered as `TYPEnnn`.
    Unknown(u16),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DNSResourceClass {
    #[default]
    IN,
    CS,
    CH,
    HS,
    NONE,
    ANY,
    Unknown(u16),
}

const TYPE_TABLE: &[(DNSResourceType, u16, &str)] = &[
    (DNSResourceType::A, 1, "A"),
    (DNSResourceType::NS, 2, "NS"),
    (DNSResourceType::CNAME, 5, "CNAME"),
    (DNSResourceType::SOA, 6, "SOA"),
    (DNSResourceType::PTR, 12, "PTR"),
    (DNSResourceType::MX, 15, "MX"),
    (DNSResourceType::TXT, 16, "TXT"),
    (DNSResourceType::AAAA, 28, "AAAA"),
    (DNSResourceType::SRV, 33, "SRV"),
    (DNSResourceType::OPT, 41, "OPT"),
    (DNSResourceType::DS, 43, "DS"),
    (DNSResourceType::RRSIG, 46, "RRSIG"),
    (DNSResourceType::NSEC, 47, "NSEC"),
    (DNSResourceType::DNSKEY, 48, "DNSKEY"),
    (DNSResourceType::TLSA, 52, "TLSA"),
    (DNSResourceType::HTTPS, 65, "HTTPS"),
    (DNSResourceType::CAA, 257, "CAA"),
];

const CLASS_TABLE: &[(DNSResourceClass, u16, &str)] = &[
    (DNSResourceClass::IN, 1, "IN"),
    (DNSResourceClass::CS, 2, "CS"),
    (DNSResourceClass::CH, 3, "CH"),
    (DNSResourceClass::HS, 4, "HS"),
    (DNSResourceClass::NONE, 254, "NONE"),
    (DNSResourceClass::ANY, 255, "ANY"),
];

impl From<u16> for DNSResourceType {
    fn from(value: u16) -> Self {
        TYPE_TABLE
            .iter()
            .find(|(_, code, _)| *code == value)
            .map(|(rtype, _, _)| *rtype)
            .unwrap_or(DNSResourceType::Unknown(value))
    }
}

impl From<DNSResourceType> for u16 {
    fn from(rtype: DNSResourceType) -> Self {
        match rtype {
            DNSResourceType::Unknown(code) => code,
            known => TYPE_TABLE
                .iter()
                .find(|(t, _, _)| *t == known)
                .map(|(_, code, _)| *code)
                .unwrap_or_default(),
        }
    }
}

impl DNSResourceType {
    pub fn code(self) -> u16 {
        self.into()
    }

    pub fn mnemonic(self) -> Option<&'static str> {
        TYPE_TABLE
            .iter()
            .find(|(t, _, _)| *t == self)
            .map(|(_, _, name)| *name)
    }
}

impl fmt::Display for DNSResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => f.write_str(name),
            None => write!(f, "TYPE{}", self.code()),
        }
    }
}

impl FromStr for DNSResourceType {
    type Err = DnsError;

    /// Accepts mnemonics case-insensitively and the RFC 3597 `TYPEnnn` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        if let Some((rtype, _, _)) = TYPE_TABLE.iter().find(|(_, _, name)| *name == upper) {
            return Ok(*rtype);
        }
        upper
            .strip_prefix("TYPE")
            .and_then(|digits| digits.parse::<u16>().ok())
            .map(DNSResourceType::from)
            .ok_or_else(|| DnsError::Parse(format!("Invalid resource record type: {}", s)))
    }
}

impl From<u16> for DNSResourceClass {
    fn from(value: u16) -> Self {
        CLASS_TABLE
            .iter()
            .find(|(_, code, _)| *code == value)
            .map(|(class, _, _)| *class)
            .unwrap_or(DNSResourceClass::Unknown(value))
    }
}

impl From<DNSResourceClass> for u16 {
    fn from(class: DNSResourceClass) -> Self {
        match class {
            DNSResourceClass::Unknown(code) => code,
            known => CLASS_TABLE
                .iter()
                .find(|(c, _, _)| *c == known)
                .map(|(_, code, _)| *code)
                .unwrap_or_default(),
        }
    }
}

impl DNSResourceClass {
    pub fn code(self) -> u16 {
        self.into()
    }
}

impl fmt::Display for DNSResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CLASS_TABLE.iter().find(|(c, _, _)| c == self) {
            Some((_, _, name)) => f.write_str(name),
            None => write!(f, "CLASS{}", self.code()),
        }
    }
}

impl FromStr for DNSResourceClass {
    type Err = DnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        if let Some((class, _, _)) = CLASS_TABLE.iter().find(|(_, _, name)| *name == upper) {
            return Ok(*class);
        }
        upper
            .strip_prefix("CLASS")
            .and_then(|digits| digits.parse::<u16>().ok())
            .map(DNSResourceClass::from)
            .ok_or_else(|| DnsError::Parse(format!("Invalid record class: {}", s)))
    }
}

impl TryFrom<String> for DNSResourceClass {
    type Error = DnsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DNSResourceClass> for String {
    fn from(class: DNSResourceClass) -> Self {
        class.to_string()
    }
}
