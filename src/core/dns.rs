//! DNS question and resource record inputs for message enrichment
//!
//! These are read-only descriptions of what the resolver saw; the logging
//! facade only extracts fields from them.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Resource record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Ptr,
    Soa,
    Srv,
    Txt,
    Other(u16),
}

impl RecordType {
    pub fn code(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::Ns => 2,
            RecordType::Cname => 5,
            RecordType::Soa => 6,
            RecordType::Ptr => 12,
            RecordType::Mx => 15,
            RecordType::Txt => 16,
            RecordType::Aaaa => 28,
            RecordType::Srv => 33,
            RecordType::Other(code) => *code,
        }
    }
}

impl From<u16> for RecordType {
    fn from(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::Ns,
            5 => RecordType::Cname,
            6 => RecordType::Soa,
            12 => RecordType::Ptr,
            15 => RecordType::Mx,
            16 => RecordType::Txt,
            28 => RecordType::Aaaa,
            33 => RecordType::Srv,
            other => RecordType::Other(other),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => f.write_str("A"),
            RecordType::Aaaa => f.write_str("AAAA"),
            RecordType::Cname => f.write_str("CNAME"),
            RecordType::Mx => f.write_str("MX"),
            RecordType::Ns => f.write_str("NS"),
            RecordType::Ptr => f.write_str("PTR"),
            RecordType::Soa => f.write_str("SOA"),
            RecordType::Srv => f.write_str("SRV"),
            RecordType::Txt => f.write_str("TXT"),
            RecordType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}

/// Query class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DnsClass {
    #[default]
    In,
    Ch,
    Hs,
    Any,
    Other(u16),
}

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsClass::In => f.write_str("IN"),
            DnsClass::Ch => f.write_str("CH"),
            DnsClass::Hs => f.write_str("HS"),
            DnsClass::Any => f.write_str("ANY"),
            DnsClass::Other(code) => write!(f, "CLASS{}", code),
        }
    }
}

/// One entry of a query's question section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: String,
    pub record_type: RecordType,
    pub class: DnsClass,
}

impl DnsQuestion {
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: DnsClass::In,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: DnsClass) -> Self {
        self.class = class;
        self
    }
}

impl fmt::Display for DnsQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.class, self.record_type)
    }
}

/// Record data of an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsRecord {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(String),
    Ns(String),
    Ptr(String),
    Mx {
        preference: u16,
        exchange: String,
    },
    Txt(Vec<String>),
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Other {
        record_type: u16,
        data: Vec<u8>,
    },
}

impl DnsRecord {
    pub fn record_type(&self) -> RecordType {
        match self {
            DnsRecord::A(_) => RecordType::A,
            DnsRecord::Aaaa(_) => RecordType::Aaaa,
            DnsRecord::Cname(_) => RecordType::Cname,
            DnsRecord::Ns(_) => RecordType::Ns,
            DnsRecord::Ptr(_) => RecordType::Ptr,
            DnsRecord::Mx { .. } => RecordType::Mx,
            DnsRecord::Txt(_) => RecordType::Txt,
            DnsRecord::Srv { .. } => RecordType::Srv,
            DnsRecord::Other { record_type, .. } => RecordType::from(*record_type),
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsRecord::A(addr) => write!(f, "{}", addr),
            DnsRecord::Aaaa(addr) => write!(f, "{}", addr),
            DnsRecord::Cname(name) | DnsRecord::Ns(name) | DnsRecord::Ptr(name) => {
                f.write_str(name)
            }
            DnsRecord::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            DnsRecord::Txt(parts) => {
                for (idx, part) in parts.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "\"{}\"", part)?;
                }
                Ok(())
            }
            DnsRecord::Srv {
                priority,
                weight,
                port,
                target,
            } => write!(f, "{} {} {} {}", priority, weight, port, target),
            // RFC 3597 unknown record syntax
            DnsRecord::Other { data, .. } => {
                write!(f, "\\# {}", data.len())?;
                if !data.is_empty() {
                    f.write_str(" ")?;
                    for byte in data {
                        write!(f, "{:02x}", byte)?;
                    }
                }
                Ok(())
            }
        }
    }
}
