//! Address family and fixed-width address arithmetic
//!
//! All ordering and arithmetic over addresses happens on a `u128` widened
//! representation (IPv4 addresses are zero-extended), so IPv4 and IPv6 share
//! one code path without bit truncation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address family of a range, set, or query input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Address width in bits (32 or 128)
    pub fn bits(&self) -> u8 {
        match self {
            AddressFamily::Ipv4 => 32,
            AddressFamily::Ipv6 => 128,
        }
    }

    /// Largest address value of the family, widened to u128
    pub fn max_value(&self) -> u128 {
        match self {
            AddressFamily::Ipv4 => u32::MAX as u128,
            AddressFamily::Ipv6 => u128::MAX,
        }
    }

    /// Family of a concrete address
    pub fn of(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "IPv4"),
            AddressFamily::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Widen an address to u128 for ordering and arithmetic
pub(crate) fn addr_to_u128(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(a) => u32::from(a) as u128,
        IpAddr::V6(a) => u128::from(a),
    }
}

/// Narrow a u128 back to an address of the given family.
///
/// Callers guarantee the value fits the family width; values are produced by
/// arithmetic bounded by `AddressFamily::max_value`.
pub(crate) fn u128_to_addr(family: AddressFamily, value: u128) -> IpAddr {
    match family {
        AddressFamily::Ipv4 => IpAddr::V4(Ipv4Addr::from(value as u32)),
        AddressFamily::Ipv6 => IpAddr::V6(Ipv6Addr::from(value)),
    }
}

/// Parse a bare address, tolerating a trailing routing-prefix suffix.
///
/// Enumeration queries often receive their base address in `a.b.c.d/len`
/// form; the suffix is irrelevant to the scan and is stripped before parsing.
pub fn parse_address(s: &str) -> Result<IpAddr> {
    let bare = match s.split_once('/') {
        Some((addr, _len)) => addr,
        None => s,
    };
    bare.parse::<IpAddr>().map_err(Error::from)
}
