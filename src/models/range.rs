//! Inclusive address ranges and their minimal CIDR cover

use super::address::{addr_to_u128, u128_to_addr, AddressFamily};
use crate::{Error, Result};
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

/// An inclusive range of addresses of one family
///
/// `start <= end` always holds; both bounds belong to the same family.
/// A range is interconvertible with CIDR blocks: a block maps to the range
/// `[network, broadcast]`, and any range decomposes into a minimal set of
/// covering blocks via [`AddressRange::cidrs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AddressRange {
    start: IpAddr,
    end: IpAddr,
}

impl AddressRange {
    /// Create a range from inclusive bounds
    pub fn new(start: IpAddr, end: IpAddr) -> Result<Self> {
        let start_family = AddressFamily::of(start);
        let end_family = AddressFamily::of(end);
        if start_family != end_family {
            return Err(Error::MixedAddressFamily {
                expected: start_family,
                found: end_family,
            });
        }
        if addr_to_u128(start) > addr_to_u128(end) {
            return Err(Error::InvalidRange(format!(
                "start {} is greater than end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Range covering a single address
    pub fn host(addr: IpAddr) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// First address of the range
    pub fn start(&self) -> IpAddr {
        self.start
    }

    /// Last address of the range
    pub fn end(&self) -> IpAddr {
        self.end
    }

    /// Address family of both bounds
    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(self.start)
    }

    /// Widened inclusive bounds for interval arithmetic
    pub(crate) fn bounds(&self) -> (u128, u128) {
        (addr_to_u128(self.start), addr_to_u128(self.end))
    }

    /// Rebuild a range from widened bounds. Caller guarantees `lo <= hi`
    /// and that both values fit the family width.
    pub(crate) fn from_bounds(family: AddressFamily, lo: u128, hi: u128) -> Self {
        Self {
            start: u128_to_addr(family, lo),
            end: u128_to_addr(family, hi),
        }
    }

    /// Whether the range contains the given address
    pub fn contains(&self, addr: IpAddr) -> bool {
        if AddressFamily::of(addr) != self.family() {
            return false;
        }
        let v = addr_to_u128(addr);
        let (lo, hi) = self.bounds();
        lo <= v && v <= hi
    }

    /// Number of addresses in the range, saturating at `u128::MAX`
    pub fn len(&self) -> u128 {
        let (lo, hi) = self.bounds();
        (hi - lo).saturating_add(1)
    }

    /// Decompose the range into its minimal covering set of CIDR blocks,
    /// in ascending address order.
    ///
    /// Greedy: at each step emit the largest block that is both aligned at
    /// the cursor and fits in the remaining span.
    pub fn cidrs(&self) -> Vec<IpNet> {
        let family = self.family();
        let bits = family.bits();
        let (start, end) = self.bounds();

        // The full IPv6 space is the one span whose length overflows u128.
        if family == AddressFamily::Ipv6 && start == 0 && end == u128::MAX {
            return vec![IpNet::V6(Ipv6Net::new_assert(Ipv6Addr::UNSPECIFIED, 0))];
        }

        let mut out = Vec::new();
        let mut cursor = start;
        while cursor <= end {
            let align = if cursor == 0 {
                bits
            } else {
                (cursor.trailing_zeros() as u8).min(bits)
            };
            let max_align_prefix = bits - align;

            let remaining = end - cursor + 1;
            let max_fit_prefix = bits - floor_log2(remaining);

            let prefix = max_align_prefix.max(max_fit_prefix);
            out.push(net_from(family, cursor, prefix));

            // A /0 block here means the whole IPv6 span was just covered;
            // its size does not fit in u128.
            if prefix == 0 && bits == 128 {
                break;
            }
            let block = 1u128 << (bits - prefix) as u32;
            cursor = match cursor.checked_add(block) {
                Some(next) => next,
                None => break,
            };
        }
        out
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<IpNet> for AddressRange {
    fn from(net: IpNet) -> Self {
        // network()/broadcast() canonicalize, so host bits in the input
        // cannot produce an inverted range
        Self {
            start: net.network(),
            end: net.broadcast(),
        }
    }
}

/// Largest power-of-two exponent not exceeding `v` (`v > 0`)
fn floor_log2(v: u128) -> u8 {
    (127 - v.leading_zeros()) as u8
}

/// Build a block from a widened, block-aligned base address
fn net_from(family: AddressFamily, base: u128, prefix: u8) -> IpNet {
    match u128_to_addr(family, base) {
        IpAddr::V4(a) => IpNet::V4(Ipv4Net::new_assert(a, prefix)),
        IpAddr::V6(a) => IpNet::V6(Ipv6Net::new_assert(a, prefix)),
    }
}
