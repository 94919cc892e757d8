//! Available-address enumeration
//!
//! Answers "the next N free addresses at or after a base address" over a
//! free-space set, or fails when that many do not exist.

use crate::models::{parse_address, FreeSpaceSet};
use crate::{Error, Result};
use std::net::IpAddr;
use tracing::debug;

/// Return the first `size` addresses of `free` that are `>= base`, ascending.
///
/// The scan domain is the candidate set `free ∩ [base, family max]`, built
/// by interval clamping; individual addresses are only produced while
/// collecting, so the cost is bounded by `size` plus the number of ranges
/// regardless of how large the free space is.
///
/// `base` itself is returned first when it is free (inclusive lower bound).
/// Exactness is mandatory: when fewer than `size` candidates exist the call
/// fails with [`Error::InsufficientAddresses`] and no partial list is
/// produced. `size` of zero yields an empty list.
pub fn available_ips(free: &FreeSpaceSet, base: IpAddr, size: usize) -> Result<Vec<IpAddr>> {
    let candidates = free.intersect_from(base)?;

    let ips: Vec<IpAddr> = candidates.addresses().take(size).collect();
    if ips.len() < size {
        debug!(
            base = %base,
            requested = size,
            available = ips.len(),
            "Not enough free addresses"
        );
        return Err(Error::InsufficientAddresses {
            requested: size,
            available: ips.len(),
        });
    }
    Ok(ips)
}

/// [`available_ips`] with a textual base address.
///
/// The base may carry a routing-prefix suffix (`"192.168.1.10/24"`); the
/// suffix is stripped before the scan.
pub fn available_ips_str(free: &FreeSpaceSet, base: &str, size: usize) -> Result<Vec<IpAddr>> {
    available_ips(free, parse_address(base)?, size)
}
