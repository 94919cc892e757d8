//! Subnet splitter
//!
//! Decomposes a free-space set into the maximal collection of CIDR blocks of
//! a requested prefix length, in ascending address order.

use crate::models::FreeSpaceSet;
use crate::{Error, Result};
use ipnet::IpNet;
use tracing::debug;

/// Splits free space into subnets of a fixed prefix length
///
/// Borrows the free-space set for the duration of one query; the set is
/// never mutated.
#[derive(Debug, Clone, Copy)]
pub struct IpSplitter<'a> {
    prefixes: &'a FreeSpaceSet,
}

impl<'a> IpSplitter<'a> {
    pub fn new(prefixes: &'a FreeSpaceSet) -> Self {
        Self { prefixes }
    }

    /// Split the free space into blocks of exactly `prefix_len`.
    ///
    /// A `prefix_len` of zero returns the free space's own minimal covering
    /// CIDR blocks unmodified, ignoring `limit`. Otherwise each covering
    /// block is subdivided into its `prefix_len` children; blocks already
    /// longer than the target cannot contribute and are skipped. An empty
    /// result is valid output, not an error.
    ///
    /// When `limit` is non-zero, accumulation stops as soon as strictly more
    /// than `limit` blocks have been collected and the result is truncated
    /// to exactly `limit`. A source block contributing exactly `limit`
    /// subnets is therefore not cut short. This boundary is load-bearing
    /// for callers paginating the output; keep it as is.
    pub fn split(&self, prefix_len: u8, limit: Option<usize>) -> Result<Vec<IpNet>> {
        let max = self.prefixes.family().bits();
        if prefix_len > max {
            return Err(Error::InvalidPrefixLength { prefix_len, max });
        }

        if prefix_len == 0 {
            return Ok(self.prefixes.iter_cidrs());
        }

        let cap = limit.filter(|&l| l > 0);
        let mut subnets: Vec<IpNet> = Vec::new();

        'outer: for free_net in self.prefixes.iter_cidrs() {
            // Too small to hold even one target-sized subnet
            if free_net.prefix_len() > prefix_len {
                continue;
            }
            for subnet in free_net.subnets(prefix_len)? {
                subnets.push(subnet);
                if cap.is_some_and(|cap| subnets.len() > cap) {
                    break 'outer;
                }
            }
        }

        if let Some(cap) = cap {
            subnets.truncate(cap);
        }

        debug!(
            prefix_len,
            count = subnets.len(),
            "Split free space into subnets"
        );
        Ok(subnets)
    }
}
