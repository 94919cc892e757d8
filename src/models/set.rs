//! Normalized free-space sets with interval-based set algebra
//!
//! A [`FreeSpaceSet`] is the read-only input of every query: the addresses of
//! a parent container not already consumed, held as a sorted list of disjoint,
//! non-adjacent inclusive ranges. All set operations (intersection from a
//! base address, difference) are interval merges over that list; nothing ever
//! materializes individual addresses, which keeps IPv6-scale inputs cheap.

use super::address::{addr_to_u128, u128_to_addr, AddressFamily};
use super::range::AddressRange;
use crate::{Error, Result};
use ipnet::IpNet;
use serde::Serialize;
use std::net::IpAddr;

/// A normalized set of free address ranges of one family
///
/// Invariant: ranges are sorted ascending by start address, and no two
/// ranges overlap or touch. Construction normalizes arbitrary input; the set
/// is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeSpaceSet {
    family: AddressFamily,
    ranges: Vec<AddressRange>,
}

impl FreeSpaceSet {
    /// Empty set of the given family
    pub fn new(family: AddressFamily) -> Self {
        Self {
            family,
            ranges: Vec::new(),
        }
    }

    /// Build a set from arbitrary ranges of the given family.
    ///
    /// Input may be unsorted and overlapping; it is merged into canonical
    /// form. Ranges of a different family are rejected.
    pub fn from_ranges(
        family: AddressFamily,
        ranges: impl IntoIterator<Item = AddressRange>,
    ) -> Result<Self> {
        let mut bounds: Vec<(u128, u128)> = Vec::new();
        for range in ranges {
            if range.family() != family {
                return Err(Error::MixedAddressFamily {
                    expected: family,
                    found: range.family(),
                });
            }
            bounds.push(range.bounds());
        }
        bounds.sort_unstable();

        // Merge overlapping and adjacent intervals
        let mut merged: Vec<(u128, u128)> = Vec::with_capacity(bounds.len());
        for (lo, hi) in bounds {
            if let Some(last) = merged.last_mut() {
                if lo <= last.1.saturating_add(1) {
                    if hi > last.1 {
                        last.1 = hi;
                    }
                    continue;
                }
            }
            merged.push((lo, hi));
        }

        Ok(Self {
            family,
            ranges: merged
                .into_iter()
                .map(|(lo, hi)| AddressRange::from_bounds(family, lo, hi))
                .collect(),
        })
    }

    /// Build a set from CIDR blocks of the given family
    pub fn from_cidrs(
        family: AddressFamily,
        cidrs: impl IntoIterator<Item = IpNet>,
    ) -> Result<Self> {
        Self::from_ranges(family, cidrs.into_iter().map(AddressRange::from))
    }

    /// Address family of the set
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// The normalized ranges, ascending
    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    /// Whether the set holds no addresses
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of addresses, saturating at `u128::MAX`
    pub fn address_count(&self) -> u128 {
        self.ranges
            .iter()
            .fold(0u128, |acc, r| acc.saturating_add(r.len()))
    }

    /// Whether the set contains the given address
    pub fn contains(&self, addr: IpAddr) -> bool {
        if AddressFamily::of(addr) != self.family {
            return false;
        }
        let v = addr_to_u128(addr);
        // Index of the first range starting after v; only its predecessor
        // can contain v.
        let idx = self.ranges.partition_point(|r| r.bounds().0 <= v);
        idx > 0 && self.ranges[idx - 1].bounds().1 >= v
    }

    /// The minimal covering CIDR blocks of the whole set, ascending
    pub fn iter_cidrs(&self) -> Vec<IpNet> {
        self.ranges.iter().flat_map(|r| r.cidrs()).collect()
    }

    /// Candidate set for enumeration: this set intersected with
    /// `[base, family max]`.
    ///
    /// An interval clamp, not a complement over the address universe: ranges
    /// ending below `base` are dropped and the first surviving range has its
    /// start raised to `base`.
    pub fn intersect_from(&self, base: IpAddr) -> Result<Self> {
        let base_family = AddressFamily::of(base);
        if base_family != self.family {
            return Err(Error::MixedAddressFamily {
                expected: self.family,
                found: base_family,
            });
        }
        let floor = addr_to_u128(base);

        let ranges = self
            .ranges
            .iter()
            .filter(|r| r.bounds().1 >= floor)
            .map(|r| {
                let (lo, hi) = r.bounds();
                AddressRange::from_bounds(self.family, lo.max(floor), hi)
            })
            .collect();

        Ok(Self {
            family: self.family,
            ranges,
        })
    }

    /// Set difference: the addresses of `self` not present in `other`
    pub fn difference(&self, other: &FreeSpaceSet) -> Result<Self> {
        if other.family != self.family {
            return Err(Error::MixedAddressFamily {
                expected: self.family,
                found: other.family,
            });
        }

        let mut out: Vec<AddressRange> = Vec::new();
        for range in &self.ranges {
            let (lo, hi) = range.bounds();
            let mut cursor = Some(lo);
            for sub in &other.ranges {
                let (sub_lo, sub_hi) = sub.bounds();
                if sub_hi < lo {
                    continue;
                }
                if sub_lo > hi {
                    break;
                }
                let Some(cur) = cursor else { break };
                if sub_lo > cur {
                    out.push(AddressRange::from_bounds(self.family, cur, sub_lo - 1));
                }
                if sub_hi >= hi {
                    cursor = None;
                } else {
                    cursor = Some(cur.max(sub_hi + 1));
                }
            }
            if let Some(cur) = cursor {
                if cur <= hi {
                    out.push(AddressRange::from_bounds(self.family, cur, hi));
                }
            }
        }

        Ok(Self {
            family: self.family,
            ranges: out,
        })
    }

    /// Lazy ascending iterator over every address in the set
    pub fn addresses(&self) -> Addresses<'_> {
        let cursor = self.ranges.first().map(|r| r.bounds().0);
        Addresses {
            family: self.family,
            ranges: &self.ranges,
            index: 0,
            cursor,
        }
    }
}

impl From<IpNet> for FreeSpaceSet {
    fn from(net: IpNet) -> Self {
        let family = match net {
            IpNet::V4(_) => AddressFamily::Ipv4,
            IpNet::V6(_) => AddressFamily::Ipv6,
        };
        Self {
            family,
            ranges: vec![AddressRange::from(net)],
        }
    }
}

/// Ascending address iterator over a [`FreeSpaceSet`]
///
/// Walks the interval list with a widened cursor; the cursor is compared
/// against the current range end before every increment, so the family
/// boundary is never overflowed.
pub struct Addresses<'a> {
    family: AddressFamily,
    ranges: &'a [AddressRange],
    index: usize,
    cursor: Option<u128>,
}

impl Iterator for Addresses<'_> {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        let current = self.cursor?;
        let (_, hi) = self.ranges[self.index].bounds();

        let addr = u128_to_addr(self.family, current);
        if current < hi {
            self.cursor = Some(current + 1);
        } else {
            self.index += 1;
            self.cursor = self.ranges.get(self.index).map(|r| r.bounds().0);
        }
        Some(addr)
    }
}
