//! Free VLAN ID enumeration
//!
//! VLAN groups own one or more VID ranges; enumeration of unused VIDs feeds
//! the same filter/pagination stage as address and prefix results.

use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Lowest assignable VLAN ID
pub const MIN_VID: u16 = 1;
/// Highest assignable VLAN ID (4095 is reserved)
pub const MAX_VID: u16 = 4094;

/// A named group of VLAN ID ranges with its current assignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanGroup {
    vid_ranges: Vec<RangeInclusive<u16>>,
    used: BTreeSet<u16>,
}

impl VlanGroup {
    /// Create a group from inclusive VID ranges.
    ///
    /// Ranges must be non-empty and lie within `MIN_VID..=MAX_VID`; ranges
    /// may overlap, enumeration deduplicates.
    pub fn new(vid_ranges: Vec<RangeInclusive<u16>>) -> Result<Self> {
        for range in &vid_ranges {
            if range.is_empty() {
                return Err(Error::InvalidRange(format!(
                    "empty VID range {}-{}",
                    range.start(),
                    range.end()
                )));
            }
            if *range.start() < MIN_VID || *range.end() > MAX_VID {
                return Err(Error::InvalidRange(format!(
                    "VID range {}-{} outside {}-{}",
                    range.start(),
                    range.end(),
                    MIN_VID,
                    MAX_VID
                )));
            }
        }
        Ok(Self {
            vid_ranges,
            used: BTreeSet::new(),
        })
    }

    /// Record VIDs already assigned in this group
    pub fn with_used(mut self, vids: impl IntoIterator<Item = u16>) -> Self {
        self.used.extend(vids);
        self
    }

    /// All unassigned VIDs of the group, ascending, deduplicated
    pub fn available_vids(&self) -> Vec<u16> {
        let members: BTreeSet<u16> = self.vid_ranges.iter().flat_map(|r| r.clone()).collect();
        members
            .into_iter()
            .filter(|vid| !self.used.contains(vid))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_vids() {
        let group = VlanGroup::new(vec![10..=15]).unwrap().with_used(vec![12]);
        assert_eq!(group.available_vids(), vec![10, 11, 13, 14, 15]);
    }

    #[test]
    fn test_overlapping_ranges_deduplicate() {
        let group = VlanGroup::new(vec![10..=14, 12..=16]).unwrap();
        assert_eq!(group.available_vids(), vec![10, 11, 12, 13, 14, 15, 16]);
    }

    #[test]
    fn test_rejects_out_of_bounds_range() {
        assert!(VlanGroup::new(vec![0..=10]).is_err());
        assert!(VlanGroup::new(vec![4000..=4095]).is_err());
    }

    #[test]
    fn test_rejects_empty_range() {
        let result = VlanGroup::new(vec![RangeInclusive::new(20, 10)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_feeds_filter_stage() {
        let group = VlanGroup::new(vec![100..=1000]).unwrap();
        let got = crate::filter_results(group.available_vids(), Some("2"), Some(3));
        assert_eq!(got, vec![200, 201, 202]);
    }
}
