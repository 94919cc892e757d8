//! Free address-space queries for IPAM tooling
//!
//! Answers allocation questions over a snapshot of free address space:
//! - Subnet splitting: decompose free space into fixed-length CIDR blocks
//! - Address enumeration: the next N free addresses at or after a base
//! - VLAN ID enumeration: free VIDs of a VLAN group
//! - Prefix-filtered, limit-capped pagination over any rendered result
//!
//! Features:
//! - IPv4 and IPv6 handled uniformly over widened integer arithmetic
//! - Interval-based set algebra; nothing enumerates an address universe
//! - Pure, stateless queries over an immutable [`FreeSpaceSet`] snapshot
//! - Container types ([`Prefix`], [`IpRange`]) that derive free space from
//!   an allocation snapshot
//!
//! Persistence, transport, and the authoritative allocation store are the
//! caller's concern; this crate only computes answers.

pub mod enumerator;
pub mod error;
pub mod filter;
pub mod models;
pub mod provider;
pub mod render;
pub mod splitter;
pub mod vlan;

// Re-export core types
pub use enumerator::{available_ips, available_ips_str};
pub use error::{Error, Result};
pub use filter::filter_results;
pub use models::{parse_address, AddressFamily, AddressRange, Addresses, FreeSpaceSet};
pub use provider::{AddressContainer, IpRange, Prefix};
pub use render::{AvailableIp, AvailablePrefix, AvailableVlan};
pub use splitter::IpSplitter;
pub use vlan::{VlanGroup, MAX_VID, MIN_VID};
