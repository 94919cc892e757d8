//! Free-space providers
//!
//! Container types that own an authoritative view of an address space and
//! produce the [`FreeSpaceSet`] a query consumes:
//! - [`Prefix`] - a CIDR block with assigned host addresses and child prefixes
//! - [`IpRange`] - an inclusive address range with assigned host addresses
//!
//! The splitter and enumerator depend only on [`AddressContainer`] and the
//! sets it produces, never on the concrete container types. The set handed
//! out is a snapshot; keeping it consistent with a mutating allocation store
//! is the caller's concern.

use crate::models::{AddressFamily, AddressRange, FreeSpaceSet};
use crate::Result;
use ipnet::IpNet;
use serde::Serialize;
use std::net::IpAddr;

/// A container of individual addresses that can report its free space
pub trait AddressContainer {
    /// All unassigned addresses in this container, as a normalized set
    fn available_ips(&self) -> Result<FreeSpaceSet>;

    /// Mask length to append when rendering bare addresses of this container
    fn mask_length(&self) -> u8;
}

/// A parent prefix with its current allocations
///
/// Mirrors the usual IPAM model: a CIDR block under which host addresses are
/// assigned and child prefixes are carved out. Unless the prefix is a pool,
/// the network address (and for IPv4 the broadcast address) is not handed
/// out as a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prefix {
    cidr: IpNet,
    is_pool: bool,
    assigned: Vec<IpAddr>,
    children: Vec<IpNet>,
}

impl Prefix {
    /// A prefix whose network/broadcast addresses are reserved
    pub fn new(cidr: IpNet) -> Self {
        Self {
            cidr: cidr.trunc(),
            is_pool: false,
            assigned: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A pool prefix: every address is a usable host address
    pub fn pool(cidr: IpNet) -> Self {
        Self {
            is_pool: true,
            ..Self::new(cidr)
        }
    }

    /// Record host addresses already assigned under this prefix.
    /// Addresses outside the prefix are ignored.
    pub fn with_assigned(mut self, ips: impl IntoIterator<Item = IpAddr>) -> Self {
        self.assigned
            .extend(ips.into_iter().filter(|ip| self.cidr.contains(ip)));
        self
    }

    /// Record child prefixes already carved out of this prefix.
    /// Prefixes not contained in this one are ignored.
    pub fn with_children(mut self, nets: impl IntoIterator<Item = IpNet>) -> Self {
        self.children.extend(
            nets.into_iter()
                .map(|n| n.trunc())
                .filter(|n| self.cidr.contains(n)),
        );
        self
    }

    /// The parent CIDR block
    pub fn cidr(&self) -> IpNet {
        self.cidr
    }

    /// Address family of the prefix
    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(self.cidr.network())
    }

    /// Free prefix space: the parent minus its child prefixes.
    ///
    /// Assigned host addresses do not fragment prefix space; input for
    /// [`IpSplitter`](crate::IpSplitter).
    pub fn available_prefixes(&self) -> Result<FreeSpaceSet> {
        let family = self.family();
        let whole = FreeSpaceSet::from(self.cidr);
        let used = FreeSpaceSet::from_cidrs(family, self.children.iter().copied())?;
        whole.difference(&used)
    }

    /// Network/broadcast addresses withheld from host assignment
    fn reserved_edges(&self) -> Vec<AddressRange> {
        if self.is_pool {
            return Vec::new();
        }
        match self.family() {
            // /31 and /32 have no network/broadcast distinction
            AddressFamily::Ipv4 if self.cidr.prefix_len() < 31 => vec![
                AddressRange::host(self.cidr.network()),
                AddressRange::host(self.cidr.broadcast()),
            ],
            // IPv6 withholds only the subnet-router anycast address
            AddressFamily::Ipv6 if self.cidr.prefix_len() < 127 => {
                vec![AddressRange::host(self.cidr.network())]
            }
            _ => Vec::new(),
        }
    }
}

impl AddressContainer for Prefix {
    fn available_ips(&self) -> Result<FreeSpaceSet> {
        let family = self.family();
        let whole = FreeSpaceSet::from(self.cidr);

        let mut used: Vec<AddressRange> = self.reserved_edges();
        used.extend(self.assigned.iter().copied().map(AddressRange::host));
        used.extend(self.children.iter().copied().map(AddressRange::from));

        whole.difference(&FreeSpaceSet::from_ranges(family, used)?)
    }

    fn mask_length(&self) -> u8 {
        self.cidr.prefix_len()
    }
}

/// An explicit start-end address range with its current assignments
///
/// Unlike [`Prefix`], a range has no network or broadcast address; every
/// member address is assignable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpRange {
    range: AddressRange,
    mask_length: u8,
    assigned: Vec<IpAddr>,
}

impl IpRange {
    /// Create a range container; `mask_length` is the routing prefix its
    /// rendered addresses carry.
    pub fn new(start: IpAddr, end: IpAddr, mask_length: u8) -> Result<Self> {
        Ok(Self {
            range: AddressRange::new(start, end)?,
            mask_length,
            assigned: Vec::new(),
        })
    }

    /// Record addresses already assigned inside the range.
    /// Addresses outside the range are ignored.
    pub fn with_assigned(mut self, ips: impl IntoIterator<Item = IpAddr>) -> Self {
        self.assigned
            .extend(ips.into_iter().filter(|ip| self.range.contains(*ip)));
        self
    }

    /// The underlying address range
    pub fn range(&self) -> AddressRange {
        self.range
    }

    /// Address family of the range
    pub fn family(&self) -> AddressFamily {
        self.range.family()
    }
}

impl AddressContainer for IpRange {
    fn available_ips(&self) -> Result<FreeSpaceSet> {
        let family = self.family();
        let whole = FreeSpaceSet::from_ranges(family, vec![self.range])?;
        let used = FreeSpaceSet::from_ranges(
            family,
            self.assigned.iter().copied().map(AddressRange::host),
        )?;
        whole.difference(&used)
    }

    fn mask_length(&self) -> u8 {
        self.mask_length
    }
}
