//! Rendering of query results
//!
//! Results describe objects that do not exist yet (an unassigned address, an
//! uncarved prefix, a free VID), so they serialize as `{id, display}` string
//! pairs rather than as model records. The mask suffix on addresses is
//! caller-controlled: set `mask_length` to render `address/len`, leave it
//! unset for the bare address.

use ipnet::IpNet;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::IpAddr;

fn serialize_id_display<S: Serializer>(value: &impl fmt::Display, s: S) -> Result<S::Ok, S::Error> {
    let rendered = value.to_string();
    let mut out = s.serialize_struct("Available", 2)?;
    out.serialize_field("id", &rendered)?;
    out.serialize_field("display", &rendered)?;
    out.end()
}

/// An unassigned address, optionally rendered with its routing prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableIp {
    pub address: IpAddr,
    pub mask_length: Option<u8>,
}

impl AvailableIp {
    /// Render with the container's mask suffix (`a.b.c.d/len`)
    pub fn with_mask(address: IpAddr, mask_length: u8) -> Self {
        Self {
            address,
            mask_length: Some(mask_length),
        }
    }

    /// Render the bare address
    pub fn bare(address: IpAddr) -> Self {
        Self {
            address,
            mask_length: None,
        }
    }
}

impl fmt::Display for AvailableIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mask_length {
            Some(len) => write!(f, "{}/{}", self.address, len),
            None => write!(f, "{}", self.address),
        }
    }
}

impl Serialize for AvailableIp {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize_id_display(self, s)
    }
}

/// An uncarved prefix of fixed length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailablePrefix(pub IpNet);

impl fmt::Display for AvailablePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AvailablePrefix {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize_id_display(self, s)
    }
}

/// A free VLAN ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableVlan(pub u16);

impl fmt::Display for AvailableVlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AvailableVlan {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize_id_display(self, s)
    }
}
