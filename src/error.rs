//! Error types for free-space queries

use crate::models::AddressFamily;
use thiserror::Error;

/// Result type for free-space operations
pub type Result<T> = std::result::Result<T, Error>;

/// Free-space query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Requested split prefix length is outside the valid range for the family
    #[error("Prefix length /{prefix_len} is invalid for this address family (maximum /{max})")]
    InvalidPrefixLength { prefix_len: u8, max: u8 },

    /// The enumerator could not satisfy the requested address count.
    ///
    /// An expected outcome of a query against crowded space, not a defect;
    /// callers typically translate it into a "not enough free addresses"
    /// response. Distinct from an empty splitter result, which is valid
    /// output.
    #[error("Requested {requested} addresses but only {available} are available")]
    InsufficientAddresses { requested: usize, available: usize },

    /// Inputs belong to different address families
    #[error("Mixed address families: expected {expected}, found {found}")]
    MixedAddressFamily {
        expected: AddressFamily,
        found: AddressFamily,
    },

    /// Range bounds are inverted or otherwise unusable
    #[error("Invalid address range: {0}")]
    InvalidRange(String),

    /// Address string could not be parsed
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// CIDR string or prefix length could not be parsed
    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),
}

impl From<std::net::AddrParseError> for Error {
    fn from(e: std::net::AddrParseError) -> Self {
        Error::InvalidAddress(e.to_string())
    }
}

impl From<ipnet::AddrParseError> for Error {
    fn from(e: ipnet::AddrParseError) -> Self {
        Error::InvalidCidr(e.to_string())
    }
}

impl From<ipnet::PrefixLenError> for Error {
    fn from(e: ipnet::PrefixLenError) -> Self {
        Error::InvalidCidr(e.to_string())
    }
}
