//! Data models for free-space queries

mod address;
mod range;
mod set;

pub use address::{parse_address, AddressFamily};
pub use range::AddressRange;
pub use set::{Addresses, FreeSpaceSet};
