//! Addresses and data-source identifiers
//!
//! # XDR Definitions ([sFlow v5](https://sflow.org/sflow_version_5.txt))
//!
//! ```text
//! enum address_type {
//!    UNKNOWN = 0,
//!    IP_V4   = 1,
//!    IP_V6   = 2
//! }
//!
//! typedef unsigned int sflow_data_source;
//! /* The most significant byte indicates the type of sFlowDataSource
//!    (e.g. ifIndex, smonVlanDataSource, entPhysicalEntry) and the lower
//!    three bytes contain the relevant index value. */
//! ```

use std::net::{Ipv4Addr, Ipv6Addr};

/// Agent or collector address.
///
/// Encoded on the wire as `(type, bytes)`; an undefined address encodes as
/// `(IP_V4, 0.0.0.0)` — see [`Address::wire_len`] and `wire::put_address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Address {
    /// No agent address configured.
    Undefined,
    IPv4(Ipv4Addr),
    IPv6(Ipv6Addr),
}

impl Address {
    /// Wire-encoded address type tag.
    pub(crate) fn type_tag(&self) -> u32 {
        match self {
            Address::Undefined => 1, // encodes as IP_V4 0.0.0.0
            Address::IPv4(_) => 1,
            Address::IPv6(_) => 2,
        }
    }

    /// Number of bytes this address occupies on the wire, tag included.
    pub(crate) fn wire_len(&self) -> usize {
        match self {
            Address::Undefined | Address::IPv4(_) => 4 + 4,
            Address::IPv6(_) => 4 + 16,
        }
    }

    /// Number of 32-bit words the datagram header occupies once this address
    /// has been written: used to know where sample data starts after a
    /// flush (7 quads for a v4 agent, 10 for v6).
    pub(crate) fn header_quads(&self) -> usize {
        // version(1) + address type+bytes + sub_agent_id(1) + seq(1) + uptime(1) + num_records(1)
        1 + (self.wire_len() / 4) + 4
    }
}

/// Data-source class: the top byte of a wire `source_id`.
///
/// # XDR Definition
/// ```text
/// enum SFL_DSCLASS {
///    IFINDEX = 0,
///    VLAN = 1,
///    PHYSICAL_ENTITY = 2,
///    LOGICAL_ENTITY = 3
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DsClass {
    IfIndex = 0,
    Vlan = 1,
    PhysicalEntity = 2,
    LogicalEntity = 3,
}

/// Data-source instance: the triple that identifies the logical origin of a
/// sampler or poller within the agent.
///
/// Ordering is lexicographic over `(class, index, instance)`, which is what
/// keeps the agent's sampler/poller collections in a stable, MIB-friendly
/// enumeration order. Note that if there is a mixture of classes for one
/// agent, the numeric comparison may not track SNMP OID order exactly — see
/// the original `sfl_dsi_compare` comment this is ported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataSourceInstance {
    pub class: DsClass,
    pub index: u32,
    pub instance: u32,
}

impl DataSourceInstance {
    pub fn new(class: DsClass, index: u32, instance: u32) -> Self {
        Self {
            class,
            index,
            instance,
        }
    }

    /// The wire-encoded 32-bit `source_id`: `(class << 24) | index`.
    pub(crate) fn source_id(&self) -> DataSource {
        DataSource(((self.class as u32) << 24) | (self.index & 0x00FF_FFFF))
    }
}

/// Wire-encoded source identifier: `(class << 24) | index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataSource(pub u32);

/// SNMP ifIndex of an input or output interface; 0 if unknown.
///
/// The host application never has more than one egress/ingress interface for
/// a memcache request, so this crate does not implement the "multiple
/// destinations" bit-packed encoding from the full sFlow interface type —
/// only the plain ifIndex-or-zero case the spec's data model calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interface(pub u32);

impl Interface {
    pub const UNKNOWN: Interface = Interface(0);
}
