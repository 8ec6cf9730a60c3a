//! Flow sample data structures
//!
//! A flow sample describes one sampled event. This crate only implements
//! the flow element tags a memcache-like server needs to describe a
//! request: the socket the request arrived on, and the memcache operation
//! itself. All other sFlow flow element types (sampled headers, Ethernet,
//! MPLS, HTTP, ...) are out of scope.

use crate::address::{DataSource, Interface};
use std::net::{Ipv4Addr, Ipv6Addr};

/// IPv4 socket endpoints for a sampled transaction.
///
/// # XDR Definition ([sFlow Host](https://sflow.org/sflow_host.txt))
/// ```text
/// /* opaque = flow_data; enterprise = 0; format = 2100 */
/// struct extended_socket_ipv4 {
///     unsigned int protocol;
///     ip_v4 local_ip;
///     ip_v4 remote_ip;
///     unsigned int local_port;
///     unsigned int remote_port;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedSocketIpv4 {
    /// IP protocol (e.g. TCP = 6, UDP = 17).
    pub protocol: u32,
    pub local_ip: Ipv4Addr,
    pub remote_ip: Ipv4Addr,
    pub local_port: u32,
    pub remote_port: u32,
}

/// IPv6 socket endpoints for a sampled transaction.
///
/// # XDR Definition ([sFlow Host](https://sflow.org/sflow_host.txt))
/// ```text
/// /* opaque = flow_data; enterprise = 0; format = 2101 */
/// struct extended_socket_ipv6 {
///     unsigned int protocol;
///     ip_v6 local_ip;
///     ip_v6 remote_ip;
///     unsigned int local_port;
///     unsigned int remote_port;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedSocketIpv6 {
    pub protocol: u32,
    pub local_ip: Ipv6Addr,
    pub remote_ip: Ipv6Addr,
    pub local_port: u32,
    pub remote_port: u32,
}

/// Memcache wire protocol used for the sampled operation.
///
/// # XDR Definition ([sFlow Memcache](https://sflow.org/sflow_memcache.txt))
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum MemcacheProtocol {
    Other = 0,
    Ascii = 1,
    Binary = 2,
}

/// Memcache command.
///
/// # XDR Definition ([sFlow Memcache](https://sflow.org/sflow_memcache.txt))
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum MemcacheCommand {
    Other = 0,
    Set = 1,
    Add = 2,
    Replace = 3,
    Append = 4,
    Prepend = 5,
    Cas = 6,
    Get = 7,
    Gets = 8,
    Incr = 9,
    Decr = 10,
    Delete = 11,
    Stats = 12,
    Flush = 13,
    Version = 14,
    Quit = 15,
    Touch = 16,
}

/// Result status of the sampled memcache operation.
///
/// # XDR Definition ([sFlow Memcache](https://sflow.org/sflow_memcache.txt))
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum MemcacheStatus {
    Unknown = 0,
    Ok = 1,
    Error = 2,
    ClientError = 3,
    ServerError = 4,
    Stored = 5,
    NotStored = 6,
    Exists = 7,
    NotFound = 8,
    Deleted = 9,
}

/// Sampled memcache operation.
///
/// # XDR Definition ([sFlow Memcache](https://sflow.org/sflow_memcache.txt))
/// ```text
/// /* opaque = flow_data; enterprise = 0; format = 2200 */
/// struct memcache_operation {
///     memcache_protocol protocol;
///     memcache_cmd cmd;
///     string<255> key;
///     unsigned int nkeys;
///     unsigned int value_bytes;
///     unsigned int duration_uS;
///     memcache_status status;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemcacheOperation {
    pub protocol: MemcacheProtocol,
    pub cmd: MemcacheCommand,
    /// Key used to store/retrieve data (up to 255 bytes).
    pub key: String,
    /// Number of keys involved, including the sampled one.
    pub nkeys: u32,
    pub value_bytes: u32,
    pub duration_us: u32,
    pub status: MemcacheStatus,
}

/// Flow element tags this encoder recognizes.
///
/// # XDR Definition
/// ```text
/// enum SFLFlow_type_tag {
///    EX_SOCKET4 = 2100,
///    EX_SOCKET6 = 2101,
///    MEMCACHE   = 2200,
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowElement {
    ExtendedSocketIpv4(ExtendedSocketIpv4),
    ExtendedSocketIpv6(ExtendedSocketIpv6),
    Memcache(MemcacheOperation),
}

impl FlowElement {
    pub(crate) const TAG_EX_SOCKET4: u32 = 2100;
    pub(crate) const TAG_EX_SOCKET6: u32 = 2101;
    pub(crate) const TAG_MEMCACHE: u32 = 2200;

    pub(crate) fn tag(&self) -> u32 {
        match self {
            FlowElement::ExtendedSocketIpv4(_) => Self::TAG_EX_SOCKET4,
            FlowElement::ExtendedSocketIpv6(_) => Self::TAG_EX_SOCKET6,
            FlowElement::Memcache(_) => Self::TAG_MEMCACHE,
        }
    }
}

/// Compact flow sample — Format (0,1).
///
/// # XDR Definition ([sFlow v5](https://sflow.org/sflow_version_5.txt))
/// ```text
/// struct flow_sample {
///    unsigned int sequence_number;
///    sflow_data_source source_id;
///    unsigned int sampling_rate;
///    unsigned int sample_pool;
///    unsigned int drops;
///    interface input;
///    interface output;
///    flow_record flow_records<>;
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowSample {
    /// Stamped by `Sampler::write_flow_sample`; any value set by the caller
    /// is overwritten.
    pub sequence_number: u32,
    /// Stamped by `Sampler::write_flow_sample` from the sampler's DSI.
    pub source_id: Option<DataSource>,
    /// Left `None` to have the sampler fill in its configured rate.
    pub sampling_rate: Option<u32>,
    /// Left `None` to have the sampler fill in its running pool count.
    pub sample_pool: Option<u32>,
    /// Left `None` to have the sampler fill in its running drop count.
    pub drops: Option<u32>,
    pub input: Interface,
    pub output: Interface,
    pub elements: Vec<FlowElement>,
}

impl FlowSample {
    /// Start a flow sample carrying a single element, with rate/pool/drops
    /// left for the sampler to fill in (the common case).
    pub fn new(elements: Vec<FlowElement>) -> Self {
        Self {
            elements,
            ..Default::default()
        }
    }
}
