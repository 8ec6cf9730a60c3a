//! Counter sample data structures
//!
//! Mirrors `flow.rs`: only the counter element tag a memcache-like server
//! needs (`MEMCACHE`) is implemented. All other sFlow counter block types
//! (interface counters, host counters, JVM, ...) are out of scope.

use crate::address::DataSource;

/// Memcache server counters — 33 fields (30 32-bit words plus 3 64-bit
/// counters), 144 bytes on the wire.
///
/// # XDR Definition ([sFlow Memcache](https://sflow.org/sflow_memcache.txt))
/// ```text
/// /* opaque = counter_data; enterprise = 0; format = 2200 */
/// struct memcache_counters {
///    unsigned int uptime;
///    unsigned int rusage_user;
///    unsigned int rusage_system;
///    unsigned int curr_connections;
///    unsigned int total_connections;
///    unsigned int connection_structures;
///    unsigned int cmd_get;
///    unsigned int cmd_set;
///    unsigned int cmd_flush;
///    unsigned int get_hits;
///    unsigned int get_misses;
///    unsigned int delete_misses;
///    unsigned int delete_hits;
///    unsigned int incr_misses;
///    unsigned int incr_hits;
///    unsigned int decr_misses;
///    unsigned int decr_hits;
///    unsigned int cas_misses;
///    unsigned int cas_hits;
///    unsigned int cas_badval;
///    unsigned int auth_cmds;
///    unsigned int auth_errors;
///    unsigned hyper bytes_read;
///    unsigned hyper bytes_written;
///    unsigned int limit_maxbytes;
///    unsigned int accepting_conns;
///    unsigned int listen_disabled_num;
///    unsigned int threads;
///    unsigned int conn_yields;
///    unsigned hyper bytes;
///    unsigned int curr_items;
///    unsigned int total_items;
///    unsigned int evictions;
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemcacheCounters {
    /// Seconds this server has been running.
    pub uptime: u32,
    pub rusage_user: u32,
    pub rusage_system: u32,
    pub curr_connections: u32,
    pub total_connections: u32,
    pub connection_structures: u32,
    pub cmd_get: u32,
    pub cmd_set: u32,
    pub cmd_flush: u32,
    pub get_hits: u32,
    pub get_misses: u32,
    pub delete_misses: u32,
    pub delete_hits: u32,
    pub incr_misses: u32,
    pub incr_hits: u32,
    pub decr_misses: u32,
    pub decr_hits: u32,
    pub cas_misses: u32,
    pub cas_hits: u32,
    pub cas_badval: u32,
    pub auth_cmds: u32,
    pub auth_errors: u32,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub limit_maxbytes: u32,
    pub accepting_conns: u32,
    pub listen_disabled_num: u32,
    pub threads: u32,
    pub conn_yields: u32,
    pub bytes: u64,
    pub curr_items: u32,
    pub total_items: u32,
    pub evictions: u32,
}

/// Counter element tags this encoder recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CounterElement {
    Memcache(MemcacheCounters),
}

impl CounterElement {
    pub(crate) const TAG_MEMCACHE: u32 = 2200;

    pub(crate) fn tag(&self) -> u32 {
        match self {
            CounterElement::Memcache(_) => Self::TAG_MEMCACHE,
        }
    }
}

/// Compact counters sample — Format (0,2).
///
/// # XDR Definition ([sFlow v5](https://sflow.org/sflow_version_5.txt))
/// ```text
/// struct counters_sample {
///    unsigned int sequence_number;
///    sflow_data_source source_id;
///    counter_record counters<>;
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountersSample {
    /// Stamped by `Poller::write_counters_sample`.
    pub sequence_number: u32,
    /// Stamped by `Poller::write_counters_sample` from the poller's DSI.
    pub source_id: Option<DataSource>,
    pub elements: Vec<CounterElement>,
}

impl CountersSample {
    pub fn new(elements: Vec<CounterElement>) -> Self {
        Self {
            elements,
            ..Default::default()
        }
    }
}
