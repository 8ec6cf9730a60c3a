//! Configuration snapshot shape
//!
//! The core never reads a file or watches it for changes — see §1's
//! out-of-scope list — but it still needs a name for the shape a validated
//! config snapshot takes, and a single entry point that turns one into a
//! live [`crate::Agent`]. Both live here.

use crate::address::{Address, DataSourceInstance, DsClass};
use crate::agent::Agent;
use crate::callbacks::Transport;
use crate::poller::CounterSource;

/// Default sFlow collector UDP port, per §6.
pub const DEFAULT_COLLECTOR_PORT: u16 = 6343;

/// The data-source instance the memcache integration uses for its one
/// logical sampler/poller pair, grounded in the original `sfmc_init`'s
/// `SFL_DS_SET(dsi, SFL_DSCLASS_LOGICAL_ENTITY, 65537, 0)` (with a `$$$
/// should learn the ds_index from the config file` comment the original
/// author never got around to acting on).
pub const MEMCACHE_DSI: DataSourceInstance = DataSourceInstance {
    class: DsClass::LogicalEntity,
    index: 65537,
    instance: 0,
};

/// One sFlow collector destination: an address and a UDP port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectorTarget {
    pub address: Address,
    pub port: u16,
}

impl CollectorTarget {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            port: DEFAULT_COLLECTOR_PORT,
        }
    }
}

/// A validated configuration snapshot, matching §6's external contract
/// exactly: `{sampling_n, polling_secs, agent_ip, collectors[]}`. Parsing
/// this from a file and reacting to it changing underneath a running agent
/// remain the host's responsibility; this crate only defines the shape and
/// [`Agent::from_config`]'s one-shot wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SflowConfig {
    /// `0` disables the sampler entirely.
    pub sampling_n: u32,
    /// `0` disables the poller entirely.
    pub polling_secs: u32,
    pub agent_ip: Address,
    pub collectors: Vec<CollectorTarget>,
}

impl Agent {
    /// Builds an agent from a validated [`SflowConfig`], wiring up the one
    /// receiver/sampler/poller set the memcache integration needs: a
    /// receiver bound to `transport` (which is responsible for fanning a
    /// datagram out to every entry in `config.collectors` — this crate
    /// never opens a socket itself), a sampler at `config.sampling_n` if
    /// nonzero, and a poller at `config.polling_secs` if nonzero and
    /// `counter_source` was supplied.
    ///
    /// Returns the agent and the new receiver's index.
    pub fn from_config(
        config: &SflowConfig,
        boot_time_secs: u32,
        boot_time_usecs: u32,
        now_secs: u32,
        transport: Box<dyn Transport>,
        counter_source: Option<Box<dyn CounterSource>>,
    ) -> (Agent, usize) {
        let mut agent = Agent::new(config.agent_ip, 0, boot_time_secs, boot_time_usecs, now_secs);
        let receiver = agent.add_receiver(transport);

        if config.sampling_n > 0 {
            agent.add_sampler(MEMCACHE_DSI, receiver, config.sampling_n);
        }
        if config.polling_secs > 0 {
            if let Some(source) = counter_source {
                agent.add_poller(MEMCACHE_DSI, receiver, config.polling_secs, source);
            }
        }

        (agent, receiver)
    }
}
