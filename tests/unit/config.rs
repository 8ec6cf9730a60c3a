//! Tests for the `SflowConfig` -> `Agent` wiring in `Agent::from_config`.

use sflow_agent::address::Address;
use sflow_agent::callbacks::NullTransport;
use sflow_agent::config::{CollectorTarget, SflowConfig, DEFAULT_COLLECTOR_PORT, MEMCACHE_DSI};
use sflow_agent::Agent;
use std::net::Ipv4Addr;

fn agent_ip() -> Address {
    Address::IPv4(Ipv4Addr::new(10, 1, 2, 3))
}

#[test]
fn collector_target_new_uses_default_port() {
    let target = CollectorTarget::new(agent_ip());
    assert_eq!(target.port, DEFAULT_COLLECTOR_PORT);
}

#[test]
fn from_config_skips_sampler_when_sampling_n_is_zero() {
    let config = SflowConfig {
        sampling_n: 0,
        polling_secs: 0,
        agent_ip: agent_ip(),
        collectors: vec![CollectorTarget::new(agent_ip())],
    };
    let (agent, _receiver) =
        Agent::from_config(&config, 1_700_000_000, 0, 1_700_000_000, Box::new(NullTransport), None);
    assert!(agent.sampler(MEMCACHE_DSI).is_none());
}

#[test]
fn from_config_wires_sampler_when_sampling_n_is_nonzero() {
    let config = SflowConfig {
        sampling_n: 256,
        polling_secs: 0,
        agent_ip: agent_ip(),
        collectors: vec![CollectorTarget::new(agent_ip())],
    };
    let (agent, _receiver) =
        Agent::from_config(&config, 1_700_000_000, 0, 1_700_000_000, Box::new(NullTransport), None);
    let sampler = agent.sampler(MEMCACHE_DSI).expect("sampler registered");
    assert_eq!(sampler.sampling_rate(), 256);
}

#[test]
fn from_config_skips_poller_without_a_counter_source_even_if_interval_set() {
    let config = SflowConfig {
        sampling_n: 0,
        polling_secs: 10,
        agent_ip: agent_ip(),
        collectors: vec![CollectorTarget::new(agent_ip())],
    };
    let (agent, _receiver) =
        Agent::from_config(&config, 1_700_000_000, 0, 1_700_000_000, Box::new(NullTransport), None);
    assert!(agent.poller(MEMCACHE_DSI).is_none());
}

#[test]
fn from_config_wires_poller_when_interval_and_source_are_set() {
    let config = SflowConfig {
        sampling_n: 0,
        polling_secs: 10,
        agent_ip: agent_ip(),
        collectors: vec![CollectorTarget::new(agent_ip())],
    };
    let (agent, _receiver) = Agent::from_config(
        &config,
        1_700_000_000,
        0,
        1_700_000_000,
        Box::new(NullTransport),
        Some(Box::new(|| Vec::new())),
    );
    let poller = agent.poller(MEMCACHE_DSI).expect("poller registered");
    assert_eq!(poller.polling_interval(), 10);
}
