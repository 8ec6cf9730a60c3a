//! Tests for the `Agent` registry: sampler/poller lookup, idempotent
//! registration, and the worker seed/threshold publication path.

use sflow_agent::address::{Address, DataSourceInstance, DsClass};
use sflow_agent::callbacks::NullTransport;
use sflow_agent::flow::{
    FlowElement, FlowSample, MemcacheCommand, MemcacheOperation, MemcacheProtocol, MemcacheStatus,
};
use sflow_agent::Agent;
use std::net::Ipv4Addr;

fn dsi() -> DataSourceInstance {
    DataSourceInstance::new(DsClass::LogicalEntity, 65537, 0)
}

fn agent() -> Agent {
    Agent::new(
        Address::IPv4(Ipv4Addr::new(10, 1, 2, 3)),
        0,
        1_700_000_000,
        123,
        1_700_000_000,
    )
}

#[test]
fn add_sampler_is_idempotent_on_duplicate_dsi() {
    let mut a = agent();
    let receiver = a.add_receiver(Box::new(NullTransport));
    a.add_sampler(dsi(), receiver, 10);
    a.add_sampler(dsi(), receiver, 999);
    assert_eq!(a.samplers().len(), 1);
    assert_eq!(a.sampler(dsi()).unwrap().sampling_rate(), 10);
}

#[test]
fn add_poller_is_idempotent_on_duplicate_dsi() {
    let mut a = agent();
    let receiver = a.add_receiver(Box::new(NullTransport));
    a.add_poller(dsi(), receiver, 5, Box::new(|| Vec::new()));
    a.add_poller(dsi(), receiver, 999, Box::new(|| Vec::new()));
    assert_eq!(a.pollers().len(), 1);
    assert_eq!(a.poller(dsi()).unwrap().polling_interval(), 5);
}

#[test]
fn samplers_are_kept_in_dsi_order() {
    let mut a = agent();
    let receiver = a.add_receiver(Box::new(NullTransport));
    let high = DataSourceInstance::new(DsClass::Vlan, 5, 0);
    let low = DataSourceInstance::new(DsClass::IfIndex, 1, 0);
    a.add_sampler(high, receiver, 10);
    a.add_sampler(low, receiver, 10);
    let dsis: Vec<_> = a.samplers().iter().map(|s| s.dsi()).collect();
    assert_eq!(dsis, vec![low, high]);
}

#[test]
fn set_sampling_rate_is_a_no_op_for_unknown_dsi() {
    let mut a = agent();
    a.set_sampling_rate(dsi(), 50); // no sampler registered: must not panic
    assert!(a.sampler(dsi()).is_none());
}

#[test]
fn worker_sampling_params_is_none_without_a_registered_sampler() {
    let a = agent();
    assert!(a.worker_sampling_params(dsi(), 0).is_none());
}

#[test]
fn worker_sampling_params_differs_across_workers() {
    let mut a = agent();
    let receiver = a.add_receiver(Box::new(NullTransport));
    a.add_sampler(dsi(), receiver, 500);

    let (seed_a, threshold_a) = a.worker_sampling_params(dsi(), 0).unwrap();
    let (seed_b, threshold_b) = a.worker_sampling_params(dsi(), 1).unwrap();
    assert_ne!(seed_a, seed_b);
    assert_eq!(threshold_a, threshold_b);
    assert!(threshold_a > 0);
}

#[test]
fn worker_sampling_params_threshold_is_zero_at_rate_one() {
    let mut a = agent();
    let receiver = a.add_receiver(Box::new(NullTransport));
    a.add_sampler(dsi(), receiver, 1);
    let (_, threshold) = a.worker_sampling_params(dsi(), 0).unwrap();
    assert_eq!(threshold, 0);
}

#[test]
fn write_flow_sample_with_no_sampler_is_silently_dropped() {
    let mut a = agent();
    let sample = FlowSample::new(vec![FlowElement::Memcache(MemcacheOperation {
        protocol: MemcacheProtocol::Ascii,
        cmd: MemcacheCommand::Get,
        key: "foo".to_string(),
        nkeys: 1,
        value_bytes: 64,
        duration_us: 120,
        status: MemcacheStatus::Ok,
    })]);
    assert!(a.write_flow_sample(dsi(), sample).is_ok());
}

#[test]
fn tick_does_not_panic_with_no_samplers_or_pollers() {
    let mut a = agent();
    a.add_receiver(Box::new(NullTransport));
    a.tick(1_700_000_005);
}
