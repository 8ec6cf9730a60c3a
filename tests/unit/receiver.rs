//! Tests for the receiver's public construction and datagram-size knobs.
//!
//! Sample encoding (`write_flow_sample`/`write_counters_sample`) is
//! `pub(crate)` — a `Sampler`/`Poller` concern — so that coverage stays
//! inline in `src/receiver.rs`.

use sflow_agent::address::Address;
use sflow_agent::callbacks::NullTransport;
use sflow_agent::receiver::{Receiver, DEFAULT_DATAGRAM_SIZE, MIN_DATAGRAM_SIZE};
use std::net::Ipv4Addr;

#[test]
fn new_clamps_below_minimum_datagram_size() {
    let receiver = Receiver::new(
        Address::IPv4(Ipv4Addr::new(10, 0, 0, 1)),
        0,
        1,
        Box::new(NullTransport),
    );
    assert_eq!(receiver.max_datagram_size(), MIN_DATAGRAM_SIZE);
}

#[test]
fn new_honors_a_sane_datagram_size() {
    let receiver = Receiver::new(
        Address::IPv4(Ipv4Addr::new(10, 0, 0, 1)),
        0,
        DEFAULT_DATAGRAM_SIZE,
        Box::new(NullTransport),
    );
    assert_eq!(receiver.max_datagram_size(), DEFAULT_DATAGRAM_SIZE);
}

#[test]
fn set_max_datagram_size_clamps_and_takes_effect() {
    let mut receiver = Receiver::new(
        Address::IPv4(Ipv4Addr::new(10, 0, 0, 1)),
        0,
        DEFAULT_DATAGRAM_SIZE,
        Box::new(NullTransport),
    );
    receiver.set_max_datagram_size(50);
    assert_eq!(receiver.max_datagram_size(), MIN_DATAGRAM_SIZE);

    receiver.set_max_datagram_size(900);
    assert_eq!(receiver.max_datagram_size(), 900);
}

#[test]
fn tick_on_empty_receiver_is_a_no_op() {
    let mut receiver = Receiver::new(
        Address::IPv4(Ipv4Addr::new(10, 0, 0, 1)),
        0,
        DEFAULT_DATAGRAM_SIZE,
        Box::new(NullTransport),
    );
    receiver.tick(1000);
}
