//! Tests for the two pseudo-random generators: the control-plane `Lcg` and
//! the hot-path seed/threshold derivations.

use sflow_agent::address::Address;
use sflow_agent::prng::{derive_seed, sampling_threshold, worker_seed, xorshift32_next, Lcg};
use std::net::Ipv4Addr;

#[test]
fn lcg_matches_reference_sequence() {
    let mut lcg = Lcg::new(1);
    let a = lcg.next(1_000_000);
    let b = lcg.next(1_000_000);
    assert_ne!(a, b);
    assert!((1..=1_000_000).contains(&a));
    assert!((1..=1_000_000).contains(&b));
}

#[test]
fn lcg_zero_limit_returns_one() {
    let mut lcg = Lcg::new(42);
    assert_eq!(lcg.next(0), 1);
}

#[test]
fn lcg_fixed_seed_one_matches_original_sfl_random_start() {
    // sfl_random's state = 1 at process start; draw against a poller
    // interval of 5 should reproduce the spec's Scenario C countdown of 3.
    let mut lcg = Lcg::new(1);
    assert_eq!(lcg.next(5), 3);
}

#[test]
fn worker_seed_never_zero() {
    assert_eq!(worker_seed(0, 0), 1);
    assert_ne!(worker_seed(7, 3), 0);
}

#[test]
fn sampling_threshold_disables_for_rate_one() {
    assert_eq!(sampling_threshold(0), 0);
    assert_eq!(sampling_threshold(1), 0);
    assert!(sampling_threshold(2) > 0);
}

#[test]
fn derive_seed_differs_across_agent_addresses() {
    let a = derive_seed(1000, 1, &Address::IPv4(Ipv4Addr::new(10, 1, 2, 3)));
    let b = derive_seed(1000, 1, &Address::IPv4(Ipv4Addr::new(10, 1, 2, 4)));
    assert_ne!(a, b);
}

#[test]
fn derive_seed_is_deterministic() {
    let addr = Address::IPv4(Ipv4Addr::new(10, 1, 2, 3));
    assert_eq!(derive_seed(42, 7, &addr), derive_seed(42, 7, &addr));
}

#[test]
fn xorshift32_never_sticks_at_zero() {
    let mut x = 1u32;
    for _ in 0..1000 {
        x = xorshift32_next(x);
        assert_ne!(x, 0);
    }
}
