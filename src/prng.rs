//! Pseudo-random number generation
//!
//! Two distinct generators exist in the original agent, and the boundary
//! between them is deliberate:
//!
//! - [`Lcg`] is the low-frequency generator the sampler/poller control plane
//!   uses to scatter skip counts and polling phases so that many samplers
//!   configured with the same rate don't all fire on the same packet. It
//!   runs once per `set_rate`/`reset`, not per packet, so a simple
//!   `&mut self` LCG is plenty.
//! - The per-packet sampling decision (`x ^= x << 13; x ^= x >> 17;
//!   x ^= x << 5`) lives on the hot path inside the host's own worker loop,
//!   not in this crate: it runs once per request under a lock-free or
//!   per-thread generator the host already owns. This crate only computes
//!   the `(seed, threshold)` pair a worker should seed itself with —
//!   see [`worker_seed`] and [`sampling_threshold`].

/// Low-frequency linear congruential generator used to scatter sampler skip
/// counts and poller phase offsets.
///
/// Grounded in the original agent's `sfl_random`: `state = (state * 32719 +
/// 3) % 32749`, with the public draw uniform over `1..=limit`.
#[derive(Debug, Clone, Copy)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    const A: u32 = 32719;
    const C: u32 = 3;
    const M: u32 = 32749;

    /// Seeds the generator. A seed of `0` is accepted — the multiplicative
    /// step still mixes in `C` on the first draw.
    pub fn new(seed: u32) -> Self {
        Self { state: seed % Self::M }
    }

    /// Draws a value uniformly distributed over `1..=limit`. `limit == 0`
    /// always returns `1`, matching the original's guard against a
    /// division by zero when a sampler/poller rate of zero is configured.
    pub fn next(&mut self, limit: u32) -> u32 {
        self.state = (self.state.wrapping_mul(Self::A).wrapping_add(Self::C)) % Self::M;
        if limit == 0 {
            1
        } else {
            (self.state % limit) + 1
        }
    }
}

/// Derives the seed a worker's hot-path xorshift32 generator should start
/// from, combining the sampler's shared seed with a per-worker index so
/// that no two workers draw the same sequence.
///
/// Grounded in the memcache integration's `sfmc_sampler_init`: a zero
/// combined seed is remapped to `1`, since a zero-seeded xorshift32 would
/// otherwise generate nothing but zeroes forever.
pub fn worker_seed(shared_seed: u32, worker_index: u32) -> u32 {
    let seed = shared_seed ^ worker_index;
    if seed == 0 {
        1
    } else {
        seed
    }
}

/// Computes the per-packet sampling threshold for a 1-in-`sampling_rate`
/// decision against a `u32` hot-path draw: a worker samples when its next
/// xorshift32 draw is `<= threshold`.
///
/// `sampling_rate <= 1` means "sample everything", encoded as a threshold
/// of `0` matching the original convention (the comparison `draw <= 0`
/// never holds for a nonzero draw, so the host's hot path special-cases
/// `sampling_rate <= 1` to always sample rather than relying on this
/// threshold — see the original agent's `sflow_random_threshold` handling).
pub fn sampling_threshold(sampling_rate: u32) -> u32 {
    if sampling_rate <= 1 {
        0
    } else {
        u32::MAX / sampling_rate
    }
}

/// Derives the shared seed used for [`worker_seed`] and [`Lcg`] phase
/// scatter from the agent's boot time and its own address, so that a fleet
/// of agents booting at the same instant doesn't end up sampling in lock
/// step.
///
/// Grounded in the memcache integration's startup hashing: `hash = boot_sec
/// XOR boot_usec`, then folded two bytes at a time across the agent's
/// 16-byte address representation (`hash = hash*3 + (b[i]<<8 | b[i+1])`).
/// IPv4 addresses are folded via their IPv4-mapped IPv6 form so the same
/// loop handles both families; `Address::Undefined` folds in sixteen zero
/// bytes.
pub fn derive_seed(boot_sec: u32, boot_usec: u32, agent_address: &crate::address::Address) -> u32 {
    use crate::address::Address;

    let bytes: [u8; 16] = match agent_address {
        Address::Undefined => [0u8; 16],
        Address::IPv4(a) => a.to_ipv6_mapped().octets(),
        Address::IPv6(a) => a.octets(),
    };
    let mut hash = boot_sec ^ boot_usec;
    let mut i = 0;
    while i < 16 {
        hash = hash.wrapping_mul(3);
        hash = hash.wrapping_add(((bytes[i] as u32) << 8) | (bytes[i + 1] as u32));
        i += 2;
    }
    hash
}

/// Runs the hot-path xorshift32 step: `x ^= x << 13; x ^= x >> 17;
/// x ^= x << 5`. Exposed so a host application (or this crate's own tests)
/// can exercise the exact same generator the C worker loop uses, even
/// though no runtime state for it lives in this crate.
pub fn xorshift32_next(x: u32) -> u32 {
    let mut x = x;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    x
}
