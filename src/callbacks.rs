//! Host capability surface
//!
//! The original C agent took `sendFn_t`/`errorFn_t` function pointers plus a
//! `void *magic` pointer that every callback received back so it could find
//! its host state. Rust has no need for the `magic` pointer — a trait object
//! (or a closure capturing whatever state the host needs) plays the same
//! role, and `alloc_fn`/`free_fn` simply disappear: ownership of every
//! buffer this crate allocates is expressed with `Box`/`Vec` and released by
//! the ordinary `Drop` glue the compiler already generates.

use crate::error::AgentError;

/// Where a receiver's finished datagrams go, and how runtime errors are
/// reported back to the host.
///
/// One `Transport` per [`crate::receiver::Receiver`] — the same shape as one
/// `sendFn_t`/`magic` pair per `SFLReceiver` in the original agent.
pub trait Transport {
    /// Send one complete, ready-to-transmit sFlow datagram.
    fn send(&mut self, datagram: &[u8]);

    /// Report a non-fatal encoding error. The default logs at `error` level
    /// through the `log` facade, which is what an agent that never installs
    /// a custom `errorFn_t` gets in the original implementation.
    fn error(&mut self, err: &AgentError) {
        log::error!("sflow agent error: {}", err);
    }
}

/// A `Transport` that discards datagrams. Useful in tests and for callers
/// that only want to exercise the sampling/encoding path without a socket.
#[derive(Debug, Default)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn send(&mut self, _datagram: &[u8]) {}
}

/// A `Transport` that appends every datagram to an in-memory `Vec`, for
/// assertions in tests.
#[derive(Debug, Default)]
pub struct CollectingTransport {
    pub datagrams: Vec<Vec<u8>>,
}

impl Transport for CollectingTransport {
    fn send(&mut self, datagram: &[u8]) {
        self.datagrams.push(datagram.to_vec());
    }
}
