//! XDR primitive writers and size calculators
//!
//! Mirrors the read side a decoder would use (`read_u32`, `read_string`, ...)
//! but in the write direction: every `put_*` function appends to a `Vec<u8>`
//! that doubles as the receiver's sample-collector buffer. Fields are
//! 4-byte-aligned and big-endian, per XDR.

use crate::address::Address;
use crate::error::{AgentError, Result};
use crate::flow::MemcacheOperation;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Appends a 32-bit word, big-endian.
pub(crate) fn put_net32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Appends a 64-bit word, big-endian, as two consecutive XDR quads.
pub(crate) fn put_net64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Appends 16 bytes verbatim (used for IPv6 addresses, which are already
/// naturally big-endian octets).
pub(crate) fn put_128(buf: &mut Vec<u8>, v: &[u8; 16]) {
    buf.extend_from_slice(v);
}

/// Appends an XDR opaque<>: a 4-byte length prefix, the bytes themselves,
/// and zero-padding up to the next 4-byte boundary.
pub(crate) fn put_opaque(buf: &mut Vec<u8>, data: &[u8]) {
    put_net32(buf, data.len() as u32);
    buf.extend_from_slice(data);
    let pad = (4 - (data.len() % 4)) % 4;
    buf.extend(std::iter::repeat(0u8).take(pad));
}

/// Appends an XDR string<>: identical wire shape to opaque<>.
pub(crate) fn put_string(buf: &mut Vec<u8>, s: &str) {
    put_opaque(buf, s.as_bytes());
}

/// Number of bytes an opaque/string of length `len` occupies on the wire,
/// length prefix and padding included.
pub(crate) fn opaque_encoding_length(len: usize) -> usize {
    4 + len + ((4 - (len % 4)) % 4)
}

/// Appends an `address_type` tag followed by the address bytes.
///
/// `Address::Undefined` encodes as an IPv4 tag with `0.0.0.0`, matching the
/// original agent's convention of never emitting an "unknown" address type
/// on the wire.
pub(crate) fn put_address(buf: &mut Vec<u8>, addr: &Address) {
    put_net32(buf, addr.type_tag());
    match addr {
        Address::Undefined => buf.extend_from_slice(&Ipv4Addr::UNSPECIFIED.octets()),
        Address::IPv4(a) => buf.extend_from_slice(&a.octets()),
        Address::IPv6(a) => put_128(buf, &a.octets()),
    }
}

pub(crate) fn put_ipv4(buf: &mut Vec<u8>, a: &Ipv4Addr) {
    buf.extend_from_slice(&a.octets());
}

pub(crate) fn put_ipv6(buf: &mut Vec<u8>, a: &Ipv6Addr) {
    put_128(buf, &a.octets());
}

/// Bytes an `ExtendedSocketIpv4` element occupies, tag+length header
/// excluded (`XDRSIZ_SFLEXTENDED_SOCKET4` in the original agent).
pub(crate) const SOCKET4_SIZE: usize = 20;
/// Bytes an `ExtendedSocketIpv6` element occupies, tag+length header
/// excluded (`XDRSIZ_SFLEXTENDED_SOCKET6` in the original agent).
pub(crate) const SOCKET6_SIZE: usize = 44;

pub(crate) fn put_socket4(
    buf: &mut Vec<u8>,
    protocol: u32,
    local_ip: &Ipv4Addr,
    remote_ip: &Ipv4Addr,
    local_port: u32,
    remote_port: u32,
) {
    put_net32(buf, protocol);
    put_ipv4(buf, local_ip);
    put_ipv4(buf, remote_ip);
    put_net32(buf, local_port);
    put_net32(buf, remote_port);
}

pub(crate) fn put_socket6(
    buf: &mut Vec<u8>,
    protocol: u32,
    local_ip: &Ipv6Addr,
    remote_ip: &Ipv6Addr,
    local_port: u32,
    remote_port: u32,
) {
    put_net32(buf, protocol);
    put_ipv6(buf, local_ip);
    put_ipv6(buf, remote_ip);
    put_net32(buf, local_port);
    put_net32(buf, remote_port);
}

/// Bytes a `MemcacheOperation` occupies, tag+length header excluded.
pub(crate) fn memcache_operation_encoding_length(op: &MemcacheOperation) -> usize {
    4 // protocol
        + 4 // cmd
        + opaque_encoding_length(op.key.len())
        + 4 // nkeys
        + 4 // value_bytes
        + 4 // duration_us
        + 4 // status
}

pub(crate) fn put_memcache_operation(buf: &mut Vec<u8>, op: &MemcacheOperation) {
    put_net32(buf, op.protocol as u32);
    put_net32(buf, op.cmd as u32);
    put_string(buf, &op.key);
    put_net32(buf, op.nkeys);
    put_net32(buf, op.value_bytes);
    put_net32(buf, op.duration_us);
    put_net32(buf, op.status as u32);
}

/// Bytes a `MemcacheCounters` block occupies: 30 words + 3 64-bit counters,
/// i.e. 36 XDR words (`XDRSIZ_SFLMEMCACHE_COUNTERS` in the original agent).
pub(crate) const MEMCACHE_COUNTERS_SIZE: usize = 36 * 4;

pub(crate) fn put_memcache_counters(buf: &mut Vec<u8>, c: &crate::counters::MemcacheCounters) {
    put_net32(buf, c.uptime);
    put_net32(buf, c.rusage_user);
    put_net32(buf, c.rusage_system);
    put_net32(buf, c.curr_connections);
    put_net32(buf, c.total_connections);
    put_net32(buf, c.connection_structures);
    put_net32(buf, c.cmd_get);
    put_net32(buf, c.cmd_set);
    put_net32(buf, c.cmd_flush);
    put_net32(buf, c.get_hits);
    put_net32(buf, c.get_misses);
    put_net32(buf, c.delete_misses);
    put_net32(buf, c.delete_hits);
    put_net32(buf, c.incr_misses);
    put_net32(buf, c.incr_hits);
    put_net32(buf, c.decr_misses);
    put_net32(buf, c.decr_hits);
    put_net32(buf, c.cas_misses);
    put_net32(buf, c.cas_hits);
    put_net32(buf, c.cas_badval);
    put_net32(buf, c.auth_cmds);
    put_net32(buf, c.auth_errors);
    put_net64(buf, c.bytes_read);
    put_net64(buf, c.bytes_written);
    put_net32(buf, c.limit_maxbytes);
    put_net32(buf, c.accepting_conns);
    put_net32(buf, c.listen_disabled_num);
    put_net32(buf, c.threads);
    put_net32(buf, c.conn_yields);
    put_net64(buf, c.bytes);
    put_net32(buf, c.curr_items);
    put_net32(buf, c.total_items);
    put_net32(buf, c.evictions);
}

/// Maps a tag this crate doesn't know how to encode into an error, rather
/// than silently dropping it. There is currently no way to construct a
/// `FlowElement`/`CounterElement` with an unrecognized tag from safe code,
/// so this is defensive against future variants more than reachable today.
pub(crate) fn unknown_tag(tag: u32) -> AgentError {
    AgentError::UnknownTag(tag)
}

pub(crate) fn check_written(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(AgentError::EncodingMismatch { expected, actual });
    }
    Ok(())
}
