//! Datagram assembly and transmission
//!
//! Each `Receiver` owns one fixed-capacity sample collector buffer, one
//! destination, and one monotonically increasing datagram sequence number.
//! Samples are appended to the buffer until the next one would overflow the
//! configured maximum datagram size, at which point the buffer is flushed as
//! a complete sFlow v5 datagram and reset to empty.

use crate::address::Address;
use crate::callbacks::Transport;
use crate::counters::{CounterElement, CountersSample};
use crate::error::{AgentError, Result};
use crate::flow::{FlowElement, FlowSample};
use crate::wire::{
    check_written, memcache_operation_encoding_length, put_address, put_memcache_counters,
    put_memcache_operation, put_net32, put_socket4, put_socket6, MEMCACHE_COUNTERS_SIZE,
    SOCKET4_SIZE, SOCKET6_SIZE,
};

/// Largest datagram this crate will ever assemble by default, matching
/// `SFL_MAX_DATAGRAM_SIZE` in the original agent.
pub const MAX_DATAGRAM_SIZE: usize = 1500;
/// Smallest datagram size a caller may configure, matching
/// `SFL_MIN_DATAGRAM_SIZE`.
pub const MIN_DATAGRAM_SIZE: usize = 200;
/// Datagram size used when a caller doesn't configure one explicitly,
/// matching `SFL_DEFAULT_DATAGRAM_SIZE`.
pub const DEFAULT_DATAGRAM_SIZE: usize = 1400;
/// Slack reserved on top of the configured datagram size for the collector
/// buffer itself, matching `SFL_DATA_PAD`.
const SAMPLE_COLLECTOR_PAD: usize = 400;

const SFLOW_VERSION: u32 = 5;
const SAMPLE_TAG_FLOW: u32 = 1;
const SAMPLE_TAG_COUNTERS: u32 = 2;

/// `tag(4) + length(4) + sequence_number(4) + source_id(4) + sampling_rate(4)
/// + sample_pool(4) + drops(4) + input(4) + output(4) + num_elements(4)`.
const FLOW_SAMPLE_BASE_SIZE: usize = 40;
/// `tag(4) + length(4) + sequence_number(4) + source_id(4) + num_counters(4)`.
const COUNTERS_SAMPLE_BASE_SIZE: usize = 20;

/// Assembles and transmits sFlow v5 datagrams on behalf of one or more
/// samplers and pollers.
///
/// # XDR Definition ([sFlow v5](https://sflow.org/sflow_version_5.txt))
/// ```text
/// struct sample_datagram_v5 {
///    address agent_address;
///    unsigned int sub_agent_id;
///    unsigned int sequence_number;
///    unsigned int uptime;
///    sample_record samples<>;
/// }
/// ```
pub struct Receiver {
    agent_address: Address,
    sub_agent_id: u32,
    max_datagram_size: usize,
    sequence_number: u32,
    /// Encoded sample records, excluding the datagram envelope. Flushed and
    /// cleared on overflow or on an explicit `tick`.
    samples: Vec<u8>,
    num_samples: u32,
    transport: Box<dyn Transport>,
}

impl Receiver {
    pub fn new(
        agent_address: Address,
        sub_agent_id: u32,
        max_datagram_size: usize,
        transport: Box<dyn Transport>,
    ) -> Self {
        let max_datagram_size = max_datagram_size.clamp(MIN_DATAGRAM_SIZE, usize::MAX);
        Self {
            agent_address,
            sub_agent_id,
            max_datagram_size,
            sequence_number: 0,
            samples: Vec::with_capacity(max_datagram_size + SAMPLE_COLLECTOR_PAD),
            num_samples: 0,
            transport,
        }
    }

    /// Current maximum datagram size this receiver will assemble.
    pub fn max_datagram_size(&self) -> usize {
        self.max_datagram_size
    }

    /// Reconfigures the maximum datagram size, clamped to
    /// `>= MIN_DATAGRAM_SIZE`, matching the original agent's
    /// `sfl_receiver_set_sFlowRcvrMaximumDatagramSize`. Takes effect on the
    /// next sample written; it does not itself force a flush of whatever is
    /// already buffered.
    pub fn set_max_datagram_size(&mut self, max_datagram_size: usize) {
        self.max_datagram_size = max_datagram_size.clamp(MIN_DATAGRAM_SIZE, usize::MAX);
    }

    fn header_size(&self) -> usize {
        self.agent_address.header_quads() * 4
    }

    /// Flushes a pending, non-empty datagram. Called by `Agent::tick` once
    /// per tick after all samplers and pollers have run, so that a receiver
    /// never holds a partial datagram across a full tick boundary.
    pub fn tick(&mut self, uptime_ms: u32) {
        if !self.samples.is_empty() {
            self.flush(uptime_ms);
        }
    }

    fn flush(&mut self, uptime_ms: u32) {
        let mut datagram = Vec::with_capacity(self.header_size() + self.samples.len());
        put_net32(&mut datagram, SFLOW_VERSION);
        put_address(&mut datagram, &self.agent_address);
        put_net32(&mut datagram, self.sub_agent_id);
        self.sequence_number = self.sequence_number.wrapping_add(1);
        put_net32(&mut datagram, self.sequence_number);
        put_net32(&mut datagram, uptime_ms);
        put_net32(&mut datagram, self.num_samples);
        datagram.extend_from_slice(&self.samples);
        self.transport.send(&datagram);
        self.samples.clear();
        self.num_samples = 0;
    }

    /// Flushes the current datagram if buffering `packed_size` more bytes
    /// would overflow it. Does not itself reject oversized samples — callers
    /// check that against their own guard (`max - 32` for flow samples,
    /// `max / 2` for counters samples) before calling this.
    fn make_room(&mut self, packed_size: usize, uptime_ms: u32) {
        let budget = self.max_datagram_size.saturating_sub(self.header_size());
        if self.samples.len() + packed_size >= budget {
            self.flush(uptime_ms);
        }
    }

    pub(crate) fn write_flow_sample(&mut self, sample: &FlowSample, uptime_ms: u32) -> Result<()> {
        let packed_size = compute_flow_sample_size(sample)?;
        if packed_size > self.max_datagram_size.saturating_sub(32) {
            return Err(AgentError::EncodingOverflow(format!(
                "flow sample of {} bytes too big for a {}-byte datagram",
                packed_size, self.max_datagram_size
            )));
        }
        self.make_room(packed_size, uptime_ms);
        let before = self.samples.len();
        encode_flow_sample(&mut self.samples, sample, packed_size)?;
        let written = self.samples.len() - before;
        if let Err(e) = check_written(packed_size, written) {
            self.samples.truncate(before);
            return Err(e);
        }
        self.num_samples += 1;
        Ok(())
    }

    pub(crate) fn write_counters_sample(
        &mut self,
        sample: &CountersSample,
        uptime_ms: u32,
    ) -> Result<()> {
        let packed_size = compute_counters_sample_size(sample)?;
        if packed_size > self.max_datagram_size / 2 {
            return Err(AgentError::EncodingOverflow(format!(
                "counters sample of {} bytes too big for a {}-byte datagram",
                packed_size, self.max_datagram_size
            )));
        }
        self.make_room(packed_size, uptime_ms);
        let before = self.samples.len();
        encode_counters_sample(&mut self.samples, sample, packed_size)?;
        let written = self.samples.len() - before;
        if let Err(e) = check_written(packed_size, written) {
            self.samples.truncate(before);
            return Err(e);
        }
        self.num_samples += 1;
        Ok(())
    }

    pub(crate) fn report_error(&mut self, err: &AgentError) {
        self.transport.error(err);
    }
}

fn flow_element_encoding_length(element: &FlowElement) -> usize {
    let body = match element {
        FlowElement::ExtendedSocketIpv4(_) => SOCKET4_SIZE,
        FlowElement::ExtendedSocketIpv6(_) => SOCKET6_SIZE,
        FlowElement::Memcache(op) => memcache_operation_encoding_length(op),
    };
    8 + body // format(4) + length(4) + body
}

fn counter_element_encoding_length(element: &CounterElement) -> usize {
    let body = match element {
        CounterElement::Memcache(_) => MEMCACHE_COUNTERS_SIZE,
    };
    8 + body
}

fn compute_flow_sample_size(sample: &FlowSample) -> Result<usize> {
    let mut size = FLOW_SAMPLE_BASE_SIZE;
    for element in &sample.elements {
        size += flow_element_encoding_length(element);
    }
    Ok(size)
}

fn compute_counters_sample_size(sample: &CountersSample) -> Result<usize> {
    let mut size = COUNTERS_SAMPLE_BASE_SIZE;
    for element in &sample.elements {
        size += counter_element_encoding_length(element);
    }
    Ok(size)
}

fn encode_flow_sample(buf: &mut Vec<u8>, sample: &FlowSample, packed_size: usize) -> Result<()> {
    put_net32(buf, SAMPLE_TAG_FLOW);
    // length excludes the tag and the length field itself.
    put_net32(buf, (packed_size - 8) as u32);
    put_net32(buf, sample.sequence_number);
    put_net32(buf, sample.source_id.map(|d| d.0).unwrap_or(0));
    put_net32(buf, sample.sampling_rate.unwrap_or(0));
    put_net32(buf, sample.sample_pool.unwrap_or(0));
    put_net32(buf, sample.drops.unwrap_or(0));
    put_net32(buf, sample.input.0);
    put_net32(buf, sample.output.0);
    put_net32(buf, sample.elements.len() as u32);
    for element in &sample.elements {
        encode_flow_element(buf, element)?;
    }
    Ok(())
}

fn encode_flow_element(buf: &mut Vec<u8>, element: &FlowElement) -> Result<()> {
    let body_len = flow_element_encoding_length(element) - 8;
    put_net32(buf, element.tag());
    put_net32(buf, body_len as u32);
    match element {
        FlowElement::ExtendedSocketIpv4(s) => {
            put_socket4(
                buf,
                s.protocol,
                &s.local_ip,
                &s.remote_ip,
                s.local_port,
                s.remote_port,
            );
        }
        FlowElement::ExtendedSocketIpv6(s) => {
            put_socket6(
                buf,
                s.protocol,
                &s.local_ip,
                &s.remote_ip,
                s.local_port,
                s.remote_port,
            );
        }
        FlowElement::Memcache(op) => put_memcache_operation(buf, op),
    }
    Ok(())
}

fn encode_counters_sample(
    buf: &mut Vec<u8>,
    sample: &CountersSample,
    packed_size: usize,
) -> Result<()> {
    put_net32(buf, SAMPLE_TAG_COUNTERS);
    put_net32(buf, (packed_size - 8) as u32);
    put_net32(buf, sample.sequence_number);
    put_net32(buf, sample.source_id.map(|d| d.0).unwrap_or(0));
    put_net32(buf, sample.elements.len() as u32);
    for element in &sample.elements {
        encode_counter_element(buf, element)?;
    }
    Ok(())
}

fn encode_counter_element(buf: &mut Vec<u8>, element: &CounterElement) -> Result<()> {
    let body_len = counter_element_encoding_length(element) - 8;
    put_net32(buf, element.tag());
    put_net32(buf, body_len as u32);
    match element {
        CounterElement::Memcache(c) => put_memcache_counters(buf, c),
    }
    Ok(())
}
