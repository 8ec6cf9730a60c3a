//! Flow sampler
//!
//! A `Sampler` owns the control-plane state for one sampled data source: its
//! configured rate, the running totals a collector uses to normalize
//! samples back out to an estimated packet count, and the sequence number
//! stamped on every flow sample it writes. The hot-path "should this packet
//! be sampled" decision is deliberately not here — see `prng.rs` — a
//! `Sampler` only ever sees packets the host has already decided to sample.
//!
//! Skip-count draws come from a single `Lcg` the caller passes in by
//! `&mut` reference rather than one this struct owns: the original agent's
//! skip/phase generator is a process-wide counter, and an `Agent` holding
//! the one live `Lcg` (see `agent.rs`) is this crate's stand-in for that —
//! see the "Global PRNG state" design note.

use crate::address::DataSourceInstance;
use crate::error::Result;
use crate::flow::FlowSample;
use crate::prng::Lcg;
use crate::receiver::Receiver;

/// Per-data-source flow sampling state.
///
/// Grounded in the original agent's `SFLSampler`: a DSI, a configured rate,
/// running `sample_pool`/`drops` counters, and a flow sequence number.
pub struct Sampler {
    dsi: DataSourceInstance,
    /// Index into the owning `Agent`'s receiver list: which datagram stream
    /// this sampler's flow samples are written to.
    pub(crate) receiver_index: usize,
    sampling_rate: u32,
    sample_pool: u32,
    drops: u32,
    flow_seq_no: u32,
    skip: u32,
}

impl Sampler {
    /// Creates a sampler for `dsi` at the given rate (`1` samples every
    /// packet; `0` is treated as `1`, matching the original's refusal to
    /// divide by a zero rate). Draws its initial skip count from `lcg`,
    /// which scatters this sampler's phase relative to any others sharing
    /// the same rate and the same `Lcg` stream.
    pub fn new(dsi: DataSourceInstance, receiver_index: usize, sampling_rate: u32, lcg: &mut Lcg) -> Self {
        let sampling_rate = sampling_rate.max(1);
        let skip = lcg.next(sampling_rate);
        Self {
            dsi,
            receiver_index,
            sampling_rate,
            sample_pool: 0,
            drops: 0,
            flow_seq_no: 0,
            skip,
        }
    }

    pub fn dsi(&self) -> DataSourceInstance {
        self.dsi
    }

    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate
    }

    /// Index of the receiver this sampler's flow samples are written to.
    pub fn receiver_index(&self) -> usize {
        self.receiver_index
    }

    /// Rebinds this sampler to a different receiver, for hosts that
    /// assign the destination after the sampler is created.
    pub fn set_receiver_index(&mut self, receiver_index: usize) {
        self.receiver_index = receiver_index;
    }

    /// The skip count drawn the last time the rate was (re)configured, i.e.
    /// `uniform(1..=rate)` — the phase-scatter value testable property #7
    /// checks.
    pub fn skip(&self) -> u32 {
        self.skip
    }

    /// Reconfigures the sampling rate and redraws the skip count, exactly
    /// as `sfl_sampler_set_sFlowFsPacketSamplingRate` does.
    pub fn set_rate(&mut self, sampling_rate: u32, lcg: &mut Lcg) {
        self.sampling_rate = sampling_rate.max(1);
        self.skip = lcg.next(self.sampling_rate);
    }

    /// Exposed for hosts that manage their own sampling countdown rather
    /// than relying on this crate's `skip` field: draws `uniform(1..=2n-1)`
    /// from `lcg` (mean ≈ `n`), independent of the internal `skip` counter
    /// above.
    pub fn next_skip(&self, lcg: &mut Lcg) -> u32 {
        let limit = (2 * self.sampling_rate).saturating_sub(1).max(1);
        lcg.next(limit)
    }

    /// Accumulates the number of packets considered since the last sample,
    /// for the collector's un-sampling math.
    pub fn add_to_sample_pool(&mut self, packets: u32) {
        self.sample_pool = self.sample_pool.wrapping_add(packets);
    }

    pub fn record_drop(&mut self) {
        self.drops = self.drops.wrapping_add(1);
    }

    /// Stamps `sample`'s sequence number and source id, and fills in
    /// sampling rate/pool/drops only where the caller left them `None` —
    /// a caller that already set one of those (e.g. a host aggregating
    /// `sample_pool`/`drops` across worker threads) has its value honored
    /// rather than overwritten. Forwards the result to `receiver` for
    /// encoding.
    pub fn write_flow_sample(
        &mut self,
        receiver: &mut Receiver,
        mut sample: FlowSample,
        uptime_ms: u32,
    ) -> Result<()> {
        self.flow_seq_no = self.flow_seq_no.wrapping_add(1);
        sample.sequence_number = self.flow_seq_no;
        sample.source_id = Some(self.dsi.source_id());
        sample.sampling_rate.get_or_insert(self.sampling_rate);
        sample.sample_pool.get_or_insert(self.sample_pool);
        sample.drops.get_or_insert(self.drops);
        receiver.write_flow_sample(&sample, uptime_ms)
    }

    /// Resets the flow sequence number to signal a collector that the next
    /// delta it sees on the running `sample_pool` is a discontinuity, not a
    /// loss. `sample_pool`/`drops` themselves are left untouched, matching
    /// `sfl_sampler_resetFlowSeqNo` — only the sequence number resets.
    pub fn reset(&mut self) {
        self.flow_seq_no = 0;
    }
}
