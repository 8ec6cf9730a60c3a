//! Agent: registry and lifecycle root
//!
//! An `Agent` owns every `Sampler`, `Poller`, and `Receiver` a host creates;
//! they're reachable only through the agent's factory methods and dropped
//! together when the agent itself is. It also owns the one shared `Lcg`
//! used to scatter skip counts and poll-interval countdowns across however
//! many samplers and pollers get created — see the "Global PRNG state"
//! design note in `prng.rs`. Separately, it is the one place that knows
//! both the agent's boot time/address and each sampler's configured rate,
//! so it is also where the hot-path worker seed and sampling threshold a
//! host publishes to its per-worker xorshift32 generators gets computed —
//! see [`Agent::worker_sampling_params`].
//!
//! # Concurrency
//!
//! Per §5 of the design, this crate is not itself concurrent: a host that
//! shares one `Agent` across threads must hold a single mutual-exclusion
//! guard around every call that mutates it (`write_flow_sample`, `tick`,
//! `add_*`, `set_*`). Rust expresses that contract directly — wrap the
//! `Agent` in a `Mutex` rather than threading a lock token through every
//! method, as the original C agent's callers did with `pthread_mutex_t`.

use crate::address::{Address, DataSourceInstance};
use crate::callbacks::Transport;
use crate::error::Result;
use crate::flow::FlowSample;
use crate::poller::{CounterSource, Poller};
use crate::prng::{derive_seed, sampling_threshold, worker_seed, Lcg};
use crate::receiver::{Receiver, DEFAULT_DATAGRAM_SIZE};
use crate::sampler::Sampler;

/// Registry and lifecycle root for one sFlow agent identity.
///
/// Grounded in the original agent's `SFLAgent`: an address, a sub-agent id,
/// a boot time, and the three ordered collections this module's siblings
/// implement.
pub struct Agent {
    agent_address: Address,
    sub_agent_id: u32,
    boot_time_secs: u32,
    boot_time_usecs: u32,
    now_secs: u32,
    lcg: Lcg,
    receivers: Vec<Receiver>,
    /// Kept sorted by DSI, matching the original's linked-list registries —
    /// see the "Linked-list registries" design note.
    samplers: Vec<Sampler>,
    pollers: Vec<Poller>,
}

impl Agent {
    /// Initializes a fresh agent identity. `now_secs` is the current
    /// wall-clock time at construction, matching the original agent's
    /// `init(... now ...)`.
    ///
    /// The shared control-plane `Lcg` always starts from the fixed state
    /// `sfl_random` hardcodes (`state = 1`, `sflow_api.c`) — it is *not*
    /// seeded from `boot_time_secs`/`boot_time_usecs`/`agent_address`.
    /// Those three instead seed the hot-path worker generator a host seeds
    /// its own per-worker xorshift32 state from, published through
    /// [`Agent::worker_sampling_params`]; the two generators are kept
    /// strictly separate per §4.6/§9.
    pub fn new(
        agent_address: Address,
        sub_agent_id: u32,
        boot_time_secs: u32,
        boot_time_usecs: u32,
        now_secs: u32,
    ) -> Self {
        Self {
            agent_address,
            sub_agent_id,
            boot_time_secs,
            boot_time_usecs,
            now_secs,
            lcg: Lcg::new(1),
            receivers: Vec::new(),
            samplers: Vec::new(),
            pollers: Vec::new(),
        }
    }

    pub fn agent_address(&self) -> Address {
        self.agent_address
    }

    pub fn sub_agent_id(&self) -> u32 {
        self.sub_agent_id
    }

    /// Publishes the `(seed, threshold)` pair a host should seed worker
    /// `worker_index`'s hot-path xorshift32 generator with, for `dsi`'s
    /// currently configured sampling rate. The generator itself runs
    /// lock-free in the host's own per-worker state — this crate only
    /// derives what it should start from, so a fleet of agents that boot
    /// at the same instant doesn't sample in lock step (see
    /// `prng::derive_seed`). Returns `None` if no sampler is registered
    /// for `dsi`.
    pub fn worker_sampling_params(&self, dsi: DataSourceInstance, worker_index: u32) -> Option<(u32, u32)> {
        let sampler = self.sampler(dsi)?;
        let shared_seed = derive_seed(self.boot_time_secs, self.boot_time_usecs, &self.agent_address);
        Some((
            worker_seed(shared_seed, worker_index),
            sampling_threshold(sampler.sampling_rate()),
        ))
    }

    fn uptime_ms(&self) -> u32 {
        self.now_secs
            .saturating_sub(self.boot_time_secs)
            .saturating_mul(1000)
    }

    /// Appends a new receiver and returns its index, which callers pass to
    /// [`Agent::add_sampler`]/[`Agent::add_poller`] to bind a data source to
    /// it. Indices are stable for the agent's lifetime: receivers are only
    /// ever appended, never removed, matching the original's "preserves
    /// prior numeric indices for host-side tracking".
    pub fn add_receiver(&mut self, transport: Box<dyn Transport>) -> usize {
        self.add_receiver_with_datagram_size(transport, DEFAULT_DATAGRAM_SIZE)
    }

    /// Like [`Agent::add_receiver`], but with a non-default maximum
    /// datagram size (clamped to `>= MIN_DATAGRAM_SIZE` by `Receiver::new`).
    pub fn add_receiver_with_datagram_size(
        &mut self,
        transport: Box<dyn Transport>,
        max_datagram_size: usize,
    ) -> usize {
        self.receivers.push(Receiver::new(
            self.agent_address,
            self.sub_agent_id,
            max_datagram_size,
            transport,
        ));
        self.receivers.len() - 1
    }

    pub fn receiver(&self, index: usize) -> Option<&Receiver> {
        self.receivers.get(index)
    }

    pub fn receiver_mut(&mut self, index: usize) -> Option<&mut Receiver> {
        self.receivers.get_mut(index)
    }

    fn sampler_slot(&self, dsi: DataSourceInstance) -> std::result::Result<usize, usize> {
        self.samplers.binary_search_by_key(&dsi, |s| s.dsi())
    }

    fn poller_slot(&self, dsi: DataSourceInstance) -> std::result::Result<usize, usize> {
        self.pollers.binary_search_by_key(&dsi, |p| p.dsi())
    }

    /// Inserts a sampler for `dsi`, sorted into the registry by DSI.
    /// Registering the same `dsi` twice is idempotent: the existing sampler
    /// is returned unchanged rather than duplicated, matching the original
    /// `sfl_agent_addSampler`'s "insertion at a duplicate DSI returns the
    /// existing entry".
    pub fn add_sampler(
        &mut self,
        dsi: DataSourceInstance,
        receiver_index: usize,
        sampling_rate: u32,
    ) -> &mut Sampler {
        match self.sampler_slot(dsi) {
            Ok(idx) => &mut self.samplers[idx],
            Err(idx) => {
                let sampler = Sampler::new(dsi, receiver_index, sampling_rate, &mut self.lcg);
                self.samplers.insert(idx, sampler);
                &mut self.samplers[idx]
            }
        }
    }

    /// Inserts a poller for `dsi`, sorted into the registry by DSI, the same
    /// idempotent-on-duplicate-DSI contract as [`Agent::add_sampler`].
    pub fn add_poller(
        &mut self,
        dsi: DataSourceInstance,
        receiver_index: usize,
        polling_interval_secs: u32,
        counter_source: Box<dyn CounterSource>,
    ) -> &mut Poller {
        match self.poller_slot(dsi) {
            Ok(idx) => &mut self.pollers[idx],
            Err(idx) => {
                let poller = Poller::new(
                    dsi,
                    receiver_index,
                    polling_interval_secs,
                    &mut self.lcg,
                    counter_source,
                );
                self.pollers.insert(idx, poller);
                &mut self.pollers[idx]
            }
        }
    }

    /// All registered samplers, in ascending DSI order — the sorted,
    /// MIB-friendly enumeration the "Linked-list registries" design note
    /// calls for.
    pub fn samplers(&self) -> &[Sampler] {
        &self.samplers
    }

    /// All registered pollers, in ascending DSI order.
    pub fn pollers(&self) -> &[Poller] {
        &self.pollers
    }

    pub fn sampler(&self, dsi: DataSourceInstance) -> Option<&Sampler> {
        self.sampler_slot(dsi).ok().map(|idx| &self.samplers[idx])
    }

    pub fn sampler_mut(&mut self, dsi: DataSourceInstance) -> Option<&mut Sampler> {
        self.sampler_slot(dsi).ok().map(move |idx| &mut self.samplers[idx])
    }

    pub fn poller(&self, dsi: DataSourceInstance) -> Option<&Poller> {
        self.poller_slot(dsi).ok().map(|idx| &self.pollers[idx])
    }

    pub fn poller_mut(&mut self, dsi: DataSourceInstance) -> Option<&mut Poller> {
        self.poller_slot(dsi).ok().map(move |idx| &mut self.pollers[idx])
    }

    /// Reconfigures `dsi`'s sampling rate, redrawing its skip count from the
    /// agent's shared `Lcg`. No-op if no sampler is registered for `dsi`.
    pub fn set_sampling_rate(&mut self, dsi: DataSourceInstance, sampling_rate: u32) {
        if let Ok(idx) = self.sampler_slot(dsi) {
            self.samplers[idx].set_rate(sampling_rate, &mut self.lcg);
        }
    }

    /// Reconfigures `dsi`'s polling interval, redrawing its countdown from
    /// the agent's shared `Lcg`. No-op if no poller is registered for `dsi`.
    pub fn set_polling_interval(&mut self, dsi: DataSourceInstance, polling_interval_secs: u32) {
        if let Ok(idx) = self.poller_slot(dsi) {
            self.pollers[idx].set_interval(polling_interval_secs, &mut self.lcg);
        }
    }

    /// Submits one flow sample on behalf of `dsi`'s sampler, stamping its
    /// sequence number and routing it to that sampler's bound receiver. A
    /// recoverable encoding error is reported through the receiver's
    /// `Transport::error` and does not otherwise propagate, matching §7's
    /// "every error is recovered locally" policy; it is still returned so
    /// callers that want to observe it (e.g. tests) can.
    pub fn write_flow_sample(&mut self, dsi: DataSourceInstance, sample: FlowSample) -> Result<()> {
        let uptime_ms = self.uptime_ms();
        let idx = match self.sampler_slot(dsi) {
            Ok(idx) => idx,
            Err(_) => return Ok(()), // no sampler registered: drop silently
        };
        let receiver_index = self.samplers[idx].receiver_index;
        let receiver = match self.receivers.get_mut(receiver_index) {
            Some(r) => r,
            None => return Ok(()), // no receiver bound: drop silently
        };
        let result = self.samplers[idx].write_flow_sample(receiver, sample, uptime_ms);
        if let Err(ref e) = result {
            receiver.report_error(e);
        }
        result
    }

    /// Advances the agent's clock to `now_secs`, flushes every receiver's
    /// pending datagram, then ticks every poller. Receivers are flushed
    /// first so any samples queued during the previous second go out
    /// before a poller's counters sample is appended to a fresh buffer —
    /// see §4.5's ordering note.
    pub fn tick(&mut self, now_secs: u32) {
        let elapsed = now_secs.saturating_sub(self.now_secs).max(1);
        self.now_secs = now_secs;
        let uptime_ms = self.uptime_ms();

        for receiver in &mut self.receivers {
            receiver.tick(uptime_ms);
        }

        for poller in &mut self.pollers {
            let receiver = match self.receivers.get_mut(poller.receiver_index) {
                Some(r) => r,
                None => continue,
            };
            if let Some(Err(e)) = poller.tick(elapsed, receiver, uptime_ms) {
                receiver.report_error(&e);
            }
        }
    }

    /// Drops every sampler, poller, and receiver this agent owns. Rust's
    /// `Drop` glue does this automatically when the agent itself goes out
    /// of scope; this method exists for callers that want an explicit,
    /// early release point, mirroring the original `sfl_agent_release`.
    pub fn release(self) {
        drop(self);
    }
}
