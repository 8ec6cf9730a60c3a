//! Counter poller
//!
//! A `Poller` owns one data source's polling interval and countdown, and
//! calls back into the host to fetch a fresh set of counters once per
//! interval. The original agent's `getCountersFn_t` re-enters the agent to
//! write the sample from inside the callback itself; that pattern doesn't
//! translate to a borrow-checked `&mut Agent` without either unsafe code or
//! a deadlock, so this crate inverts it: the callback only *returns* the
//! counter elements it collected, and `Poller::tick` performs the
//! sequence/source-id stamping and the receiver write itself once the
//! callback returns.
//!
//! As with `Sampler`, countdown draws come from a single `Lcg` the caller
//! passes in by `&mut` reference rather than one this struct owns — see the
//! "Global PRNG state" design note.

use crate::address::DataSourceInstance;
use crate::counters::{CounterElement, CountersSample};
use crate::error::Result;
use crate::prng::Lcg;
use crate::receiver::Receiver;

/// A host-supplied counter source: called once per polling interval,
/// returns the counter elements to include in this tick's sample.
pub trait CounterSource {
    fn poll(&mut self) -> Vec<CounterElement>;
}

impl<F> CounterSource for F
where
    F: FnMut() -> Vec<CounterElement>,
{
    fn poll(&mut self) -> Vec<CounterElement> {
        (self)()
    }
}

/// Per-data-source counter polling state.
///
/// Grounded in the original agent's `SFLPoller`.
pub struct Poller {
    dsi: DataSourceInstance,
    /// Index into the owning `Agent`'s receiver list: which datagram stream
    /// this poller's counters samples are written to.
    pub(crate) receiver_index: usize,
    polling_interval: u32,
    countdown: u32,
    counter_seq_no: u32,
    counter_source: Box<dyn CounterSource>,
}

impl Poller {
    /// Creates a poller for `dsi` that asks `counter_source` for fresh
    /// counters every `polling_interval_secs` seconds. The initial
    /// countdown is drawn from `lcg` so that many pollers configured with
    /// the same interval don't all fire on the same tick.
    pub fn new(
        dsi: DataSourceInstance,
        receiver_index: usize,
        polling_interval_secs: u32,
        lcg: &mut Lcg,
        counter_source: Box<dyn CounterSource>,
    ) -> Self {
        let countdown = if polling_interval_secs == 0 {
            0
        } else {
            lcg.next(polling_interval_secs)
        };
        Self {
            dsi,
            receiver_index,
            polling_interval: polling_interval_secs,
            countdown,
            counter_seq_no: 0,
            counter_source,
        }
    }

    pub fn dsi(&self) -> DataSourceInstance {
        self.dsi
    }

    /// Index of the receiver this poller's counters samples are written to.
    pub fn receiver_index(&self) -> usize {
        self.receiver_index
    }

    /// Rebinds this poller to a different receiver, for hosts that assign
    /// the destination after the poller is created.
    pub fn set_receiver_index(&mut self, receiver_index: usize) {
        self.receiver_index = receiver_index;
    }

    pub fn polling_interval(&self) -> u32 {
        self.polling_interval
    }

    /// Reconfigures the polling interval and redraws the countdown phase,
    /// matching `sfl_poller_set_sFlowCpInterval`. A `polling_interval_secs`
    /// of `0` disables polling.
    pub fn set_interval(&mut self, polling_interval_secs: u32, lcg: &mut Lcg) {
        self.polling_interval = polling_interval_secs;
        self.countdown = if polling_interval_secs == 0 {
            0
        } else {
            lcg.next(polling_interval_secs)
        };
    }

    /// Advances the countdown by `elapsed_secs` (normally `1`, once per
    /// agent tick) and, if it reaches zero, polls the counter source and
    /// writes a counters sample through `receiver`.
    ///
    /// A `polling_interval` of `0` disables polling entirely, matching the
    /// original agent's convention that a zero interval means "never poll".
    pub fn tick(
        &mut self,
        elapsed_secs: u32,
        receiver: &mut Receiver,
        uptime_ms: u32,
    ) -> Option<Result<()>> {
        if self.polling_interval == 0 {
            return None;
        }
        if self.countdown > elapsed_secs {
            self.countdown -= elapsed_secs;
            return None;
        }
        self.countdown = self.polling_interval;
        Some(self.write_counters_sample(receiver, uptime_ms))
    }

    fn write_counters_sample(&mut self, receiver: &mut Receiver, uptime_ms: u32) -> Result<()> {
        let elements = self.counter_source.poll();
        self.counter_seq_no = self.counter_seq_no.wrapping_add(1);
        let sample = CountersSample {
            sequence_number: self.counter_seq_no,
            source_id: Some(self.dsi.source_id()),
            elements,
        };
        receiver.write_counters_sample(&sample, uptime_ms)
    }

    /// Resets the counters sequence number, matching
    /// `sfl_poller_resetCountersSeqNo`.
    pub fn reset(&mut self) {
        self.counter_seq_no = 0;
    }
}
