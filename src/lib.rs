//! sFlow v5 Agent Library
//!
//! This crate is the embeddable core of an sFlow v5 agent for a
//! memcached-like key-value server: it samples per-request events, polls
//! server counters, and XDR-encodes both into sFlow v5 datagrams as
//! specified at <https://sflow.org/sflow_version_5.txt>.
//!
//! It does not own a socket. A host hands it a [`callbacks::Transport`] per
//! receiver and otherwise drives it from two places: the per-request hot
//! path calls [`Agent::write_flow_sample`] for events it has already decided
//! to sample, and a once-a-second timer calls [`Agent::tick`].
//!
//! # Example
//!
//! ```
//! use sflow_agent::address::{Address, DataSourceInstance, DsClass};
//! use sflow_agent::callbacks::NullTransport;
//! use sflow_agent::flow::{FlowElement, FlowSample, MemcacheCommand, MemcacheOperation, MemcacheProtocol, MemcacheStatus};
//! use sflow_agent::Agent;
//! use std::net::Ipv4Addr;
//!
//! let mut agent = Agent::new(Address::IPv4(Ipv4Addr::new(10, 1, 2, 3)), 0, 1_700_000_000, 0, 1_700_000_000);
//! let receiver = agent.add_receiver(Box::new(NullTransport));
//! let dsi = DataSourceInstance::new(DsClass::LogicalEntity, 65537, 0);
//! agent.add_sampler(dsi, receiver, 400);
//!
//! let sample = FlowSample::new(vec![FlowElement::Memcache(MemcacheOperation {
//!     protocol: MemcacheProtocol::Ascii,
//!     cmd: MemcacheCommand::Get,
//!     key: "user:42".to_string(),
//!     nkeys: 1,
//!     value_bytes: 128,
//!     duration_us: 85,
//!     status: MemcacheStatus::Ok,
//! })]);
//! agent.write_flow_sample(dsi, sample).unwrap();
//! agent.tick(1_700_000_001);
//! ```

pub mod address;
pub mod agent;
pub mod callbacks;
pub mod config;
pub mod counters;
pub mod error;
pub mod flow;
pub mod poller;
pub mod prng;
pub mod receiver;
pub mod sampler;
pub mod wire;

pub use agent::Agent;
pub use config::{CollectorTarget, SflowConfig};
pub use error::{AgentError, Result};
