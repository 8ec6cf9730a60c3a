//! Unit tests organized by module
//!
//! This module contains unit tests split into logical groups matching the
//! source code structure.

mod address;
mod agent;
mod config;
mod poller;
mod prng;
mod receiver;
