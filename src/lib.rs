//! A transport-agnostic MQTT 3.1.1 protocol engine.
//!
//! Everything in this crate operates on byte slices the caller owns: packets
//! are modelled in [`packet`], encoded into caller-provided buffers and
//! decoded from complete packet slices. [`io::ReadContext`] reassembles
//! packets from arbitrarily fragmented input, and [`client::Client`] drives
//! the client-side protocol flows without performing any I/O or reading any
//! clock. The caller moves bytes and reports time; the crate decides what
//! they mean.
//!
//! No allocation is performed. All bounded storage sits in `heapless`
//! containers whose capacities are chosen through const generics.

#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod client;
pub mod header;
pub mod io;
pub mod packet;
pub mod session;
pub mod types;
